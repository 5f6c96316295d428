//! Value records of a cost estimate ("smeta").
//!
//! The records are plain data assembled by whoever loads the estimate; the
//! engine never talks to storage. Monetary fields are [`Money`] (minor units).
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Money;

/// Funding bucket that covers a cost line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancingSource {
    /// Covered by the ministry ("vazirlik").
    #[default]
    Ministry,
    /// Covered by the co-financing organization ("tashkilot").
    Organization,
}

/// Management/production partition shared by staff and other expenses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostGroup {
    #[default]
    Management,
    Production,
}

impl CostGroup {
    pub const ALL: [CostGroup; 2] = [CostGroup::Management, CostGroup::Production];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    #[default]
    Draft,
    Completed,
}

/// A cost line with a total and the source that funds it.
pub trait CostLine {
    fn total(&self) -> Money;
    fn financing_source(&self) -> FinancingSource;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub staff_type: CostGroup,
    pub position: String,
    pub count: u32,
    pub monthly_salary: Money,
    pub duration_months: u16,
    pub financing_source: FinancingSource,
}

impl Employee {
    /// Salary of all `count` employees for one month.
    #[must_use]
    pub fn monthly_total(&self) -> Money {
        self.monthly_salary.times(u64::from(self.count))
    }
}

impl CostLine for Employee {
    fn total(&self) -> Money {
        self.monthly_total().times(u64::from(self.duration_months))
    }

    fn financing_source(&self) -> FinancingSource {
        self.financing_source
    }
}

fn default_unit() -> String {
    "dona".to_string()
}

/// Equipment purchased for the project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Purchase link, may be empty.
    #[serde(default)]
    pub link: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub quantity: u32,
    pub price: Money,
    pub financing_source: FinancingSource,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMaterial {
    pub name: String,
    pub unit: String,
    pub quantity: u32,
    pub price: Money,
    pub financing_source: FinancingSource,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherExpense {
    pub expense_type: CostGroup,
    pub name: String,
    pub unit: String,
    pub quantity: u32,
    pub price: Money,
    pub financing_source: FinancingSource,
}

macro_rules! priced_line {
    ($($ty:ty),+) => {
        $(
            impl CostLine for $ty {
                fn total(&self) -> Money {
                    self.price.times(u64::from(self.quantity))
                }

                fn financing_source(&self) -> FinancingSource {
                    self.financing_source
                }
            }
        )+
    };
}

priced_line!(InventoryItem, RawMaterial, OtherExpense);

/// Output product; only its quantity matters, for unit-cost allocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub quantity: u32,
}

/// Fixed cost of the period ("davr xarajati").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodExpense {
    pub name: String,
    pub amount: Money,
}

/// One year of the sales plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesYear {
    /// 1-based project year.
    pub year: u16,
    #[serde(default)]
    pub products: Vec<SalesProduct>,
}

impl SalesYear {
    #[must_use]
    pub fn revenue(&self) -> Money {
        self.products.iter().map(SalesProduct::revenue).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesProduct {
    pub name: String,
    pub unit: String,
    pub quantity: u32,
    pub price: Money,
}

impl SalesProduct {
    #[must_use]
    pub fn revenue(&self) -> Money {
        self.price.times(u64::from(self.quantity))
    }
}

/// Top-level cost estimate with every nested collection loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub id: Uuid,
    pub project_name: String,
    #[serde(default)]
    pub organization_name: String,
    #[serde(default)]
    pub description: String,
    pub duration_years: u8,
    #[serde(default)]
    pub status: EstimateStatus,
    /// Locator of the last generated workbook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub raw_materials: Vec<RawMaterial>,
    #[serde(default)]
    pub other_expenses: Vec<OtherExpense>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub period_expenses: Vec<PeriodExpense>,
    #[serde(default)]
    pub sales_plan: Vec<SalesYear>,
}

impl CostEstimate {
    /// Creates an empty draft estimate.
    pub fn new(project_name: impl Into<String>, duration_years: u8) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_name: project_name.into(),
            organization_name: String::new(),
            description: String::new(),
            duration_years,
            status: EstimateStatus::Draft,
            artifact: None,
            employees: Vec::new(),
            inventory: Vec::new(),
            raw_materials: Vec::new(),
            other_expenses: Vec::new(),
            products: Vec::new(),
            period_expenses: Vec::new(),
            sales_plan: Vec::new(),
        }
    }

    /// Employees of one staff group, in input order.
    pub fn staff(&self, group: CostGroup) -> impl Iterator<Item = &Employee> {
        self.employees.iter().filter(move |e| e.staff_type == group)
    }

    /// Other expenses of one group, in input order.
    pub fn expenses(&self, group: CostGroup) -> impl Iterator<Item = &OtherExpense> {
        self.other_expenses
            .iter()
            .filter(move |e| e.expense_type == group)
    }

    /// The sales plan entry of a project year, if recorded.
    #[must_use]
    pub fn sales_year(&self, year: u16) -> Option<&SalesYear> {
        self.sales_plan.iter().find(|y| y.year == year)
    }
}
