//! Sheet layouts of the estimate workbook.
//!
//! Each submodule turns the [`FinancialModel`] (and the raw line lists of the
//! estimate) into one [`SheetSpec`]. Nothing here knows about xlsx.
//!
//! Monetary display units differ between sheets, see [`SheetKind::scale`].

use engine::{CostEstimate, FinancialModel, FinancingSource, FundingSplit, Money};

use crate::spec::{Align, Cell, Row, SheetSpec};

mod cost_price;
mod other_expenses;
mod period;
mod profit_loss;
mod purchases;
mod salary;
mod sales;
mod summary;

/// The sheets of the workbook, in workbook order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SheetKind {
    Summary,
    Salary,
    Inventory,
    RawMaterials,
    OtherExpenses,
    CostPrice,
    PeriodExpenses,
    SalesPlan,
    ProfitLoss,
}

impl SheetKind {
    pub const ALL: [SheetKind; 9] = [
        SheetKind::Summary,
        SheetKind::Salary,
        SheetKind::Inventory,
        SheetKind::RawMaterials,
        SheetKind::OtherExpenses,
        SheetKind::CostPrice,
        SheetKind::PeriodExpenses,
        SheetKind::SalesPlan,
        SheetKind::ProfitLoss,
    ];

    /// Worksheet tab name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SheetKind::Summary => "Jami",
            SheetKind::Salary => "Ish haqi",
            SheetKind::Inventory => "Inventar",
            SheetKind::RawMaterials => "Xom ashyo",
            SheetKind::OtherExpenses => "Boshqa xar.",
            SheetKind::CostPrice => "Tannarx",
            SheetKind::PeriodExpenses => "Davr xarajatlari",
            SheetKind::SalesPlan => "Sotish rejasi",
            SheetKind::ProfitLoss => "Moliyaviy xisobot",
        }
    }

    /// Display unit of the monetary cells of the sheet.
    ///
    /// The cost sheets show thousands of so'm; the period, sales and
    /// profit/loss sheets show whole so'm even though their subtitle reads
    /// "(ming so'mda)". Existing readers of the document rely on both.
    #[must_use]
    pub fn scale(self) -> MoneyScale {
        match self {
            SheetKind::Summary
            | SheetKind::Salary
            | SheetKind::Inventory
            | SheetKind::RawMaterials
            | SheetKind::OtherExpenses
            | SheetKind::CostPrice => MoneyScale::Thousands,
            SheetKind::PeriodExpenses | SheetKind::SalesPlan | SheetKind::ProfitLoss => {
                MoneyScale::Units
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoneyScale {
    /// Thousands of so'm.
    Thousands,
    /// Whole so'm.
    Units,
}

impl MoneyScale {
    /// Scaled amount rounded to an integer, ties to even.
    #[must_use]
    pub fn display(self, amount: Money) -> f64 {
        let major = amount.to_major();
        match self {
            MoneyScale::Thousands => (major / 1000.0).round_ties_even(),
            MoneyScale::Units => major.round_ties_even(),
        }
    }

    pub(crate) fn cell(self, amount: Money) -> Cell {
        Cell::data(self.display(amount))
    }
}

/// Builds all nine sheets in workbook order.
#[must_use]
pub fn build(estimate: &CostEstimate, model: &FinancialModel) -> Vec<SheetSpec> {
    SheetKind::ALL
        .iter()
        .map(|kind| build_sheet(*kind, estimate, model))
        .collect()
}

#[must_use]
pub fn build_sheet(kind: SheetKind, estimate: &CostEstimate, model: &FinancialModel) -> SheetSpec {
    match kind {
        SheetKind::Summary => summary::build(estimate, model),
        SheetKind::Salary => salary::build(estimate, model),
        SheetKind::Inventory => purchases::inventory(estimate, model),
        SheetKind::RawMaterials => purchases::raw_materials(estimate, model),
        SheetKind::OtherExpenses => other_expenses::build(estimate, model),
        SheetKind::CostPrice => cost_price::build(model),
        SheetKind::PeriodExpenses => period::build(estimate, model),
        SheetKind::SalesPlan => sales::build(estimate, model),
        SheetKind::ProfitLoss => profit_loss::build(model),
    }
}

const FUNDING_GROUP: &str = "Moliyalashtirish manbasi";
const MINISTRY_HEADER: &str = "Vazirlik hisobidan\n(ming so'mda)";
const ORGANIZATION_HEADER: &str = "Tashkilot hisobidan\n(ming so'mda)";

/// Title of a category sheet: filled, merged over the table width.
fn category_title(text: &str, width: u16) -> Row {
    Row::new().with(0, Cell::title(text).fill(crate::spec::HEADER_FILL).span(width, 1))
}

/// Two-row table header: every column header spans both rows and the two
/// funding columns sit under a shared group header.
fn funding_header(sheet: &mut SheetSpec, headers: &[&str]) {
    let funding_col = headers.len() as u16;
    let mut top: Row = headers.iter().map(|h| Cell::header(*h).span(1, 2)).collect();
    top.put(funding_col, Cell::header(FUNDING_GROUP).span(2, 1));
    let bottom = Row::new()
        .with(funding_col, Cell::header(MINISTRY_HEADER))
        .with(funding_col + 1, Cell::header(ORGANIZATION_HEADER));
    sheet.push(top);
    sheet.push(bottom);
}

/// Funding cells of one cost line. Only the column of the source that
/// funded the line carries the amount; the other stays empty.
fn masked_funding(scale: MoneyScale, total: Money, source: FinancingSource) -> [Cell; 2] {
    match source {
        FinancingSource::Ministry => [scale.cell(total), Cell::empty_data()],
        FinancingSource::Organization => [Cell::empty_data(), scale.cell(total)],
    }
}

/// Funding cells of an aggregate row; both columns are always shown.
fn split_cells(scale: MoneyScale, split: FundingSplit) -> [Cell; 2] {
    [scale.cell(split.ministry), scale.cell(split.organization)]
}

/// A bold label merged over the first `cols` columns, right aligned.
fn total_label(text: &str, cols: u16) -> Cell {
    Cell::plain(text).bold().align(Align::Right).span(cols, 1)
}

/// One priced line (inventory, raw material, other expense).
struct PricedLine<'a> {
    name: String,
    unit: &'a str,
    quantity: u32,
    price: Money,
    total: Money,
    source: FinancingSource,
}

fn priced_row(index: usize, line: &PricedLine<'_>, scale: MoneyScale) -> Row {
    let [ministry, organization] = masked_funding(scale, line.total, line.source);
    [
        Cell::data(index),
        Cell::data(line.name.as_str()).align(Align::Left),
        Cell::data(line.unit),
        Cell::data(line.quantity),
        scale.cell(line.price),
        scale.cell(line.total),
        ministry,
        organization,
    ]
    .into_iter()
    .collect()
}

/// Percentage of `part` in `total` with one decimal, `"0.0%"` for a zero
/// total.
pub(crate) fn share_percent(part: Money, total: Money) -> String {
    if total.is_zero() {
        return "0.0%".to_string();
    }
    let pct = part.minor() as f64 / total.minor() as f64 * 100.0;
    format!("{pct:.1}%")
}
