//! Financial model of a cost estimate.
//!
//! [`FinancialModel::build`] derives every figure the report needs in one
//! pass: salary fund and social tax, funding-source splits per category,
//! amortization, production cost ("tannarx"), per-product unit cost and the
//! yearly profit/loss projection.
//!
//! Rate application and divisions round to the nearest minor unit. A derived
//! split is computed as `ministry = f(ministry base)` and `organization =
//! f(total base) - ministry`, so `ministry + organization` always equals the
//! derived total.
use std::ops::Add;

use serde::Serialize;

use crate::{CostEstimate, CostGroup, CostLine, FinancingSource, Money, Rate, Rates};

/// Amount of a category split by financing source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FundingSplit {
    pub ministry: Money,
    pub organization: Money,
}

impl FundingSplit {
    /// Sum cost lines into their funding buckets.
    pub fn of<'a, L, I>(lines: I) -> Self
    where
        L: CostLine + 'a,
        I: IntoIterator<Item = &'a L>,
    {
        lines
            .into_iter()
            .fold(Self::default(), |mut split, line| {
                match line.financing_source() {
                    FinancingSource::Ministry => split.ministry += line.total(),
                    FinancingSource::Organization => split.organization += line.total(),
                }
                split
            })
    }

    #[must_use]
    pub fn total(self) -> Money {
        self.ministry + self.organization
    }

    #[must_use]
    pub fn amount(self, source: FinancingSource) -> Money {
        match source {
            FinancingSource::Ministry => self.ministry,
            FinancingSource::Organization => self.organization,
        }
    }

    /// Applies a rate to both buckets, keeping the split exact.
    #[must_use]
    pub fn apply_rate(self, rate: Rate) -> Self {
        let total = self.total().apply_rate(rate);
        let ministry = self.ministry.apply_rate(rate);
        Self {
            ministry,
            organization: total - ministry,
        }
    }
}

impl Add for FundingSplit {
    type Output = FundingSplit;

    fn add(self, rhs: FundingSplit) -> Self::Output {
        FundingSplit {
            ministry: self.ministry + rhs.ministry,
            organization: self.organization + rhs.organization,
        }
    }
}

/// Funding splits of a category partitioned into management and production.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GroupSplit {
    pub management: FundingSplit,
    pub production: FundingSplit,
}

impl GroupSplit {
    #[must_use]
    pub fn group(self, group: CostGroup) -> FundingSplit {
        match group {
            CostGroup::Management => self.management,
            CostGroup::Production => self.production,
        }
    }

    /// Both groups together.
    #[must_use]
    pub fn combined(self) -> FundingSplit {
        self.management + self.production
    }

    #[must_use]
    pub fn total(self) -> Money {
        self.combined().total()
    }

    #[must_use]
    pub fn apply_rate(self, rate: Rate) -> Self {
        Self {
            management: self.management.apply_rate(rate),
            production: self.production.apply_rate(rate),
        }
    }
}

/// Raw category totals: the inputs of [`grand_total`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    pub salary: GroupSplit,
    pub inventory: FundingSplit,
    pub raw_materials: FundingSplit,
    pub other_expenses: GroupSplit,
}

impl CategoryTotals {
    pub fn of(estimate: &CostEstimate) -> Self {
        Self {
            salary: GroupSplit {
                management: FundingSplit::of(estimate.staff(CostGroup::Management)),
                production: FundingSplit::of(estimate.staff(CostGroup::Production)),
            },
            inventory: FundingSplit::of(&estimate.inventory),
            raw_materials: FundingSplit::of(&estimate.raw_materials),
            other_expenses: GroupSplit {
                management: FundingSplit::of(estimate.expenses(CostGroup::Management)),
                production: FundingSplit::of(estimate.expenses(CostGroup::Production)),
            },
        }
    }

    /// Social tax on the whole salary fund, split by funding source.
    #[must_use]
    pub fn social_tax(&self, rates: &Rates) -> FundingSplit {
        self.salary.combined().apply_rate(rates.social_tax)
    }
}

/// Grand total of the estimate:
/// `salary + social_tax(salary) + inventory + raw materials + other expenses`.
///
/// The single source of truth for both [`compute_grand_total`] and
/// [`FinancialModel::grand_total`].
///
///  [`compute_grand_total`]: crate::compute_grand_total
#[must_use]
pub fn grand_total(totals: &CategoryTotals, rates: &Rates) -> Money {
    totals.salary.total()
        + totals.social_tax(rates).total()
        + totals.inventory.total()
        + totals.raw_materials.total()
        + totals.other_expenses.total()
}

/// Production cost allocated to one product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductCost {
    pub name: String,
    pub quantity: u32,
    /// `production_cost * quantity / total quantity`.
    pub allocated_cost: Money,
    /// `production_cost / total quantity`, uniform across products.
    pub unit_cost: Money,
}

/// Profit/loss projection of one project year.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct YearProjection {
    pub year: u16,
    pub revenue: Money,
    /// Production cost attributed to the year.
    pub cost_of_sales: Money,
    pub gross_profit: Money,
    pub period_expenses: Money,
    pub operating_profit: Money,
    pub profit_tax: Money,
    pub net_profit: Money,
    /// Net profit of this and all previous years.
    pub cumulative_net_profit: Money,
}

/// Every derived figure of a cost estimate. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FinancialModel {
    pub rates: Rates,
    pub duration_years: u16,
    pub salary: GroupSplit,
    /// Social tax per staff group.
    pub social_tax: GroupSplit,
    /// Social tax on the whole salary fund.
    pub total_social_tax: FundingSplit,
    pub inventory: FundingSplit,
    pub raw_materials: FundingSplit,
    pub other_expenses: GroupSplit,
    pub period_expenses: Money,
    pub grand_total: Money,
    pub amortization: Money,
    /// Production cost price ("tannarx").
    pub production_cost: Money,
    pub total_product_quantity: u64,
    pub products: Vec<ProductCost>,
    pub years: Vec<YearProjection>,
    pub cumulative_net_profit: Money,
}

impl FinancialModel {
    /// Derive the model. Expects an estimate that passed [`validate`].
    ///
    ///  [`validate`]: crate::validate
    pub fn build(estimate: &CostEstimate, rates: &Rates) -> Self {
        let totals = CategoryTotals::of(estimate);
        let social_tax = totals.salary.apply_rate(rates.social_tax);
        let amortization = totals.inventory.total().apply_rate(rates.amortization);

        let production_cost = totals.salary.production.total()
            + social_tax.production.total()
            + totals.raw_materials.total()
            + amortization
            + totals.other_expenses.production.total();

        let total_product_quantity: u64 = estimate
            .products
            .iter()
            .map(|p| u64::from(p.quantity))
            .sum();
        let unit_cost = production_cost.share(total_product_quantity);
        let products = estimate
            .products
            .iter()
            .map(|p| ProductCost {
                name: p.name.clone(),
                quantity: p.quantity,
                allocated_cost: production_cost
                    .proportion(u64::from(p.quantity), total_product_quantity),
                unit_cost: if p.quantity > 0 { unit_cost } else { Money::ZERO },
            })
            .collect();

        let period_expenses: Money = estimate.period_expenses.iter().map(|e| e.amount).sum();
        let duration_years = u16::from(estimate.duration_years.max(1));
        let years = project_years(
            estimate,
            rates,
            duration_years,
            production_cost,
            period_expenses,
        );
        let cumulative_net_profit = years
            .last()
            .map_or(Money::ZERO, |y| y.cumulative_net_profit);

        Self {
            rates: *rates,
            duration_years,
            salary: totals.salary,
            social_tax,
            total_social_tax: totals.social_tax(rates),
            inventory: totals.inventory,
            raw_materials: totals.raw_materials,
            other_expenses: totals.other_expenses,
            period_expenses,
            grand_total: grand_total(&totals, rates),
            amortization,
            production_cost,
            total_product_quantity,
            products,
            years,
            cumulative_net_profit,
        }
    }

    /// Revenue over all projected years.
    #[must_use]
    pub fn total_revenue(&self) -> Money {
        self.years.iter().map(|y| y.revenue).sum()
    }
}

fn project_years(
    estimate: &CostEstimate,
    rates: &Rates,
    duration_years: u16,
    production_cost: Money,
    period_expenses: Money,
) -> Vec<YearProjection> {
    let cost_of_sales = production_cost.share(u64::from(duration_years));
    let period_per_year = period_expenses.share(u64::from(duration_years));

    let mut cumulative = Money::ZERO;
    (1..=duration_years)
        .map(|year| {
            let revenue = estimate
                .sales_year(year)
                .map_or(Money::ZERO, |y| y.revenue());
            let gross_profit = revenue - cost_of_sales;
            let operating_profit = gross_profit - period_per_year;
            let profit_tax = if operating_profit.is_positive() {
                operating_profit.apply_rate(rates.profit_tax)
            } else {
                Money::ZERO
            };
            let net_profit = operating_profit - profit_tax;
            cumulative += net_profit;
            YearProjection {
                year,
                revenue,
                cost_of_sales,
                gross_profit,
                period_expenses: period_per_year,
                operating_profit,
                profit_tax,
                net_profit,
                cumulative_net_profit: cumulative,
            }
        })
        .collect()
}
