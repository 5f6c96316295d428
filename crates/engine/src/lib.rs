//! Cost-estimate ("smeta") engine.
//!
//! Holds the value records of an estimate, validates them and derives the
//! [`FinancialModel`] every report is rendered from. Everything here is pure:
//! no storage handles, no I/O.

pub use aggregate::{
    CategoryTotals, FinancialModel, FundingSplit, GroupSplit, ProductCost, YearProjection,
    grand_total,
};
pub use error::EngineError;
pub use model::{
    CostEstimate, CostGroup, CostLine, Employee, EstimateStatus, FinancingSource, InventoryItem,
    OtherExpense, PeriodExpense, Product, RawMaterial, SalesProduct, SalesYear,
};
pub use money::Money;
pub use rates::{Rate, Rates};
pub use validate::{MAX_DURATION_MONTHS, MAX_DURATION_YEARS, MAX_ESTIMATE_VOLUME, validate};

mod aggregate;
mod error;
mod model;
mod money;
mod rates;
mod validate;

type ResultEngine<T> = Result<T, EngineError>;

/// Grand total of an estimate, for list and summary views.
///
/// Agrees with [`FinancialModel::grand_total`] for the same input and rates.
#[must_use]
pub fn compute_grand_total(estimate: &CostEstimate, rates: &Rates) -> Money {
    grand_total(&CategoryTotals::of(estimate), rates)
}
