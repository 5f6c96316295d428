//! Multi-sheet xlsx report of a cost estimate.
//!
//! Generation is split in two steps: [`layout::build`] turns the
//! [`FinancialModel`] into declarative [`SheetSpec`]s, and [`render`]
//! serialises them with `rust_xlsxwriter`. [`generate_workbook`] runs the
//! whole pipeline for one estimate.

use engine::{CostEstimate, FinancialModel, Rates};

pub use error::ReportError;
pub use layout::{MoneyScale, SheetKind};
pub use render::render;
pub use spec::{Align, Cell, CellValue, Row, SheetSpec, Span};

mod error;
pub mod layout;
mod render;
pub mod spec;

/// Aggregates, lays out and renders an estimate into xlsx bytes.
///
/// The estimate is expected to be valid, see [`engine::validate`].
pub fn generate_workbook(estimate: &CostEstimate, rates: &Rates) -> Result<Vec<u8>, ReportError> {
    let model = FinancialModel::build(estimate, rates);
    let sheets = layout::build(estimate, &model);
    tracing::debug!(
        estimate_id = %estimate.id,
        sheets = sheets.len(),
        "rendering workbook"
    );
    render(&sheets)
}
