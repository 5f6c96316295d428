//! Inventory and raw-material sheets. Both are a flat list of priced lines
//! with a totals row.

use engine::{CostEstimate, CostLine, FinancialModel, FundingSplit, InventoryItem};

use super::{
    PricedLine, SheetKind, category_title, funding_header, priced_row, split_cells, total_label,
};
use crate::spec::{Row, SheetSpec};

const WIDTH: u16 = 8;

fn headers(name: &'static str) -> [&'static str; 6] {
    [
        "N",
        name,
        "O'lchov\nbirligi",
        "Miqdori",
        "Narxi\n(ming so'mda)",
        "Summasi\n(ming so'mda)",
    ]
}

/// Item name followed by its description and purchase link, one per line.
fn inventory_label(item: &InventoryItem) -> String {
    let mut label = item.name.clone();
    if !item.description.is_empty() {
        label.push_str(&format!("\n({})", item.description));
    }
    if !item.link.is_empty() {
        label.push('\n');
        label.push_str(&item.link);
    }
    label
}

fn priced_sheet<'a>(
    kind: SheetKind,
    title: &str,
    name_header: &'static str,
    name_width: f64,
    lines: impl Iterator<Item = PricedLine<'a>>,
    split: FundingSplit,
) -> SheetSpec {
    let scale = kind.scale();
    let mut sheet = SheetSpec::new(
        kind.name(),
        &[5.0, name_width, 10.0, 10.0, 12.0, 12.0, 18.0, 18.0],
    );
    sheet.push(category_title(title, WIDTH));
    sheet.skip(1);
    funding_header(&mut sheet, &headers(name_header));

    for (index, line) in lines.enumerate() {
        sheet.push(priced_row(index + 1, &line, scale));
    }

    let [ministry, organization] = split_cells(scale, split);
    sheet.push(
        Row::new()
            .with(1, total_label("Jami:", 1).bordered())
            .with(5, scale.cell(split.total()).bold())
            .with(6, ministry.bold())
            .with(7, organization.bold()),
    );
    sheet
}

pub(super) fn inventory(estimate: &CostEstimate, model: &FinancialModel) -> SheetSpec {
    let lines = estimate.inventory.iter().map(|item| PricedLine {
        name: inventory_label(item),
        unit: &item.unit,
        quantity: item.quantity,
        price: item.price,
        total: item.total(),
        source: item.financing_source,
    });
    priced_sheet(
        SheetKind::Inventory,
        "Inventar, texnika va jihozlarni xarid qilish xarajatlari",
        "Mahsulotlar nomi",
        50.0,
        lines,
        model.inventory,
    )
}

pub(super) fn raw_materials(estimate: &CostEstimate, model: &FinancialModel) -> SheetSpec {
    let lines = estimate.raw_materials.iter().map(|item| PricedLine {
        name: item.name.clone(),
        unit: &item.unit,
        quantity: item.quantity,
        price: item.price,
        total: item.total(),
        source: item.financing_source,
    });
    priced_sheet(
        SheetKind::RawMaterials,
        "Xomashyo va materiallarni sotib olish xarajatlari",
        "Xomashyo nomi",
        40.0,
        lines,
        model.raw_materials,
    )
}
