use engine::{CostEstimate, CostGroup, CostLine, FinancialModel};

use super::{
    PricedLine, SheetKind, category_title, funding_header, priced_row, split_cells, total_label,
};
use crate::spec::{Cell, Row, SheetSpec};

const WIDTH: u16 = 8;

const HEADERS: [&str; 6] = [
    "N",
    "Xarajatlar nomi",
    "O'lchov birligi",
    "Miqdori",
    "Narxi\n(ming so'mda)",
    "Summasi\n(ming so'mda)",
];

fn section(group: CostGroup) -> &'static str {
    match group {
        CostGroup::Management => "Boshqa ma'muriy xarajatlar:",
        CostGroup::Production => "Ishlab chiqarish bilan bog'liq boshqa xarajatlar:",
    }
}

fn subtotal(group: CostGroup) -> &'static str {
    match group {
        CostGroup::Management => "Jami ma'muriy xarajatlar:",
        CostGroup::Production => "Jami ishlab chiqarish xarajatlari:",
    }
}

pub(super) fn build(estimate: &CostEstimate, model: &FinancialModel) -> SheetSpec {
    let kind = SheetKind::OtherExpenses;
    let scale = kind.scale();
    let mut sheet = SheetSpec::new(
        kind.name(),
        &[5.0, 45.0, 12.0, 10.0, 12.0, 12.0, 18.0, 18.0],
    );
    sheet.push(category_title("Boshqa xarajatlar", WIDTH));
    sheet.skip(1);
    funding_header(&mut sheet, &HEADERS);

    for group in CostGroup::ALL {
        let split = model.other_expenses.group(group);
        let [ministry, organization] = split_cells(scale, split);
        sheet.push(
            Row::new()
                .with(0, Cell::plain(section(group)).bold().span(6, 1))
                .with(6, ministry)
                .with(7, organization),
        );

        for (index, expense) in estimate.expenses(group).enumerate() {
            let line = PricedLine {
                name: expense.name.clone(),
                unit: &expense.unit,
                quantity: expense.quantity,
                price: expense.price,
                total: expense.total(),
                source: expense.financing_source,
            };
            sheet.push(priced_row(index + 1, &line, scale));
        }

        let [ministry, organization] = split_cells(scale, split);
        sheet.push(
            Row::new()
                .with(0, total_label(subtotal(group), 5).italic())
                .with(5, scale.cell(split.total()).bold())
                .with(6, ministry.bold())
                .with(7, organization.bold()),
        );
    }

    let split = model.other_expenses.combined();
    let [ministry, organization] = split_cells(scale, split);
    sheet.push(
        Row::new()
            .with(0, total_label("Jami:", 5))
            .with(5, scale.cell(split.total()).bold())
            .with(6, ministry.bold())
            .with(7, organization.bold()),
    );
    sheet
}
