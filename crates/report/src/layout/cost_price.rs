use engine::{FinancialModel, Money};

use super::{SheetKind, total_label};
use crate::spec::{Align, Cell, Row, SheetSpec};

const NOTE: &str = "Mahsulot (ishlar, xizmatlar)ning ishlab chiqarish tannarxiga \
kiritiladigan xarajatlar tarkibi.";

pub(super) fn build(model: &FinancialModel) -> SheetSpec {
    let kind = SheetKind::CostPrice;
    let scale = kind.scale();
    let mut sheet = SheetSpec::new(kind.name(), &[12.0, 55.0, 18.0]);

    sheet.push(
        Row::new()
            .with(0, Cell::plain(NOTE).size(10.0).wrap().span(3, 1))
            .height(60.0),
    );
    sheet.skip(1);
    sheet.push(Row::new().with(
        0,
        Cell::title("Mahsulotlarning ishlab chiqarish tannarxi").span(3, 1),
    ));
    sheet.skip(1);
    sheet.push(
        ["N", "Xarajatlar nomi", "Summasi\n(ming so'mda)"]
            .into_iter()
            .map(Cell::header)
            .collect(),
    );

    let components: [(&str, Money); 5] = [
        (
            "Ishlab chiqarish xodimlarining ish haqi",
            model.salary.production.total(),
        ),
        ("Ijtimoiy soliq", model.social_tax.production.total()),
        (
            "Xom ashyo va materiallarni sotib olish bilan bog'liq xarajatlar",
            model.raw_materials.total(),
        ),
        (
            "Asosiy vositalarning amortizatsiya xarajatlari",
            model.amortization,
        ),
        (
            "Boshqa ishlab chiqarish xarajatlari",
            model.other_expenses.production.total(),
        ),
    ];
    for (index, (label, amount)) in components.into_iter().enumerate() {
        sheet.push(
            [
                Cell::data(index + 1),
                Cell::data(label).align(Align::Left),
                scale.cell(amount),
            ]
            .into_iter()
            .collect(),
        );
    }
    sheet.push(
        Row::new()
            .with(0, total_label("Jami tannarx", 2))
            .with(2, scale.cell(model.production_cost).bold()),
    );
    sheet.skip(1);

    for (index, product) in model.products.iter().enumerate() {
        sheet.push(
            Row::new()
                .with(1, Cell::plain(format!("{}*", product.name)).align(Align::Left))
                .with(2, Cell::plain(scale.display(product.allocated_cost))),
        );
        sheet.push(
            Row::new()
                .with(0, Cell::plain(format!("{}-mahsulot", index + 1)).bold())
                .with(1, Cell::plain("Mahsulot soni"))
                .with(2, Cell::plain(product.quantity)),
        );
        sheet.push(
            Row::new()
                .with(1, Cell::plain("Mahsulot narxi").bold())
                .with(2, Cell::plain(scale.display(product.unit_cost)).bold()),
        );
    }
    sheet
}
