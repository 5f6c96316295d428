use engine::{CostEstimate, FinancialModel, FundingSplit};

use super::{SheetKind, share_percent, total_label};
use crate::spec::{Align, Cell, Row, SheetSpec};

const NOTE: &str = "Loyihaning xarajatlar smetasi (xarajatlar smetasi loyihaning \
umumiy muddatiga to'ldirilishi va xarajatlarni asoslovchi \
hisob-kitoblar (jadvallar) ilova qilinishi shart).";

const HEADERS: [&str; 5] = [
    "Xarajat turlari",
    "Vazirlik hisobidan\n(ming so'mda)",
    "Birgalikda moliyalashtiradigan\ntashkilot hisobidan\n(ming so'mda)",
    "Summa\n(ming so'mda)",
    "Umumiy\nxarajatlardagi\nulushi foizda (%)",
];

pub(super) fn build(estimate: &CostEstimate, model: &FinancialModel) -> SheetSpec {
    let kind = SheetKind::Summary;
    let scale = kind.scale();
    let mut sheet = SheetSpec::new(kind.name(), &[45.0, 20.0, 30.0, 18.0, 18.0]);

    sheet.push(
        Row::new()
            .with(0, Cell::plain(NOTE).italic().size(10.0).wrap().span(5, 1))
            .height(50.0),
    );
    sheet.skip(2);
    sheet.push(Row::new().with(0, Cell::title("XARAJATLAR SMETASI").span(5, 1)));
    let heading = if estimate.organization_name.is_empty() {
        estimate.project_name.clone()
    } else {
        format!("{} - {}", estimate.project_name, estimate.organization_name)
    };
    sheet.push(
        Row::new().with(
            0,
            Cell::plain(heading)
                .bold()
                .size(12.0)
                .align(Align::Center)
                .span(5, 1),
        ),
    );
    sheet.skip(1);
    sheet.push(HEADERS.iter().map(|h| Cell::header(*h)).collect::<Row>().height(45.0));

    let categories: [(&str, FundingSplit); 5] = [
        ("Ish haqi fondi", model.salary.combined()),
        ("Ijtimoiy soliq", model.total_social_tax),
        (
            "Xomashyo va materiallarni sotib olish bilan bog'liq xarajatlar",
            model.raw_materials,
        ),
        (
            "Asbob-uskuna, texnika va jihozlarni xarid qilish xarajatlari",
            model.inventory,
        ),
        ("Boshqa xarajatlar", model.other_expenses.combined()),
    ];

    let grand_total = model.grand_total;
    let mut total = FundingSplit::default();
    for (label, split) in categories {
        sheet.push(
            [
                Cell::data(label).align(Align::Left),
                scale.cell(split.ministry),
                scale.cell(split.organization),
                scale.cell(split.total()),
                Cell::data(share_percent(split.total(), grand_total)),
            ]
            .into_iter()
            .collect(),
        );
        total = total + split;
    }

    let total_share = if grand_total.is_zero() {
        "0.0%"
    } else {
        "100.0%"
    };
    sheet.push(
        [
            total_label("Jami xarajatlar:", 1).bordered().wrap(),
            scale.cell(total.ministry).bold(),
            scale.cell(total.organization).bold(),
            scale.cell(total.total()).bold(),
            Cell::data(total_share).bold(),
        ]
        .into_iter()
        .collect(),
    );
    sheet
}
