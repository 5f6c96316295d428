use engine::{CostEstimate, FinancialModel, Money};

use super::{SheetKind, total_label};
use crate::spec::{Align, Cell, HEADER_FILL, Row, SheetSpec, YEAR_FILL};

const WIDTH: u16 = 6;

const HEADERS: [&str; 6] = [
    "N",
    "Mahsulotlar nomi",
    "O'lch. birligi",
    "Miqdori",
    "Narxi",
    "Summasi",
];

/// One block per project year, including years without a recorded plan.
pub(super) fn build(estimate: &CostEstimate, model: &FinancialModel) -> SheetSpec {
    let kind = SheetKind::SalesPlan;
    let scale = kind.scale();
    let mut sheet = SheetSpec::new(kind.name(), &[6.0, 35.0, 12.0, 12.0, 15.0, 18.0]);

    sheet.push(Row::new().with(0, Cell::title("SOTISH REJASI").span(WIDTH, 1)));
    sheet.push(Row::new().with(
        0,
        Cell::plain("(ming so'mda)").align(Align::Center).span(WIDTH, 1),
    ));
    sheet.skip(1);

    for projection in &model.years {
        let year = projection.year;
        sheet.push(
            Row::new().with(
                0,
                Cell::plain(format!("{year}-YIL"))
                    .bold()
                    .size(12.0)
                    .align(Align::Center)
                    .fill(YEAR_FILL)
                    .span(WIDTH, 1),
            ),
        );
        sheet.push(HEADERS.iter().map(|h| Cell::header(*h)).collect());

        let products = estimate
            .sales_year(year)
            .map_or(&[][..], |y| y.products.as_slice());
        for (index, product) in products.iter().enumerate() {
            sheet.push(
                [
                    Cell::data(index + 1),
                    Cell::data(product.name.as_str()).align(Align::Left),
                    Cell::data(product.unit.as_str()),
                    Cell::data(product.quantity),
                    scale.cell(product.price),
                    scale.cell(product.revenue()),
                ]
                .into_iter()
                .collect(),
            );
        }

        sheet.push(
            Row::new()
                .with(0, total_label(&format!("JAMI {year}-YIL"), 5))
                .with(5, scale.cell(projection.revenue).bold()),
        );
        sheet.skip(1);
    }

    let total: Money = model.total_revenue();
    sheet.push(
        Row::new()
            .with(
                0,
                total_label("UMUMIY JAMI", 5).size(12.0).fill(HEADER_FILL),
            )
            .with(
                5,
                Cell::plain(scale.display(total))
                    .bold()
                    .size(12.0)
                    .fill(HEADER_FILL)
                    .bordered(),
            ),
    );
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Rates, SalesProduct, SalesYear};

    fn sheet_with_year_two_only() -> SheetSpec {
        let mut estimate = CostEstimate::new("Loyiha", 3);
        estimate.sales_plan = vec![SalesYear {
            year: 2,
            products: vec![SalesProduct {
                name: "Pomidor".to_string(),
                unit: "kg".to_string(),
                quantity: 1_000,
                price: Money::from_major(2_500),
            }],
        }];
        let model = FinancialModel::build(&estimate, &Rates::default());
        build(&estimate, &model)
    }

    fn subtotal(sheet: &SheetSpec, year: u16) -> f64 {
        let (row, _) = sheet.find_text(&format!("JAMI {year}-YIL")).unwrap();
        sheet.cell(row, 5).unwrap().value.as_number().unwrap()
    }

    #[test]
    fn one_block_per_project_year() {
        let sheet = sheet_with_year_two_only();
        for year in 1..=3u16 {
            let (row, _) = sheet.find_text(&format!("{year}-YIL")).unwrap();
            let title = sheet.cell(row, 0).unwrap();
            assert_eq!(title.fill, Some(YEAR_FILL));
            assert_eq!(sheet.cell(row + 1, 0).unwrap().value.as_text(), Some("N"));
        }
        assert!(sheet.find_text("4-YIL").is_none());

        assert_eq!(subtotal(&sheet, 1), 0.0);
        assert_eq!(subtotal(&sheet, 2), 2_500_000.0);
        assert_eq!(subtotal(&sheet, 3), 0.0);
    }

    #[test]
    fn empty_year_block_has_no_product_rows() {
        let sheet = sheet_with_year_two_only();
        let (title, _) = sheet.find_text("1-YIL").unwrap();
        let (total, _) = sheet.find_text("JAMI 1-YIL").unwrap();
        assert_eq!(total, title + 2);

        let (title, _) = sheet.find_text("2-YIL").unwrap();
        assert_eq!(sheet.cell(title + 2, 1).unwrap().value.as_text(), Some("Pomidor"));
    }

    #[test]
    fn grand_total_closes_the_sheet() {
        let sheet = sheet_with_year_two_only();
        let (row, _) = sheet.find_text("UMUMIY JAMI").unwrap();
        assert_eq!(row as usize, sheet.rows.len() - 1);
        assert_eq!(sheet.cell(row, 5).unwrap().value.as_number(), Some(2_500_000.0));
    }
}
