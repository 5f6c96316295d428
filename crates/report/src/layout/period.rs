use engine::{CostEstimate, FinancialModel};

use super::{SheetKind, total_label};
use crate::spec::{Align, Cell, Row, SheetSpec};

pub(super) fn build(estimate: &CostEstimate, model: &FinancialModel) -> SheetSpec {
    let kind = SheetKind::PeriodExpenses;
    let scale = kind.scale();
    let mut sheet = SheetSpec::new(kind.name(), &[8.0, 50.0, 18.0]);

    sheet.push(Row::new().with(0, Cell::title("DAVR XARAJATLARI").span(3, 1)));
    sheet.push(Row::new().with(
        0,
        Cell::plain("(ming so'mda)").align(Align::Center).span(3, 1),
    ));
    sheet.skip(1);
    sheet.push(
        ["N", "Xarajatlar nomi", "Summasi"]
            .into_iter()
            .map(Cell::header)
            .collect(),
    );

    for (index, expense) in estimate.period_expenses.iter().enumerate() {
        sheet.push(
            [
                Cell::data(index + 1),
                Cell::data(expense.name.as_str()).align(Align::Left),
                scale.cell(expense.amount),
            ]
            .into_iter()
            .collect(),
        );
    }
    sheet.push(
        Row::new()
            .with(0, total_label("JAMI DAVR XARAJATLARI", 2))
            .with(2, scale.cell(model.period_expenses).bold()),
    );
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Money, PeriodExpense, Rates};

    #[test]
    fn period_expenses_render_whole_units() {
        let mut estimate = CostEstimate::new("Loyiha", 2);
        estimate.period_expenses = vec![
            PeriodExpense {
                name: "Reklama".to_string(),
                amount: Money::from_major(6_000_000),
            },
            PeriodExpense {
                name: "Transport".to_string(),
                amount: Money::new(150),
            },
        ];
        let model = FinancialModel::build(&estimate, &Rates::default());
        let sheet = build(&estimate, &model);

        let (row, _) = sheet.find_text("Reklama").unwrap();
        assert_eq!(sheet.cell(row, 2).unwrap().value.as_number(), Some(6_000_000.0));
        assert_eq!(sheet.cell(row + 1, 2).unwrap().value.as_number(), Some(2.0));
        let (total, _) = sheet.find_text("JAMI DAVR XARAJATLARI").unwrap();
        assert_eq!(total, row + 2);
        assert_eq!(sheet.cell(total, 2).unwrap().value.as_number(), Some(6_000_002.0));
    }
}
