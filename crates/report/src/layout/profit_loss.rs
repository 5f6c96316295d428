use engine::{FinancialModel, Money, YearProjection};

use super::SheetKind;
use crate::spec::{Align, Cell, LOSS_FILL, PROFIT_FILL, Row, SheetSpec};

/// Fill of a net-profit cell by sign.
fn profit_fill(amount: Money) -> u32 {
    if amount.is_negative() {
        LOSS_FILL
    } else {
        PROFIT_FILL
    }
}

struct Indicator {
    label: String,
    bold: bool,
    value: fn(&YearProjection) -> Money,
}

fn indicator(label: &str, bold: bool, value: fn(&YearProjection) -> Money) -> Indicator {
    Indicator {
        label: label.to_string(),
        bold,
        value,
    }
}

fn indicators(model: &FinancialModel) -> [Indicator; 7] {
    let tax_label = format!("Foyda solig'i ({}%)", model.rates.profit_tax.percent());
    [
        indicator("Sotishdan tushum", false, |y| y.revenue),
        indicator("Sotilgan mahsulot tannarxi", false, |y| y.cost_of_sales),
        indicator("Yalpi daromad (foyda)", true, |y| y.gross_profit),
        indicator("Davr xarajatlari", false, |y| y.period_expenses),
        indicator("Asosiy faoliyat foydasi", true, |y| y.operating_profit),
        indicator(&tax_label, false, |y| y.profit_tax),
        indicator("SOF FOYDA", true, |y| y.net_profit),
    ]
}

pub(super) fn build(model: &FinancialModel) -> SheetSpec {
    let kind = SheetKind::ProfitLoss;
    let scale = kind.scale();
    let years = model.duration_years;
    let width = years + 2;

    let mut widths = vec![6.0, 35.0];
    widths.extend(std::iter::repeat_n(15.0, usize::from(years)));
    let mut sheet = SheetSpec::new(kind.name(), &widths);

    sheet.push(Row::new().with(
        0,
        Cell::title("MOLIYAVIY XISOBOT (FOYDA-ZARAR)").span(width, 1),
    ));
    sheet.push(Row::new().with(
        0,
        Cell::plain("(ming so'mda)").align(Align::Center).span(width, 1),
    ));
    sheet.skip(1);

    let mut header = Row::new()
        .with(0, Cell::header("N"))
        .with(1, Cell::header("Ko'rsatkichlar"));
    for year in 1..=years {
        header.put(year + 1, Cell::header(format!("{year}-yil")));
    }
    sheet.push(header);

    let indicators = indicators(model);
    let last = indicators.len() - 1;
    for (index, indicator) in indicators.iter().enumerate() {
        let mut label = Cell::data(indicator.label.as_str()).align(Align::Left);
        if indicator.bold {
            label = label.bold();
        }
        let mut row = Row::new().with(0, Cell::data(index + 1)).with(1, label);
        for (col, projection) in (2u16..).zip(&model.years) {
            let amount = (indicator.value)(projection);
            let mut cell = scale.cell(amount);
            if index == last {
                cell = cell.bold().size(11.0).fill(profit_fill(amount));
            } else if indicator.bold {
                cell = cell.bold();
            }
            row.put(col, cell);
        }
        sheet.push(row);
    }

    sheet.skip(1);
    let cumulative = model.cumulative_net_profit;
    sheet.push(
        Row::new()
            .with(
                1,
                Cell::plain("Umumiy sof foyda (barcha yillar)")
                    .bold()
                    .size(12.0),
            )
            .with(
                2,
                Cell::plain(scale.display(cumulative))
                    .bold()
                    .size(12.0)
                    .align(Align::Center)
                    .fill(profit_fill(cumulative))
                    .bordered()
                    .span(years, 1),
            ),
    );
    sheet
}
