use engine::{CostEstimate, CostGroup, CostLine, FinancialModel, FundingSplit, Money};

use super::{MoneyScale, SheetKind, category_title, funding_header, masked_funding, split_cells};
use crate::spec::{Align, Cell, Row, SheetSpec};

const WIDTH: u16 = 9;
/// Columns covered by the label of a subtotal row.
const LABEL_COLS: u16 = 6;

const HEADERS: [&str; 7] = [
    "N",
    "Lavozimi",
    "Ishchilar soni",
    "Bir ishchining\nish haqi\n(oyda)",
    "Jami oylik ish\nhaqi\n(ming so'mda)",
    "Ish davomiyligi\n(oylarda)",
    "Jami\n(ming so'mda)",
];

fn section(group: CostGroup) -> &'static str {
    match group {
        CostGroup::Management => "Ma'muriy-boshqaruv xodimlari:",
        CostGroup::Production => "Ishlab chiqarish xodimlari:",
    }
}

fn subtotal(group: CostGroup) -> &'static str {
    match group {
        CostGroup::Management => "Jami ma'muriy-boshqaruv xodimlari ish haqi fondi",
        CostGroup::Production => "Jami ishlab chiqarish xodimlari ish haqi fondi",
    }
}

/// Label over the first six columns, then total and both funding columns.
fn aggregate_row(scale: MoneyScale, label: Cell, total: Money, split: FundingSplit, bold: bool) -> Row {
    let [ministry, organization] = split_cells(scale, split);
    let mut cells = [scale.cell(total), ministry, organization];
    if bold {
        cells = cells.map(Cell::bold);
    }
    let [total, ministry, organization] = cells;
    Row::new()
        .with(0, label.span(LABEL_COLS, 1))
        .with(6, total)
        .with(7, ministry)
        .with(8, organization)
}

pub(super) fn build(estimate: &CostEstimate, model: &FinancialModel) -> SheetSpec {
    let kind = SheetKind::Salary;
    let scale = kind.scale();
    let mut sheet = SheetSpec::new(
        kind.name(),
        &[5.0, 25.0, 12.0, 15.0, 15.0, 15.0, 15.0, 18.0, 18.0],
    );

    sheet.push(category_title("Mehnatga haq to'lash xarajatlari", WIDTH));
    sheet.skip(1);
    funding_header(&mut sheet, &HEADERS);

    for group in CostGroup::ALL {
        sheet.push(Row::new().with(0, Cell::plain(section(group)).bold().span(WIDTH, 1)));

        for (index, employee) in estimate.staff(group).enumerate() {
            let total = employee.total();
            let [ministry, organization] =
                masked_funding(scale, total, employee.financing_source);
            sheet.push(
                [
                    Cell::data(index + 1),
                    Cell::data(employee.position.as_str()).align(Align::Left),
                    Cell::data(employee.count),
                    scale.cell(employee.monthly_salary),
                    scale.cell(employee.monthly_total()),
                    Cell::data(u32::from(employee.duration_months)),
                    scale.cell(total),
                    ministry,
                    organization,
                ]
                .into_iter()
                .collect(),
            );
        }

        let salary = model.salary.group(group);
        sheet.push(aggregate_row(
            scale,
            Cell::plain(subtotal(group)).bold().italic(),
            salary.total(),
            salary,
            true,
        ));
        let social = model.social_tax.group(group);
        sheet.push(aggregate_row(
            scale,
            Cell::plain("Ijtimoiy soliq").italic(),
            social.total(),
            social,
            false,
        ));
    }

    let salary = model.salary.combined();
    sheet.push(aggregate_row(
        scale,
        Cell::plain("Jami ish haqi fondi").bold(),
        salary.total(),
        salary,
        true,
    ));
    sheet.push(aggregate_row(
        scale,
        Cell::plain("Jami ijtimoiy soliq").bold(),
        model.total_social_tax.total(),
        model.total_social_tax,
        true,
    ));
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Employee, FinancingSource, Rates};

    fn employee(group: CostGroup, position: &str, source: FinancingSource) -> Employee {
        Employee {
            staff_type: group,
            position: position.to_string(),
            count: 2,
            monthly_salary: Money::from_major(5_000_000),
            duration_months: 10,
            financing_source: source,
        }
    }

    fn sheet() -> SheetSpec {
        let mut estimate = CostEstimate::new("Loyiha", 1);
        estimate.employees = vec![
            employee(CostGroup::Production, "Agronom", FinancingSource::Organization),
            employee(CostGroup::Management, "Rahbar", FinancingSource::Ministry),
        ];
        let model = FinancialModel::build(&estimate, &Rates::default());
        build(&estimate, &model)
    }

    #[test]
    fn employee_rows_are_grouped_and_masked() {
        let sheet = sheet();
        let management = sheet.find_text(section(CostGroup::Management)).unwrap().0;
        let production = sheet.find_text(section(CostGroup::Production)).unwrap().0;
        assert!(management < production);

        let (rahbar, _) = sheet.find_text("Rahbar").unwrap();
        assert_eq!(rahbar, management + 1);
        // 5,000,000 * 2 * 10 = 100,000,000 so'm
        assert_eq!(sheet.cell(rahbar, 6).unwrap().value.as_number(), Some(100_000.0));
        assert_eq!(sheet.cell(rahbar, 7).unwrap().value.as_number(), Some(100_000.0));
        assert_eq!(*sheet.cell(rahbar, 8).unwrap(), Cell::empty_data());

        let (agronom, _) = sheet.find_text("Agronom").unwrap();
        assert_eq!(agronom, production + 1);
        assert_eq!(*sheet.cell(agronom, 7).unwrap(), Cell::empty_data());
        assert_eq!(sheet.cell(agronom, 8).unwrap().value.as_number(), Some(100_000.0));
    }

    #[test]
    fn subtotal_is_followed_by_social_tax() {
        let sheet = sheet();
        let (row, _) = sheet.find_text(subtotal(CostGroup::Management)).unwrap();
        let tax = sheet.cell(row + 1, 0).unwrap();
        assert_eq!(tax.value.as_text(), Some("Ijtimoiy soliq"));
        assert_eq!(sheet.cell(row + 1, 6).unwrap().value.as_number(), Some(12_000.0));
        // Aggregates show both funding columns.
        assert_eq!(sheet.cell(row, 8).unwrap().value.as_number(), Some(0.0));

        let (total, _) = sheet.find_text("Jami ijtimoiy soliq").unwrap();
        assert_eq!(sheet.cell(total, 6).unwrap().value.as_number(), Some(24_000.0));
        assert_eq!(total as usize, sheet.rows.len() - 1);
    }
}
