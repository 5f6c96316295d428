use std::io::Cursor;

use calamine::{Data, Range, Reader, Xlsx, open_workbook_from_rs};
use engine::{
    CostEstimate, CostGroup, Employee, FinancingSource, InventoryItem, Money, PeriodExpense,
    Product, Rates, RawMaterial, SalesProduct, SalesYear,
};
use report::{SheetKind, generate_workbook};

fn som(major: i64) -> Money {
    Money::from_major(major)
}

fn sample() -> CostEstimate {
    use FinancingSource::{Ministry, Organization};

    let mut e = CostEstimate::new("Issiqxona", 2);
    e.organization_name = "Agro MChJ".to_string();
    e.employees = vec![
        Employee {
            staff_type: CostGroup::Management,
            position: "Rahbar".to_string(),
            count: 1,
            monthly_salary: som(5_000_000),
            duration_months: 10,
            financing_source: Ministry,
        },
        Employee {
            staff_type: CostGroup::Production,
            position: "Agronom".to_string(),
            count: 2,
            monthly_salary: som(4_000_000),
            duration_months: 12,
            financing_source: Organization,
        },
    ];
    e.inventory = vec![InventoryItem {
        name: "Nasos".to_string(),
        description: "suv uchun".to_string(),
        link: String::new(),
        unit: "dona".to_string(),
        quantity: 2,
        price: som(5_000_000),
        financing_source: Organization,
    }];
    e.raw_materials = vec![RawMaterial {
        name: "Urug'".to_string(),
        unit: "kg".to_string(),
        quantity: 10,
        price: som(200_000),
        financing_source: Ministry,
    }];
    e.products = vec![Product {
        name: "Pomidor".to_string(),
        quantity: 100,
    }];
    e.period_expenses = vec![PeriodExpense {
        name: "Reklama".to_string(),
        amount: som(2_000_000),
    }];
    e.sales_plan = vec![SalesYear {
        year: 1,
        products: vec![SalesProduct {
            name: "Pomidor".to_string(),
            unit: "kg".to_string(),
            quantity: 50_000,
            price: som(2_000),
        }],
    }];
    e
}

fn open(estimate: &CostEstimate) -> Xlsx<Cursor<Vec<u8>>> {
    let bytes = generate_workbook(estimate, &Rates::default()).unwrap();
    open_workbook_from_rs(Cursor::new(bytes)).unwrap()
}

fn sheet(workbook: &mut Xlsx<Cursor<Vec<u8>>>, kind: SheetKind) -> Range<Data> {
    workbook.worksheet_range(kind.name()).unwrap()
}

/// Position of the first string cell equal to `text`.
fn find(range: &Range<Data>, text: &str) -> (usize, usize) {
    range
        .cells()
        .find(|(_, _, value)| matches!(value, Data::String(s) if s == text))
        .map(|(row, col, _)| (row, col))
        .unwrap_or_else(|| panic!("{text:?} not found"))
}

fn number(range: &Range<Data>, at: (usize, usize)) -> f64 {
    match range.get(at) {
        Some(Data::Float(n)) => *n,
        Some(Data::Int(n)) => *n as f64,
        other => panic!("expected a number at {at:?}, got {other:?}"),
    }
}

fn is_empty(range: &Range<Data>, at: (usize, usize)) -> bool {
    matches!(range.get(at), None | Some(Data::Empty))
}

#[test]
fn workbook_has_nine_sheets_in_fixed_order() {
    let workbook = open(&sample());
    let names: Vec<_> = SheetKind::ALL.iter().map(|k| k.name().to_string()).collect();
    assert_eq!(workbook.sheet_names(), names);
}

#[test]
fn summary_total_row_reads_back() {
    let mut workbook = open(&sample());
    let range = sheet(&mut workbook, SheetKind::Summary);

    // 146M salary + 17.52M social tax + 10M inventory + 2M raw materials.
    let (row, col) = find(&range, "Jami xarajatlar:");
    assert_eq!(number(&range, (row, col + 3)), 175_520.0);
    assert!(matches!(range.get((row, col + 4)), Some(Data::String(s)) if s == "100.0%"));
    find(&range, "Issiqxona - Agro MChJ");
}

#[test]
fn salary_funding_columns_are_masked() {
    let mut workbook = open(&sample());
    let range = sheet(&mut workbook, SheetKind::Salary);

    let (row, col) = find(&range, "Rahbar");
    assert_eq!(number(&range, (row, col + 6)), 50_000.0);
    assert!(is_empty(&range, (row, col + 7)));

    let (row, col) = find(&range, "Agronom");
    assert!(is_empty(&range, (row, col + 6)));
    assert_eq!(number(&range, (row, col + 7)), 96_000.0);
}

#[test]
fn inventory_name_carries_description() {
    let mut workbook = open(&sample());
    let range = sheet(&mut workbook, SheetKind::Inventory);
    let (row, col) = find(&range, "Nasos\n(suv uchun)");
    assert_eq!(number(&range, (row, col + 4)), 10_000.0);
}

#[test]
fn sales_plan_renders_every_project_year() {
    let mut workbook = open(&sample());
    let range = sheet(&mut workbook, SheetKind::SalesPlan);

    let (row, col) = find(&range, "JAMI 1-YIL");
    assert_eq!(number(&range, (row, col + 5)), 100_000_000.0);
    let (row, col) = find(&range, "JAMI 2-YIL");
    assert_eq!(number(&range, (row, col + 5)), 0.0);
    let (row, col) = find(&range, "UMUMIY JAMI");
    assert_eq!(number(&range, (row, col + 5)), 100_000_000.0);
}

#[test]
fn cumulative_profit_is_written_into_the_merged_cell() {
    let mut workbook = open(&sample());
    let range = sheet(&mut workbook, SheetKind::ProfitLoss);

    // production cost: 96M + 11.52M + 2M + 2M amortization = 111.52M
    // year 1: 100M - 55.76M - 1M = 43.24M, less 12% tax = 38,051,200
    // year 2: -56.76M
    let (row, col) = find(&range, "SOF FOYDA");
    assert_eq!(number(&range, (row, col + 1)), 38_051_200.0);
    assert_eq!(number(&range, (row, col + 2)), -56_760_000.0);

    let (row, col) = find(&range, "Umumiy sof foyda (barcha yillar)");
    assert_eq!(number(&range, (row, col + 1)), -18_708_800.0);
}

#[test]
fn empty_estimate_renders() {
    let mut workbook = open(&CostEstimate::new("Bo'sh", 1));
    let range = sheet(&mut workbook, SheetKind::Summary);
    let (row, col) = find(&range, "Jami xarajatlar:");
    assert_eq!(number(&range, (row, col + 3)), 0.0);
    assert!(matches!(range.get((row, col + 4)), Some(Data::String(s)) if s == "0.0%"));
}
