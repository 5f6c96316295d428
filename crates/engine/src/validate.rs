//! Validation of a loaded cost estimate.
//!
//! Runs before aggregation. Malformed input is rejected with
//! [`EngineError::Validation`]; nothing is clamped or coerced to zero.

use std::collections::HashSet;

use crate::{CostEstimate, CostLine, EngineError, Money, ResultEngine};

pub const MAX_DURATION_YEARS: u8 = 10;
pub const MAX_DURATION_MONTHS: u16 = 120;

/// Upper bound of the estimate volume: the sum of every amount it holds.
///
/// Each derived figure (category sums, social tax, production cost, yearly
/// and cumulative profit) stays within twice the volume, so an estimate
/// under this bound aggregates without overflow.
pub const MAX_ESTIMATE_VOLUME: Money = Money::new(i64::MAX / 4);

/// Check every invariant the aggregation relies on.
pub fn validate(estimate: &CostEstimate) -> ResultEngine<()> {
    if estimate.project_name.trim().is_empty() {
        return Err(invalid("project name must not be empty".to_string()));
    }
    if !(1..=MAX_DURATION_YEARS).contains(&estimate.duration_years) {
        return Err(invalid(format!(
            "project duration must be between 1 and {MAX_DURATION_YEARS} years, got {}",
            estimate.duration_years
        )));
    }

    for employee in &estimate.employees {
        let label = format!("employee '{}'", employee.position);
        ensure_min(&label, "count", employee.count, 1)?;
        ensure_amount(&label, "monthly salary", employee.monthly_salary)?;
        if !(1..=MAX_DURATION_MONTHS).contains(&employee.duration_months) {
            return Err(invalid(format!(
                "{label}: duration must be between 1 and {MAX_DURATION_MONTHS} months, got {}",
                employee.duration_months
            )));
        }
        let total = employee
            .monthly_salary
            .checked_times(u64::from(employee.count))
            .and_then(|m| m.checked_times(u64::from(employee.duration_months)));
        ensure_fits(&label, total)?;
    }

    for item in &estimate.inventory {
        validate_priced(&format!("inventory item '{}'", item.name), item.quantity, item.price)?;
    }
    for item in &estimate.raw_materials {
        validate_priced(&format!("raw material '{}'", item.name), item.quantity, item.price)?;
    }
    for item in &estimate.other_expenses {
        validate_priced(&format!("expense '{}'", item.name), item.quantity, item.price)?;
    }
    for product in &estimate.products {
        ensure_min(&format!("product '{}'", product.name), "quantity", product.quantity, 1)?;
    }
    for expense in &estimate.period_expenses {
        ensure_amount(&format!("period expense '{}'", expense.name), "amount", expense.amount)?;
    }

    let mut years = HashSet::new();
    for sales_year in &estimate.sales_plan {
        if sales_year.year == 0 {
            return Err(invalid("sales plan year must be >= 1".to_string()));
        }
        if !years.insert(sales_year.year) {
            return Err(invalid(format!(
                "sales plan year {} is recorded more than once",
                sales_year.year
            )));
        }
        for product in &sales_year.products {
            let label = format!("sales product '{}' of year {}", product.name, sales_year.year);
            ensure_amount(&label, "price", product.price)?;
            ensure_fits(&label, product.price.checked_times(u64::from(product.quantity)))?;
        }
    }

    match volume(estimate) {
        Some(total) if total <= MAX_ESTIMATE_VOLUME => Ok(()),
        _ => Err(invalid("estimate totals are too large".to_string())),
    }
}

/// Sum of all line totals, the salary fund once more for its social tax,
/// period expenses and sales revenue. `None` on overflow.
///
/// Line totals must already be known to fit.
fn volume(estimate: &CostEstimate) -> Option<Money> {
    let salary = estimate.employees.iter().map(CostLine::total);
    salary
        .clone()
        .chain(salary)
        .chain(estimate.inventory.iter().map(CostLine::total))
        .chain(estimate.raw_materials.iter().map(CostLine::total))
        .chain(estimate.other_expenses.iter().map(CostLine::total))
        .chain(estimate.period_expenses.iter().map(|e| e.amount))
        .chain(
            estimate
                .sales_plan
                .iter()
                .flat_map(|y| &y.products)
                .map(|p| p.revenue()),
        )
        .try_fold(Money::ZERO, Money::checked_add)
}

fn validate_priced(label: &str, quantity: u32, price: Money) -> ResultEngine<()> {
    ensure_min(label, "quantity", quantity, 1)?;
    ensure_amount(label, "price", price)?;
    ensure_fits(label, price.checked_times(u64::from(quantity)))
}

fn ensure_min(label: &str, field: &str, value: u32, min: u32) -> ResultEngine<()> {
    if value < min {
        return Err(invalid(format!("{label}: {field} must be >= {min}, got {value}")));
    }
    Ok(())
}

fn ensure_amount(label: &str, field: &str, amount: Money) -> ResultEngine<()> {
    if amount.is_negative() {
        return Err(invalid(format!("{label}: {field} must be >= 0, got {amount}")));
    }
    Ok(())
}

fn ensure_fits(label: &str, total: Option<Money>) -> ResultEngine<()> {
    total
        .map(|_| ())
        .ok_or_else(|| invalid(format!("{label}: total amount too large")))
}

fn invalid(message: String) -> EngineError {
    EngineError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CostGroup, Employee, FinancingSource, InventoryItem, RawMaterial, SalesProduct, SalesYear,
    };

    fn estimate() -> CostEstimate {
        CostEstimate::new("Issiqxona", 2)
    }

    #[test]
    fn empty_estimate_is_valid() {
        assert_eq!(validate(&estimate()), Ok(()));
    }

    #[test]
    fn rejects_duration_outside_range() {
        let mut e = estimate();
        e.duration_years = 0;
        assert!(matches!(validate(&e), Err(EngineError::Validation(_))));
        e.duration_years = 11;
        assert!(matches!(validate(&e), Err(EngineError::Validation(_))));
    }

    #[test]
    fn rejects_negative_price_instead_of_clamping() {
        let mut e = estimate();
        e.raw_materials.push(RawMaterial {
            name: "Tuproq".to_string(),
            unit: "kg".to_string(),
            quantity: 10,
            price: Money::new(-1),
            financing_source: FinancingSource::Ministry,
        });
        let err = validate(&e).unwrap_err();
        assert!(err.to_string().contains("price must be >= 0"));
    }

    #[test]
    fn rejects_zero_headcount_and_long_contracts() {
        let mut e = estimate();
        e.employees.push(Employee {
            staff_type: CostGroup::Production,
            position: "Agronom".to_string(),
            count: 0,
            monthly_salary: Money::from_major(1),
            duration_months: 10,
            financing_source: FinancingSource::Organization,
        });
        assert!(validate(&e).is_err());
        e.employees[0].count = 1;
        e.employees[0].duration_months = 121;
        assert!(validate(&e).is_err());
        e.employees[0].duration_months = 120;
        assert_eq!(validate(&e), Ok(()));
    }

    #[test]
    fn rejects_duplicate_sales_years() {
        let mut e = estimate();
        let year = SalesYear {
            year: 1,
            products: vec![SalesProduct {
                name: "Pomidor".to_string(),
                unit: "kg".to_string(),
                quantity: 0,
                price: Money::ZERO,
            }],
        };
        e.sales_plan.push(year.clone());
        assert_eq!(validate(&e), Ok(()));
        e.sales_plan.push(year);
        assert!(validate(&e).is_err());
    }

    fn inventory_item(price: Money) -> InventoryItem {
        InventoryItem {
            name: "Nasos".to_string(),
            description: String::new(),
            link: String::new(),
            unit: "dona".to_string(),
            quantity: 1,
            price,
            financing_source: FinancingSource::Ministry,
        }
    }

    #[test]
    fn rejects_lines_whose_sum_overflows() {
        let mut e = estimate();
        let half = Money::new(i64::MAX / 2 + 1);
        e.inventory.push(inventory_item(half));
        assert_eq!(
            validate(&e),
            Err(EngineError::Validation(
                "estimate totals are too large".to_string()
            ))
        );
        e.inventory.push(inventory_item(half));
        assert!(validate(&e).is_err());
    }

    #[test]
    fn rejects_totals_that_fit_but_leave_no_headroom() {
        let mut e = estimate();
        e.inventory.push(inventory_item(MAX_ESTIMATE_VOLUME));
        assert_eq!(validate(&e), Ok(()));
        assert_eq!(
            crate::compute_grand_total(&e, &crate::Rates::default()),
            MAX_ESTIMATE_VOLUME
        );

        e.raw_materials.push(RawMaterial {
            name: "Un".to_string(),
            unit: "kg".to_string(),
            quantity: 1,
            price: Money::new(1),
            financing_source: FinancingSource::Organization,
        });
        assert!(validate(&e).is_err());
    }

    #[test]
    fn salary_counts_twice_towards_the_volume() {
        let mut e = estimate();
        e.employees.push(Employee {
            staff_type: CostGroup::Management,
            position: "Rahbar".to_string(),
            count: 1,
            monthly_salary: Money::new(i64::MAX / 6),
            duration_months: 1,
            financing_source: FinancingSource::Ministry,
        });
        assert!(validate(&e).is_err());
        e.employees[0].monthly_salary = Money::new(i64::MAX / 10);
        assert_eq!(validate(&e), Ok(()));
    }
}
