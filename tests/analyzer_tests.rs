use sales_report_studio::analyzer::engine::{
    by_category, by_customer_type, by_region, sales_over_time, sales_reps, top_products,
};
use sales_report_studio::analyzer::report::{comprehensive_report, VIEW_NAMES};
use sales_report_studio::loader::schema::{ColumnSet, RecordSet, TransactionRecord};

use chrono::NaiveDate;

fn full_record(
    product: &str,
    date: (i32, u32, u32),
    rep: &str,
    region: &str,
    category: &str,
    customer: &str,
    amount: f64,
    quantity: f64,
    cost: f64,
) -> TransactionRecord {
    let mut r = TransactionRecord::bare(product, amount);
    r.sale_date = NaiveDate::from_ymd_opt(date.0, date.1, date.2);
    r.sales_rep = Some(rep.to_string());
    r.region = Some(region.to_string());
    r.product_category = Some(category.to_string());
    r.customer_type = Some(customer.to_string());
    r.quantity_sold = Some(quantity);
    r.unit_cost = Some(cost);
    r.profit = Some(amount - cost * quantity);
    r
}

fn full_columns() -> ColumnSet {
    ColumnSet {
        sale_date: true,
        sales_rep: true,
        region: true,
        product_category: true,
        customer_type: true,
        quantity_sold: true,
        unit_cost: true,
        unit_price: false,
        discount: false,
        profit: true,
    }
}

fn sample_record_set() -> RecordSet {
    RecordSet::new(
        vec![
            full_record("P01", (2023, 1, 5), "Anna", "North", "Electronics", "New", 500.0, 2.0, 100.0),
            full_record("P02", (2023, 1, 20), "Boris", "South", "Clothing", "Returning", 200.0, 4.0, 30.0),
            full_record("P01", (2023, 2, 3), "Anna", "North", "Electronics", "Returning", 300.0, 1.0, 120.0),
            full_record("P03", (2023, 2, 14), "Clara", "East", "Groceries", "New", 50.0, 10.0, 3.0),
            full_record("P02", (2023, 3, 1), "Boris", "North", "Clothing", "New", 150.0, 3.0, 25.0),
        ],
        full_columns(),
    )
}

#[test]
fn test_market_share_sums_to_100() {
    let rs = sample_record_set();
    let rows = by_category(&rs);

    let share_sum: f64 = rows.iter().filter_map(|r| r.market_share_pct).sum();
    assert!(
        (share_sum - 100.0).abs() < 0.1,
        "shares sum to {}",
        share_sum
    );
}

#[test]
fn test_revenue_descending_views() {
    let rs = sample_record_set();
    for rows in [by_category(&rs), by_region(&rs), sales_reps(&rs), top_products(&rs, 10)] {
        for pair in rows.windows(2) {
            assert!(
                pair[0].total_revenue >= pair[1].total_revenue,
                "rows out of order: {} < {}",
                pair[0].total_revenue,
                pair[1].total_revenue
            );
        }
    }
}

#[test]
fn test_missing_columns_give_empty_views() {
    let rs = RecordSet::new(
        vec![TransactionRecord::bare("P1", 100.0)],
        ColumnSet::default(),
    );

    assert!(sales_over_time(&rs).is_empty());
    assert!(by_category(&rs).is_empty());
    assert!(by_region(&rs).is_empty());
    assert!(sales_reps(&rs).is_empty());
    assert!(by_customer_type(&rs).is_empty());
}

#[test]
fn test_report_keeps_empty_views_keyed() {
    // No region column: the region view is empty but the report still
    // carries the key
    let rs = RecordSet::new(
        vec![TransactionRecord::bare("P1", 100.0)],
        ColumnSet::default(),
    );
    let report = comprehensive_report(&rs, 10);

    let names: Vec<&str> = report.views().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, VIEW_NAMES);

    let (_, region_rows) = report.views()[2];
    assert!(region_rows.is_empty());
}

#[test]
fn test_top_products_cap_and_zero() {
    let rs = sample_record_set();

    assert!(top_products(&rs, 10).len() <= 10);
    assert_eq!(top_products(&rs, 2).len(), 2);
    assert!(top_products(&rs, 0).is_empty());
}

#[test]
fn test_efficiency_never_undefined() {
    let rs = sample_record_set();
    for row in sales_reps(&rs) {
        if let Some(eff) = row.efficiency {
            assert!(eff.is_finite());
        } else {
            assert_eq!(row.transaction_count, 0);
        }
    }
}

#[test]
fn test_engine_is_idempotent() {
    let rs = sample_record_set();

    let first = comprehensive_report(&rs, 10);
    let second = comprehensive_report(&rs, 10);

    assert_eq!(first, second);

    let a = serde_json::to_vec(&first).unwrap();
    let b = serde_json::to_vec(&second).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_category_scenario_from_two_rows() {
    let mut a = TransactionRecord::bare("P1", 100.0);
    a.product_category = Some("A".to_string());
    let mut b = TransactionRecord::bare("P2", 300.0);
    b.product_category = Some("B".to_string());

    let rs = RecordSet::new(
        vec![a, b],
        ColumnSet {
            product_category: true,
            ..Default::default()
        },
    );

    let rows = by_category(&rs);
    assert_eq!(rows[0].key, "B");
    assert_eq!(rows[0].total_revenue, 300.0);
    assert_eq!(rows[0].market_share_pct, Some(75.0));
    assert_eq!(rows[1].key, "A");
    assert_eq!(rows[1].total_revenue, 100.0);
    assert_eq!(rows[1].market_share_pct, Some(25.0));
}

#[test]
fn test_time_series_folds_months() {
    let rs = sample_record_set();
    let rows = sales_over_time(&rs);

    let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["2023-01", "2023-02", "2023-03"]);

    assert_eq!(rows[0].total_revenue, 700.0);
    assert_eq!(rows[0].transaction_count, 2);
    assert!(rows[0].average_ticket.is_none());
}

#[test]
fn test_profit_column_flows_through() {
    let rs = sample_record_set();

    let category = by_category(&rs);
    assert!(category.iter().all(|r| r.total_profit.is_some()));

    // Electronics: (500 - 200) + (300 - 120) = 480
    let electronics = category.iter().find(|r| r.key == "Electronics").unwrap();
    assert_eq!(electronics.total_profit, Some(480.0));
}

#[test]
fn test_units_sold_only_on_category_view() {
    let rs = sample_record_set();

    assert!(by_category(&rs).iter().all(|r| r.units_sold.is_some()));
    assert!(by_region(&rs).iter().all(|r| r.units_sold.is_none()));
    assert!(sales_reps(&rs).iter().all(|r| r.units_sold.is_none()));
}

#[test]
fn test_market_share_only_on_category_view() {
    let rs = sample_record_set();

    assert!(by_region(&rs).iter().all(|r| r.market_share_pct.is_none()));
    assert!(sales_reps(&rs).iter().all(|r| r.market_share_pct.is_none()));
    assert!(top_products(&rs, 10).iter().all(|r| r.market_share_pct.is_none()));
}
