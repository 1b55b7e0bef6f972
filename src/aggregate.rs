use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use chrono::{Duration, NaiveDate};

use crate::models::{
    ChartRecord, DashboardTotals, OrderRow, OrderStatus, ProductRow, RecentOrder,
};

pub const LOW_STOCK_THRESHOLD: i64 = 5;
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const MAX_TREND_DAYS: u32 = 3660;
pub const RECENT_ORDERS_LIMIT: usize = 10;
pub const UNKNOWN_BUYER: &str = "N/A";

pub fn load_orders(path: &Path) -> anyhow::Result<Vec<OrderRow>> {
    load_csv(path).with_context(|| format!("failed to load orders from {}", path.display()))
}

pub fn load_products(path: &Path) -> anyhow::Result<Vec<ProductRow>> {
    load_csv(path).with_context(|| format!("failed to load products from {}", path.display()))
}

fn load_csv<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<T>().enumerate() {
        // header is line 1
        let row = result.with_context(|| format!("bad row on line {}", index + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Reads a JSON array of loosely-typed chart records.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<ChartRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read records from {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;
    let serde_json::Value::Array(items) = value else {
        anyhow::bail!("{} must contain a JSON array of records", path.display());
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            ChartRecord::from_value(item)
                .with_context(|| format!("bad record {} in {}", index, path.display()))
        })
        .collect()
}

pub fn order_status(order: &OrderRow) -> OrderStatus {
    if order.is_completed {
        OrderStatus::Delivered
    } else if order.is_paid {
        OrderStatus::Paid
    } else {
        OrderStatus::Pending
    }
}

/// One `{date, orders}` record per day for the `days` days ending at `today`,
/// oldest first. Days without orders count zero.
pub fn orders_per_day(
    orders: &[OrderRow],
    today: NaiveDate,
    days: u32,
) -> anyhow::Result<Vec<ChartRecord>> {
    if days > MAX_TREND_DAYS {
        anyhow::bail!("trend window of {days} days exceeds the {MAX_TREND_DAYS} day limit");
    }
    let days = i64::from(days.max(1));
    let first = today
        .checked_sub_signed(Duration::days(days - 1))
        .with_context(|| format!("trend window of {days} days ending {today} is out of range"))?;
    let mut counts: HashMap<NaiveDate, u64> = HashMap::new();

    for order in orders {
        let day = order.created_at.date();
        if day < first || day > today {
            continue;
        }
        *counts.entry(day).or_insert(0) += 1;
    }

    Ok((0..days)
        .map(|offset| {
            let day = first + Duration::days(offset);
            ChartRecord::new()
                .with("date", day.to_string())
                .with("orders", counts.get(&day).copied().unwrap_or(0))
        })
        .collect())
}

/// `{status, count}` for pending, paid and delivered, in that order.
pub fn status_distribution(orders: &[OrderRow]) -> Vec<ChartRecord> {
    let mut counts: HashMap<OrderStatus, u64> = HashMap::new();
    for order in orders {
        *counts.entry(order_status(order)).or_insert(0) += 1;
    }

    OrderStatus::ALL
        .iter()
        .map(|status| {
            ChartRecord::new()
                .with("status", status.as_str())
                .with("count", counts.get(status).copied().unwrap_or(0))
        })
        .collect()
}

/// `{category, count}` per product category, largest first.
pub fn category_distribution(products: &[ProductRow]) -> Vec<ChartRecord> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for product in products {
        let category = product.category.trim();
        let category = if category.is_empty() {
            UNCATEGORIZED
        } else {
            category
        };
        *counts.entry(category.to_string()).or_insert(0) += 1;
    }

    let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
        .into_iter()
        .map(|(category, count)| {
            ChartRecord::new()
                .with("category", category)
                .with("count", count)
        })
        .collect()
}

/// The newest `limit` orders, newest first. Ties on time go to the higher id.
pub fn recent_orders(orders: &[OrderRow], limit: usize) -> Vec<RecentOrder> {
    let mut newest: Vec<&OrderRow> = orders.iter().collect();
    newest.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    newest
        .into_iter()
        .take(limit)
        .map(|order| {
            let buyer = order.buyer.trim();
            RecentOrder {
                id: order.id,
                buyer: if buyer.is_empty() {
                    UNKNOWN_BUYER.to_string()
                } else {
                    buyer.to_string()
                },
                total_amount: order.total_amount,
                status: order_status(order),
                created_at: order.created_at,
            }
        })
        .collect()
}

/// Products at or below the low-stock threshold, scarcest first.
pub fn low_stock_products(products: &[ProductRow]) -> Vec<&ProductRow> {
    let mut low: Vec<&ProductRow> = products
        .iter()
        .filter(|p| p.stock.map_or(false, |s| s <= LOW_STOCK_THRESHOLD))
        .collect();
    low.sort_by(|a, b| a.stock.cmp(&b.stock).then_with(|| a.name.cmp(&b.name)));
    low
}

pub fn dashboard_totals(
    orders: &[OrderRow],
    products: &[ProductRow],
    today: NaiveDate,
) -> DashboardTotals {
    DashboardTotals {
        total_orders: orders.len(),
        total_revenue: orders
            .iter()
            .filter(|o| o.is_paid)
            .map(|o| o.total_amount)
            .sum(),
        orders_today: orders
            .iter()
            .filter(|o| o.created_at.date() == today)
            .count(),
        unpaid_orders: orders.iter().filter(|o| !o.is_paid).count(),
        total_products: products.len(),
        low_stock: low_stock_products(products).len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{status_label, status_value};

    fn order(id: u64, created: &str, paid: bool, completed: bool, amount: f64) -> OrderRow {
        OrderRow {
            id,
            buyer: format!("buyer-{id}"),
            created_at: chrono::NaiveDateTime::parse_from_str(created, "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            total_amount: amount,
            is_paid: paid,
            is_completed: completed,
        }
    }

    fn product(name: &str, category: &str, stock: Option<i64>) -> ProductRow {
        ProductRow {
            name: name.to_string(),
            category: category.to_string(),
            stock,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn status_prefers_completed_over_paid() {
        let at = "2026-10-19T09:00:00";
        let delivered = order(1, at, true, true, 1.0);
        let paid = order(2, at, true, false, 1.0);
        let pending = order(3, at, false, false, 1.0);

        assert_eq!(order_status(&delivered), OrderStatus::Delivered);
        assert_eq!(order_status(&paid), OrderStatus::Paid);
        assert_eq!(order_status(&pending), OrderStatus::Pending);
    }

    #[test]
    fn orders_per_day_fills_gaps_oldest_first() {
        let orders = vec![
            order(1, "2026-10-19T08:15:00", false, false, 10.0),
            order(2, "2026-10-19T17:40:00", true, false, 12.0),
            order(3, "2026-10-16T11:00:00", true, true, 30.0),
            order(4, "2026-10-01T11:00:00", true, true, 30.0),
        ];
        let records = orders_per_day(&orders, today(), 7).unwrap();

        assert_eq!(records.len(), 7);
        assert_eq!(records[0].label("date").as_deref(), Some("2026-10-13"));
        assert_eq!(records[6].label("date").as_deref(), Some("2026-10-19"));
        assert_eq!(records[6].value("orders"), Some(2.0));
        assert_eq!(records[3].value("orders"), Some(1.0));
        assert_eq!(records[0].value("orders"), Some(0.0));
    }

    #[test]
    fn zero_day_window_still_covers_today() {
        let records = orders_per_day(&[], today(), 0).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label("date").as_deref(), Some("2026-10-19"));
    }

    #[test]
    fn oversized_window_is_an_error() {
        let err = orders_per_day(&[], today(), u32::MAX).unwrap_err();
        assert!(err.to_string().contains("day limit"));

        let records = orders_per_day(&[], today(), MAX_TREND_DAYS).unwrap();
        assert_eq!(records.len(), MAX_TREND_DAYS as usize);

        let earliest = NaiveDate::MIN;
        assert!(orders_per_day(&[], earliest, 2).is_err());
        assert_eq!(orders_per_day(&[], earliest, 1).unwrap().len(), 1);
    }

    #[test]
    fn recent_orders_are_newest_first_and_limited() {
        let mut orders: Vec<OrderRow> = (1..=12)
            .map(|id| {
                let created = format!("2026-10-{id:02}T09:00:00");
                order(id, &created, id % 2 == 0, id % 3 == 0, 5.0)
            })
            .collect();
        orders[0].buyer = " ".to_string();
        orders.push(order(13, "2026-10-12T09:00:00", false, false, 7.0));

        let recent = recent_orders(&orders, RECENT_ORDERS_LIMIT);
        let ids: Vec<u64> = recent.iter().map(|r| r.id).collect();
        assert_eq!(ids, [13, 12, 11, 10, 9, 8, 7, 6, 5, 4]);
        assert_eq!(recent[1].status, OrderStatus::Delivered);
        assert_eq!(recent[2].status, OrderStatus::Pending);
        assert_eq!(recent[3].status, OrderStatus::Paid);
        assert_eq!(recent[0].buyer, "buyer-13");

        let all = recent_orders(&orders, 20);
        assert_eq!(all.last().map(|r| r.buyer.as_str()), Some(UNKNOWN_BUYER));
    }

    #[test]
    fn low_stock_lists_scarcest_first() {
        let products = vec![
            product("Pan", "kitchen", Some(5)),
            product("Mug", "kitchen", Some(2)),
            product("Lamp", "home", None),
            product("Cup", "kitchen", Some(5)),
            product("Rug", "decor", Some(6)),
        ];
        let names: Vec<&str> = low_stock_products(&products)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Mug", "Cup", "Pan"]);
    }

    #[test]
    fn status_distribution_has_fixed_order() {
        let orders = vec![
            order(1, "2026-10-19T08:00:00", false, false, 1.0),
            order(2, "2026-10-19T08:00:00", true, true, 1.0),
            order(3, "2026-10-19T08:00:00", false, false, 1.0),
        ];
        let records = status_distribution(&orders);

        let labels: Vec<Option<String>> = records.iter().map(status_label).collect();
        let values: Vec<f64> = records.iter().map(status_value).collect();
        assert_eq!(
            labels,
            vec![
                Some("pending".to_string()),
                Some("paid".to_string()),
                Some("delivered".to_string())
            ]
        );
        assert_eq!(values, vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn categories_sorted_by_count_then_name() {
        let products = vec![
            product("Mug", "kitchen", Some(3)),
            product("Pan", "kitchen", Some(20)),
            product("Lamp", "home", None),
            product("Rug", "decor", Some(1)),
            product("Tape", " ", Some(9)),
        ];
        let records = category_distribution(&products);

        let labels: Vec<String> = records.iter().filter_map(status_label).collect();
        assert_eq!(labels, ["kitchen", "Uncategorized", "decor", "home"]);
        assert_eq!(status_value(&records[0]), 2.0);
    }

    #[test]
    fn totals_count_revenue_and_stock() {
        let orders = vec![
            order(1, "2026-10-19T08:00:00", true, false, 25.5),
            order(2, "2026-10-18T08:00:00", true, true, 10.0),
            order(3, "2026-10-19T12:00:00", false, false, 99.0),
        ];
        let products = vec![
            product("Mug", "kitchen", Some(5)),
            product("Pan", "kitchen", Some(6)),
            product("Lamp", "home", None),
        ];
        let totals = dashboard_totals(&orders, &products, today());

        assert_eq!(totals.total_orders, 3);
        assert!((totals.total_revenue - 35.5).abs() < 0.001);
        assert_eq!(totals.orders_today, 2);
        assert_eq!(totals.unpaid_orders, 1);
        assert_eq!(totals.total_products, 3);
        assert_eq!(totals.low_stock, 1);
    }
}
