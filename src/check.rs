use chrono::NaiveDate;

use crate::aggregate;
use crate::html::DashboardPage;
use crate::models::{OrderRow, ProductRow};
use crate::settings::DashboardSettings;
use crate::sidebar;

/// Outcome of exercising a dashboard layout end to end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckReport {
    pub sidebar_bound: bool,
    pub collapses_on_click: bool,
    pub restores_on_second_click: bool,
    pub charts_drawn: Vec<String>,
    pub failures: Vec<String>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds the dashboard layout, binds the sidebar, clicks the toggle twice and
/// draws every chart, collecting anything that went wrong.
pub fn run_check(
    settings: &DashboardSettings,
    orders: &[OrderRow],
    products: &[ProductRow],
    today: NaiveDate,
) -> CheckReport {
    let mut report = CheckReport::default();
    let mut dashboard = DashboardPage::new(settings.clone());

    match sidebar::init_sidebar(dashboard.page_mut(), settings) {
        Some(binding) => {
            report.sidebar_bound = true;
            dashboard.page_mut().click(binding.toggle);
            report.collapses_on_click = binding.is_collapsed(dashboard.page(), settings);
            dashboard.page_mut().click(binding.toggle);
            report.restores_on_second_click = !binding.is_collapsed(dashboard.page(), settings);
            if !report.collapses_on_click {
                report.failures.push("sidebar did not collapse on click".to_string());
            }
            if !report.restores_on_second_click {
                report.failures.push("sidebar did not expand on second click".to_string());
            }
        }
        None => report.failures.push("sidebar toggle was not bound".to_string()),
    }

    let statuses = aggregate::status_distribution(orders);
    let categories = aggregate::category_distribution(products);
    dashboard.set_totals(aggregate::dashboard_totals(orders, products, today));
    dashboard.set_recent_orders(aggregate::recent_orders(
        orders,
        aggregate::RECENT_ORDERS_LIMIT,
    ));
    dashboard.set_low_stock(&aggregate::low_stock_products(products));

    let results = [
        aggregate::orders_per_day(orders, today, settings.trend_days)
            .and_then(|trend| dashboard.orders_trend(&trend)),
        dashboard.status_breakdown(&statuses),
        dashboard.category_breakdown(&categories),
    ];
    for result in results {
        if let Err(err) = result {
            report.failures.push(format!("{err:#}"));
        }
    }

    report.charts_drawn = dashboard
        .charts()
        .iter()
        .map(|(id, _)| id.to_string())
        .collect();
    for canvas in dashboard.page().tree().canvas_ids() {
        if !report.charts_drawn.contains(&canvas) {
            report.failures.push(format!("canvas `{canvas}` has no chart"));
        }
    }

    if let Err(err) = dashboard.render() {
        report.failures.push(format!("page did not render: {err:#}"));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn default_layout_passes_with_no_data() {
        let report = run_check(&DashboardSettings::default(), &[], &[], today());

        assert!(report.passed(), "{:?}", report.failures);
        assert!(report.sidebar_bound);
        assert!(report.collapses_on_click);
        assert!(report.restores_on_second_click);
        assert_eq!(report.charts_drawn.len(), 3);
    }

    #[test]
    fn shared_surface_keeps_latest_chart() {
        let settings = DashboardSettings {
            category_surface_id: "statusChart".to_string(),
            ..DashboardSettings::default()
        };
        let report = run_check(&settings, &[], &[], today());

        // both pie charts land on one canvas
        assert_eq!(report.charts_drawn.len(), 2);
        assert!(report.passed());
    }

    #[test]
    fn oversized_trend_window_is_reported() {
        let settings = DashboardSettings {
            trend_days: u32::MAX,
            ..DashboardSettings::default()
        };
        let report = run_check(&settings, &[], &[], today());

        assert!(!report.passed());
        assert!(report.failures[0].contains("day limit"), "{:?}", report.failures);
        assert!(!report.charts_drawn.contains(&settings.orders_surface_id));
    }
}
