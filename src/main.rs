use std::path::{Path, PathBuf};

use admin_dashboard_charts::adapter;
use admin_dashboard_charts::aggregate;
use admin_dashboard_charts::backend::ChartRegistry;
use admin_dashboard_charts::check;
use admin_dashboard_charts::html::DashboardPage;
use admin_dashboard_charts::logging;
use admin_dashboard_charts::models::ProductRow;
use admin_dashboard_charts::page::{Element, ElementTree};
use admin_dashboard_charts::settings::DashboardSettings;
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "admin-dashboard-charts")]
#[command(about = "Chart configurations and dashboard pages for the admin dashboard", long_about = None)]
struct Cli {
    /// Settings file (JSON); falls back to $DASHBOARD_CONFIG, then defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartKindArg {
    Line,
    Pie,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an adapter over raw JSON records and print the chart configuration
    Chart {
        #[arg(long, value_enum)]
        kind: ChartKindArg,
        #[arg(long)]
        records: PathBuf,
        #[arg(long, default_value = "chart")]
        surface: String,
    },
    /// Print the orders-per-day line chart for an orders CSV export
    OrdersTrend {
        #[arg(long)]
        orders: PathBuf,
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(1..=i64::from(aggregate::MAX_TREND_DAYS))
        )]
        days: Option<u32>,
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print the order status pie chart for an orders CSV export
    StatusBreakdown {
        #[arg(long)]
        orders: PathBuf,
    },
    /// Print the product category pie chart for a products CSV export
    Categories {
        #[arg(long)]
        products: PathBuf,
    },
    /// Write a standalone HTML dashboard
    Dashboard {
        #[arg(long)]
        orders: PathBuf,
        #[arg(long)]
        products: Option<PathBuf>,
        #[arg(long)]
        today: Option<NaiveDate>,
        #[arg(long, default_value = "dashboard.html")]
        out: PathBuf,
    },
    /// Exercise the dashboard layout: sidebar toggle and every chart surface
    Check {
        #[arg(long)]
        orders: Option<PathBuf>,
        #[arg(long)]
        products: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let settings = DashboardSettings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Chart {
            kind,
            records,
            surface,
        } => {
            let records = aggregate::load_records(&records)?;
            let mut surfaces = ElementTree::default();
            surfaces.insert(Element::new("canvas").with_id(&surface));
            let mut registry = ChartRegistry::new();
            match kind {
                ChartKindArg::Line => {
                    adapter::render_orders_trend(&surfaces, &mut registry, &surface, &records)?
                }
                ChartKindArg::Pie => {
                    adapter::render_status_breakdown(&surfaces, &mut registry, &surface, &records)?
                }
            }
            let config = registry
                .chart(&surface)
                .context("chart was not drawn")?;
            println!("{}", config.to_json_pretty()?);
        }
        Commands::OrdersTrend {
            orders,
            days,
            today,
        } => {
            let orders = aggregate::load_orders(&orders)?;
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            let records =
                aggregate::orders_per_day(&orders, today, days.unwrap_or(settings.trend_days))?;
            println!("{}", adapter::orders_trend_config(&records).to_json_pretty()?);
        }
        Commands::StatusBreakdown { orders } => {
            let orders = aggregate::load_orders(&orders)?;
            let records = aggregate::status_distribution(&orders);
            println!("{}", adapter::status_breakdown_config(&records).to_json_pretty()?);
        }
        Commands::Categories { products } => {
            let products = aggregate::load_products(&products)?;
            let records = aggregate::category_distribution(&products);
            println!("{}", adapter::status_breakdown_config(&records).to_json_pretty()?);
        }
        Commands::Dashboard {
            orders,
            products,
            today,
            out,
        } => {
            let orders = aggregate::load_orders(&orders)?;
            let products = load_optional_products(products.as_deref())?;
            let today = today.unwrap_or_else(|| Utc::now().date_naive());

            let mut dashboard = DashboardPage::new(settings.clone());
            dashboard.set_totals(aggregate::dashboard_totals(&orders, &products, today));
            dashboard.set_recent_orders(aggregate::recent_orders(
                &orders,
                aggregate::RECENT_ORDERS_LIMIT,
            ));
            dashboard.set_low_stock(&aggregate::low_stock_products(&products));
            dashboard.orders_trend(&aggregate::orders_per_day(
                &orders,
                today,
                settings.trend_days,
            )?)?;
            dashboard.status_breakdown(&aggregate::status_distribution(&orders))?;
            dashboard.category_breakdown(&aggregate::category_distribution(&products))?;

            std::fs::write(&out, dashboard.render()?)
                .with_context(|| format!("failed to write {}", out.display()))?;
            tracing::info!(charts = dashboard.charts().len(), "dashboard rendered");
            println!("Dashboard written to {}.", out.display());
        }
        Commands::Check { orders, products } => {
            let orders = match orders {
                Some(path) => aggregate::load_orders(&path)?,
                None => Vec::new(),
            };
            let products = load_optional_products(products.as_deref())?;
            let report = check::run_check(&settings, &orders, &products, Utc::now().date_naive());

            println!("Sidebar bound: {}", report.sidebar_bound);
            println!("Collapses on click: {}", report.collapses_on_click);
            println!("Restores on second click: {}", report.restores_on_second_click);
            println!("Charts drawn: {}", report.charts_drawn.join(", "));
            if !report.passed() {
                for failure in &report.failures {
                    println!("- {failure}");
                }
                anyhow::bail!("dashboard check failed with {} problem(s)", report.failures.len());
            }
            println!("Dashboard check passed.");
        }
    }

    Ok(())
}

fn load_optional_products(path: Option<&Path>) -> anyhow::Result<Vec<ProductRow>> {
    match path {
        Some(path) => aggregate::load_products(path),
        None => Ok(Vec::new()),
    }
}
