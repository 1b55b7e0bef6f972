use std::fmt::Write;

use crate::adapter::{
    render_orders_trend, render_status_breakdown, status_label, status_value,
};
use crate::backend::ChartRegistry;
use crate::chart::slice_color;
use crate::models::{ChartRecord, DashboardTotals, ProductRow, RecentOrder};
use crate::page::Page;
use crate::settings::DashboardSettings;

pub struct DashboardPage {
    settings: DashboardSettings,
    page: Page,
    charts: ChartRegistry,
    totals: Option<DashboardTotals>,
    legend: Vec<(String, f64)>,
    recent: Vec<RecentOrder>,
    low_stock: Vec<(String, i64)>,
}

impl DashboardPage {
    pub fn new(settings: DashboardSettings) -> Self {
        let page = Page::dashboard_layout(&settings);
        Self {
            settings,
            page,
            charts: ChartRegistry::new(),
            totals: None,
            legend: Vec::new(),
            recent: Vec::new(),
            low_stock: Vec::new(),
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn charts(&self) -> &ChartRegistry {
        &self.charts
    }

    pub fn orders_trend(&mut self, records: &[ChartRecord]) -> anyhow::Result<()> {
        let surface = &self.settings.orders_surface_id;
        render_orders_trend(&self.page, &mut self.charts, surface, records)
    }

    pub fn status_breakdown(&mut self, records: &[ChartRecord]) -> anyhow::Result<()> {
        let surface = &self.settings.status_surface_id;
        render_status_breakdown(&self.page, &mut self.charts, surface, records)?;
        self.set_status_legend(records);
        Ok(())
    }

    pub fn category_breakdown(&mut self, records: &[ChartRecord]) -> anyhow::Result<()> {
        let surface = &self.settings.category_surface_id;
        render_status_breakdown(&self.page, &mut self.charts, surface, records)
    }

    pub fn set_totals(&mut self, totals: DashboardTotals) {
        self.totals = Some(totals);
    }

    pub fn set_recent_orders(&mut self, recent: Vec<RecentOrder>) {
        self.recent = recent;
    }

    pub fn set_low_stock(&mut self, products: &[&ProductRow]) {
        self.low_stock = products
            .iter()
            .filter_map(|p| Some((p.name.clone(), p.stock?)))
            .collect();
    }

    /// Slice labels and values shown next to the status chart.
    pub fn set_status_legend(&mut self, records: &[ChartRecord]) {
        self.legend = records
            .iter()
            .map(|r| (status_label(r).unwrap_or_default(), status_value(r)))
            .collect();
    }

    pub fn render(&self) -> anyhow::Result<String> {
        let settings = &self.settings;
        let mut output = String::new();

        let _ = writeln!(output, "<!DOCTYPE html>");
        let _ = writeln!(output, "<html lang=\"en\">");
        let _ = writeln!(output, "<head>");
        let _ = writeln!(output, "<meta charset=\"utf-8\">");
        let _ = writeln!(output, "<title>{}</title>", escape_html(&settings.title));
        let _ = writeln!(output, "<style>{}</style>", stylesheet(settings));
        let _ = writeln!(
            output,
            "<script src=\"{}\"></script>",
            escape_html(&settings.chart_script_src)
        );
        let _ = writeln!(output, "</head>");
        let _ = writeln!(output, "<body>");
        let _ = writeln!(output, "<div id=\"{}\">", escape_html(&settings.root_id));
        let _ = writeln!(output, "{}", sidebar_markup(settings));
        let _ = writeln!(output, "<main class=\"admin-main\">");
        let _ = writeln!(
            output,
            "<button id=\"{}\" type=\"button\">&#9776;</button>",
            escape_html(&settings.toggle_id)
        );
        let _ = writeln!(output, "<h1>{}</h1>", escape_html(&settings.title));

        if let Some(totals) = &self.totals {
            let _ = writeln!(output, "{}", totals_markup(totals));
        }
        if !self.low_stock.is_empty() {
            let _ = writeln!(output, "{}", low_stock_markup(&self.low_stock));
        }

        for surface in settings.surface_ids() {
            let _ = writeln!(output, "<section class=\"chart-card\">");
            let _ = writeln!(output, "<canvas id=\"{}\"></canvas>", escape_html(surface));
            if surface == settings.status_surface_id && !self.legend.is_empty() {
                let _ = writeln!(output, "{}", legend_markup(&self.legend));
            }
            let _ = writeln!(output, "</section>");
        }

        if !self.recent.is_empty() {
            let _ = writeln!(output, "{}", recent_orders_markup(&self.recent));
        }

        let _ = writeln!(output, "</main>");
        let _ = writeln!(output, "</div>");
        let _ = writeln!(output, "<script>");
        for (surface_id, config) in self.charts.iter() {
            let _ = writeln!(
                output,
                "new Chart(document.getElementById({}).getContext('2d'), {});",
                script_json(&serde_json::to_string(surface_id)?),
                script_json(&config.to_json()?)
            );
        }
        let _ = writeln!(output, "{}", toggle_script(settings)?);
        let _ = writeln!(output, "</script>");
        let _ = writeln!(output, "</body>");
        let _ = writeln!(output, "</html>");

        Ok(output)
    }
}

fn sidebar_markup(settings: &DashboardSettings) -> String {
    let selector = settings.sidebar_selector.trim();
    let attribute = if let Some(id) = selector.strip_prefix('#') {
        format!("id=\"{}\"", escape_html(id))
    } else {
        let class = selector.strip_prefix('.').unwrap_or(selector);
        format!("class=\"{}\"", escape_html(class))
    };
    format!(
        "<aside {attribute}><nav><a href=\"#\">Dashboard</a><a href=\"#\">Orders</a>\
         <a href=\"#\">Products</a><a href=\"#\">Users</a><a href=\"#\">Payments</a></nav></aside>"
    )
}

fn totals_markup(totals: &DashboardTotals) -> String {
    let cards = [
        ("Total orders", totals.total_orders.to_string()),
        ("Revenue", format!("{:.2}", totals.total_revenue)),
        ("Orders today", totals.orders_today.to_string()),
        ("Unpaid", totals.unpaid_orders.to_string()),
        ("Products", totals.total_products.to_string()),
        ("Low stock", totals.low_stock.to_string()),
    ];
    let mut output = String::from("<div class=\"totals\">");
    for (label, value) in cards {
        let _ = write!(
            output,
            "<div class=\"card\"><span>{label}</span><strong>{value}</strong></div>"
        );
    }
    output.push_str("</div>");
    output
}

fn low_stock_markup(products: &[(String, i64)]) -> String {
    let mut output = String::from("<ul class=\"low-stock\">");
    for (name, stock) in products {
        let _ = write!(output, "<li>{} ({stock} left)</li>", escape_html(name));
    }
    output.push_str("</ul>");
    output
}

fn recent_orders_markup(recent: &[RecentOrder]) -> String {
    let mut output = String::from(
        "<section class=\"recent-orders\"><h2>Recent orders</h2><table>\
         <thead><tr><th>#</th><th>Buyer</th><th>Total</th><th>Status</th><th>Placed</th></tr></thead><tbody>",
    );
    for order in recent {
        let _ = write!(
            output,
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td class=\"status-{status}\">{status}</td><td>{}</td></tr>",
            order.id,
            escape_html(&order.buyer),
            order.total_amount,
            order.created_at.format("%Y-%m-%d %H:%M"),
            status = order.status.as_str(),
        );
    }
    output.push_str("</tbody></table></section>");
    output
}

fn legend_markup(legend: &[(String, f64)]) -> String {
    let mut output = String::from("<ul class=\"legend\">");
    for (index, (label, value)) in legend.iter().enumerate() {
        let _ = write!(
            output,
            "<li><span class=\"swatch\" style=\"background:{}\"></span>{} ({})</li>",
            slice_color(index),
            escape_html(label),
            value
        );
    }
    output.push_str("</ul>");
    output
}

fn stylesheet(settings: &DashboardSettings) -> String {
    let sidebar = settings.sidebar_selector.trim();
    format!(
        "body{{margin:0;font-family:system-ui,sans-serif}}\
         #{root}{{display:flex}}\
         {sidebar}{{width:220px;background:#212529;min-height:100vh}}\
         {sidebar} a{{display:block;color:#fff;padding:8px 16px;text-decoration:none}}\
         {sidebar}.{collapsed}{{width:0;overflow:hidden}}\
         #{root}.{root_collapsed} .admin-main{{margin-left:0}}\
         .admin-main{{flex:1;padding:16px}}\
         .totals{{display:flex;gap:12px}}\
         .card{{border:1px solid #dee2e6;padding:8px 12px;display:flex;flex-direction:column}}\
         .chart-card{{max-width:640px;margin:16px 0}}\
         .recent-orders td,.recent-orders th{{padding:4px 8px;text-align:left}}\
         .swatch{{display:inline-block;width:10px;height:10px;margin-right:6px}}",
        root = settings.root_id,
        collapsed = settings.sidebar_collapsed_class,
        root_collapsed = settings.root_collapsed_class,
    )
}

fn toggle_script(settings: &DashboardSettings) -> anyhow::Result<String> {
    let toggle = script_json(&serde_json::to_string(&settings.toggle_id)?);
    let sidebar = script_json(&serde_json::to_string(&settings.sidebar_selector)?);
    let root = script_json(&serde_json::to_string(&settings.root_id)?);
    let collapsed = script_json(&serde_json::to_string(&settings.sidebar_collapsed_class)?);
    let root_collapsed = script_json(&serde_json::to_string(&settings.root_collapsed_class)?);
    Ok(format!(
        "document.addEventListener('DOMContentLoaded', function () {{\n\
         \x20 const toggle = document.getElementById({toggle});\n\
         \x20 const sidebar = document.querySelector({sidebar});\n\
         \x20 const root = document.getElementById({root});\n\
         \x20 if (!toggle || !sidebar) return;\n\
         \x20 toggle.addEventListener('click', function () {{\n\
         \x20   sidebar.classList.toggle({collapsed});\n\
         \x20   if (root) root.classList.toggle({root_collapsed});\n\
         \x20 }});\n\
         }});"
    ))
}

/// JSON placed inside a `<script>` element must not close it early.
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
