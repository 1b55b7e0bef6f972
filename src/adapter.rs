use anyhow::Context;

use crate::backend::ChartBackend;
use crate::chart::ChartConfig;
use crate::models::ChartRecord;
use crate::page::SurfaceLookup;

pub type LabelAccessor = fn(&ChartRecord) -> Option<String>;
pub type ValueAccessor = fn(&ChartRecord) -> Option<f64>;

/// Tried in order; the first accessor yielding a value wins.
pub const STATUS_LABEL_CHAIN: [LabelAccessor; 3] = [status_field, name_field, category_field];

pub const STATUS_VALUE_CHAIN: [ValueAccessor; 2] = [count_field, value_field];

pub const STATUS_VALUE_DEFAULT: f64 = 0.0;

pub fn status_label(record: &ChartRecord) -> Option<String> {
    STATUS_LABEL_CHAIN.iter().find_map(|accessor| accessor(record))
}

pub fn status_value(record: &ChartRecord) -> f64 {
    STATUS_VALUE_CHAIN
        .iter()
        .find_map(|accessor| accessor(record))
        .unwrap_or(STATUS_VALUE_DEFAULT)
}

fn status_field(record: &ChartRecord) -> Option<String> {
    record.text("status")
}

fn name_field(record: &ChartRecord) -> Option<String> {
    record.text("name")
}

fn category_field(record: &ChartRecord) -> Option<String> {
    record.text("category")
}

fn count_field(record: &ChartRecord) -> Option<f64> {
    record.number("count")
}

fn value_field(record: &ChartRecord) -> Option<f64> {
    record.number("value")
}

pub fn orders_trend_config(records: &[ChartRecord]) -> ChartConfig {
    let labels = records.iter().map(|r| r.label("date")).collect();
    let values = records.iter().map(|r| r.value("orders")).collect();
    ChartConfig::line(labels, values)
}

pub fn status_breakdown_config(records: &[ChartRecord]) -> ChartConfig {
    let labels = records.iter().map(status_label).collect();
    let values = records.iter().map(status_value).collect();
    ChartConfig::pie(labels, values)
}

pub fn render_orders_trend<S, B>(
    surfaces: &S,
    backend: &mut B,
    surface_id: &str,
    records: &[ChartRecord],
) -> anyhow::Result<()>
where
    S: SurfaceLookup + ?Sized,
    B: ChartBackend + ?Sized,
{
    render(surfaces, backend, surface_id, orders_trend_config(records))
        .context("failed to render orders trend")
}

pub fn render_status_breakdown<S, B>(
    surfaces: &S,
    backend: &mut B,
    surface_id: &str,
    records: &[ChartRecord],
) -> anyhow::Result<()>
where
    S: SurfaceLookup + ?Sized,
    B: ChartBackend + ?Sized,
{
    render(surfaces, backend, surface_id, status_breakdown_config(records))
        .context("failed to render status breakdown")
}

fn render<S, B>(
    surfaces: &S,
    backend: &mut B,
    surface_id: &str,
    config: ChartConfig,
) -> anyhow::Result<()>
where
    S: SurfaceLookup + ?Sized,
    B: ChartBackend + ?Sized,
{
    let context = surfaces.drawing_context(surface_id)?;
    tracing::debug!(
        surface = surface_id,
        kind = ?config.kind,
        points = config.point_count(),
        "drawing chart"
    );
    backend.draw(&context, config);
    Ok(())
}
