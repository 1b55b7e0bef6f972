use std::collections::BTreeMap;

use crate::chart::ChartConfig;
use crate::page::DrawingContext;

pub trait ChartBackend {
    fn draw(&mut self, context: &DrawingContext, config: ChartConfig);
}

/// Keeps the chart currently drawn on each surface. Drawing on a surface
/// that already has a chart replaces it.
#[derive(Debug, Clone, Default)]
pub struct ChartRegistry {
    charts: BTreeMap<String, ChartConfig>,
    draw_calls: usize,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chart(&self, surface_id: &str) -> Option<&ChartConfig> {
        self.charts.get(surface_id)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChartConfig)> {
        self.charts.iter().map(|(id, config)| (id.as_str(), config))
    }
}

impl ChartBackend for ChartRegistry {
    fn draw(&mut self, context: &DrawingContext, config: ChartConfig) {
        if self.charts.insert(context.surface_id.clone(), config).is_some() {
            tracing::debug!(surface = %context.surface_id, "replaced existing chart");
        }
        self.draw_calls += 1;
    }
}
