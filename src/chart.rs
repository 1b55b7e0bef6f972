use serde::{Deserialize, Serialize};

pub const ORDERS_SERIES_LABEL: &str = "Orders";
pub const ORDERS_BORDER_COLOR: &str = "#007bff";
pub const ORDERS_FILL_COLOR: &str = "rgba(0,123,255,0.1)";
pub const ORDERS_TENSION: f64 = 0.3;

pub const PIE_PALETTE: [&str; 5] = ["#007bff", "#28a745", "#ffc107", "#dc3545", "#6c757d"];

/// Color the library assigns to slice `index`; the palette repeats past five slices.
pub fn slice_color(index: usize) -> &'static str {
    PIE_PALETTE[index % PIE_PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<Option<String>>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dataset {
    Line(LineDataset),
    Pie(PieDataset),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub border_color: String,
    pub background_color: String,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieDataset {
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub responsive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Plugins>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub display: bool,
}

impl ChartConfig {
    pub fn line(labels: Vec<Option<String>>, values: Vec<Option<f64>>) -> Self {
        Self {
            kind: ChartKind::Line,
            data: ChartData {
                labels,
                datasets: vec![Dataset::Line(LineDataset {
                    label: ORDERS_SERIES_LABEL.to_string(),
                    data: values,
                    border_color: ORDERS_BORDER_COLOR.to_string(),
                    background_color: ORDERS_FILL_COLOR.to_string(),
                    tension: ORDERS_TENSION,
                })],
            },
            options: ChartOptions {
                responsive: true,
                plugins: Some(Plugins {
                    legend: Legend { display: false },
                }),
            },
        }
    }

    pub fn pie(labels: Vec<Option<String>>, values: Vec<f64>) -> Self {
        Self {
            kind: ChartKind::Pie,
            data: ChartData {
                labels,
                datasets: vec![Dataset::Pie(PieDataset {
                    data: values,
                    background_color: PIE_PALETTE.iter().map(|c| c.to_string()).collect(),
                })],
            },
            options: ChartOptions {
                responsive: true,
                plugins: None,
            },
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn point_count(&self) -> usize {
        match self.data.datasets.first() {
            Some(Dataset::Line(line)) => line.data.len(),
            Some(Dataset::Pie(pie)) => pie.data.len(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn line_config_matches_library_shape() {
        let config = ChartConfig::line(
            vec![Some("2026-10-18".to_string()), Some("2026-10-19".to_string())],
            vec![Some(4.0), None],
        );
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "line",
                "data": {
                    "labels": ["2026-10-18", "2026-10-19"],
                    "datasets": [{
                        "label": "Orders",
                        "data": [4.0, null],
                        "borderColor": "#007bff",
                        "backgroundColor": "rgba(0,123,255,0.1)",
                        "tension": 0.3
                    }]
                },
                "options": {"responsive": true, "plugins": {"legend": {"display": false}}}
            })
        );
    }

    #[test]
    fn pie_config_omits_plugins() {
        let config = ChartConfig::pie(vec![Some("open".to_string()), None], vec![5.0, 0.0]);
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "pie",
                "data": {
                    "labels": ["open", null],
                    "datasets": [{
                        "data": [5.0, 0.0],
                        "backgroundColor": ["#007bff", "#28a745", "#ffc107", "#dc3545", "#6c757d"]
                    }]
                },
                "options": {"responsive": true}
            })
        );
    }

    #[test]
    fn palette_cycles_after_five_slices() {
        assert_eq!(slice_color(0), "#007bff");
        assert_eq!(slice_color(4), "#6c757d");
        assert_eq!(slice_color(5), "#007bff");
        assert_eq!(slice_color(7), "#ffc107");
    }

    #[test]
    fn config_survives_json_round_trip() {
        let config = ChartConfig::line(vec![Some("a".to_string())], vec![Some(1.0)]);
        let parsed: ChartConfig = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.point_count(), 1);
    }
}
