use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::aggregate::MAX_TREND_DAYS;

pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG";

/// Element identifiers, marker classes and page options for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub title: String,
    pub toggle_id: String,
    pub sidebar_selector: String,
    pub root_id: String,
    pub sidebar_collapsed_class: String,
    pub root_collapsed_class: String,
    pub orders_surface_id: String,
    pub status_surface_id: String,
    pub category_surface_id: String,
    pub trend_days: u32,
    pub chart_script_src: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "Admin Dashboard".to_string(),
            toggle_id: "sidebarToggle".to_string(),
            sidebar_selector: ".admin-sidebar".to_string(),
            root_id: "admin-root".to_string(),
            sidebar_collapsed_class: "collapsed".to_string(),
            root_collapsed_class: "sidebar-collapsed".to_string(),
            orders_surface_id: "ordersChart".to_string(),
            status_surface_id: "statusChart".to_string(),
            category_surface_id: "categoryChart".to_string(),
            trend_days: 7,
            chart_script_src: "https://cdn.jsdelivr.net/npm/chart.js".to_string(),
        }
    }
}

impl DashboardSettings {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings from `path`, else from the file named by `DASHBOARD_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::from_file(&PathBuf::from(value)),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let ids = [
            ("toggle_id", &self.toggle_id),
            ("sidebar_selector", &self.sidebar_selector),
            ("root_id", &self.root_id),
            ("orders_surface_id", &self.orders_surface_id),
            ("status_surface_id", &self.status_surface_id),
            ("category_surface_id", &self.category_surface_id),
        ];
        for (name, value) in ids {
            if value.trim().is_empty() {
                anyhow::bail!("setting `{name}` must not be empty");
            }
        }
        if self.trend_days == 0 || self.trend_days > MAX_TREND_DAYS {
            anyhow::bail!("setting `trend_days` must be between 1 and {MAX_TREND_DAYS}");
        }
        Ok(())
    }

    pub fn surface_ids(&self) -> [&str; 3] {
        [
            &self.orders_surface_id,
            &self.status_surface_id,
            &self.category_surface_id,
        ]
    }
}
