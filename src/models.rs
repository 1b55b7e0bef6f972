use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChartRecord(Map<String, Value>);

impl ChartRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn from_value(value: Value) -> anyhow::Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => anyhow::bail!("chart record must be an object, got {other}"),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// The field as label text, whatever its value. `null` reads as absent.
    pub fn label(&self, field: &str) -> Option<String> {
        match self.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            // 2.0 prints as "2", the way the browser stringifies it
            Value::Number(n) if n.is_f64() => n.as_f64().map(|v| v.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// The field as a number, whatever its value. Non-numeric reads as absent.
    pub fn value(&self, field: &str) -> Option<f64> {
        match self.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Like [`ChartRecord::label`], but falsy values (`""`, `0`, `false`) read as absent.
    pub fn text(&self, field: &str) -> Option<String> {
        if is_falsy(self.get(field)?) {
            return None;
        }
        self.label(field)
    }

    /// Like [`ChartRecord::value`], but falsy values read as absent. A string
    /// such as `"0"` is not falsy and still reads as its number.
    pub fn number(&self, field: &str) -> Option<f64> {
        if is_falsy(self.get(field)?) {
            return None;
        }
        self.value(field).filter(|v| !v.is_nan())
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |v| v == 0.0 || v.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl From<Map<String, Value>> for ChartRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderRow {
    pub id: u64,
    #[serde(default)]
    pub buyer: String,
    pub created_at: NaiveDateTime,
    pub total_amount: f64,
    pub is_paid: bool,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductRow {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Delivered => "delivered",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardTotals {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub orders_today: usize,
    pub unpaid_orders: usize,
    pub total_products: usize,
    pub low_stock: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentOrder {
    pub id: u64,
    pub buyer: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
}
