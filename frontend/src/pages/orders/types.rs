use chrono::NaiveDateTime;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::state::{modal_form::FormValues, resource_list::Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum PaymentMethod {
    Wechat,
    Alipay,
    Unknown(i32),
}

impl From<i32> for PaymentMethod {
    fn from(value: i32) -> Self {
        match value {
            1 => Self::Wechat,
            2 => Self::Alipay,
            other => Self::Unknown(other),
        }
    }
}

impl From<PaymentMethod> for i32 {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Wechat => 1,
            PaymentMethod::Alipay => 2,
            PaymentMethod::Unknown(other) => other,
        }
    }
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Wechat => "微信",
            Self::Alipay => "支付宝",
            Self::Unknown(_) => "未知",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum OrderStatus {
    Unpaid,
    Paid,
    Expired,
    Unknown(i32),
}

impl From<i32> for OrderStatus {
    fn from(value: i32) -> Self {
        match value {
            0 => Self::Unpaid,
            1 => Self::Paid,
            2 => Self::Expired,
            other => Self::Unknown(other),
        }
    }
}

impl From<OrderStatus> for i32 {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Unpaid => 0,
            OrderStatus::Paid => 1,
            OrderStatus::Expired => 2,
            OrderStatus::Unknown(other) => other,
        }
    }
}

impl OrderStatus {
    pub const TABS: [OrderStatus; 3] = [Self::Unpaid, Self::Paid, Self::Expired];

    /// Value of the `status` list filter.
    pub fn key(&self) -> String {
        i32::from(*self).to_string()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unpaid => "未支付",
            Self::Paid => "已支付",
            Self::Expired => "超时",
            Self::Unknown(_) => "未知",
        }
    }
}

/// Decimal columns arrive either as JSON numbers or as strings.
fn amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid amount: {}", s))),
        Some(other) => Err(de::Error::custom(format!("invalid amount: {}", other))),
    }
}

/// Accepts ISO `T`-separated and space-separated timestamps.
fn timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRecord {
    pub id: i64,
    pub order_number: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "amount")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "amount")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "timestamp")]
    pub pay_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "timestamp")]
    pub create_time: Option<NaiveDateTime>,
}

pub fn format_money(value: Option<f64>) -> String {
    value
        .map(|v| format!("¥{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}

pub fn format_time(value: Option<NaiveDateTime>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Orders are created by merchants through the payment API; the console only
/// reads them.
impl Record for OrderRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.order_number
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn seed(&self) -> FormValues {
        FormValues::new()
    }
}
