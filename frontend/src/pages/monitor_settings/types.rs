use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    #[default]
    All,
    Open,
    Closed,
}

impl MonitorState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "全部",
            Self::Open => "未解决",
            Self::Closed => "已解决",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::All => "bg-surface-muted text-fg-muted",
            Self::Open => "bg-status-error-bg text-status-error-text",
            Self::Closed => "bg-status-success-bg text-status-success-text",
        }
    }
}

/// Collection monitor settings as described by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorDetail {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub state: MonitorState,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub switch: bool,
    #[serde(default)]
    pub money: Value,
}

impl MonitorDetail {
    /// `20200809` and `2020-08-09` both render as `2020-08-09`.
    pub fn display_date(&self) -> String {
        let Some(raw) = self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) else {
            return "-".to_string();
        };
        ["%Y%m%d", "%Y-%m-%d"]
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| raw.to_string())
    }

    pub fn display_money(&self) -> String {
        let amount = match &self.money {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        amount.map(format_dollars).unwrap_or_else(|| "-".to_string())
    }
}

/// `$` amount with thousands separators and two decimals.
pub fn format_dollars(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_service_detail() {
        let detail: MonitorDetail = serde_json::from_value(json!({
            "date": "20200809",
            "money": "1212100",
            "state": "open",
            "switch": true
        }))
        .unwrap();
        assert_eq!(detail.state.label(), "未解决");
        assert_eq!(detail.display_date(), "2020-08-09");
        assert_eq!(detail.display_money(), "$1,212,100.00");
        assert!(detail.switch);
        assert_eq!(detail.id, None);
    }

    #[test]
    fn formats_negative_and_small_amounts() {
        assert_eq!(format_dollars(-12345.33), "-$12,345.33");
        assert_eq!(format_dollars(12.5), "$12.50");
        assert_eq!(format_dollars(0.0), "$0.00");
    }

    #[test]
    fn missing_values_render_as_dash() {
        let detail: MonitorDetail = serde_json::from_value(json!({})).unwrap();
        assert_eq!(detail.state, MonitorState::All);
        assert_eq!(detail.display_date(), "-");
        assert_eq!(detail.display_money(), "-");
    }
}
