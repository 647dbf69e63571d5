use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::{modal_form::FormValues, resource_list::Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    #[default]
    Enabled,
    Disabled,
}

/// One labelled statistic shown on a channel card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentField {
    pub label: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub status: Option<String>,
}

impl ContentField {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    pub fn display_value(&self) -> String {
        match &self.value {
            Value::Null => "-".to_string(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// A payment channel: a named collection QR code for wechat or alipay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentChannel {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub qrcode: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentField>,
    #[serde(default)]
    pub status: ChannelStatus,
}

impl Record for PaymentChannel {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.status == ChannelStatus::Enabled
    }

    fn seed(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.clone())
            .with("qrcode", self.qrcode.clone())
    }

    /// New channels land in the tab they were created from.
    fn form_payload(values: &FormValues, tab: Option<&str>) -> Value {
        let mut body = values.to_json();
        if let (Some(tab), Value::Object(map)) = (tab, &mut body) {
            map.insert("channel".into(), Value::String(tab.to_string()));
        }
        body
    }
}
