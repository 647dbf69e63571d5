use serde::{Deserialize, Serialize};

use crate::state::{modal_form::FormValues, resource_list::Record};

/// Merchant credentials. The secret key never leaves the service; only the
/// access key is listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub ak: String,
    #[serde(default)]
    pub remark: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl ApiKeyRecord {
    /// First and last four characters of the access key.
    pub fn masked_ak(&self) -> String {
        let chars: Vec<char> = self.ak.chars().collect();
        if chars.len() <= 8 {
            return self.ak.clone();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}****{}", head, tail)
    }
}

impl Record for ApiKeyRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn seed(&self) -> FormValues {
        FormValues::new()
            .with("name", self.name.clone())
            .with("remark", self.remark.clone())
    }
}
