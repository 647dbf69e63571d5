use crate::api::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub label: String,
    pub badge_count: u32,
}

impl Tab {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            badge_count: 0,
        }
    }

    pub fn with_badge(mut self, count: u32) -> Self {
        self.badge_count = count;
        self
    }
}

/// Active segmentation key over a fixed set of tabs.
///
/// Every actual change of the active key bumps `epoch` once; owners compare
/// epochs to know when the list needs re-scoping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSegmentController {
    tabs: Vec<Tab>,
    active: usize,
    epoch: u64,
}

impl TabSegmentController {
    /// The first tab starts active.
    pub fn new(tabs: Vec<Tab>) -> Result<Self, ApiError> {
        if tabs.is_empty() {
            return Err(ApiError::validation("tab set must not be empty"));
        }
        Ok(Self {
            tabs,
            active: 0,
            epoch: 0,
        })
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active(&self) -> &Tab {
        &self.tabs[self.active]
    }

    pub fn active_key(&self) -> &str {
        &self.active().key
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns `Ok(true)` when the selection changed, `Ok(false)` when `key`
    /// was already active.
    pub fn set_active(&mut self, key: &str) -> Result<bool, ApiError> {
        let index = self
            .position(key)
            .ok_or_else(|| ApiError::field("tab", format!("unknown tab: {}", key)))?;
        if index == self.active {
            return Ok(false);
        }
        self.active = index;
        self.epoch = self.epoch.wrapping_add(1);
        Ok(true)
    }

    pub fn set_badge(&mut self, key: &str, count: u32) -> Result<(), ApiError> {
        let index = self
            .position(key)
            .ok_or_else(|| ApiError::field("tab", format!("unknown tab: {}", key)))?;
        self.tabs[index].badge_count = count;
        Ok(())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.key == key)
    }
}
