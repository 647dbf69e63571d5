use crate::api::ApiError;

/// Transient notice shown above a list: one success line or one error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<ApiError>,
}

impl MessageState {
    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.success = Some(msg.into());
        self.error = None;
    }

    pub fn set_error(&mut self, msg: ApiError) {
        self.error = Some(msg);
        self.success = None;
    }

    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_none() && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_error_replace_each_other() {
        let mut state = MessageState::default();
        state.set_error(ApiError::transport("down"));
        state.set_success("提交成功");
        assert_eq!(state.success.as_deref(), Some("提交成功"));
        assert!(state.error.is_none());

        state.set_error(ApiError::business("ERROR", "not found"));
        assert!(state.success.is_none());
        state.clear();
        assert!(state.is_empty());
    }
}
