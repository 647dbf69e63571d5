use web_sys::{Storage, Window};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const CURRENT_ADMIN_KEY: &str = "current_admin";

pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

pub fn local_storage() -> Result<Storage, String> {
    window()?
        .local_storage()
        .map_err(|_| "No localStorage".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

pub fn read_access_token() -> Option<String> {
    local_storage()
        .ok()
        .and_then(|storage| storage.get_item(ACCESS_TOKEN_KEY).ok().flatten())
        .filter(|token| !token.trim().is_empty())
}

pub fn write_access_token(token: &str) -> Result<(), String> {
    local_storage()?
        .set_item(ACCESS_TOKEN_KEY, token)
        .map_err(|_| "Failed to store token".to_string())
}

pub fn clear_session() {
    if let Ok(storage) = local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(CURRENT_ADMIN_KEY);
    }
}
