use contracts::system::auth::{SessionInfo, StaffRole};
use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "token";
const ROLE_KEY: &str = "role";
const DISPLAY_NAME_KEY: &str = "name";

fn get_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn get_item(key: &str) -> Option<String> {
    get_storage()?
        .get_item(key)
        .ok()?
        .filter(|v| !v.trim().is_empty())
}

/// Get access token of the current browser session
pub fn get_access_token() -> Option<String> {
    get_item(ACCESS_TOKEN_KEY)
}

pub fn get_role() -> Option<StaffRole> {
    get_item(ROLE_KEY).and_then(|code| StaffRole::from_code(&code))
}

pub fn get_display_name() -> Option<String> {
    get_item(DISPLAY_NAME_KEY)
}

/// Snapshot of all session fields
pub fn load_session() -> SessionInfo {
    SessionInfo {
        access_token: get_access_token(),
        role: get_role(),
        display_name: get_display_name(),
    }
}
