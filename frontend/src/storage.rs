//! Browser storage behind the logged-out flag.

use gloo_storage::{LocalStorage, SessionStorage, Storage};
use shared::{AuthError, DualScopeOverride, KeyValueScope, LOGGED_OUT_KEY};
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserScope {
    Session,
    Local,
}

impl BrowserScope {
    fn raw(self) -> web_sys::Storage {
        match self {
            BrowserScope::Session => SessionStorage::raw(),
            BrowserScope::Local => LocalStorage::raw(),
        }
    }
}

// Values are read raw: the flag is the literal string "true", not JSON.
impl KeyValueScope for BrowserScope {
    fn get(&self, key: &str) -> Option<String> {
        self.raw().get_item(key).ok().flatten()
    }
}

pub type BrowserOverrides = DualScopeOverride<BrowserScope, BrowserScope>;

pub fn browser_overrides() -> BrowserOverrides {
    DualScopeOverride::new(BrowserScope::Session, BrowserScope::Local)
}

/// Sets the logged-out flag in both scopes.
pub fn mark_logged_out() -> Result<(), AuthError> {
    for scope in [BrowserScope::Session, BrowserScope::Local] {
        scope
            .raw()
            .set_item(LOGGED_OUT_KEY, "true")
            .map_err(storage_error)?;
    }
    Ok(())
}

pub fn clear_logged_out() {
    SessionStorage::delete(LOGGED_OUT_KEY);
    LocalStorage::delete(LOGGED_OUT_KEY);
}

fn storage_error(err: JsValue) -> AuthError {
    AuthError::Storage(format!("{err:?}"))
}
