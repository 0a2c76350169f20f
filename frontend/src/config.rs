//! Endpoint configuration. The API base URL is fixed at build time through
//! `SOLAR_API_BASE_URL` and can be overridden at runtime by defining
//! `window.SOLAR_CONFIG = { api_base_url: "..." }` before the bundle loads.
//! An empty base URL means same-origin requests.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
}

impl AppConfig {
    pub fn load() -> Self {
        let mut config = Self {
            api_base_url: option_env!("SOLAR_API_BASE_URL").unwrap_or("").to_string(),
        };

        if let Some(url) = runtime_api_base_url() {
            log::debug!("api base url overridden at runtime: {url}");
            config.api_base_url = url;
        }

        config
    }

    /// Joins `path` onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn runtime_api_base_url() -> Option<String> {
    use js_sys::Reflect;
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("SOLAR_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }

    Reflect::get(&config, &JsValue::from_str("api_base_url"))
        .ok()?
        .as_string()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
