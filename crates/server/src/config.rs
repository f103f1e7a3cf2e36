use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    pub stripe_secret_key: Option<String>,
    pub stripe_api_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8787".into(),
            stripe_secret_key: None,
            stripe_api_base: stripe_integration::DEFAULT_API_BASE.into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("stripe_api_base") {
                settings.stripe_api_base = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Ok(v) = std::env::var("STRIPE_SECRET_KEY") {
        settings.stripe_secret_key = normalize_secret(v);
    }
    if let Ok(v) = std::env::var("APP__STRIPE_SECRET_KEY") {
        settings.stripe_secret_key = normalize_secret(v);
    }

    if let Ok(v) = std::env::var("STRIPE_API_BASE") {
        settings.stripe_api_base = v;
    }
    if let Ok(v) = std::env::var("APP__STRIPE_API_BASE") {
        settings.stripe_api_base = v;
    }

    settings
}

/// A blank secret is as good as no secret; treating it as configured would
/// only defer the failure to the first upstream call.
fn normalize_secret(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
