use shared::SiteConfig;
use web_sys::Document;

use super::logging::Logger;

/// Id of the optional `<script type="application/json">` element carrying overrides
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Reads the embedded site configuration, falling back to defaults when it is
/// absent or malformed.
pub fn load(document: &Document) -> SiteConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return SiteConfig::default();
    };

    match SiteConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            // The subscriber is not installed yet, so go straight to the console
            gloo::console::error!(format!("{e}; using defaults"));
            SiteConfig::default()
        }
    }
}

/// Startup diagnostics for local development
pub fn log_status(config: &SiteConfig) {
    Logger::info_with_component("Config", "🔧 Email Integration Configuration Status:");
    for (method, configured) in config.method_status() {
        let status = if configured { "✅ Configured" } else { "❌ Not configured" };
        Logger::info_with_component("Config", &format!("{}: {status}", method.display_name()));
    }
    Logger::info_with_component("Config", "💡 Check the setup guide for configuration instructions.");
}

pub fn is_local_host(hostname: &str) -> bool {
    matches!(hostname, "localhost" | "127.0.0.1")
}
