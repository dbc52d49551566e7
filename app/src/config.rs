pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Locations are listed ten at a time.
pub const LOCATIONS_PAGE_SIZE: u32 = 10;
pub const MAX_PASSENGERS: u8 = 10;
pub const TOAST_DURATION_MS: u64 = 4000;
pub const RECENT_TRIPS_LIMIT: usize = 5;
pub const ROUTE_CARDS_LIMIT: usize = 4;

/// Base URL of the REST backend, baked in at compile time from `YOURIDE_API_URL`.
pub fn api_base_url() -> String {
    normalize_base_url(option_env!("YOURIDE_API_URL").unwrap_or(DEFAULT_API_URL))
}

pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(feature = "ssr")]
pub use server_config::Config;

#[cfg(feature = "ssr")]
mod server_config {
    use crate::error::{ApiError, Result};
    use std::net::SocketAddr;

    #[derive(Debug, Clone)]
    pub struct Config {
        pub site_addr: SocketAddr,
        pub site_root: String,
        pub site_pkg_dir: String,
        pub output_name: String,
    }

    impl Config {
        pub fn from_env() -> Result<Self> {
            dotenvy::dotenv().ok();

            let site_addr = dotenvy::var("LEPTOS_SITE_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
                .parse::<SocketAddr>()
                .map_err(|_| ApiError::Config("Invalid LEPTOS_SITE_ADDR".to_string()))?;

            let site_root =
                dotenvy::var("LEPTOS_SITE_ROOT").unwrap_or_else(|_| "target/site".to_string());
            let site_pkg_dir =
                dotenvy::var("LEPTOS_SITE_PKG_DIR").unwrap_or_else(|_| "pkg".to_string());
            let output_name =
                dotenvy::var("LEPTOS_OUTPUT_NAME").unwrap_or_else(|_| "frontend".to_string());

            Ok(Self {
                site_addr,
                site_root,
                site_pkg_dir,
                output_name,
            })
        }

        pub fn pkg_path(&self) -> String {
            format!("{}/{}", self.site_root, self.site_pkg_dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        assert_eq!(
            normalize_base_url("https://api.youride.af/"),
            "https://api.youride.af"
        );
        assert_eq!(normalize_base_url("http://localhost:8000//"), "http://localhost:8000");
    }

    #[test]
    fn test_normalize_empty_falls_back_to_default() {
        assert_eq!(normalize_base_url(""), DEFAULT_API_URL);
        assert_eq!(normalize_base_url("  / "), DEFAULT_API_URL);
    }

    #[test]
    fn test_api_base_url_has_no_trailing_slash() {
        assert!(!api_base_url().ends_with('/'));
    }
}
