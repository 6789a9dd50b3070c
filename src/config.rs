/// Application-level constants
pub const APP_NAME: &str = "DocTrack";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "DOCTRACK_API_URL";

/// Default base URL of the clinic backend (Flask development server).
pub fn default_api_url() -> String {
    "http://localhost:5000".to_string()
}

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    "doctrack_lib=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_doctrack() {
        assert_eq!(APP_NAME, "DocTrack");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_api_url_is_local_backend() {
        assert_eq!(default_api_url(), "http://localhost:5000");
    }
}
