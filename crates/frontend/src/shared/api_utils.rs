//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Base path of the departments resource
pub const DEPARTMENTS_API: &str = "/api/departments";

/// Port the departments service listens on when no explicit base is configured
const DEFAULT_API_PORT: u16 = 3000;

/// Get the base URL for API requests
///
/// A base baked in at build time (`API_BASE_URL=https://host:port`) wins.
/// Otherwise the base is built from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available (requests become relative)
pub fn api_base() -> String {
    if let Some(base) = option_env!("API_BASE_URL") {
        return base.trim_end_matches('/').to_string();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/departments/export/excel");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// URL of a path below the departments resource (`""`, `"/42"`, `"/import/preview"`)
pub fn departments_url(suffix: &str) -> String {
    api_url(&format!("{}{}", DEPARTMENTS_API, suffix))
}
