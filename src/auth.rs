//! Auth-code checks for the admin endpoints.
//!
//! Each haunt carries its own auth code; a master code from the
//! environment (for the platform operator) passes for any haunt. Codes
//! arrive in the `X-Auth-Code` header and are compared in constant time.

use axum::http::HeaderMap;

/// Header carrying the admin auth code
pub const AUTH_CODE_HEADER: &str = "x-auth-code";

/// Admin configuration loaded from the environment
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    /// Master code valid for every haunt (None = per-haunt codes only)
    pub master_code: Option<String>,
}

impl AdminConfig {
    /// HEINOUS_MASTER_CODE enables the platform-operator override
    pub fn from_env() -> Self {
        let master_code = std::env::var("HEINOUS_MASTER_CODE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if master_code.is_some() {
            tracing::info!("Master admin code enabled");
        } else {
            tracing::info!("No master admin code set; haunt auth codes only");
        }

        Self { master_code }
    }

    /// True when `code` is the master code
    pub fn is_master(&self, code: &str) -> bool {
        match &self.master_code {
            Some(master) => constant_time_eq(master.as_bytes(), code.as_bytes()),
            None => false,
        }
    }
}

/// Constant-time byte comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Extract the auth code from request headers
pub fn auth_code_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTH_CODE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
