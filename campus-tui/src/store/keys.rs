//! Store keys.

/// API root, used when `CAMPUS_API_URL` is unset.
pub const API_BASE_URL: &str = "api.base_url";

/// Request timeout in seconds.
pub const API_TIMEOUT_SECS: &str = "api.timeout_secs";

/// Bearer token. Signed in iff non-empty.
pub const AUTH_TOKEN: &str = "auth.token";

const PAGE_SIZE_PREFIX: &str = "table.page_size.";

/// Page size key of one resource's table, e.g. `table.page_size.students`.
pub fn page_size(resource: &str) -> String {
    format!("{PAGE_SIZE_PREFIX}{resource}")
}
