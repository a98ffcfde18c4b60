/// Route prefix shared by every relay endpoint.
pub const API_PREFIX: &str = "/moonly-cdn/v1";

/// Largest JSON body the sidecar accepts. Bodies only carry paths and URLs.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
