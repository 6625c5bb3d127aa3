//! Shared networking constants and helpers used by client and server.

/// Default HTTP port of the lookup service.
pub const HTTP_PORT: u16 = 8000;
/// Path of the lookup endpoint; the symbol goes in the `sym` query parameter.
pub const LOOKUP_PATH: &str = "/api/lookup/";
/// Base URL of the end-of-day data provider.
pub const PROVIDER_BASE_URL: &str = "http://api.marketstack.com";
/// Access key sent with every provider request unless overridden.
pub const PROVIDER_ACCESS_KEY: &str = "875d5614925e6d98037cbc8592b7bdc2";

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}
