//! URL construction for the measurement API.

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_TOKEN: &str = "token";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const APPLICATION_JSON: &str = "application/json";

/// `GET {base}/user/{id}/buoys`
pub fn buoys_url(base_url: &str, user_id: u64) -> String {
    format!("{}/user/{}/buoys", base_url, user_id)
}

/// Query parameter carrying the comma-joined serial numbers.
pub const SERIAL_NUMBERS_PARAM: &str = "serial_numbers";

/// `POST {base}/measurements/`, before the `serial_numbers` query is added.
/// Each transport encodes the query with its own URL encoder.
pub fn measurements_path(base_url: &str) -> String {
    format!("{}/measurements/", base_url)
}

/// `POST {base}/auth/session`
pub fn session_url(base_url: &str) -> String {
    format!("{}/auth/session", base_url)
}
