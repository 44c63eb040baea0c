/// Timestamp pattern used by the lease page inside anchor text
pub const LEASE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp pattern used by the device directory (fractional-seconds UTC)
pub const DIRECTORY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Display pattern for login timestamps in the rendered reply
pub const LOGIN_DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Marker rendered in place of a login timestamp that failed to parse
pub const INVALID_DATE_MARKER: &str = "invalid date format";
