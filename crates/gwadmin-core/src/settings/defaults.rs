//! Built-in fallback values for console settings.

/// Seconds between update-availability checks (one hour).
///
/// The check shells out to the package manager and the application CLI,
/// both of which can take several seconds.
pub fn default_update_interval_secs() -> u64 {
    3600
}

pub fn default_advance_timestamp_on_failure() -> bool {
    true
}

pub fn default_occ_path() -> &'static str {
    "/var/www/groupware/occ"
}

pub fn default_web_user() -> &'static str {
    "www-data"
}
