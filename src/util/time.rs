/// Current time in seconds since the UNIX epoch.
pub fn current_time_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Whole-second timestamp, for saved-session metadata.
pub fn timestamp_secs() -> u64 {
    current_time_secs() as u64
}
