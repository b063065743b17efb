/// Log the name and version of this build.
pub fn log_version_info() {
    tracing::info!("{}", short_version_info());
}

/// Package name and version, e.g. `trip-filter 0.1.0`
pub fn short_version_info() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
