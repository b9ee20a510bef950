//! Configuration constants and utilities for apiline
//!
//! Environment variables, default paths and endpoint defaults shared by the
//! profile loader and the binary.

/// Default profile file path for apiline
pub const DEFAULT_PROFILE_PATH: &str = "~/.apiline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "APILINE_PROFILE_PATH";

/// Environment variable holding a tracing filter (e.g. `debug`, `apiline=trace`)
pub const LOG_LEVEL_ENV_VAR: &str = "APILINE_LOG_LEVEL";

/// Environment variable naming a file to write logs to instead of stderr
pub const LOG_FILE_ENV_VAR: &str = "APILINE_LOG_FILE";

/// Filter used when no log level is configured
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Origin queried when the profile does not name one
pub const DEFAULT_HOST: &str = "http://localhost:8000";

/// Path queries are submitted to
pub const DEFAULT_QUERY_PATH: &str = "/api/docs/query";

/// Path of the JSON Schema describing query bodies
pub const DEFAULT_SCHEMA_PATH: &str = "/api/docs/query/schema.json";

/// Example shown when none is requested
pub const DEFAULT_EXAMPLE: &str = "query";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Tracing filter directive, from the environment or `verbose`
pub fn get_log_filter(verbose: bool) -> String {
    match std::env::var(LOG_LEVEL_ENV_VAR) {
        Ok(level) if !level.trim().is_empty() => level.trim().to_lowercase(),
        _ if verbose => "debug".to_string(),
        _ => DEFAULT_LOG_LEVEL.to_string(),
    }
}

/// Log file path, if logs should not go to stderr
pub fn get_log_file() -> Option<String> {
    std::env::var(LOG_FILE_ENV_VAR)
        .ok()
        .filter(|path| !path.trim().is_empty())
        .map(|path| shellexpand::tilde(&path).into_owned())
}
