//! Common utilities shared across CLI commands.

use crate::error::CliError;

/// Prefix `input` with `server` unless it already carries an http(s) scheme.
///
/// The CLI flag takes precedence over the configured server; callers pass
/// whichever applies.
pub fn resolve_address(input: &str, server: Option<&str>) -> Result<String, CliError> {
    if input.starts_with("http://") || input.starts_with("https://") {
        return Ok(input.to_string());
    }

    let server = server.ok_or_else(|| {
        CliError::Config(format!(
            "'{}' is not a full address and no server is configured. \
             Set url in the [server] section of config.ini or use --server",
            input
        ))
    })?;

    Ok(format!(
        "{}/{}",
        server.trim_end_matches('/'),
        input.trim_start_matches('/')
    ))
}
