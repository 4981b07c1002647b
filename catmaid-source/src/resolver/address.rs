//! Splitting of CATMAID addresses into servers and path segments.
//!
//! Address grammar:
//!
//! ```text
//! <server>[,<server>...]/<segment>/<segment>/...
//! server := http(s)://<authority>
//! ```
//!
//! Several comma-separated servers may be given when they mirror each
//! other; requests are spread across them. The path segments end with
//! project, stack and mirror ids. Any segments before those are a path
//! prefix on the server (a CATMAID instance mounted below the root).

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CatmaidError, Result};

/// An address split at the end of its server list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitAddress<'a> {
    /// Equivalent server base URLs.
    pub servers: Vec<String>,
    /// Length in bytes of the server list, excluding the separating slash.
    pub prefix_len: usize,
    /// Everything after the separating slash, if present.
    pub path: Option<&'a str>,
}

impl SplitAddress<'_> {
    /// The path, failing when the address stops at the server list.
    pub fn require_path(&self) -> Result<&str> {
        self.path.ok_or_else(|| {
            CatmaidError::Address(format!(
                "expected a path after {:?}",
                self.servers.join(",")
            ))
        })
    }
}

/// Get the server-list regex pattern.
///
/// We capture:
/// - Group 1: comma-separated `http(s)://authority` servers
/// - Group 2: the path after the first slash (optional)
fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^((?:https?://[^,/?#]+)(?:,https?://[^,/?#]+)*)(?:/(.*))?$").unwrap()
    })
}

/// Splits `url` into its server list and path.
pub fn split_address(url: &str) -> Result<SplitAddress<'_>> {
    let captures = address_pattern()
        .captures(url)
        .ok_or_else(|| CatmaidError::Address(format!("{:?} does not start with http(s)://", url)))?;

    let servers = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    Ok(SplitAddress {
        servers: servers.split(',').map(str::to_string).collect(),
        prefix_len: servers.len(),
        path: captures.get(2).map(|m| m.as_str()),
    })
}

/// Appends the path prefix `segments` to every server.
pub fn hostnames_with_prefix(servers: &[String], segments: &[&str]) -> Vec<String> {
    if segments.is_empty() {
        return servers.to_vec();
    }
    let prefix = segments.join("/");
    servers
        .iter()
        .map(|server| format!("{}/{}", server, prefix))
        .collect()
}

/// Splits `path` into its last `count` segments and the hostnames formed by
/// the servers plus the remaining leading segments.
///
/// Every returned trailing segment must be non-empty.
pub fn split_trailing<'a>(
    servers: &[String],
    path: &'a str,
    count: usize,
) -> Result<(Vec<String>, Vec<&'a str>)> {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < count {
        return Err(CatmaidError::Address(format!(
            "expected at least {} path segments in {:?}",
            count, path
        )));
    }

    let (prefix, trailing) = segments.split_at(segments.len() - count);
    if let Some(empty) = trailing.iter().position(|s| s.is_empty()) {
        return Err(CatmaidError::Address(format!(
            "empty path segment {} in {:?}",
            prefix.len() + empty + 1,
            path
        )));
    }

    Ok((hostnames_with_prefix(servers, prefix), trailing.to_vec()))
}
