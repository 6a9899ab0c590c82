//! Locations inside the Zellij plugin sandbox.
//!
//! Zellij mounts the host filesystem under `/host`, which usually resolves to
//! the home directory of the session that started Zellij.

use std::path::PathBuf;

/// Plugin data directory, `~/.local/share/zellij/taskhistory` on the host.
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("taskhistory")
}

/// OTLP trace output inside [`data_dir`].
#[must_use]
pub fn trace_file() -> PathBuf {
    data_dir().join("taskhistory-otlp.json")
}

/// Resolves a user-supplied path (e.g. `theme_file`) inside the sandbox,
/// mapping a leading `~` to `/host`.
#[must_use]
pub fn resolve_host_path(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some("") => PathBuf::from("/host"),
        Some(rest) if rest.starts_with('/') => PathBuf::from(format!("/host{rest}")),
        _ => PathBuf::from(path),
    }
}
