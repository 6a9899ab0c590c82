//! Infrastructure layer for the Zellij sandbox environment.
//!
//! The host filesystem is mounted under `/host`; [`paths`] maps plugin data
//! and user-supplied paths into it.

pub mod paths;

pub use paths::{data_dir, resolve_host_path, trace_file};
