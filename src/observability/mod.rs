//! OpenTelemetry tracing with file-based OTLP export.
//!
//! `tracing` spans emitted by the plugin are bridged into OpenTelemetry by
//! `tracing-opentelemetry` and written as one OTLP JSON document per line to a
//! size-rotated file in the plugin data directory:
//!
//! ```text
//! tracing → OpenTelemetryLayer → TracerProvider → FileSpanExporter → RotatingFile
//! ```
//!
//! The filter comes from `trace_level` in the plugin configuration and
//! defaults to `info`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`export`]: Span exporter and OTLP JSON encoding
//! - [`rotating`]: Size-rotated append-only file

mod export;
mod init;
mod rotating;

pub use init::init_tracing;
pub use rotating::{RotatingFile, RotationPolicy};
