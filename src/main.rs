//! Zellij plugin entry point.
//!
//! The plugin itself lives in `plugin.rs` and only builds for the WASM
//! target Zellij loads. Native builds get a stub binary so the library and
//! its tests build on any host.
//!
//! ```text
//! cargo build --release --target wasm32-wasip1
//! ```

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
mod plugin;

#[cfg(target_family = "wasm")]
zellij_tile::register_plugin!(plugin::HistoryPlugin);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("taskhistory is a Zellij plugin: build it for wasm32-wasip1 and load the .wasm from a layout");
}
