//! Export core modules shared by the CLI and embedding UIs.

#[cfg(feature = "excel")]
pub mod excel_core;
