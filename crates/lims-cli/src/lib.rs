//! CLI library components for the LIMS rules toolkit.

pub mod files;
pub mod logging;
