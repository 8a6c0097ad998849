//! Common code used across all wgaddr binaries

pub mod logging;
pub mod network;
