//! geomanifest - groups GeoJSON layer files by filename prefix into a JSON manifest

pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod scan;
