//! ffcompose - Declarative ffmpeg command assembly
//!
//! This library crate exposes the configuration layer for integration testing.

pub mod config;
