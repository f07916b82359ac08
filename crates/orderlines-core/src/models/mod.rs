//! Data models for extracted order lines and pipeline configuration.

pub mod config;
pub mod item;
