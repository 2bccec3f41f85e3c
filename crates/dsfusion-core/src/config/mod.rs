//! Configuration system for dsfusion.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod defaults;
pub mod fusion_config;

pub use fusion_config::FusionConfig;
