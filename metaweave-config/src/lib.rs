//! Shared configuration library for metaweave.
//!
//! Configuration is assembled from three layers, lowest precedence first:
//! built-in defaults, an optional `metaweave.toml`, and environment
//! variables (optionally seeded from a `.env` file). The result is validated
//! once; hard failures surface as [`ConfigLoadError`], soft issues as
//! [`ConfigWarnings`].

#![allow(missing_docs)]

pub mod constants;
pub mod loader;
pub mod models;
pub mod sources;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::{
    CacheConfig, Config, ConfigMetadata, HttpConfig, JustWatchConfig,
    PosterConfig, TmdbConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};
