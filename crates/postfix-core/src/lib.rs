//! postfix-core - document loading, input normalization and configuration.

pub mod config;
pub mod document;
pub mod error;
pub mod storage;

pub use config::{Config, load_config};
pub use document::Document;
pub use error::{CoreError, Result};

pub use postfix_engine::engine::{EvalOptions, SweepResult};
