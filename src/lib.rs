pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod output;
pub mod prompt;
pub mod run;
pub mod storage;
pub mod validation;

pub use error::{Error, Result};
