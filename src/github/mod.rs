pub mod client;
pub mod issues;
pub mod models;
pub mod repositories;
pub mod topics;

pub use client::{ApiResponse, GitHub};
pub use repositories::RepositorySource;
pub use topics::{BulkTopicReport, TopicChange, TopicMutator};
