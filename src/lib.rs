pub mod api;
pub mod config;
pub mod data_models;
pub mod definition;
pub mod error;
pub mod extractor;
pub mod query;
pub mod requester;
pub mod search;
pub mod token;

pub use data_models::{ResultEnvelope, SearchResult};
pub use error::SearchError;
pub use search::SearchClient;
