pub mod client;
pub mod error;
pub mod feed;
pub mod mapper;
pub mod populate;
pub mod resolver;
pub mod traits;

pub use client::{FeedSources, HttpFeedClient};
pub use error::{ImporterError, Result};
pub use populate::TopChartsImporter;
pub use traits::FeedFetcher;
