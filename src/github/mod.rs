pub mod client;
pub mod error;
pub mod pulls;
pub mod repo;
pub mod source;
pub mod types;

pub use client::create_client;
pub use error::FetchError;
pub use pulls::RepoPulls;
pub use repo::fetch_repository;
pub use source::PullSource;
pub use types::{PullRequest, PullState, RepoDetails, RepoName};
