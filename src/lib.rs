pub mod config;
pub mod credentials;
pub mod explore;
pub mod github;
pub mod history;
pub mod output;
pub mod stats;
