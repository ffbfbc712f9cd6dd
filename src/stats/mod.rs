pub mod classify;
pub mod counts;

pub use classify::{is_offensive, DisplayState};
pub use counts::{Counters, PullRequestCounts};
