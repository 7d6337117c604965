pub mod client;
pub mod error;
pub mod types;

pub use client::{IssueGateway, TrackerClient};
pub use error::TrackerError;
pub use types::{Ticket, Transition};
