//! Twitter API integration surface exposed to the feed pipeline.
//!
//! Submodules provide the HTTP client wrapper, the strongly typed response
//! models, and the upstream trait that lets tests substitute canned data.
pub mod client;
pub mod types;
pub mod upstream;

pub use client::TwitterApi;
pub use types::{SearchResponse, Status, TwitterList, User};
pub use upstream::{TwitterUpstream, UpstreamError};
