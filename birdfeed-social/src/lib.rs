//! Social network clients used by birdfeed.
//!
//! Only Twitter is implemented: a REST v1.1 client for lists, list timelines
//! and recent search, plus the [`twitter::TwitterUpstream`] trait the feed
//! pipeline is written against.
pub mod twitter;
