//! Codec module - serialization of individual array elements.
//!
//! - [`JsonCodec`] - compact JSON via `serde_json`, written in place into
//!   an [`OutputBuffer`](crate::OutputBuffer)
//!
//! # Design
//!
//! Codecs are marker structs with static methods rather than trait
//! objects, so the element encoding is fixed at compile time.

mod json;

pub use json::JsonCodec;
