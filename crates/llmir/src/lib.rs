//! Provider-agnostic representation of chat conversations.
//!
//! Conversations are modeled as a list of messages, each carrying an ordered
//! list of content chunks (text, files, image references, tool calls). The
//! internal model is not an exact match of any provider's wire schema; the
//! `providers` module projects it into the schema a specific provider
//! accepts, relocating or degrading content the target schema cannot carry.

pub mod errors;
pub mod models;
pub mod providers;
