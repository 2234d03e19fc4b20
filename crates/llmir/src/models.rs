//! These models represent the conversation objects passed between callers
//! and provider adapters.
//!
//! Provider APIs disagree on which roles may carry which content, so the
//! internal model is deliberately permissive: any message can hold any mix
//! of chunks, in caller-chosen order. Each provider projection decides how
//! to fit that onto its wire schema. The models here are pure data; they
//! are never mutated by a projection.

pub mod chunk;
pub mod message;
pub mod role;
pub mod tool;
