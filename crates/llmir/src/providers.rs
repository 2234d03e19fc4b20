//! Projections of the internal conversation model into provider wire
//! formats. Each projection is a pure transform; transport to the provider
//! API lives with the caller.

pub mod openai;
