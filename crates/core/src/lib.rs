//! Core types and traits for the newsdesk article store.
//!
//! Everything in this crate is free of I/O: domain types, pagination
//! arithmetic, cache key derivation and (de)serialization, and the traits
//! implemented by the storage and cache backends in the `newsdesk` crate.

pub mod article;
pub mod cache;
pub mod storage;
