//! Cache backend implementations.
//!
//! This module provides concrete implementations of the `Cache` trait
//! defined in `newsdesk_core::cache`.
//!
//! - `memory` (always built): in-process LRU cache with TTL.
//! - `redis` (feature `redis`): shared cache backed by a Redis server.

pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
