//! Eviction policies, one per regime.
//!
//! | Regime        | Sub-cache                      | Evicts                          |
//! |---------------|--------------------------------|---------------------------------|
//! | Stabilization | [`lru::LruSubCache`]           | least recently used             |
//! | Optimization  | [`lfu::LfuSubCache`]           | lowest count, oldest on ties    |
//! | Exploration   | [`fifo_ttl::FifoTtlSubCache`]  | expired first, then oldest      |

pub mod fifo_ttl;
pub mod lfu;
pub mod lru;
