//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside a shared cache.
//!
//! # Tasks
//! - Queue Compaction: Drops invalidated recency entries at configured intervals

mod compaction;

pub use compaction::spawn_compaction_task;
