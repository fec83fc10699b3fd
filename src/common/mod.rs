//! Common types shared across the page cache.
//!
//! - Configuration constants and [`BufferPoolConfig`](config::BufferPoolConfig)
//! - Error types
//! - Identifiers ([`PageNo`], [`SlotId`])

pub mod config;
pub mod error;
mod page_no;
mod slot_id;

pub use error::{Error, Result};
pub use page_no::PageNo;
pub use slot_id::SlotId;
