//! eventdok-ast - Styled block model
//!
//! This crate provides the block types produced by the report structuring
//! engine and consumed by document writers. Every block carries a fully
//! resolved [`BlockStyle`], so writers never make styling decisions.

pub mod block;
pub mod inline;
pub mod style;

pub use block::{Block, BulletItem, PhotoBlock, TextBlock};
pub use inline::Span;
pub use style::{Alignment, BlockStyle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
