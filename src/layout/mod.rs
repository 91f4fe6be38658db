//! Line reconstruction from word bounding boxes.
//!
//! - Reading-order sort with a same-row tolerance
//! - Streaming clustering of sorted words into lines
//! - Line bounding boxes and metrics

pub mod clustering;
pub mod line;
pub mod reading_order;

// Re-export main types
pub use clustering::{build_lines, reconstruct_lines};
pub use line::{Line, LineBounds, LineBreak};
pub use reading_order::{reading_keys, sort_by_reading_order, ReadingKey};
