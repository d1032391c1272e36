//! Rendering module: document dumps and the block visitor used by the
//! layout stage.

mod json;
mod text;
pub mod visitor;

pub use json::{to_json, value_to_json, JsonFormat};
pub use text::to_text;
pub use visitor::{walk_blocks, BlockStats, BlockVisitor, VisitorAction};
