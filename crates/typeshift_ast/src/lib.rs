//! typeshift_ast: Node model for the typeshift declaration translator.
//!
//! Defines the declaration tree an external parser hands over: top-level
//! declarations, class/interface members and type expressions, each category
//! a closed sum type matched exhaustively by the lowering dispatchers.
//! Also provides the owner-context chain used by context-aware passes and
//! the JSON input boundary.

pub mod flags;
pub mod json;
pub mod node;
pub mod owner;

// Re-export commonly used types
pub use flags::MemberFlags;
pub use node::*;
pub use owner::{NodeOwner, OwnedNode};
