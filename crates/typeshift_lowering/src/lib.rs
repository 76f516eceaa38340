//! typeshift_lowering: The tree-rewriting framework and its passes.
//!
//! A lowering is a whole-tree transform defined by overriding only the node
//! operations relevant to its purpose; every other node kind passes through
//! the default "rebuild children, keep shape" implementations. Two trait
//! flavors exist: [`Lowering`] for pure structural rewrites and
//! [`LoweringWithOwner`] for rewrites that consult the ancestor chain.

pub mod lowering;
pub mod owned;
pub mod primitives;
pub mod rearrange;

pub use lowering::{walk_member_node, walk_parameter_value, walk_top_level_node, Lowering};
pub use owned::{
    walk_member_node_with_owner, walk_parameter_value_with_owner, walk_top_level_node_with_owner,
    LoweringWithOwner,
};
pub use primitives::{lower_primitives, lower_primitives_in_set};
pub use rearrange::{rearrange_generated_entities, rearrange_generated_entities_in_set};
