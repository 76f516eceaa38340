//! typeshift_descriptors: The semantic-model registry backing validation.
//!
//! Descriptors are flat records addressed by copyable ids and registered
//! under fully-qualified names. Generic-parameter upper bounds may reference
//! parameters that are not constructed yet, so constraints accumulate in a
//! pending map and are applied in a single finalization step once every
//! declaration has registered.

pub mod context;
pub mod descriptor;
pub mod populate;

pub use context::DescriptorContext;
pub use descriptor::{
    ClassDescriptor, ClassDescriptorId, ClassLikeKind, MethodDescriptor, PropertyDescriptor,
    TypeAliasDescriptor, TypeParameterDescriptor, TypeParameterId,
};
pub use populate::populate_module;
