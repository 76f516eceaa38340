//! Descriptor record definitions.

use typeshift_ast::node::TypeNode;
use typeshift_core::name::NameEntity;

/// Identifies a class-like descriptor in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassDescriptorId(pub u32);

/// Identifies a type-parameter descriptor in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeParameterId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLikeKind {
    Class,
    Interface,
    Object,
}

/// A class-like declaration record: class, interface or hoisted object.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDescriptor {
    /// Name as declared, without the package qualifier.
    pub name: NameEntity,
    pub kind: ClassLikeKind,
    pub type_parameters: Vec<TypeParameterId>,
}

/// A type alias record, supporting reverse lookup by the aliased type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDescriptor {
    pub name: NameEntity,
    pub aliased: TypeNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    pub name: String,
    pub return_type: TypeNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub type_annotation: TypeNode,
}

/// A generic parameter record. Upper bounds stay empty until the context's
/// finalization step applies the constraints deferred for this parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameterDescriptor {
    pub name: NameEntity,
    pub upper_bounds: Vec<TypeNode>,
    pub initialized: bool,
}

impl TypeParameterDescriptor {
    pub fn new(name: NameEntity) -> Self {
        TypeParameterDescriptor {
            name,
            upper_bounds: Vec::new(),
            initialized: false,
        }
    }
}
