//! Declaration tree node definitions.
//!
//! Nodes are owned values: every lowering pass rebuilds the parts of the
//! tree it touches and clones the rest, so pass input trees stay valid
//! after the pass has run. Each category (top-level declaration, member,
//! type expression) is a closed enum; dispatchers match exhaustively.

use crate::flags::MemberFlags;
use serde::{Deserialize, Serialize};
use typeshift_core::name::NameEntity;

// ============================================================================
// Compilation unit
// ============================================================================

/// An ordered set of per-file document roots, transformed as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSetNode {
    pub source_name: String,
    pub sources: Vec<ModuleNode>,
}

impl SourceSetNode {
    /// Apply a per-module transform to every document root, producing a new
    /// source set.
    pub fn transform<F>(&self, mut lower: F) -> SourceSetNode
    where
        F: FnMut(&ModuleNode) -> ModuleNode,
    {
        SourceSetNode {
            source_name: self.source_name.clone(),
            sources: self.sources.iter().map(&mut lower).collect(),
        }
    }
}

/// A per-file document root: a package name plus its top-level declarations.
/// Declaration order is semantically significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleNode {
    pub package_name: NameEntity,
    pub declarations: Vec<TopLevelNode>,
    #[serde(default)]
    pub uid: String,
}

// ============================================================================
// Top-level declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reflection")]
pub enum TopLevelNode {
    Class(ClassNode),
    Interface(InterfaceNode),
    Function(FunctionNode),
    Variable(VariableNode),
    Object(ObjectNode),
    Enum(EnumNode),
    TypeAlias(TypeAliasNode),
    Module(ModuleNode),
}

impl TopLevelNode {
    /// Graph-node key used when tracking references between top-level
    /// entities: the synthetic uid where one exists (stable across renames),
    /// the name for objects, empty otherwise.
    pub fn key(&self) -> String {
        match self {
            TopLevelNode::Class(node) => node.uid.clone(),
            TopLevelNode::Interface(node) => node.uid.clone(),
            TopLevelNode::Function(node) => node.uid.clone(),
            TopLevelNode::Variable(node) => node.uid.clone(),
            TopLevelNode::Object(node) => node.name.to_string(),
            TopLevelNode::Enum(_) | TopLevelNode::TypeAlias(_) | TopLevelNode::Module(_) => {
                String::new()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassNode {
    pub name: NameEntity,
    #[serde(default)]
    pub members: Vec<MemberNode>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterNode>,
    #[serde(default)]
    pub parent_entities: Vec<HeritageNode>,
    #[serde(default)]
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceNode {
    pub name: NameEntity,
    #[serde(default)]
    pub members: Vec<MemberNode>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterNode>,
    #[serde(default)]
    pub parent_entities: Vec<HeritageNode>,
    /// Whether this interface was synthesized from an anonymous structural
    /// type and still needs placement before its first use site.
    #[serde(default)]
    pub generated: bool,
    #[serde(default)]
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionNode {
    pub name: NameEntity,
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterNode>,
    pub return_type: TypeNode,
    #[serde(default)]
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableNode {
    pub name: NameEntity,
    pub type_annotation: TypeNode,
    #[serde(default)]
    pub uid: String,
}

/// A named object literal hoisted to the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectNode {
    pub name: NameEntity,
    #[serde(default)]
    pub members: Vec<MemberNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumNode {
    pub name: NameEntity,
    #[serde(default)]
    pub values: Vec<EnumTokenNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumTokenNode {
    pub value: String,
    #[serde(default)]
    pub meta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAliasNode {
    pub name: NameEntity,
    #[serde(default)]
    pub type_parameters: Vec<NameEntity>,
    pub type_reference: TypeNode,
}

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reflection")]
pub enum MemberNode {
    Method(MethodNode),
    Property(PropertyNode),
    Constructor(ConstructorNode),
    IndexSignature(IndexSignatureNode),
    CallSignature(CallSignatureNode),
}

impl MemberNode {
    pub fn kind_name(&self) -> &'static str {
        match self {
            MemberNode::Method(_) => "method",
            MemberNode::Property(_) => "property",
            MemberNode::Constructor(_) => "constructor",
            MemberNode::IndexSignature(_) => "index-signature",
            MemberNode::CallSignature(_) => "call-signature",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodNode {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterNode>,
    pub return_type: TypeNode,
    #[serde(default)]
    pub flags: MemberFlags,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyNode {
    pub name: String,
    pub type_annotation: TypeNode,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterNode>,
    #[serde(default)]
    pub flags: MemberFlags,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorNode {
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterNode>,
}

/// An index signature, e.g. `[key: string]: T`. The lowering frameworks have
/// no dedicated operation for this member kind; the member dispatcher routes
/// it through the fallback hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSignatureNode {
    pub index_types: Vec<ParameterNode>,
    pub return_type: TypeNode,
}

/// A bare call signature on an interface. Routed through the member
/// fallback hook, like [`IndexSignatureNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSignatureNode {
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterNode>,
    pub return_type: TypeNode,
}

// ============================================================================
// Supporting nodes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterNode {
    pub name: String,
    pub type_annotation: TypeNode,
    #[serde(default)]
    pub initializer: Option<ExpressionNode>,
    #[serde(default)]
    pub vararg: bool,
    #[serde(default)]
    pub optional: bool,
}

/// A generic parameter with its ordered constraint list. Constraints may
/// reference type parameters that are not fully constructed yet; the
/// descriptor registry defers applying them until finalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameterNode {
    pub name: NameEntity,
    #[serde(default)]
    pub constraints: Vec<TypeNode>,
}

/// A supertype reference: a name plus its generic type arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeritageNode {
    pub name: NameEntity,
    #[serde(default)]
    pub type_arguments: Vec<TypeNode>,
}

/// An initializer expression carrier. The only expression the declaration
/// layer models is the defined-externally marker; lowering passes rebuild
/// initializers structurally and never rewrite them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionNode {
    pub kind: TypeValueNode,
    #[serde(default)]
    pub meta: Option<String>,
}

/// A back-reference to the declaration a type name resolved to, by uid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceNode {
    pub uid: String,
}

/// Auxiliary marker attached to a type expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reflection")]
pub enum MetaData {
    /// Suppress the annotated type from emitted output entirely.
    Mute,
    /// The annotated value's definition lives outside the translated unit.
    DefinedExternally,
}

// ============================================================================
// Type expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reflection")]
pub enum TypeNode {
    TypeValue(TypeValueNode),
    FunctionType(FunctionTypeNode),
    Union(UnionTypeNode),
    Intersection(IntersectionTypeNode),
    Tuple(TupleTypeNode),
    TypeParamReference(TypeParamReferenceNode),
    GeneratedInterfaceReference(GeneratedInterfaceReferenceNode),
}

impl TypeNode {
    pub fn nullable(&self) -> bool {
        match self {
            TypeNode::TypeValue(node) => node.nullable,
            TypeNode::FunctionType(node) => node.nullable,
            TypeNode::Union(node) => node.nullable,
            TypeNode::Intersection(node) => node.nullable,
            TypeNode::Tuple(node) => node.nullable,
            TypeNode::TypeParamReference(node) => node.nullable,
            TypeNode::GeneratedInterfaceReference(node) => node.nullable,
        }
    }

    pub fn meta(&self) -> Option<&MetaData> {
        match self {
            TypeNode::TypeValue(node) => node.meta.as_ref(),
            TypeNode::FunctionType(node) => node.meta.as_ref(),
            TypeNode::Union(node) => node.meta.as_ref(),
            TypeNode::Intersection(node) => node.meta.as_ref(),
            TypeNode::Tuple(node) => node.meta.as_ref(),
            TypeNode::TypeParamReference(node) => node.meta.as_ref(),
            TypeNode::GeneratedInterfaceReference(node) => node.meta.as_ref(),
        }
    }
}

/// A named type with its generic argument list, e.g. `Map<string, T>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeValueNode {
    pub value: NameEntity,
    #[serde(default)]
    pub params: Vec<TypeNode>,
    /// Resolved-declaration back-reference, when the name resolved.
    #[serde(default)]
    pub type_reference: Option<ReferenceNode>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub meta: Option<MetaData>,
}

impl TypeValueNode {
    /// A plain named type with no generic arguments.
    pub fn new(value: impl Into<String>) -> Self {
        TypeValueNode {
            value: NameEntity::identifier(value),
            params: Vec::new(),
            type_reference: None,
            nullable: false,
            meta: None,
        }
    }

    /// A named type with generic arguments.
    pub fn with_params(value: impl Into<String>, params: Vec<TypeNode>) -> Self {
        TypeValueNode {
            params,
            ..TypeValueNode::new(value)
        }
    }

    /// Whether this node is a bare reference to the primitive named `value`.
    pub fn is_primitive(&self, value: &str) -> bool {
        self.value.is_identifier(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionTypeNode {
    #[serde(default)]
    pub parameters: Vec<ParameterNode>,
    pub return_type: Box<TypeNode>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub meta: Option<MetaData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionTypeNode {
    pub params: Vec<TypeNode>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub meta: Option<MetaData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionTypeNode {
    pub params: Vec<TypeNode>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub meta: Option<MetaData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleTypeNode {
    pub params: Vec<TypeNode>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub meta: Option<MetaData>,
}

/// A reference to a generic parameter of an enclosing declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParamReferenceNode {
    pub name: NameEntity,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub meta: Option<MetaData>,
}

/// A by-name reference to a synthesized interface that has not yet been
/// placed in the output sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedInterfaceReferenceNode {
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<NameEntity>,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub meta: Option<MetaData>,
}
