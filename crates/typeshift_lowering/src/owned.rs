//! The owner-aware lowering trait.
//!
//! Identical contract to [`crate::lowering::Lowering`], except every
//! operation also receives the [`NodeOwner`] chain describing the node's
//! ancestors. The entry point wraps the document root as the chain's sole
//! link; dispatchers extend the chain with the routed node before calling
//! the variant operation, and operations that descend past a node with no
//! dispatcher (parameters, type parameters, heritage clauses) extend it
//! themselves.

use typeshift_ast::node::*;
use typeshift_ast::owner::{NodeOwner, OwnedNode};

pub trait LoweringWithOwner {
    /// Name reported in logs and diagnostics when this pass degrades.
    fn pass_name(&self) -> &'static str {
        "lowering"
    }

    // -- Members --

    fn lower_member_node(&mut self, declaration: &MemberNode, owner: &NodeOwner<'_>) -> MemberNode {
        walk_member_node_with_owner(self, declaration, owner)
    }

    /// Policy hook for member kinds the framework has no operation for; see
    /// [`crate::lowering::Lowering::lower_member_fallback`].
    fn lower_member_fallback(
        &mut self,
        declaration: &MemberNode,
        owner: &NodeOwner<'_>,
    ) -> MemberNode {
        let _ = owner;
        tracing::warn!(
            pass = self.pass_name(),
            member = declaration.kind_name(),
            "skipping member with no dedicated lowering"
        );
        declaration.clone()
    }

    fn lower_method_node(&mut self, declaration: &MethodNode, owner: &NodeOwner<'_>) -> MethodNode {
        MethodNode {
            name: declaration.name.clone(),
            parameters: declaration
                .parameters
                .iter()
                .map(|parameter| self.lower_parameter_node(parameter, owner))
                .collect(),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(|type_parameter| self.lower_type_parameter(type_parameter, owner))
                .collect(),
            return_type: self.lower_parameter_value(&declaration.return_type, owner),
            flags: declaration.flags,
        }
    }

    fn lower_property_node(
        &mut self,
        declaration: &PropertyNode,
        owner: &NodeOwner<'_>,
    ) -> PropertyNode {
        PropertyNode {
            name: declaration.name.clone(),
            type_annotation: self.lower_parameter_value(&declaration.type_annotation, owner),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(|type_parameter| self.lower_type_parameter(type_parameter, owner))
                .collect(),
            flags: declaration.flags,
        }
    }

    fn lower_constructor_node(
        &mut self,
        declaration: &ConstructorNode,
        owner: &NodeOwner<'_>,
    ) -> ConstructorNode {
        ConstructorNode {
            parameters: declaration
                .parameters
                .iter()
                .map(|parameter| self.lower_parameter_node(parameter, owner))
                .collect(),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(|type_parameter| self.lower_type_parameter(type_parameter, owner))
                .collect(),
        }
    }

    // -- Supporting nodes --

    fn lower_parameter_node(
        &mut self,
        declaration: &ParameterNode,
        owner: &NodeOwner<'_>,
    ) -> ParameterNode {
        let ctx = NodeOwner {
            node: OwnedNode::Parameter(declaration),
            owner: Some(owner),
        };
        ParameterNode {
            name: declaration.name.clone(),
            type_annotation: self.lower_parameter_value(&declaration.type_annotation, &ctx),
            initializer: declaration.initializer.clone(),
            vararg: declaration.vararg,
            optional: declaration.optional,
        }
    }

    fn lower_type_parameter(
        &mut self,
        declaration: &TypeParameterNode,
        owner: &NodeOwner<'_>,
    ) -> TypeParameterNode {
        let ctx = NodeOwner {
            node: OwnedNode::TypeParameter(declaration),
            owner: Some(owner),
        };
        TypeParameterNode {
            name: declaration.name.clone(),
            constraints: declaration
                .constraints
                .iter()
                .map(|constraint| self.lower_parameter_value(constraint, &ctx))
                .collect(),
        }
    }

    fn lower_heritage_node(
        &mut self,
        declaration: &HeritageNode,
        owner: &NodeOwner<'_>,
    ) -> HeritageNode {
        let ctx = NodeOwner {
            node: OwnedNode::Heritage(declaration),
            owner: Some(owner),
        };
        HeritageNode {
            name: declaration.name.clone(),
            type_arguments: declaration
                .type_arguments
                .iter()
                .map(|argument| self.lower_parameter_value(argument, &ctx))
                .collect(),
        }
    }

    // -- Type expressions --

    fn lower_parameter_value(&mut self, declaration: &TypeNode, owner: &NodeOwner<'_>) -> TypeNode {
        walk_parameter_value_with_owner(self, declaration, owner)
    }

    fn lower_type_value_node(
        &mut self,
        declaration: &TypeValueNode,
        owner: &NodeOwner<'_>,
    ) -> TypeValueNode {
        TypeValueNode {
            value: declaration.value.clone(),
            params: declaration
                .params
                .iter()
                .map(|param| self.lower_parameter_value(param, owner))
                .collect(),
            type_reference: declaration.type_reference.clone(),
            nullable: declaration.nullable,
            meta: declaration.meta.clone(),
        }
    }

    fn lower_function_type_node(
        &mut self,
        declaration: &FunctionTypeNode,
        owner: &NodeOwner<'_>,
    ) -> FunctionTypeNode {
        FunctionTypeNode {
            parameters: declaration
                .parameters
                .iter()
                .map(|parameter| self.lower_parameter_node(parameter, owner))
                .collect(),
            return_type: Box::new(self.lower_parameter_value(&declaration.return_type, owner)),
            nullable: declaration.nullable,
            meta: declaration.meta.clone(),
        }
    }

    fn lower_union_type_node(
        &mut self,
        declaration: &UnionTypeNode,
        owner: &NodeOwner<'_>,
    ) -> UnionTypeNode {
        UnionTypeNode {
            params: declaration
                .params
                .iter()
                .map(|param| self.lower_parameter_value(param, owner))
                .collect(),
            nullable: declaration.nullable,
            meta: declaration.meta.clone(),
        }
    }

    fn lower_intersection_type_node(
        &mut self,
        declaration: &IntersectionTypeNode,
        owner: &NodeOwner<'_>,
    ) -> IntersectionTypeNode {
        IntersectionTypeNode {
            params: declaration
                .params
                .iter()
                .map(|param| self.lower_parameter_value(param, owner))
                .collect(),
            nullable: declaration.nullable,
            meta: declaration.meta.clone(),
        }
    }

    fn lower_tuple_type_node(
        &mut self,
        declaration: &TupleTypeNode,
        owner: &NodeOwner<'_>,
    ) -> TupleTypeNode {
        TupleTypeNode {
            params: declaration
                .params
                .iter()
                .map(|param| self.lower_parameter_value(param, owner))
                .collect(),
            nullable: declaration.nullable,
            meta: declaration.meta.clone(),
        }
    }

    fn lower_type_param_reference(
        &mut self,
        declaration: &TypeParamReferenceNode,
        owner: &NodeOwner<'_>,
    ) -> TypeParamReferenceNode {
        let _ = owner;
        declaration.clone()
    }

    fn lower_generated_interface_reference(
        &mut self,
        declaration: &GeneratedInterfaceReferenceNode,
        owner: &NodeOwner<'_>,
    ) -> GeneratedInterfaceReferenceNode {
        let _ = owner;
        declaration.clone()
    }

    // -- Top-level declarations --

    fn lower_top_level_node(
        &mut self,
        declaration: &TopLevelNode,
        owner: &NodeOwner<'_>,
    ) -> TopLevelNode {
        walk_top_level_node_with_owner(self, declaration, owner)
    }

    fn lower_class_node(&mut self, declaration: &ClassNode, owner: &NodeOwner<'_>) -> ClassNode {
        ClassNode {
            name: declaration.name.clone(),
            members: declaration
                .members
                .iter()
                .map(|member| self.lower_member_node(member, owner))
                .collect(),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(|type_parameter| self.lower_type_parameter(type_parameter, owner))
                .collect(),
            parent_entities: declaration
                .parent_entities
                .iter()
                .map(|heritage| self.lower_heritage_node(heritage, owner))
                .collect(),
            uid: declaration.uid.clone(),
        }
    }

    fn lower_interface_node(
        &mut self,
        declaration: &InterfaceNode,
        owner: &NodeOwner<'_>,
    ) -> InterfaceNode {
        InterfaceNode {
            name: declaration.name.clone(),
            members: declaration
                .members
                .iter()
                .map(|member| self.lower_member_node(member, owner))
                .collect(),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(|type_parameter| self.lower_type_parameter(type_parameter, owner))
                .collect(),
            parent_entities: declaration
                .parent_entities
                .iter()
                .map(|heritage| self.lower_heritage_node(heritage, owner))
                .collect(),
            generated: declaration.generated,
            uid: declaration.uid.clone(),
        }
    }

    fn lower_function_node(
        &mut self,
        declaration: &FunctionNode,
        owner: &NodeOwner<'_>,
    ) -> FunctionNode {
        FunctionNode {
            name: declaration.name.clone(),
            parameters: declaration
                .parameters
                .iter()
                .map(|parameter| self.lower_parameter_node(parameter, owner))
                .collect(),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(|type_parameter| self.lower_type_parameter(type_parameter, owner))
                .collect(),
            return_type: self.lower_parameter_value(&declaration.return_type, owner),
            uid: declaration.uid.clone(),
        }
    }

    fn lower_variable_node(
        &mut self,
        declaration: &VariableNode,
        owner: &NodeOwner<'_>,
    ) -> VariableNode {
        VariableNode {
            name: declaration.name.clone(),
            type_annotation: self.lower_parameter_value(&declaration.type_annotation, owner),
            uid: declaration.uid.clone(),
        }
    }

    fn lower_object_node(&mut self, declaration: &ObjectNode, owner: &NodeOwner<'_>) -> ObjectNode {
        ObjectNode {
            name: declaration.name.clone(),
            members: declaration
                .members
                .iter()
                .map(|member| self.lower_member_node(member, owner))
                .collect(),
        }
    }

    fn lower_enum_node(&mut self, declaration: &EnumNode, owner: &NodeOwner<'_>) -> EnumNode {
        let _ = owner;
        declaration.clone()
    }

    fn lower_type_alias_node(
        &mut self,
        declaration: &TypeAliasNode,
        owner: &NodeOwner<'_>,
    ) -> TypeAliasNode {
        TypeAliasNode {
            name: declaration.name.clone(),
            type_parameters: declaration.type_parameters.clone(),
            type_reference: self.lower_parameter_value(&declaration.type_reference, owner),
        }
    }

    fn lower_module_node(&mut self, module: &ModuleNode, owner: &NodeOwner<'_>) -> ModuleNode {
        ModuleNode {
            package_name: module.package_name.clone(),
            declarations: module
                .declarations
                .iter()
                .map(|declaration| self.lower_top_level_node(declaration, owner))
                .collect(),
            uid: module.uid.clone(),
        }
    }

    // -- Entry points --

    /// Lower a whole document root; the root becomes the chain's sole link.
    fn lower_root(&mut self, module: &ModuleNode) -> ModuleNode {
        let root = NodeOwner::root(module);
        ModuleNode {
            package_name: module.package_name.clone(),
            declarations: module
                .declarations
                .iter()
                .map(|declaration| self.lower_top_level_node(declaration, &root))
                .collect(),
            uid: module.uid.clone(),
        }
    }

    /// Lower every document root of a compilation unit.
    fn lower_source_set(&mut self, set: &SourceSetNode) -> SourceSetNode {
        set.transform(|module| self.lower_root(module))
    }
}

/// Default dispatcher body for [`LoweringWithOwner::lower_member_node`].
pub fn walk_member_node_with_owner<L: LoweringWithOwner + ?Sized>(
    lowering: &mut L,
    declaration: &MemberNode,
    owner: &NodeOwner<'_>,
) -> MemberNode {
    let ctx = NodeOwner {
        node: OwnedNode::Member(declaration),
        owner: Some(owner),
    };
    match declaration {
        MemberNode::Method(node) => MemberNode::Method(lowering.lower_method_node(node, &ctx)),
        MemberNode::Property(node) => {
            MemberNode::Property(lowering.lower_property_node(node, &ctx))
        }
        MemberNode::Constructor(node) => {
            MemberNode::Constructor(lowering.lower_constructor_node(node, &ctx))
        }
        MemberNode::IndexSignature(_) | MemberNode::CallSignature(_) => {
            lowering.lower_member_fallback(declaration, owner)
        }
    }
}

/// Default dispatcher body for [`LoweringWithOwner::lower_parameter_value`].
pub fn walk_parameter_value_with_owner<L: LoweringWithOwner + ?Sized>(
    lowering: &mut L,
    declaration: &TypeNode,
    owner: &NodeOwner<'_>,
) -> TypeNode {
    let ctx = NodeOwner {
        node: OwnedNode::Type(declaration),
        owner: Some(owner),
    };
    match declaration {
        TypeNode::TypeValue(node) => {
            TypeNode::TypeValue(lowering.lower_type_value_node(node, &ctx))
        }
        TypeNode::FunctionType(node) => {
            TypeNode::FunctionType(lowering.lower_function_type_node(node, &ctx))
        }
        TypeNode::Union(node) => TypeNode::Union(lowering.lower_union_type_node(node, &ctx)),
        TypeNode::Intersection(node) => {
            TypeNode::Intersection(lowering.lower_intersection_type_node(node, &ctx))
        }
        TypeNode::Tuple(node) => TypeNode::Tuple(lowering.lower_tuple_type_node(node, &ctx)),
        TypeNode::TypeParamReference(node) => {
            TypeNode::TypeParamReference(lowering.lower_type_param_reference(node, &ctx))
        }
        TypeNode::GeneratedInterfaceReference(node) => TypeNode::GeneratedInterfaceReference(
            lowering.lower_generated_interface_reference(node, &ctx),
        ),
    }
}

/// Default dispatcher body for [`LoweringWithOwner::lower_top_level_node`].
pub fn walk_top_level_node_with_owner<L: LoweringWithOwner + ?Sized>(
    lowering: &mut L,
    declaration: &TopLevelNode,
    owner: &NodeOwner<'_>,
) -> TopLevelNode {
    let ctx = NodeOwner {
        node: OwnedNode::TopLevel(declaration),
        owner: Some(owner),
    };
    match declaration {
        TopLevelNode::Class(node) => TopLevelNode::Class(lowering.lower_class_node(node, &ctx)),
        TopLevelNode::Interface(node) => {
            TopLevelNode::Interface(lowering.lower_interface_node(node, &ctx))
        }
        TopLevelNode::Function(node) => {
            TopLevelNode::Function(lowering.lower_function_node(node, &ctx))
        }
        TopLevelNode::Variable(node) => {
            TopLevelNode::Variable(lowering.lower_variable_node(node, &ctx))
        }
        TopLevelNode::Object(node) => TopLevelNode::Object(lowering.lower_object_node(node, &ctx)),
        TopLevelNode::Enum(node) => TopLevelNode::Enum(lowering.lower_enum_node(node, &ctx)),
        TopLevelNode::TypeAlias(node) => {
            TopLevelNode::TypeAlias(lowering.lower_type_alias_node(node, &ctx))
        }
        TopLevelNode::Module(node) => TopLevelNode::Module(lowering.lower_module_node(node, &ctx)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeshift_core::name::NameEntity;

    /// Collects the nearest top-level key seen at every type-parameter
    /// reference, exercising the threaded owner chain.
    #[derive(Default)]
    struct AnchorRecorder {
        anchors: Vec<Option<String>>,
    }

    impl LoweringWithOwner for AnchorRecorder {
        fn lower_type_param_reference(
            &mut self,
            declaration: &TypeParamReferenceNode,
            owner: &NodeOwner<'_>,
        ) -> TypeParamReferenceNode {
            self.anchors.push(owner.find_top_level_key());
            declaration.clone()
        }
    }

    #[test]
    fn test_owner_chain_reaches_enclosing_class() {
        let module = ModuleNode {
            package_name: NameEntity::identifier("pkg"),
            declarations: vec![TopLevelNode::Class(ClassNode {
                name: NameEntity::identifier("Box"),
                members: vec![MemberNode::Method(MethodNode {
                    name: "unwrap".into(),
                    parameters: Vec::new(),
                    type_parameters: Vec::new(),
                    return_type: TypeNode::TypeParamReference(TypeParamReferenceNode {
                        name: NameEntity::identifier("T"),
                        nullable: false,
                        meta: None,
                    }),
                    flags: Default::default(),
                })],
                type_parameters: vec![TypeParameterNode {
                    name: NameEntity::identifier("T"),
                    constraints: Vec::new(),
                }],
                parent_entities: Vec::new(),
                uid: "box-uid".into(),
            })],
            uid: String::new(),
        };

        let mut recorder = AnchorRecorder::default();
        let lowered = recorder.lower_root(&module);
        assert_eq!(lowered, module);
        assert_eq!(recorder.anchors, vec![Some("box-uid".to_string())]);
    }
}
