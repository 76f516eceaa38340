//! The plain lowering trait: one operation per node variant, each defaulting
//! to structural recursion.
//!
//! A pass implements [`Lowering`] and overrides the operations it cares
//! about; everything else rebuilds its children through the appropriate
//! operation and keeps its shape. The `walk_*` free functions hold the
//! dispatcher bodies so an override can re-enter the default behavior after
//! doing its own work.

use typeshift_ast::node::*;
use typeshift_core::name::NameEntity;

pub trait Lowering {
    /// Name reported in logs and diagnostics when this pass degrades.
    fn pass_name(&self) -> &'static str {
        "lowering"
    }

    fn lower_identifier(&mut self, name: &NameEntity) -> NameEntity {
        name.clone()
    }

    // -- Members --

    /// Route a member to its variant operation. Member kinds with no
    /// dedicated operation go through [`Lowering::lower_member_fallback`].
    fn lower_member_node(&mut self, declaration: &MemberNode) -> MemberNode {
        walk_member_node(self, declaration)
    }

    /// Policy hook for member kinds the framework has no operation for.
    /// The default logs a warning and passes the member through unchanged;
    /// a strict pass overrides this to record an error instead.
    fn lower_member_fallback(&mut self, declaration: &MemberNode) -> MemberNode {
        tracing::warn!(
            pass = self.pass_name(),
            member = declaration.kind_name(),
            "skipping member with no dedicated lowering"
        );
        declaration.clone()
    }

    fn lower_method_node(&mut self, declaration: &MethodNode) -> MethodNode {
        MethodNode {
            name: declaration.name.clone(),
            parameters: declaration
                .parameters
                .iter()
                .map(|parameter| self.lower_parameter_node(parameter))
                .collect(),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(|type_parameter| self.lower_type_parameter(type_parameter))
                .collect(),
            return_type: self.lower_parameter_value(&declaration.return_type),
            flags: declaration.flags,
        }
    }

    fn lower_property_node(&mut self, declaration: &PropertyNode) -> PropertyNode {
        PropertyNode {
            name: declaration.name.clone(),
            type_annotation: self.lower_parameter_value(&declaration.type_annotation),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(|type_parameter| self.lower_type_parameter(type_parameter))
                .collect(),
            flags: declaration.flags,
        }
    }

    fn lower_constructor_node(&mut self, declaration: &ConstructorNode) -> ConstructorNode {
        ConstructorNode {
            parameters: declaration
                .parameters
                .iter()
                .map(|parameter| self.lower_parameter_node(parameter))
                .collect(),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(|type_parameter| self.lower_type_parameter(type_parameter))
                .collect(),
        }
    }

    // -- Supporting nodes --

    fn lower_parameter_node(&mut self, declaration: &ParameterNode) -> ParameterNode {
        ParameterNode {
            name: declaration.name.clone(),
            type_annotation: self.lower_parameter_value(&declaration.type_annotation),
            initializer: declaration.initializer.clone(),
            vararg: declaration.vararg,
            optional: declaration.optional,
        }
    }

    fn lower_type_parameter(&mut self, declaration: &TypeParameterNode) -> TypeParameterNode {
        TypeParameterNode {
            name: self.lower_identifier(&declaration.name),
            constraints: declaration
                .constraints
                .iter()
                .map(|constraint| self.lower_parameter_value(constraint))
                .collect(),
        }
    }

    fn lower_heritage_node(&mut self, declaration: &HeritageNode) -> HeritageNode {
        HeritageNode {
            name: self.lower_identifier(&declaration.name),
            type_arguments: declaration
                .type_arguments
                .iter()
                .map(|argument| self.lower_parameter_value(argument))
                .collect(),
        }
    }

    // -- Type expressions --

    /// Route a type expression to its variant operation.
    fn lower_parameter_value(&mut self, declaration: &TypeNode) -> TypeNode {
        walk_parameter_value(self, declaration)
    }

    fn lower_type_value_node(&mut self, declaration: &TypeValueNode) -> TypeValueNode {
        TypeValueNode {
            value: declaration.value.clone(),
            params: declaration
                .params
                .iter()
                .map(|param| self.lower_parameter_value(param))
                .collect(),
            type_reference: declaration.type_reference.clone(),
            nullable: declaration.nullable,
            meta: declaration.meta.clone(),
        }
    }

    fn lower_function_type_node(&mut self, declaration: &FunctionTypeNode) -> FunctionTypeNode {
        FunctionTypeNode {
            parameters: declaration
                .parameters
                .iter()
                .map(|parameter| self.lower_parameter_node(parameter))
                .collect(),
            return_type: Box::new(self.lower_parameter_value(&declaration.return_type)),
            nullable: declaration.nullable,
            meta: declaration.meta.clone(),
        }
    }

    fn lower_union_type_node(&mut self, declaration: &UnionTypeNode) -> UnionTypeNode {
        UnionTypeNode {
            params: declaration
                .params
                .iter()
                .map(|param| self.lower_parameter_value(param))
                .collect(),
            nullable: declaration.nullable,
            meta: declaration.meta.clone(),
        }
    }

    fn lower_intersection_type_node(
        &mut self,
        declaration: &IntersectionTypeNode,
    ) -> IntersectionTypeNode {
        IntersectionTypeNode {
            params: declaration
                .params
                .iter()
                .map(|param| self.lower_parameter_value(param))
                .collect(),
            nullable: declaration.nullable,
            meta: declaration.meta.clone(),
        }
    }

    fn lower_tuple_type_node(&mut self, declaration: &TupleTypeNode) -> TupleTypeNode {
        TupleTypeNode {
            params: declaration
                .params
                .iter()
                .map(|param| self.lower_parameter_value(param))
                .collect(),
            nullable: declaration.nullable,
            meta: declaration.meta.clone(),
        }
    }

    fn lower_type_param_reference(
        &mut self,
        declaration: &TypeParamReferenceNode,
    ) -> TypeParamReferenceNode {
        declaration.clone()
    }

    fn lower_generated_interface_reference(
        &mut self,
        declaration: &GeneratedInterfaceReferenceNode,
    ) -> GeneratedInterfaceReferenceNode {
        declaration.clone()
    }

    // -- Top-level declarations --

    /// Route a top-level declaration to its variant operation.
    fn lower_top_level_node(&mut self, declaration: &TopLevelNode) -> TopLevelNode {
        walk_top_level_node(self, declaration)
    }

    fn lower_class_node(&mut self, declaration: &ClassNode) -> ClassNode {
        ClassNode {
            name: self.lower_identifier(&declaration.name),
            members: declaration
                .members
                .iter()
                .map(|member| self.lower_member_node(member))
                .collect(),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(|type_parameter| self.lower_type_parameter(type_parameter))
                .collect(),
            parent_entities: declaration
                .parent_entities
                .iter()
                .map(|heritage| self.lower_heritage_node(heritage))
                .collect(),
            uid: declaration.uid.clone(),
        }
    }

    fn lower_interface_node(&mut self, declaration: &InterfaceNode) -> InterfaceNode {
        InterfaceNode {
            name: self.lower_identifier(&declaration.name),
            members: declaration
                .members
                .iter()
                .map(|member| self.lower_member_node(member))
                .collect(),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(|type_parameter| self.lower_type_parameter(type_parameter))
                .collect(),
            parent_entities: declaration
                .parent_entities
                .iter()
                .map(|heritage| self.lower_heritage_node(heritage))
                .collect(),
            generated: declaration.generated,
            uid: declaration.uid.clone(),
        }
    }

    fn lower_function_node(&mut self, declaration: &FunctionNode) -> FunctionNode {
        FunctionNode {
            name: self.lower_identifier(&declaration.name),
            parameters: declaration
                .parameters
                .iter()
                .map(|parameter| self.lower_parameter_node(parameter))
                .collect(),
            type_parameters: declaration
                .type_parameters
                .iter()
                .map(|type_parameter| self.lower_type_parameter(type_parameter))
                .collect(),
            return_type: self.lower_parameter_value(&declaration.return_type),
            uid: declaration.uid.clone(),
        }
    }

    fn lower_variable_node(&mut self, declaration: &VariableNode) -> VariableNode {
        VariableNode {
            name: self.lower_identifier(&declaration.name),
            type_annotation: self.lower_parameter_value(&declaration.type_annotation),
            uid: declaration.uid.clone(),
        }
    }

    fn lower_object_node(&mut self, declaration: &ObjectNode) -> ObjectNode {
        ObjectNode {
            name: declaration.name.clone(),
            members: declaration
                .members
                .iter()
                .map(|member| self.lower_member_node(member))
                .collect(),
        }
    }

    fn lower_enum_node(&mut self, declaration: &EnumNode) -> EnumNode {
        declaration.clone()
    }

    fn lower_type_alias_node(&mut self, declaration: &TypeAliasNode) -> TypeAliasNode {
        TypeAliasNode {
            name: declaration.name.clone(),
            type_parameters: declaration.type_parameters.clone(),
            type_reference: self.lower_parameter_value(&declaration.type_reference),
        }
    }

    // -- Entry points --

    /// Lower a whole document root, producing a structurally fresh tree.
    fn lower_module(&mut self, module: &ModuleNode) -> ModuleNode {
        ModuleNode {
            package_name: module.package_name.clone(),
            declarations: module
                .declarations
                .iter()
                .map(|declaration| self.lower_top_level_node(declaration))
                .collect(),
            uid: module.uid.clone(),
        }
    }

    /// Lower every document root of a compilation unit.
    fn lower_source_set(&mut self, set: &SourceSetNode) -> SourceSetNode {
        set.transform(|module| self.lower_module(module))
    }
}

/// Default dispatcher body for [`Lowering::lower_member_node`].
pub fn walk_member_node<L: Lowering + ?Sized>(
    lowering: &mut L,
    declaration: &MemberNode,
) -> MemberNode {
    match declaration {
        MemberNode::Method(node) => MemberNode::Method(lowering.lower_method_node(node)),
        MemberNode::Property(node) => MemberNode::Property(lowering.lower_property_node(node)),
        MemberNode::Constructor(node) => {
            MemberNode::Constructor(lowering.lower_constructor_node(node))
        }
        MemberNode::IndexSignature(_) | MemberNode::CallSignature(_) => {
            lowering.lower_member_fallback(declaration)
        }
    }
}

/// Default dispatcher body for [`Lowering::lower_parameter_value`].
pub fn walk_parameter_value<L: Lowering + ?Sized>(
    lowering: &mut L,
    declaration: &TypeNode,
) -> TypeNode {
    match declaration {
        TypeNode::TypeValue(node) => TypeNode::TypeValue(lowering.lower_type_value_node(node)),
        TypeNode::FunctionType(node) => {
            TypeNode::FunctionType(lowering.lower_function_type_node(node))
        }
        TypeNode::Union(node) => TypeNode::Union(lowering.lower_union_type_node(node)),
        TypeNode::Intersection(node) => {
            TypeNode::Intersection(lowering.lower_intersection_type_node(node))
        }
        TypeNode::Tuple(node) => TypeNode::Tuple(lowering.lower_tuple_type_node(node)),
        TypeNode::TypeParamReference(node) => {
            TypeNode::TypeParamReference(lowering.lower_type_param_reference(node))
        }
        TypeNode::GeneratedInterfaceReference(node) => {
            TypeNode::GeneratedInterfaceReference(lowering.lower_generated_interface_reference(node))
        }
    }
}

/// Default dispatcher body for [`Lowering::lower_top_level_node`].
pub fn walk_top_level_node<L: Lowering + ?Sized>(
    lowering: &mut L,
    declaration: &TopLevelNode,
) -> TopLevelNode {
    match declaration {
        TopLevelNode::Class(node) => TopLevelNode::Class(lowering.lower_class_node(node)),
        TopLevelNode::Interface(node) => {
            TopLevelNode::Interface(lowering.lower_interface_node(node))
        }
        TopLevelNode::Function(node) => TopLevelNode::Function(lowering.lower_function_node(node)),
        TopLevelNode::Variable(node) => TopLevelNode::Variable(lowering.lower_variable_node(node)),
        TopLevelNode::Object(node) => TopLevelNode::Object(lowering.lower_object_node(node)),
        TopLevelNode::Enum(node) => TopLevelNode::Enum(lowering.lower_enum_node(node)),
        TopLevelNode::TypeAlias(node) => {
            TopLevelNode::TypeAlias(lowering.lower_type_alias_node(node))
        }
        TopLevelNode::Module(node) => TopLevelNode::Module(lowering.lower_module(node)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeshift_ast::flags::MemberFlags;

    struct IdentityLowering;
    impl Lowering for IdentityLowering {}

    #[test]
    fn test_fallback_passes_unhandled_member_through() {
        let member = MemberNode::CallSignature(CallSignatureNode {
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            return_type: TypeNode::TypeValue(TypeValueNode::new("void")),
        });
        let lowered = IdentityLowering.lower_member_node(&member);
        assert_eq!(lowered, member);
    }

    #[test]
    fn test_dispatch_reaches_method_operation() {
        struct UppercaseMethods;
        impl Lowering for UppercaseMethods {
            fn lower_method_node(&mut self, declaration: &MethodNode) -> MethodNode {
                MethodNode {
                    name: declaration.name.to_uppercase(),
                    ..declaration.clone()
                }
            }
        }

        let member = MemberNode::Method(MethodNode {
            name: "addListener".into(),
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            return_type: TypeNode::TypeValue(TypeValueNode::new("void")),
            flags: MemberFlags::NONE,
        });
        let MemberNode::Method(lowered) = UppercaseMethods.lower_member_node(&member) else {
            panic!("dispatch changed the member variant");
        };
        assert_eq!(lowered.name, "ADDLISTENER");
    }
}
