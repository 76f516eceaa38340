//! Registration walk: feeds a lowered document root into a
//! [`DescriptorContext`].
//!
//! Classes, interfaces and hoisted objects register under the current
//! package; their methods and properties register under the owner's
//! fully-qualified name; type-parameter constraints are deferred. The
//! caller runs `initialize_constraints` once after every root of the
//! compilation unit has registered.

use crate::context::DescriptorContext;
use crate::descriptor::{
    ClassDescriptor, ClassLikeKind, MethodDescriptor, PropertyDescriptor, TypeAliasDescriptor,
    TypeParameterDescriptor, TypeParameterId,
};
use typeshift_ast::node::{MemberNode, ModuleNode, TopLevelNode, TypeParameterNode};
use typeshift_core::name::NameEntity;

/// Register every declaration of a document root, recursing into nested
/// namespace roots with an extended package qualifier.
pub fn populate_module(context: &mut DescriptorContext, module: &ModuleNode) {
    let previous_package = context.current_package.take();
    context.current_package = Some(match &previous_package {
        Some(package) => package.append_left(&module.package_name),
        None => module.package_name.clone(),
    });

    for declaration in &module.declarations {
        match declaration {
            TopLevelNode::Class(node) => {
                register_class_like(
                    context,
                    &node.name,
                    ClassLikeKind::Class,
                    &node.type_parameters,
                    &node.members,
                );
            }
            TopLevelNode::Interface(node) => {
                register_class_like(
                    context,
                    &node.name,
                    ClassLikeKind::Interface,
                    &node.type_parameters,
                    &node.members,
                );
            }
            TopLevelNode::Object(node) => {
                register_class_like(context, &node.name, ClassLikeKind::Object, &[], &node.members);
            }
            TopLevelNode::TypeAlias(node) => {
                context.register_type_alias(TypeAliasDescriptor {
                    name: node.name.clone(),
                    aliased: node.type_reference.clone(),
                });
            }
            TopLevelNode::Module(nested) => {
                populate_module(context, nested);
            }
            TopLevelNode::Function(_) | TopLevelNode::Variable(_) | TopLevelNode::Enum(_) => {}
        }
    }

    context.current_package = previous_package;
}

fn register_type_parameters(
    context: &mut DescriptorContext,
    type_parameters: &[TypeParameterNode],
) -> Vec<TypeParameterId> {
    type_parameters
        .iter()
        .map(|type_parameter| {
            let id = context
                .register_type_parameter(TypeParameterDescriptor::new(type_parameter.name.clone()));
            for constraint in &type_parameter.constraints {
                context.defer_constraint(id, constraint.clone());
            }
            id
        })
        .collect()
}

fn register_class_like(
    context: &mut DescriptorContext,
    name: &NameEntity,
    kind: ClassLikeKind,
    type_parameters: &[TypeParameterNode],
    members: &[MemberNode],
) {
    let type_parameter_ids = register_type_parameters(context, type_parameters);
    context.register_class(ClassDescriptor {
        name: name.clone(),
        kind,
        type_parameters: type_parameter_ids,
    });

    let class_fq_name = context.qualify(name);
    for member in members {
        match member {
            MemberNode::Method(method) => {
                let method_name = NameEntity::identifier(&method.name);
                context.register_method(
                    class_fq_name.append_left(&method_name),
                    MethodDescriptor {
                        name: method.name.clone(),
                        return_type: method.return_type.clone(),
                    },
                );
            }
            MemberNode::Property(property) => {
                let property_name = NameEntity::identifier(&property.name);
                context.register_property(
                    class_fq_name.append_left(&property_name),
                    PropertyDescriptor {
                        name: property.name.clone(),
                        type_annotation: property.type_annotation.clone(),
                    },
                );
            }
            MemberNode::Constructor(_)
            | MemberNode::IndexSignature(_)
            | MemberNode::CallSignature(_) => {}
        }
    }
}
