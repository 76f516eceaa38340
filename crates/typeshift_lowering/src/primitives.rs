//! Primitive normalization: maps source-ecosystem primitive names onto
//! their target-ecosystem equivalents.
//!
//! Bare `Function` references become the generic "any callable" form, and
//! the source language's no-value markers (`undefined`, `null`) collapse to
//! the uninhabited `Nothing` type, forced nullable and tagged for
//! suppression so emission can omit them where an absent type is legal.
//! Running the pass on its own output is a no-op.

use crate::lowering::Lowering;
use typeshift_ast::node::{
    MetaData, ModuleNode, SourceSetNode, TypeNode, TypeParameterNode, TypeValueNode,
};
use typeshift_core::name::NameEntity;

fn map_primitive_value(value: &str) -> &str {
    match value {
        "any" => "Any",
        "boolean" => "Boolean",
        "string" => "String",
        "number" => "Number",
        "Object" => "Any",
        other => other,
    }
}

fn map_primitive(name: &NameEntity) -> NameEntity {
    match name.as_identifier() {
        Some(value) => NameEntity::identifier(map_primitive_value(value)),
        None => name.clone(),
    }
}

struct PrimitiveLowering;

impl Lowering for PrimitiveLowering {
    fn pass_name(&self) -> &'static str {
        "lower-primitives"
    }

    fn lower_type_value_node(&mut self, declaration: &TypeValueNode) -> TypeValueNode {
        if declaration.value.is_identifier("Function") {
            return TypeValueNode {
                params: vec![TypeNode::TypeValue(TypeValueNode::new("*"))],
                ..declaration.clone()
            };
        }

        let mut value = map_primitive(&declaration.value);
        let mut nullable = declaration.nullable;
        let mut meta = declaration.meta.clone();

        if declaration.is_primitive("undefined") || declaration.is_primitive("null") {
            value = NameEntity::identifier("Nothing");
            nullable = true;
            meta = Some(MetaData::Mute);
        }

        TypeValueNode {
            value,
            params: declaration
                .params
                .iter()
                .map(|param| self.lower_parameter_value(param))
                .collect(),
            type_reference: declaration.type_reference.clone(),
            nullable,
            meta,
        }
    }

    fn lower_type_parameter(&mut self, declaration: &TypeParameterNode) -> TypeParameterNode {
        TypeParameterNode {
            name: map_primitive(&declaration.name),
            constraints: declaration
                .constraints
                .iter()
                .map(|constraint| self.lower_parameter_value(constraint))
                .collect(),
        }
    }
}

/// Normalize primitive names across a whole document root.
pub fn lower_primitives(module: &ModuleNode) -> ModuleNode {
    PrimitiveLowering.lower_module(module)
}

/// Normalize primitive names across a whole compilation unit.
pub fn lower_primitives_in_set(set: &SourceSetNode) -> SourceSetNode {
    set.transform(lower_primitives)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_value(name: &str) -> TypeNode {
        TypeNode::TypeValue(TypeValueNode::new(name))
    }

    fn lower_type(node: &TypeNode) -> TypeNode {
        PrimitiveLowering.lower_parameter_value(node)
    }

    #[test]
    fn test_primitive_table() {
        for (source, target) in [
            ("any", "Any"),
            ("boolean", "Boolean"),
            ("string", "String"),
            ("number", "Number"),
            ("Object", "Any"),
        ] {
            let TypeNode::TypeValue(lowered) = lower_type(&type_value(source)) else {
                panic!("variant changed");
            };
            assert!(lowered.value.is_identifier(target), "{source} -> {target}");
        }
    }

    #[test]
    fn test_unrecognized_name_is_unchanged() {
        let lowered = lower_type(&type_value("EventTarget"));
        assert_eq!(lowered, type_value("EventTarget"));
    }

    #[test]
    fn test_bare_function_becomes_wildcard_callable() {
        let node = TypeNode::TypeValue(TypeValueNode::with_params(
            "Function",
            vec![type_value("string"), type_value("number")],
        ));
        let TypeNode::TypeValue(lowered) = lower_type(&node) else {
            panic!("variant changed");
        };
        assert!(lowered.value.is_identifier("Function"));
        assert_eq!(lowered.params, vec![type_value("*")]);
    }

    #[test]
    fn test_no_value_markers_collapse_to_nothing() {
        for marker in ["undefined", "null"] {
            let TypeNode::TypeValue(lowered) = lower_type(&type_value(marker)) else {
                panic!("variant changed");
            };
            assert!(lowered.value.is_identifier("Nothing"));
            assert!(lowered.nullable);
            assert_eq!(lowered.meta, Some(MetaData::Mute));
        }
    }

    #[test]
    fn test_generic_arguments_lower_recursively() {
        let node = TypeNode::TypeValue(TypeValueNode::with_params(
            "Array",
            vec![type_value("boolean")],
        ));
        let TypeNode::TypeValue(lowered) = lower_type(&node) else {
            panic!("variant changed");
        };
        let TypeNode::TypeValue(argument) = &lowered.params[0] else {
            panic!("argument variant changed");
        };
        assert!(argument.value.is_identifier("Boolean"));
    }

    #[test]
    fn test_type_parameter_name_collision_is_remapped() {
        let parameter = TypeParameterNode {
            name: NameEntity::identifier("string"),
            constraints: vec![type_value("Object")],
        };
        let lowered = PrimitiveLowering.lower_type_parameter(&parameter);
        assert!(lowered.name.is_identifier("String"));
        assert_eq!(lowered.constraints, vec![type_value("Any")]);
    }
}
