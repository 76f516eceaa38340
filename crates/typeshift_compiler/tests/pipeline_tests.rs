//! End-to-end pipeline tests: JSON document in, normalized reordered tree
//! out, diagnostics and descriptor registry alongside.

use typeshift_ast::flags::MemberFlags;
use typeshift_ast::node::*;
use typeshift_compiler::{build_descriptor_context, Translator, TranslatorOptions};
use typeshift_core::name::NameEntity;

fn type_value(name: &str) -> TypeNode {
    TypeNode::TypeValue(TypeValueNode::new(name))
}

fn property(name: &str, type_annotation: TypeNode) -> MemberNode {
    MemberNode::Property(PropertyNode {
        name: name.into(),
        type_annotation,
        type_parameters: Vec::new(),
        flags: MemberFlags::NONE,
    })
}

fn sample_set() -> SourceSetNode {
    SourceSetNode {
        source_name: "dom.d.ts".into(),
        sources: vec![ModuleNode {
            package_name: NameEntity::identifier("dom"),
            declarations: vec![
                TopLevelNode::Class(ClassNode {
                    name: NameEntity::identifier("Overlay"),
                    members: vec![
                        property("visible", type_value("boolean")),
                        property(
                            "bounds",
                            TypeNode::GeneratedInterfaceReference(GeneratedInterfaceReferenceNode {
                                name: "G1".into(),
                                type_parameters: Vec::new(),
                                nullable: false,
                                meta: None,
                            }),
                        ),
                    ],
                    type_parameters: Vec::new(),
                    parent_entities: Vec::new(),
                    uid: "overlay-uid".into(),
                }),
                TopLevelNode::Interface(InterfaceNode {
                    name: NameEntity::identifier("G1"),
                    members: vec![property("width", type_value("number"))],
                    type_parameters: Vec::new(),
                    parent_entities: Vec::new(),
                    generated: true,
                    uid: "g1-uid".into(),
                }),
            ],
            uid: "dom-0".into(),
        }],
    }
}

#[test]
fn default_pipeline_normalizes_then_reorders() {
    let result = Translator::default().translate(&sample_set());
    assert!(result.diagnostics.is_empty());

    let declarations = &result.source_set.sources[0].declarations;
    let TopLevelNode::Interface(first) = &declarations[0] else {
        panic!("expected the generated interface first");
    };
    assert!(first.name.is_identifier("G1"));
    // its members were normalized before the reorder
    let MemberNode::Property(width) = &first.members[0] else {
        panic!("expected the width property");
    };
    let TypeNode::TypeValue(width_type) = &width.type_annotation else {
        panic!("expected a named type");
    };
    assert!(width_type.value.is_identifier("Number"));

    let TopLevelNode::Class(second) = &declarations[1] else {
        panic!("expected the class after its generated interface");
    };
    assert!(second.name.is_identifier("Overlay"));
}

#[test]
fn passes_can_be_disabled_independently() {
    let translator = Translator::new(TranslatorOptions {
        normalize_primitives: false,
        rearrange_generated_entities: false,
    });
    assert!(translator.pipeline().is_empty());
    let result = translator.translate(&sample_set());
    assert_eq!(result.source_set, sample_set());
}

#[test]
fn json_documents_lower_end_to_end() {
    let text = r#"{
        "sourceName": "overlay.d.ts",
        "sources": [{
            "packageName": {"reflection": "Identifier", "value": "overlay"},
            "uid": "overlay-0",
            "declarations": [
                {
                    "reflection": "Function",
                    "name": {"reflection": "Identifier", "value": "show"},
                    "uid": "show-uid",
                    "parameters": [{
                        "name": "bounds",
                        "typeAnnotation": {"reflection": "GeneratedInterfaceReference", "name": "G1"}
                    }],
                    "returnType": {
                        "reflection": "TypeValue",
                        "value": {"reflection": "Identifier", "value": "undefined"}
                    }
                },
                {
                    "reflection": "Interface",
                    "name": {"reflection": "Identifier", "value": "G1"},
                    "uid": "g1-uid",
                    "generated": true,
                    "members": [{
                        "reflection": "Property",
                        "name": "width",
                        "typeAnnotation": {
                            "reflection": "TypeValue",
                            "value": {"reflection": "Identifier", "value": "number"}
                        }
                    }]
                }
            ]
        }]
    }"#;

    let result = Translator::default().translate_json(text).unwrap();
    let declarations = &result.source_set.sources[0].declarations;

    let TopLevelNode::Interface(interface) = &declarations[0] else {
        panic!("expected the generated interface hoisted before the function");
    };
    assert!(interface.name.is_identifier("G1"));

    let TopLevelNode::Function(function) = &declarations[1] else {
        panic!("expected the function after its generated interface");
    };
    let TypeNode::TypeValue(return_type) = &function.return_type else {
        panic!("expected a named return type");
    };
    assert!(return_type.value.is_identifier("Nothing"));
    assert!(return_type.nullable);
    assert_eq!(return_type.meta, Some(MetaData::Mute));
}

#[test]
fn malformed_json_surfaces_an_input_error() {
    let error = Translator::default().translate_json("{not json").unwrap_err();
    assert!(error.to_string().contains("malformed declaration document"));
}

#[test]
fn descriptor_registry_covers_the_lowered_unit() {
    let result = Translator::default().translate(&sample_set());
    let context = build_descriptor_context(&result.source_set);

    let overlay_fq = NameEntity::identifier("dom").append_left(&NameEntity::identifier("Overlay"));
    assert!(context.class_by_name(&overlay_fq).is_some());
    assert!(context
        .resolve_property(&overlay_fq, &NameEntity::identifier("visible"))
        .is_some());

    let generated_fq = NameEntity::identifier("dom").append_left(&NameEntity::identifier("G1"));
    assert!(context.class_by_name(&generated_fq).is_some());
}
