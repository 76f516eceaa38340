//! Rearrangement of generated entities.
//!
//! Earlier stages hoist anonymous structural types into named "generated"
//! interfaces collected at the end of the document root, leaving bare-name
//! references at the use sites. Emission wants every named type declared
//! before its first use, so this pass reorders the top-level sequence:
//! each surviving declaration is preceded by the generated interfaces it
//! references, dependency-first, each emitted exactly once.

use crate::owned::{walk_parameter_value_with_owner, LoweringWithOwner};
use typeshift_ast::node::{InterfaceNode, ModuleNode, SourceSetNode, TopLevelNode, TypeNode};
use typeshift_ast::owner::NodeOwner;
use typeshift_core::collections::{MultiMap, OrderedMap};
use typeshift_diagnostics::{messages, Diagnostic, DiagnosticCollection};

/// Discovery traversal: records an edge from the nearest enclosing
/// top-level entity to every generated-interface reference below it. The
/// lowered tree itself is discarded; only the edges matter.
#[derive(Default)]
struct RearrangeLowering {
    references: MultiMap<String, String>,
}

impl LoweringWithOwner for RearrangeLowering {
    fn pass_name(&self) -> &'static str {
        "rearrange-generated-entities"
    }

    fn lower_parameter_value(&mut self, declaration: &TypeNode, owner: &NodeOwner<'_>) -> TypeNode {
        if let TypeNode::GeneratedInterfaceReference(reference) = declaration {
            // References outside any class/interface/function/object owner
            // (say, directly in a top-level variable's type) record no edge.
            if let Some(key) = owner.find_top_level_key() {
                self.references.add(key, reference.name.clone());
            }
        }
        walk_parameter_value_with_owner(self, declaration, owner)
    }
}

/// Split the document root into the generated-interface index (insertion
/// order preserved) and the remaining declarations in original order.
fn generated_entities_map(module: &ModuleNode) -> (OrderedMap<String, InterfaceNode>, Vec<TopLevelNode>) {
    let mut generated = OrderedMap::new();
    let mut remaining = Vec::new();
    for declaration in &module.declarations {
        match declaration {
            TopLevelNode::Interface(interface) if interface.generated => {
                generated.insert(interface.name.to_string(), interface.clone());
            }
            other => remaining.push(other.clone()),
        }
    }
    (generated, remaining)
}

/// Resolve the generated interfaces referenced from `key`, depth-first, in
/// discovery order. Every resolved interface is removed from the pending
/// index as it is consumed, so shared interfaces are emitted once and
/// reference cycles terminate: the second encounter finds nothing left.
fn generate_entities(
    key: &str,
    references: &MultiMap<String, String>,
    pending: &mut OrderedMap<String, InterfaceNode>,
) -> Vec<TopLevelNode> {
    let mut entities = Vec::new();
    for name in references.get(key) {
        if let Some(interface) = pending.remove(name) {
            entities.extend(generate_entities(&interface.uid, references, pending));
            entities.push(TopLevelNode::Interface(interface));
        }
    }
    entities
}

/// Reorder a document root so every generated interface appears immediately
/// before its first referencing declaration, in dependency order.
pub fn rearrange_generated_entities(
    module: &ModuleNode,
    diagnostics: &mut DiagnosticCollection,
) -> ModuleNode {
    let mut discovery = RearrangeLowering::default();
    discovery.lower_root(module);
    let references = discovery.references;

    let (mut pending, remaining) = generated_entities_map(module);

    let mut declarations = Vec::new();
    for declaration in remaining {
        declarations.extend(generate_entities(&declaration.key(), &references, &mut pending));
        declarations.push(declaration);
    }

    for (name, _) in pending.iter() {
        diagnostics.add(
            Diagnostic::new(&messages::UNREACHABLE_GENERATED_INTERFACE, &[name.as_str()])
                .with_origin(module.package_name.to_string()),
        );
    }

    ModuleNode {
        package_name: module.package_name.clone(),
        declarations,
        uid: module.uid.clone(),
    }
}

/// Rearrange every document root of a compilation unit.
pub fn rearrange_generated_entities_in_set(
    set: &SourceSetNode,
    diagnostics: &mut DiagnosticCollection,
) -> SourceSetNode {
    set.transform(|module| rearrange_generated_entities(module, diagnostics))
}
