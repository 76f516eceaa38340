//! Owner context: an immutable ancestor chain threaded through contextual
//! lowering passes.
//!
//! A [`NodeOwner`] is a link in a singly-linked list of borrowed node
//! references, terminating at the document root. Passes extend the chain by
//! one link per descent and never mutate existing links, so a pass can ask
//! "what contains this node" without any global state.

use crate::node::{
    HeritageNode, MemberNode, ModuleNode, ParameterNode, TopLevelNode, TypeNode, TypeParameterNode,
};

/// A borrowed reference to a node that can appear on the owner chain.
#[derive(Debug, Clone, Copy)]
pub enum OwnedNode<'a> {
    Module(&'a ModuleNode),
    TopLevel(&'a TopLevelNode),
    Member(&'a MemberNode),
    Parameter(&'a ParameterNode),
    TypeParameter(&'a TypeParameterNode),
    Heritage(&'a HeritageNode),
    Type(&'a TypeNode),
}

impl OwnedNode<'_> {
    /// The reference key of this node, when it is a top-level entity that
    /// generated interfaces can be anchored to. Variables deliberately do
    /// not anchor references, so a reference appearing directly in a
    /// top-level variable's type records no edge.
    pub fn top_level_key(&self) -> Option<String> {
        match self {
            OwnedNode::TopLevel(declaration) => match declaration {
                TopLevelNode::Class(_)
                | TopLevelNode::Interface(_)
                | TopLevelNode::Function(_)
                | TopLevelNode::Object(_) => Some(declaration.key()),
                _ => None,
            },
            _ => None,
        }
    }
}

/// One link of the ancestor chain: a node plus the link of its syntactic
/// parent, or none at the root.
#[derive(Debug, Clone, Copy)]
pub struct NodeOwner<'a> {
    pub node: OwnedNode<'a>,
    pub owner: Option<&'a NodeOwner<'a>>,
}

impl<'a> NodeOwner<'a> {
    /// The chain's sole link at the start of a traversal: the document root.
    pub fn root(module: &'a ModuleNode) -> Self {
        NodeOwner {
            node: OwnedNode::Module(module),
            owner: None,
        }
    }

    /// Extend the chain one level deeper. The new link borrows `self`, so it
    /// lives no longer than the enclosing recursive call.
    pub fn wrap(&'a self, node: OwnedNode<'a>) -> NodeOwner<'a> {
        NodeOwner {
            node,
            owner: Some(self),
        }
    }

    /// Iterate the chain from this link outward to the root.
    pub fn owners(&self) -> Owners<'_> {
        Owners {
            current: Some(self),
        }
    }

    /// Walk outward to the nearest enclosing top-level entity that anchors
    /// generated-interface references, and return its key.
    pub fn find_top_level_key(&self) -> Option<String> {
        self.owners()
            .find_map(|link| link.node.top_level_key())
    }
}

/// Iterator over an owner chain, nearest link first.
pub struct Owners<'a> {
    current: Option<&'a NodeOwner<'a>>,
}

impl<'a> Iterator for Owners<'a> {
    type Item = &'a NodeOwner<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.current?;
        self.current = link.owner;
        Some(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ClassNode, TypeValueNode, VariableNode};
    use typeshift_core::name::NameEntity;

    fn class(name: &str, uid: &str) -> TopLevelNode {
        TopLevelNode::Class(ClassNode {
            name: NameEntity::identifier(name),
            members: Vec::new(),
            type_parameters: Vec::new(),
            parent_entities: Vec::new(),
            uid: uid.into(),
        })
    }

    #[test]
    fn test_chain_terminates_at_root() {
        let module = ModuleNode {
            package_name: NameEntity::identifier("pkg"),
            declarations: vec![class("A", "uid-a")],
            uid: String::new(),
        };
        let root = NodeOwner::root(&module);
        let declaration = &module.declarations[0];
        let level_one = root.wrap(OwnedNode::TopLevel(declaration));
        let ty = TypeNode::TypeValue(TypeValueNode::new("string"));
        let level_two = level_one.wrap(OwnedNode::Type(&ty));

        assert_eq!(level_two.owners().count(), 3);
        assert!(level_two.owners().last().unwrap().owner.is_none());
    }

    #[test]
    fn test_find_top_level_key_picks_nearest_anchor() {
        let module = ModuleNode {
            package_name: NameEntity::identifier("pkg"),
            declarations: vec![class("A", "uid-a")],
            uid: String::new(),
        };
        let root = NodeOwner::root(&module);
        let declaration = &module.declarations[0];
        let class_link = root.wrap(OwnedNode::TopLevel(declaration));
        let ty = TypeNode::TypeValue(TypeValueNode::new("string"));
        let type_link = class_link.wrap(OwnedNode::Type(&ty));

        assert_eq!(type_link.find_top_level_key().as_deref(), Some("uid-a"));
    }

    #[test]
    fn test_variables_do_not_anchor_references() {
        let module = ModuleNode {
            package_name: NameEntity::identifier("pkg"),
            declarations: vec![TopLevelNode::Variable(VariableNode {
                name: NameEntity::identifier("config"),
                type_annotation: TypeNode::TypeValue(TypeValueNode::new("any")),
                uid: "uid-v".into(),
            })],
            uid: String::new(),
        };
        let root = NodeOwner::root(&module);
        let variable_link = root.wrap(OwnedNode::TopLevel(&module.declarations[0]));

        assert_eq!(variable_link.find_top_level_key(), None);
    }
}
