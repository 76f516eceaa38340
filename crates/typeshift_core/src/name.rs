//! Name entities: simple identifiers and left-to-right qualified chains.
//!
//! Names double as lookup keys in the descriptor registry, so they implement
//! `Eq`, `Hash` and `Ord` in addition to `Display`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A declaration name: either a simple identifier or a dotted chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "reflection")]
pub enum NameEntity {
    Identifier(IdentifierEntity),
    Qualified(QualifiedEntity),
}

/// A simple identifier, e.g. `Foo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentifierEntity {
    pub value: String,
}

/// A qualified name, e.g. `ns.Foo`. The chain reads left to right: `left`
/// holds everything before the final dot, `right` the final segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QualifiedEntity {
    pub left: Box<NameEntity>,
    pub right: IdentifierEntity,
}

impl NameEntity {
    /// Create a simple identifier name.
    pub fn identifier(value: impl Into<String>) -> Self {
        NameEntity::Identifier(IdentifierEntity {
            value: value.into(),
        })
    }

    /// Compose `self` onto the left of `name`, producing the dotted chain
    /// `self.name`. Used to build fully-qualified lookup keys, e.g.
    /// `ClassName.append_left(methodName)` yields `ClassName.methodName`.
    pub fn append_left(&self, name: &NameEntity) -> NameEntity {
        match name {
            NameEntity::Identifier(identifier) => NameEntity::Qualified(QualifiedEntity {
                left: Box::new(self.clone()),
                right: identifier.clone(),
            }),
            NameEntity::Qualified(qualified) => NameEntity::Qualified(QualifiedEntity {
                left: Box::new(self.append_left(&qualified.left)),
                right: qualified.right.clone(),
            }),
        }
    }

    /// The identifier text, when this name is a simple identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            NameEntity::Identifier(identifier) => Some(&identifier.value),
            NameEntity::Qualified(_) => None,
        }
    }

    /// Whether this name is the simple identifier `value`.
    pub fn is_identifier(&self, value: &str) -> bool {
        self.as_identifier() == Some(value)
    }
}

impl fmt::Display for NameEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameEntity::Identifier(identifier) => write!(f, "{}", identifier.value),
            NameEntity::Qualified(qualified) => {
                write!(f, "{}.{}", qualified.left, qualified.right.value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_left_simple() {
        let class = NameEntity::identifier("Window");
        let method = NameEntity::identifier("open");
        assert_eq!(class.append_left(&method).to_string(), "Window.open");
    }

    #[test]
    fn test_append_left_qualified() {
        let package = NameEntity::identifier("dom");
        let class = NameEntity::identifier("events");
        let qualified = package.append_left(&class);
        let member = qualified.append_left(&NameEntity::identifier("Listener"));
        assert_eq!(member.to_string(), "dom.events.Listener");
    }

    #[test]
    fn test_append_left_onto_qualified_right_side() {
        let prefix = NameEntity::identifier("lib");
        let inner = NameEntity::identifier("a").append_left(&NameEntity::identifier("b"));
        assert_eq!(prefix.append_left(&inner).to_string(), "lib.a.b");
    }

    #[test]
    fn test_identifier_queries() {
        let name = NameEntity::identifier("Function");
        assert!(name.is_identifier("Function"));
        assert!(!name.is_identifier("function"));
        let chained = name.append_left(&NameEntity::identifier("call"));
        assert_eq!(chained.as_identifier(), None);
    }
}
