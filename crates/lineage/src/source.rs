//! Reading family trees from TOML source.
//!
//! A tree document holds a single `root` table. Every person has a `name`, an
//! optional `id` and an ordered `children` array of further people:
//!
//! ```toml
//! [root]
//! name = "Ada"
//!
//! [[root.children]]
//! id = "byron"
//! name = "Byron"
//! ```
//!
//! People without an `id` receive a generated one that does not collide with
//! any explicit id in the document. A document without `root` is an empty tree.

use std::{collections::HashSet, ops::Range};

use log::{debug, trace};
use serde::Deserialize;
use thiserror::Error;

use lineage_core::{
    identifier::{Id, IdGenerator},
    tree::{FamilyTree, LogicalNode, TreeError},
};

/// Errors produced while reading a tree document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text is not a valid tree document.
    #[error("{message}")]
    Syntax {
        message: String,
        span: Option<Range<usize>>,
    },

    /// The document is well formed but describes an invalid tree.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl ParseError {
    /// Byte range of the offending source text, when known.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Self::Syntax { span, .. } => span.clone(),
            Self::Tree(_) => None,
        }
    }
}

impl From<toml::de::Error> for ParseError {
    fn from(err: toml::de::Error) -> Self {
        Self::Syntax {
            message: err.message().to_string(),
            span: err.span(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TreeDocument {
    root: Option<PersonEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PersonEntry {
    id: Option<String>,
    name: String,
    #[serde(default)]
    children: Vec<PersonEntry>,
}

impl PersonEntry {
    fn explicit_ids(&self, ids: &mut HashSet<Id>) {
        if let Some(id) = &self.id {
            ids.insert(Id::new(id));
        }
        for child in &self.children {
            child.explicit_ids(ids);
        }
    }

    fn into_node(
        self,
        generator: &mut IdGenerator,
        taken: &HashSet<Id>,
    ) -> Result<LogicalNode, TreeError> {
        let id = match &self.id {
            Some(id) => Id::new(id),
            None => generator.next_id(|candidate| taken.contains(&candidate)),
        };
        trace!(id:% = id, name = self.name; "Reading person");

        self.children
            .into_iter()
            .try_fold(
                LogicalNode::new(id, self.name)?,
                |node, child| -> Result<LogicalNode, TreeError> {
                    Ok(node.with_child(child.into_node(generator, taken)?))
                },
            )
    }
}

/// Parses a tree document into a [`FamilyTree`].
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] for malformed TOML or unexpected keys and
/// [`ParseError::Tree`] for empty names or repeated ids.
///
/// # Examples
///
/// ```
/// use lineage::source::parse;
///
/// let tree = parse(
///     r#"
///     [root]
///     name = "Ada"
///
///     [[root.children]]
///     name = "Byron"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(tree.len(), 2);
/// ```
pub fn parse(source: &str) -> Result<FamilyTree, ParseError> {
    let document: TreeDocument = toml::from_str(source)?;

    let Some(root) = document.root else {
        debug!("Document has no root, tree is empty");
        return Ok(FamilyTree::new());
    };

    let mut taken = HashSet::new();
    root.explicit_ids(&mut taken);

    let mut generator = IdGenerator::default();
    let root = root.into_node(&mut generator, &taken)?;
    let tree = FamilyTree::new().with_root(root)?;

    debug!(people = tree.len(), generations = tree.depth(); "Tree document parsed");
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let tree = parse(
            r#"
            [root]
            id = "src-ada"
            name = "Ada"

            [[root.children]]
            id = "src-byron"
            name = "Byron"

            [[root.children.children]]
            name = "Anne"

            [[root.children]]
            name = "Clara"
            "#,
        )
        .unwrap();

        let root = tree.root().unwrap();
        assert_eq!(root.id(), Id::new("src-ada"));
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.depth(), 3);

        let names: Vec<_> = root.children().map(|c| c.name()).collect();
        assert_eq!(names, ["Byron", "Clara"]);

        let byron = tree.find(Id::new("src-byron")).unwrap();
        assert_eq!(byron.children().next().unwrap().name(), "Anne");
    }

    #[test]
    fn test_inline_children() {
        let tree = parse(
            r#"
            root = { name = "Root", children = [{ name = "A" }, { name = "B" }] }
            "#,
        )
        .unwrap();
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_generated_ids_avoid_explicit_ones() {
        let tree = parse(
            r#"
            [root]
            name = "Root"

            [[root.children]]
            id = "person-1"
            name = "Explicit"
            "#,
        )
        .unwrap();

        let root = tree.root().unwrap();
        assert_ne!(root.id(), Id::new("person-1"));
        assert_eq!(tree.find(Id::new("person-1")).unwrap().name(), "Explicit");
    }

    #[test]
    fn test_empty_document_is_empty_tree() {
        let tree = parse("").unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_syntax_error_has_span() {
        let err = parse("[root\nname = \"Ada\"").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert!(err.span().is_some());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = parse("[root]\nname = \"Ada\"\nage = 36\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = parse("[root]\nid = \"src-nameless\"\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let err = parse("[root]\nid = \"src-blank\"\nname = \"\"\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Tree(TreeError::EmptyName(id)) if id == Id::new("src-blank")
        ));
        assert!(err.span().is_none());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let err = parse(
            r#"
            [root]
            id = "src-twin"
            name = "One"

            [[root.children]]
            id = "src-twin"
            name = "Two"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::Tree(TreeError::DuplicateId(_))));
    }
}
