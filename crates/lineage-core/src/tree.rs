//! The logical family tree and its persistent builder.
//!
//! A [`LogicalNode`] is one person with an ordered list of children. Children
//! are held in [`Arc`]s so that every edit made through [`FamilyTree`] yields a
//! new tree value that shares all untouched subtrees with the previous one.
//! Only the path from the root to the edited node is copied.
//!
//! # Examples
//!
//! ```
//! use lineage_core::{
//!     identifier::Id,
//!     tree::{FamilyTree, LogicalNode},
//! };
//!
//! let empty = FamilyTree::new();
//! let tree = empty
//!     .with_root(LogicalNode::new(Id::new("ada"), "Ada").unwrap())
//!     .unwrap();
//! let tree = tree
//!     .add_child(Id::new("ada"), LogicalNode::new(Id::new("byron"), "Byron").unwrap())
//!     .unwrap();
//!
//! assert!(empty.is_empty());
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.find(Id::new("byron")).unwrap().name(), "Byron");
//! ```

use std::{collections::HashSet, sync::Arc};

use log::{debug, trace};
use thiserror::Error;

use crate::identifier::{Id, IdGenerator};

/// Errors raised when an edit would break the tree invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node `{0}` has an empty name")]
    EmptyName(Id),

    #[error("id `{0}` is used by more than one node")]
    DuplicateId(Id),

    #[error("no node with id `{0}` exists in the tree")]
    UnknownParent(Id),

    #[error("the tree already has a root")]
    RootExists,
}

/// A person in the family tree together with their ordered children.
///
/// Child order is significant: it is the left-to-right order used by the
/// layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalNode {
    id: Id,
    name: String,
    children: Vec<Arc<LogicalNode>>,
}

impl LogicalNode {
    /// Creates a childless node.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyName`] if `name` is empty or only whitespace.
    pub fn new(id: Id, name: impl Into<String>) -> Result<Self, TreeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TreeError::EmptyName(id));
        }

        Ok(Self {
            id,
            name,
            children: Vec::new(),
        })
    }

    /// Appends a child, builder style.
    ///
    /// Id uniqueness is checked when the node is attached to a [`FamilyTree`].
    pub fn with_child(mut self, child: LogicalNode) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the children in left-to-right order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = &LogicalNode> {
        self.children.iter().map(Arc::as_ref)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this node.
    pub fn node_count(&self) -> usize {
        1 + self.children().map(LogicalNode::node_count).sum::<usize>()
    }

    /// Number of generations in this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().map(LogicalNode::depth).max().unwrap_or(0)
    }

    /// Finds the node with the given id in this subtree.
    pub fn find(&self, id: Id) -> Option<&LogicalNode> {
        if self.id == id {
            return Some(self);
        }
        self.children().find_map(|child| child.find(id))
    }

    /// Visits every node of the subtree in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a LogicalNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Collects the subtree ids, failing on the first repeated one.
    fn collect_ids(&self, ids: &mut HashSet<Id>) -> Result<(), TreeError> {
        let mut duplicate = None;
        self.walk(&mut |node| {
            if !ids.insert(node.id) && duplicate.is_none() {
                duplicate = Some(node.id);
            }
        });

        match duplicate {
            Some(id) => Err(TreeError::DuplicateId(id)),
            None => Ok(()),
        }
    }
}

/// A possibly empty, single-rooted family tree with immutable-update edits.
///
/// Every edit returns a new `FamilyTree`; the receiver is left untouched and
/// can keep being rendered.
#[derive(Debug, Clone, Default)]
pub struct FamilyTree {
    root: Option<Arc<LogicalNode>>,
}

impl FamilyTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a tree whose root is `root`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::RootExists`] if this tree already has a root and
    /// [`TreeError::DuplicateId`] if `root` repeats an id.
    pub fn with_root(&self, root: LogicalNode) -> Result<Self, TreeError> {
        if self.root.is_some() {
            return Err(TreeError::RootExists);
        }

        root.collect_ids(&mut HashSet::new())?;
        debug!(root:% = root.id, nodes = root.node_count(); "Tree root set");

        Ok(Self {
            root: Some(Arc::new(root)),
        })
    }

    /// Returns a tree in which `child` is the last child of `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownParent`] if no node has `parent_id` and
    /// [`TreeError::DuplicateId`] if `child` (or one of its descendants)
    /// reuses an id already present.
    pub fn add_child(&self, parent_id: Id, child: LogicalNode) -> Result<Self, TreeError> {
        let root = self
            .root
            .as_ref()
            .ok_or(TreeError::UnknownParent(parent_id))?;

        let mut ids = HashSet::new();
        root.collect_ids(&mut ids)?;
        child.collect_ids(&mut ids)?;

        let child = Arc::new(child);
        let root = insert_child(root, parent_id, &child)
            .ok_or(TreeError::UnknownParent(parent_id))?;
        debug!(parent:% = parent_id, child:% = child.id; "Child added");

        Ok(Self { root: Some(root) })
    }

    /// Adds a new person named `name` under `parent_id`, drawing the id from
    /// `ids`. Returns the new tree and the id given to the person.
    ///
    /// # Errors
    ///
    /// Same as [`FamilyTree::add_child`], plus [`TreeError::EmptyName`].
    pub fn add_person(
        &self,
        parent_id: Id,
        name: &str,
        ids: &mut IdGenerator,
    ) -> Result<(Self, Id), TreeError> {
        let id = ids.next_id(|candidate| self.find(candidate).is_some());
        let tree = self.add_child(parent_id, LogicalNode::new(id, name)?)?;
        Ok((tree, id))
    }

    pub fn root(&self) -> Option<&LogicalNode> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total number of people in the tree.
    pub fn len(&self) -> usize {
        self.root().map_or(0, LogicalNode::node_count)
    }

    /// Number of generations; zero for an empty tree.
    pub fn depth(&self) -> usize {
        self.root().map_or(0, LogicalNode::depth)
    }

    pub fn find(&self, id: Id) -> Option<&LogicalNode> {
        self.root().and_then(|root| root.find(id))
    }
}

/// Copies the path from `node` down to `parent_id` and appends `child` there.
///
/// Returns `None` when `parent_id` is not in the subtree.
fn insert_child(
    node: &Arc<LogicalNode>,
    parent_id: Id,
    child: &Arc<LogicalNode>,
) -> Option<Arc<LogicalNode>> {
    if node.id == parent_id {
        let mut children = node.children.clone();
        children.push(Arc::clone(child));
        return Some(Arc::new(LogicalNode {
            id: node.id,
            name: node.name.clone(),
            children,
        }));
    }

    let (index, replaced) = node
        .children
        .iter()
        .enumerate()
        .find_map(|(index, grandchild)| {
            insert_child(grandchild, parent_id, child).map(|replaced| (index, replaced))
        })?;
    trace!(node:% = node.id, index; "Copying path node");

    let mut children = node.children.clone();
    children[index] = replaced;
    Some(Arc::new(LogicalNode {
        id: node.id,
        name: node.name.clone(),
        children,
    }))
}
