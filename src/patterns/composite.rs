//! # Composite: a tree of social / income levels
//!
//! Every node is a [`PersonLevel`]; leaves and branches share one interface.
//! The tree is an arena: nodes live in a `Vec` and refer to each other by
//! [`LevelId`] (parent index + child indices), so there are no reference cycles.
//!
//! ```text
//! [0] top officials
//!  ├─ [1] middle officials
//!  │   └─ [3] small business owner
//!  └─ [2] corporate managers
//!      └─ [4] clerks
//! ```
//!
//! Removing a child detaches its whole subtree. Detached ids stay allocated but
//! are rejected by every lookup.

use std::fmt;

use crate::error::PatternError;

/// Index of a node inside a [`LevelTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelId(usize);

impl LevelId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One level of the hierarchy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonLevel {
    pub name: String,
    pub role: String,
    pub income_level: u64,
}

impl PersonLevel {
    pub fn new(name: impl Into<String>, role: impl Into<String>, income_level: u64) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            income_level,
        }
    }
}

impl fmt::Display for PersonLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ Name: {}, Role: {}, IncomeLevel: {} ]",
            self.name, self.role, self.income_level
        )
    }
}

struct Node {
    level: PersonLevel,
    parent: Option<LevelId>,
    children: Vec<LevelId>,
    attached: bool,
}

/// Arena-backed composite tree.
pub struct LevelTree {
    nodes: Vec<Node>,
}

impl LevelTree {
    /// Creates a tree holding only `root`.
    pub fn new(root: PersonLevel) -> Self {
        Self {
            nodes: vec![Node {
                level: root,
                parent: None,
                children: Vec::new(),
                attached: true,
            }],
        }
    }

    /// Id of the root node.
    pub fn root(&self) -> LevelId {
        LevelId(0)
    }

    /// Adds `level` as the last child of `parent`.
    pub fn add(&mut self, parent: LevelId, level: PersonLevel) -> Result<LevelId, PatternError> {
        self.node(parent)?;
        let id = LevelId(self.nodes.len());
        self.nodes.push(Node {
            level,
            parent: Some(parent),
            children: Vec::new(),
            attached: true,
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Detaches `child` (and its subtree) from `parent`.
    pub fn remove(&mut self, parent: LevelId, child: LevelId) -> Result<(), PatternError> {
        self.node(parent)?;
        self.node(child)?;
        let siblings = &mut self.nodes[parent.0].children;
        let Some(pos) = siblings.iter().position(|c| *c == child) else {
            return Err(PatternError::NotAChild {
                parent: parent.0,
                child: child.0,
            });
        };
        siblings.remove(pos);

        let mut stack = vec![child];
        while let Some(id) = stack.pop() {
            let node = &mut self.nodes[id.0];
            node.attached = false;
            stack.extend(node.children.iter().copied());
        }
        self.nodes[child.0].parent = None;
        Ok(())
    }

    /// Level stored at `id`.
    pub fn get(&self, id: LevelId) -> Result<&PersonLevel, PatternError> {
        self.node(id).map(|n| &n.level)
    }

    /// Parent of `id` (`None` for the root).
    pub fn parent(&self, id: LevelId) -> Result<Option<LevelId>, PatternError> {
        self.node(id).map(|n| n.parent)
    }

    /// Direct children of `id`, in insertion order.
    pub fn children(&self, id: LevelId) -> Result<&[LevelId], PatternError> {
        self.node(id).map(|n| n.children.as_slice())
    }

    /// Depth-first, pre-order walk from the root: `(depth, level)` pairs.
    pub fn walk(&self) -> Vec<(usize, &PersonLevel)> {
        let mut out = Vec::new();
        let mut stack = vec![(0_usize, self.root())];
        while let Some((depth, id)) = stack.pop() {
            let node = &self.nodes[id.0];
            out.push((depth, &node.level));
            for c in node.children.iter().rev() {
                stack.push((depth + 1, *c));
            }
        }
        out
    }

    /// Number of attached nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.attached).count()
    }

    /// Always false: the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn node(&self, id: LevelId) -> Result<&Node, PatternError> {
        match self.nodes.get(id.0) {
            Some(n) if n.attached => Ok(n),
            _ => Err(PatternError::UnknownLevel(id.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn society() -> (LevelTree, [LevelId; 7]) {
        let mut t = LevelTree::new(PersonLevel::new("top officials", "upper", 1_000_000_000));
        let root = t.root();
        let l11 = t.add(root, PersonLevel::new("middle officials", "upper-middle", 10_000_000)).unwrap();
        let l12 = t.add(root, PersonLevel::new("corporate managers", "upper-middle", 10_000_000)).unwrap();
        let l21 = t.add(l11, PersonLevel::new("small business owner", "middle", 10_000)).unwrap();
        let l22 = t.add(l12, PersonLevel::new("clerks", "middle", 10_000)).unwrap();
        let l31 = t.add(l21, PersonLevel::new("programmers", "lower-middle", 1_000)).unwrap();
        let l32 = t.add(l22, PersonLevel::new("self-employed", "lower-middle", 1_000)).unwrap();
        let l41 = t.add(l31, PersonLevel::new("unemployed", "bottom", 100)).unwrap();
        (t, [l11, l12, l21, l22, l31, l32, l41])
    }

    #[test]
    fn walk_is_depth_first_preorder() {
        let (t, _) = society();
        let names: Vec<(usize, &str)> = t
            .walk()
            .into_iter()
            .map(|(d, l)| (d, l.name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                (0, "top officials"),
                (1, "middle officials"),
                (2, "small business owner"),
                (3, "programmers"),
                (4, "unemployed"),
                (1, "corporate managers"),
                (2, "clerks"),
                (3, "self-employed"),
            ]
        );
    }

    #[test]
    fn remove_detaches_subtree() {
        let (mut t, [l11, _, l21, _, l31, _, l41]) = society();
        let root = t.root();

        t.remove(root, l11).unwrap();

        assert_eq!(t.len(), 4);
        assert_eq!(t.children(root).unwrap().len(), 1);
        for id in [l11, l21, l31, l41] {
            assert_eq!(t.get(id), Err(PatternError::UnknownLevel(id.index())));
        }
        assert!(t.add(l21, PersonLevel::new("x", "y", 1)).is_err());
    }

    #[test]
    fn remove_rejects_non_children() {
        let (mut t, [l11, l12, ..]) = society();
        assert_eq!(
            t.remove(l11, l12),
            Err(PatternError::NotAChild {
                parent: l11.index(),
                child: l12.index()
            })
        );
    }

    #[test]
    fn parent_links_and_display() {
        let (t, [l11, ..]) = society();
        assert_eq!(t.parent(l11).unwrap(), Some(t.root()));
        assert_eq!(t.parent(t.root()).unwrap(), None);
        assert_eq!(
            t.get(l11).unwrap().to_string(),
            "[ Name: middle officials, Role: upper-middle, IncomeLevel: 10000000 ]"
        );
    }
}
