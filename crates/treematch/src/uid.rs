//! Position identifiers.
//!
//! A [`Uid`] locates a node inside the tree being walked. It is the path of
//! `(depth, child-position)` pairs from the root down to the node, so the
//! identifier of a descendant always extends the identifier of its ancestors:
//! prefix means ancestry, and the length difference is the depth distance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path identifier of a node.
///
/// # Example
///
/// ```
/// use treematch::Uid;
///
/// let root = Uid::root();
/// let child = root.child(2);
/// let grandchild = child.child(0);
///
/// assert!(root.is_prefix_of(&grandchild));
/// assert_eq!(grandchild.parent(), child);
/// assert_eq!(grandchild.distance_from(&root), Some(2));
/// assert_eq!(grandchild.to_string(), "0.0/1.2/2.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Uid(Vec<(usize, usize)>);

impl Uid {
    /// The identifier of the tree root, `[(0, 0)]`.
    pub fn root() -> Self {
        Uid(vec![(0, 0)])
    }

    /// Builds an identifier from raw `(depth, position)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Uid(pairs.into_iter().collect())
    }

    /// Identifier of the child at `position` below this node.
    pub fn child(&self, position: usize) -> Self {
        let depth = self.depth();
        let mut pairs = self.0.clone();
        pairs.push((depth + 1, position));
        Uid(pairs)
    }

    /// Identifier truncated by its last component.
    ///
    /// The parent of the root is the empty identifier.
    pub fn parent(&self) -> Self {
        let mut pairs = self.0.clone();
        pairs.pop();
        Uid(pairs)
    }

    /// Depth recorded in the last component (0 for the root).
    pub fn depth(&self) -> usize {
        self.0.last().map(|(depth, _)| *depth).unwrap_or(0)
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the empty identifier.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `self` is `other` or one of its ancestors.
    pub fn is_prefix_of(&self, other: &Uid) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Number of levels between `ancestor` and `self`, if it is an ancestor.
    pub fn distance_from(&self, ancestor: &Uid) -> Option<usize> {
        ancestor
            .is_prefix_of(self)
            .then(|| self.len() - ancestor.len())
    }

    /// The raw `(depth, position)` pairs.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (depth, position)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}.{}", depth, position)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_extends_parent() {
        let root = Uid::root();
        let child = root.child(3);
        assert_eq!(child.pairs(), &[(0, 0), (1, 3)]);
        assert_eq!(child.child(1).pairs(), &[(0, 0), (1, 3), (2, 1)]);
        assert_eq!(child.depth(), 1);
    }

    #[test]
    fn parent_truncates_last_pair() {
        let uid = Uid::root().child(1).child(4);
        assert_eq!(uid.parent(), Uid::root().child(1));
        assert!(Uid::root().parent().is_empty());
    }

    #[test]
    fn prefix_is_ancestry() {
        let a = Uid::root().child(0);
        let b = a.child(2);
        let c = Uid::root().child(1).child(2);

        assert!(a.is_prefix_of(&b));
        assert!(a.is_prefix_of(&a));
        assert!(!a.is_prefix_of(&c));
        assert!(!b.is_prefix_of(&a));
    }

    #[test]
    fn distance() {
        let root = Uid::root();
        let deep = root.child(0).child(0).child(5);
        assert_eq!(deep.distance_from(&root), Some(3));
        assert_eq!(deep.distance_from(&deep), Some(0));
        assert_eq!(root.distance_from(&deep), None);
    }

    #[test]
    fn display() {
        assert_eq!(Uid::root().to_string(), "0.0");
        assert_eq!(Uid::root().child(1).to_string(), "0.0/1.1");
    }

    #[test]
    fn serde_json_round_trip() {
        let uid = Uid::root().child(1).child(4);
        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "[[0,0],[1,1],[2,4]]");
        assert_eq!(serde_json::from_str::<Uid>(&json).unwrap(), uid);
    }
}
