//! Conversion of user types into trees.
//!
//! This module provides the [`ToNode`] trait, which lets application structs
//! present themselves to the matcher as [`Object`]s with named attributes.

use std::collections::BTreeMap;

use crate::node::{Class, Node, Object, Scalar};

/// Trait for types that can be walked by the matcher.
///
/// # Example
///
/// ```
/// use std::sync::OnceLock;
/// use treematch::{Class, Node, Object, ToNode};
///
/// struct Task {
///     name: String,
///     priority: u8,
/// }
///
/// fn task_class() -> &'static Class {
///     static CLASS: OnceLock<Class> = OnceLock::new();
///     CLASS.get_or_init(|| Class::new("Task"))
/// }
///
/// impl ToNode for Task {
///     fn to_node(&self) -> Node {
///         Object::new(task_class())
///             .with("name", self.name.as_str())
///             .with("priority", self.priority)
///             .into()
///     }
/// }
///
/// let node = Task { name: "Write docs".into(), priority: 3 }.to_node();
/// assert_eq!(node.len(), 2);
/// ```
pub trait ToNode {
    /// Builds the tree representation of `self`.
    fn to_node(&self) -> Node;
}

impl ToNode for Node {
    fn to_node(&self) -> Node {
        self.clone()
    }
}

impl ToNode for Scalar {
    fn to_node(&self) -> Node {
        Node::Scalar(self.clone())
    }
}

impl ToNode for Object {
    fn to_node(&self) -> Node {
        Node::Object(self.clone())
    }
}

macro_rules! to_node_via_from {
    ($($source:ty),*) => {
        $(
            impl ToNode for $source {
                fn to_node(&self) -> Node {
                    Node::from(self.clone())
                }
            }
        )*
    };
}

to_node_via_from!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String);

impl ToNode for str {
    fn to_node(&self) -> Node {
        Node::from(self)
    }
}

impl<T: ToNode> ToNode for [T] {
    fn to_node(&self) -> Node {
        Node::Sequence(self.iter().map(ToNode::to_node).collect())
    }
}

impl<T: ToNode> ToNode for Vec<T> {
    fn to_node(&self) -> Node {
        self.as_slice().to_node()
    }
}

impl<T: ToNode> ToNode for Option<T> {
    fn to_node(&self) -> Node {
        self.as_ref().map_or(Node::Null, ToNode::to_node)
    }
}

impl<K, V> ToNode for BTreeMap<K, V>
where
    K: Clone + Into<Scalar>,
    V: ToNode,
{
    fn to_node(&self) -> Node {
        Node::Mapping(
            self.iter()
                .map(|(k, v)| (k.clone().into(), v.to_node()))
                .collect(),
        )
    }
}

/// Builds an object node of `class` from `(name, value)` pairs.
///
/// Convenience for [`ToNode`] implementations that list their fields.
pub fn object_node<'a, I>(class: &Class, attrs: I) -> Node
where
    I: IntoIterator<Item = (&'a str, Node)>,
{
    attrs
        .into_iter()
        .fold(Object::new(class), |object, (name, value)| {
            object.with(name, value)
        })
        .into()
}
