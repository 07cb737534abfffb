//! Canonical bottom-up linearization of a tree.
//!
//! [`walk`] turns a [`Node`] into a lazy stream of [`Event`]s. For every
//! container the walker emits, per element, the element's whole sub-tree
//! followed by the element's positional event (key, index or attribute);
//! then, if the container is not empty, one close event carrying the
//! container itself. Every node ends with a `type` event, and scalars emit a
//! `value` event right before it.
//!
//! ```text
//! {"a": 1}  =>  value 1 @0.0/1.0
//!               type  1 @0.0/1.0
//!               key  "a" @0.0/1.0
//!               mapping-close {..} @0.0
//!               type  {..} @0.0
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::{Node, Scalar};
use crate::uid::Uid;

/// Kind of a walker event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// Position of a mapping element; payload is the key.
    Key,
    /// Position of a sequence element; payload is the index.
    Index,
    /// Position of an object attribute; payload is the attribute name.
    Attribute,
    /// End of a non-empty mapping; payload is the mapping.
    MappingClose,
    /// End of a non-empty sequence; payload is the sequence.
    SequenceClose,
    /// End of a non-empty attribute set; payload is the object.
    AttributeSetClose,
    /// Scalar leaf; payload is the scalar.
    Value,
    /// Last event of every node; payload is the node.
    Type,
}

impl EventKind {
    /// Stable numeric class of the event kind.
    pub fn rank(self) -> u8 {
        match self {
            EventKind::Key | EventKind::Index => 1,
            EventKind::MappingClose | EventKind::SequenceClose => 2,
            EventKind::Attribute => 3,
            EventKind::AttributeSetClose => 4,
            EventKind::Value => 5,
            EventKind::Type => 6,
        }
    }

    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Key => "key",
            EventKind::Index => "index",
            EventKind::Attribute => "attribute",
            EventKind::MappingClose => "mapping-close",
            EventKind::SequenceClose => "sequence-close",
            EventKind::AttributeSetClose => "attribute-set-close",
            EventKind::Value => "value",
            EventKind::Type => "type",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Data attached to an event, borrowed from the walked tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    /// Mapping key.
    Key(&'a Scalar),
    /// Sequence index.
    Index(usize),
    /// Attribute name.
    Attribute(&'a str),
    /// Scalar of a `value` event.
    Scalar(&'a Scalar),
    /// Container of a close event, or node of a `type` event.
    Node(&'a Node),
}

impl<'a> Payload<'a> {
    /// Extracts the scalar of a `value` event or of a mapping key.
    pub fn as_scalar(&self) -> Option<&'a Scalar> {
        match self {
            Payload::Scalar(scalar) | Payload::Key(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Extracts the node of a close or `type` event.
    pub fn as_node(&self) -> Option<&'a Node> {
        match self {
            Payload::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Extracts a sequence index.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Payload::Index(i) => Some(*i),
            _ => None,
        }
    }

    /// Extracts an attribute name.
    pub fn as_attribute(&self) -> Option<&'a str> {
        match self {
            Payload::Attribute(name) => Some(name),
            _ => None,
        }
    }

    /// Element count of a container payload (0 for anything else).
    pub fn len(&self) -> usize {
        self.as_node().map_or(0, Node::len)
    }

    /// Returns `true` unless this is a non-empty container.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One record of the walker stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<'a> {
    pub kind: EventKind,
    pub payload: Payload<'a>,
    pub uid: Uid,
}

impl<'a> Event<'a> {
    /// Numeric class of the event, see [`EventKind::rank`].
    pub fn rank(&self) -> u8 {
        self.kind.rank()
    }
}

/// Walks `tree` bottom-up.
///
/// The returned iterator is lazy and deterministic: walking an unmodified
/// tree twice yields identical event sequences.
pub fn walk(tree: &Node) -> Walker<'_> {
    Walker {
        stack: vec![Frame::new(tree, Uid::root())],
    }
}

/// Iterator returned by [`walk`].
pub struct Walker<'a> {
    stack: Vec<Frame<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Children,
    Close,
    Value,
    Type,
}

struct Frame<'a> {
    node: &'a Node,
    uid: Uid,
    children: Vec<(EventKind, Payload<'a>, &'a Node)>,
    next: usize,
    descended: bool,
    step: Step,
}

impl<'a> Frame<'a> {
    fn new(node: &'a Node, uid: Uid) -> Self {
        let children = match node {
            Node::Mapping(map) => map
                .iter()
                .map(|(k, v)| (EventKind::Key, Payload::Key(k), v))
                .collect(),
            Node::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (EventKind::Index, Payload::Index(i), v))
                .collect(),
            Node::Object(object) => object
                .attrs()
                .iter()
                .map(|(name, v)| (EventKind::Attribute, Payload::Attribute(name.as_str()), v))
                .collect(),
            Node::Null | Node::Scalar(_) => Vec::new(),
        };
        Frame {
            node,
            uid,
            children,
            next: 0,
            descended: false,
            step: Step::Children,
        }
    }

    fn close_kind(&self) -> Option<EventKind> {
        match self.node {
            Node::Mapping(_) => Some(EventKind::MappingClose),
            Node::Sequence(_) => Some(EventKind::SequenceClose),
            Node::Object(_) => Some(EventKind::AttributeSetClose),
            Node::Null | Node::Scalar(_) => None,
        }
    }
}

impl<'a> Iterator for Walker<'a> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.step {
                Step::Children => {
                    let Some(&(kind, payload, child)) = frame.children.get(frame.next) else {
                        frame.step = Step::Close;
                        continue;
                    };
                    let uid = frame.uid.child(frame.next);
                    if !frame.descended {
                        frame.descended = true;
                        self.stack.push(Frame::new(child, uid));
                        continue;
                    }
                    frame.descended = false;
                    frame.next += 1;
                    return Some(Event {
                        kind,
                        payload,
                        uid,
                    });
                }
                Step::Close => {
                    frame.step = Step::Value;
                    if frame.children.is_empty() {
                        continue;
                    }
                    if let Some(kind) = frame.close_kind() {
                        return Some(Event {
                            kind,
                            payload: Payload::Node(frame.node),
                            uid: frame.uid.clone(),
                        });
                    }
                }
                Step::Value => {
                    frame.step = Step::Type;
                    if let Node::Scalar(scalar) = frame.node {
                        return Some(Event {
                            kind: EventKind::Value,
                            payload: Payload::Scalar(scalar),
                            uid: frame.uid.clone(),
                        });
                    }
                }
                Step::Type => {
                    let frame = self.stack.pop()?;
                    return Some(Event {
                        kind: EventKind::Type,
                        payload: Payload::Node(frame.node),
                        uid: frame.uid,
                    });
                }
            }
        }
    }
}
