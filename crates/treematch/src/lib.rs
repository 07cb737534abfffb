//! Treematch - streaming pattern matcher for in-memory trees.
//!
//! Treematch finds every place in a tree where a pattern holds. The tree is
//! flattened into a bottom-up event stream, and the pattern is run as a set
//! of small state machines that advance one event at a time. It supports:
//!
//! - Trees of mappings, sequences, scalars and class instances ([`Node`])
//! - Container, position, scalar and type patterns
//! - AND groups with strict or open arity, alternatives, ancestry, siblings
//! - Captures, hooks and event tags recorded per match
//! - Match limits and a bound on concurrently live attempts
//!
//! # Quick Start
//!
//! ```rust
//! use treematch::{
//!     any_value, index, key, mapping, sequence, type_with, NodeType, Node, TreeMatcher, Uid,
//! };
//!
//! let tree = Node::from(serde_json::json!({"a": [1, 2], "b": "z"}));
//!
//! // A mapping with a key "a" holding a two-element sequence of integers.
//! let int = || type_with(NodeType::Int, vec![any_value()]).unwrap();
//! let pair = type_with(
//!     NodeType::Sequence,
//!     vec![sequence(vec![index(0, int()), index(1, int())])],
//! )
//! .unwrap();
//! let pattern = type_with(
//!     NodeType::Mapping,
//!     vec![mapping(vec![key("a", pair)]).strict(false)],
//! )
//! .unwrap();
//!
//! let found = TreeMatcher::new(pattern).matches(&tree, &());
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].uid(), &Uid::root());
//! ```
//!
//! # Event Stream
//!
//! [`walk`] emits, for each node, its children first (each child's subtree
//! followed by its key, index or attribute event), then a close event for
//! non-empty containers, then a `value` event for scalars and finally a
//! `type` event:
//!
//! ```text
//! [7]  =>  value 7 @0.0/1.0, type @0.0/1.0, index 0 @0.0/1.0,
//!          sequence-close @0.0, type @0.0
//! ```
//!
//! Positions are [`Uid`]s: the path of `(depth, position)` pairs from the root.
//!
//! # Pattern Semantics
//!
//! | Pattern | Holds when |
//! |---------|-----------|
//! | `any_mapping`, `any_sequence` | the event closes such a container |
//! | `mapping`, `sequence`, `attribute_set` | all subs hold inside one container |
//! | `key`, `index`, `attribute` | the sub holds, then the next event is that position |
//! | `value`, `compare`, `matches_regex`, `one_of` | the event is a matching scalar |
//! | `type_of`, `kind_of`, `type_with`, `any_type` | the steps hold, then the node has the type |
//! | `ancestor`, `ancestor_at` | the descendant holds at the right distance below the ancestor |
//! | `sibling` | every sub held somewhere |
//! | `any_of` | never decided during a walk |
//! | `capture`, `hook`, `event` | the inner pattern holds |

mod condition;
mod context;
mod error;
mod matcher;
mod node;
mod op;
mod pattern;
mod traits;
mod uid;
mod walk;

// Re-export public API
pub use condition::{Condition, Operand};
pub use context::{Captures, State};
pub use error::{PatternError, Result};
pub use matcher::{Match, TreeMatcher};
pub use node::{Class, Node, NodeType, Number, Object, Scalar};
pub use op::Op;
pub use pattern::{
    ancestor, ancestor_at, any_attribute, any_attribute_of, any_index, any_index_of, any_key,
    any_key_of, any_mapping, any_of, any_sequence, any_type, any_type_of, any_value, attribute,
    attribute_only, attribute_set, capture, compare, event, hook, index, index_only, key,
    key_only, kind_of, kind_of_with, mapping, matches_regex, one_of, sequence, sibling, type_of,
    type_with, value, Aggregate, HookFn, Pattern, TypeCheck,
};
pub use traits::{object_node, ToNode};
pub use uid::Uid;
pub use walk::{walk, Event, EventKind, Payload, Walker};
