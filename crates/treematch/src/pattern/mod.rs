//! Pattern combinators.
//!
//! A [`Pattern`] is an immutable description of a tree shape. Patterns are
//! built with the free functions of this module and handed to a
//! [`TreeMatcher`](crate::TreeMatcher), which runs them against the event
//! stream of a [`walk`](crate::walk()).
//!
//! Because the stream is bottom-up, a pattern reads from the leaves towards
//! the container: `key("a", type_of(NodeType::Int))` first sees the `int`
//! node close, then the key that holds it.
//!
//! # Example
//!
//! ```
//! use treematch::{key, mapping, type_of, type_with, NodeType, Pattern};
//!
//! // A mapping with (at least) an integer under "a".
//! let pattern: Pattern = type_with(
//!     NodeType::Mapping,
//!     vec![mapping(vec![key("a", type_of(NodeType::Int))]).strict(false)],
//! )
//! .unwrap();
//!
//! assert_eq!(format!("{:?}", pattern), "Type(mapping, Mapping[Key(\"a\", Type(int)), ..])");
//! ```
//!
//! # Construction errors
//!
//! Builders that can be misused return [`Result`]: [`type_with`] and
//! [`kind_of_with`] check their arity and structural slots, [`ancestor_at`]
//! rejects a zero depth, [`compare`] and [`matches_regex`] validate their
//! operands.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::condition::Condition;
use crate::context::{Captures, Context, Root, State};
use crate::error::{PatternError, Result};
use crate::node::{NodeType, Scalar};
use crate::op::Op;
use crate::walk::{Event, EventKind};

mod aggregate;
mod decorator;
mod leaf;
mod relation;

/// Predicate run by [`hook`] patterns.
///
/// Receives the attempt's captures and the user data passed to
/// [`TreeMatcher::matches`](crate::TreeMatcher::matches); returns `true` if it
/// modified something.
pub type HookFn<U> = Rc<dyn Fn(&Captures<'_>, &U) -> bool>;

/// A tree pattern.
///
/// `U` is the user data type forwarded to [`hook`] predicates.
#[derive(Clone)]
pub enum Pattern<U = ()> {
    /// Any non-empty mapping, on its close event.
    AnyMapping,
    /// Any non-empty sequence, on its close event.
    AnySequence,
    /// All sub-patterns hold inside one mapping.
    Mapping(Aggregate<U>),
    /// All sub-patterns hold inside one sequence.
    Sequence(Aggregate<U>),
    /// All sub-patterns hold inside one object's attributes.
    AttributeSet(Aggregate<U>),
    /// A mapping key, optionally after a value pattern.
    Key {
        expected: Option<Scalar>,
        sub: Option<Box<Pattern<U>>>,
    },
    /// A sequence index, optionally after an element pattern.
    Index {
        expected: Option<usize>,
        sub: Option<Box<Pattern<U>>>,
    },
    /// An attribute name, optionally after a value pattern.
    Attribute {
        expected: Option<String>,
        sub: Option<Box<Pattern<U>>>,
    },
    /// A scalar leaf, equal to the literal if one is given.
    Value(Option<Scalar>),
    /// A scalar leaf satisfying a condition.
    Compare(Condition),
    /// A node of a given type, optionally after structural steps.
    Type(TypeCheck<U>),
    /// At least one alternative holds.
    AnyOf(Vec<Pattern<U>>),
    /// `descendant` holds below a node where `ancestor` holds.
    Ancestor {
        ancestor: Box<Pattern<U>>,
        descendant: Box<Pattern<U>>,
        depth: usize,
        strict: bool,
    },
    /// All sub-patterns hold, anywhere in the stream.
    Sibling { subs: Vec<Pattern<U>>, strict: bool },
    /// Stores the payload of the event where `inner` succeeded.
    Capture {
        name: String,
        inner: Box<Pattern<U>>,
    },
    /// Runs a predicate when `inner` succeeds.
    Hook {
        hook: HookFn<U>,
        inner: Box<Pattern<U>>,
    },
    /// Records a tag when `inner` succeeds.
    Event {
        tag: String,
        inner: Box<Pattern<U>>,
    },
}

/// Sub-patterns of a mapping, sequence or attribute-set pattern.
#[derive(Clone)]
pub struct Aggregate<U = ()> {
    subs: Vec<Pattern<U>>,
    strict: bool,
}

impl<U> Aggregate<U> {
    /// The sub-patterns.
    pub fn subs(&self) -> &[Pattern<U>] {
        &self.subs
    }

    /// Whether the container must have exactly one element per sub-pattern.
    pub fn is_strict(&self) -> bool {
        self.strict
    }
}

/// Parameters of a type pattern.
#[derive(Clone)]
pub struct TypeCheck<U = ()> {
    expected: Option<NodeType>,
    kind_of: bool,
    steps: Vec<Pattern<U>>,
}

impl<U> TypeCheck<U> {
    /// Expected type; `None` accepts any type.
    pub fn expected(&self) -> Option<&NodeType> {
        self.expected.as_ref()
    }

    /// Whether subtypes are accepted.
    pub fn is_kind_of(&self) -> bool {
        self.kind_of
    }

    /// Steps run before the type check.
    pub fn steps(&self) -> &[Pattern<U>] {
        &self.steps
    }
}

impl<U> Pattern<U> {
    /// Sets the strictness of a mapping, sequence, attribute-set, sibling or
    /// ancestor pattern. Other patterns are returned unchanged.
    pub fn strict(mut self, value: bool) -> Self {
        match &mut self {
            Pattern::Mapping(agg) | Pattern::Sequence(agg) | Pattern::AttributeSet(agg) => {
                agg.strict = value;
            }
            Pattern::Sibling { strict, .. } | Pattern::Ancestor { strict, .. } => *strict = value,
            _ => {}
        }
        self
    }

    /// Short kind name, used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Pattern::AnyMapping => "any-mapping",
            Pattern::AnySequence => "any-sequence",
            Pattern::Mapping(_) => "mapping",
            Pattern::Sequence(_) => "sequence",
            Pattern::AttributeSet(_) => "attribute-set",
            Pattern::Key { .. } => "key",
            Pattern::Index { .. } => "index",
            Pattern::Attribute { .. } => "attribute",
            Pattern::Value(_) => "value",
            Pattern::Compare(_) => "compare",
            Pattern::Type(_) => "type",
            Pattern::AnyOf(_) => "any-of",
            Pattern::Ancestor { .. } => "ancestor",
            Pattern::Sibling { .. } => "sibling",
            Pattern::Capture { .. } => "capture",
            Pattern::Hook { .. } => "hook",
            Pattern::Event { .. } => "event",
        }
    }

    /// Returns `true` for mapping and sequence patterns, the only patterns
    /// allowed in the structural slots of a type pattern.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Pattern::AnyMapping | Pattern::AnySequence | Pattern::Mapping(_) | Pattern::Sequence(_)
        )
    }

    /// Direct sub-patterns, in the order their contexts are laid out.
    pub(crate) fn children(&self) -> Vec<&Pattern<U>> {
        match self {
            Pattern::AnyMapping | Pattern::AnySequence | Pattern::Value(_) | Pattern::Compare(_) => {
                Vec::new()
            }
            Pattern::Mapping(agg) | Pattern::Sequence(agg) | Pattern::AttributeSet(agg) => {
                agg.subs.iter().collect()
            }
            Pattern::Key { sub, .. } => sub.as_deref().into_iter().collect(),
            Pattern::Index { sub, .. } => sub.as_deref().into_iter().collect(),
            Pattern::Attribute { sub, .. } => sub.as_deref().into_iter().collect(),
            Pattern::Type(check) => check.steps.iter().collect(),
            Pattern::AnyOf(subs) | Pattern::Sibling { subs, .. } => subs.iter().collect(),
            Pattern::Ancestor {
                ancestor,
                descendant,
                ..
            } => vec![ancestor.as_ref(), descendant.as_ref()],
            Pattern::Capture { inner, .. }
            | Pattern::Hook { inner, .. }
            | Pattern::Event { inner, .. } => vec![inner.as_ref()],
        }
    }

    /// Advances this pattern by one event.
    ///
    /// The result is also written to `ctx.state`.
    pub(crate) fn tick<'a>(
        &self,
        event: &Event<'a>,
        ctx: &mut Context,
        root: &mut Root<'a>,
        user_data: &U,
    ) -> State {
        let state = match self {
            Pattern::AnyMapping => leaf::any_container(EventKind::MappingClose, event, ctx),
            Pattern::AnySequence => leaf::any_container(EventKind::SequenceClose, event, ctx),
            Pattern::Mapping(agg) => agg.tick(EventKind::MappingClose, event, ctx, root, user_data),
            Pattern::Sequence(agg) => {
                agg.tick(EventKind::SequenceClose, event, ctx, root, user_data)
            }
            Pattern::AttributeSet(agg) => {
                agg.tick(EventKind::AttributeSetClose, event, ctx, root, user_data)
            }
            Pattern::Key { expected, sub } => leaf::positional(
                EventKind::Key,
                |payload| expected.as_ref().map_or(true, |e| payload.as_scalar() == Some(e)),
                sub.as_deref(),
                event,
                ctx,
                root,
                user_data,
            ),
            Pattern::Index { expected, sub } => leaf::positional(
                EventKind::Index,
                |payload| expected.map_or(true, |e| payload.as_index() == Some(e)),
                sub.as_deref(),
                event,
                ctx,
                root,
                user_data,
            ),
            Pattern::Attribute { expected, sub } => leaf::positional(
                EventKind::Attribute,
                |payload| {
                    expected
                        .as_deref()
                        .map_or(true, |e| payload.as_attribute() == Some(e))
                },
                sub.as_deref(),
                event,
                ctx,
                root,
                user_data,
            ),
            Pattern::Value(expected) => leaf::scalar(
                |scalar| expected.as_ref().map_or(true, |e| scalar == e),
                event,
                ctx,
            ),
            Pattern::Compare(condition) => {
                leaf::scalar(|scalar| condition.matches(scalar), event, ctx)
            }
            Pattern::Type(check) => check.tick(event, ctx, root, user_data),
            Pattern::AnyOf(subs) => aggregate::any_of(subs, event, ctx, root, user_data),
            Pattern::Ancestor {
                ancestor,
                descendant,
                depth,
                strict,
            } => relation::ancestor(
                relation::Lineage {
                    ancestor: ancestor.as_ref(),
                    descendant: descendant.as_ref(),
                    depth: *depth,
                    strict: *strict,
                },
                event,
                ctx,
                root,
                user_data,
            ),
            Pattern::Sibling { subs, .. } => relation::sibling(subs, event, ctx, root, user_data),
            Pattern::Capture { name, inner } => {
                decorator::capture(name, inner, event, ctx, root, user_data)
            }
            Pattern::Hook { hook, inner } => {
                decorator::hook(hook.as_ref(), inner, event, ctx, root, user_data)
            }
            Pattern::Event { tag, inner } => {
                decorator::event(tag, inner, event, ctx, root, user_data)
            }
        };
        trace!(
            pattern = self.name(),
            kind = %event.kind,
            uid = %event.uid,
            state = ?state,
            "tick"
        );
        state
    }
}

// ============================================================================
// Containers
// ============================================================================

/// Matches any non-empty mapping.
pub fn any_mapping<U>() -> Pattern<U> {
    Pattern::AnyMapping
}

/// Matches any non-empty sequence.
pub fn any_sequence<U>() -> Pattern<U> {
    Pattern::AnySequence
}

/// Matches a mapping in which every sub-pattern holds for one of its entries.
///
/// Strict by default: the mapping must have exactly as many entries as there
/// are sub-patterns. Use [`Pattern::strict`] to relax it.
pub fn mapping<U>(subs: Vec<Pattern<U>>) -> Pattern<U> {
    Pattern::Mapping(Aggregate { subs, strict: true })
}

/// Matches a sequence in which every sub-pattern holds for one element.
///
/// Strict by default, like [`mapping`].
pub fn sequence<U>(subs: Vec<Pattern<U>>) -> Pattern<U> {
    Pattern::Sequence(Aggregate { subs, strict: true })
}

/// Matches an object in which every sub-pattern holds for one attribute.
///
/// Strict by default, like [`mapping`].
pub fn attribute_set<U>(subs: Vec<Pattern<U>>) -> Pattern<U> {
    Pattern::AttributeSet(Aggregate { subs, strict: true })
}

// ============================================================================
// Positions
// ============================================================================

/// Matches the key `expected` whose value satisfies `value`.
///
/// `value` must end on the value node's last event, its `type` event; wrap
/// leaf patterns in [`type_with`] to get there.
pub fn key<U>(expected: impl Into<Scalar>, value: Pattern<U>) -> Pattern<U> {
    Pattern::Key {
        expected: Some(expected.into()),
        sub: Some(Box::new(value)),
    }
}

/// Matches the key `expected` on the next event, whatever its value.
pub fn key_only<U>(expected: impl Into<Scalar>) -> Pattern<U> {
    Pattern::Key {
        expected: Some(expected.into()),
        sub: None,
    }
}

/// Matches any key on the next event.
pub fn any_key<U>() -> Pattern<U> {
    Pattern::Key {
        expected: None,
        sub: None,
    }
}

/// Matches any key whose value satisfies `value`.
pub fn any_key_of<U>(value: Pattern<U>) -> Pattern<U> {
    Pattern::Key {
        expected: None,
        sub: Some(Box::new(value)),
    }
}

/// Matches index `expected` whose element satisfies `element`.
pub fn index<U>(expected: usize, element: Pattern<U>) -> Pattern<U> {
    Pattern::Index {
        expected: Some(expected),
        sub: Some(Box::new(element)),
    }
}

/// Matches index `expected` on the next event.
pub fn index_only<U>(expected: usize) -> Pattern<U> {
    Pattern::Index {
        expected: Some(expected),
        sub: None,
    }
}

/// Matches any index on the next event.
pub fn any_index<U>() -> Pattern<U> {
    Pattern::Index {
        expected: None,
        sub: None,
    }
}

/// Matches any index whose element satisfies `element`.
pub fn any_index_of<U>(element: Pattern<U>) -> Pattern<U> {
    Pattern::Index {
        expected: None,
        sub: Some(Box::new(element)),
    }
}

/// Matches attribute `name` whose value satisfies `value`.
pub fn attribute<U>(name: impl Into<String>, value: Pattern<U>) -> Pattern<U> {
    Pattern::Attribute {
        expected: Some(name.into()),
        sub: Some(Box::new(value)),
    }
}

/// Matches attribute `name` on the next event.
pub fn attribute_only<U>(name: impl Into<String>) -> Pattern<U> {
    Pattern::Attribute {
        expected: Some(name.into()),
        sub: None,
    }
}

/// Matches any attribute on the next event.
pub fn any_attribute<U>() -> Pattern<U> {
    Pattern::Attribute {
        expected: None,
        sub: None,
    }
}

/// Matches any attribute whose value satisfies `value`.
pub fn any_attribute_of<U>(value: Pattern<U>) -> Pattern<U> {
    Pattern::Attribute {
        expected: None,
        sub: Some(Box::new(value)),
    }
}

// ============================================================================
// Scalars
// ============================================================================

/// Matches a scalar equal to `expected`.
pub fn value<U>(expected: impl Into<Scalar>) -> Pattern<U> {
    Pattern::Value(Some(expected.into()))
}

/// Matches any scalar.
pub fn any_value<U>() -> Pattern<U> {
    Pattern::Value(None)
}

/// Matches a scalar compared to `operand` with `op`.
pub fn compare<U>(op: Op, operand: impl Into<Scalar>) -> Result<Pattern<U>> {
    Ok(Pattern::Compare(Condition::new(op, operand)?))
}

/// Matches a string scalar against a regular expression.
pub fn matches_regex<U>(pattern: &str) -> Result<Pattern<U>> {
    Ok(Pattern::Compare(Condition::regex(pattern)?))
}

/// Matches a scalar belonging to `values`.
pub fn one_of<U, I, T>(values: I) -> Pattern<U>
where
    I: IntoIterator<Item = T>,
    T: Into<Scalar>,
{
    Pattern::Compare(Condition::one_of(values))
}

// ============================================================================
// Types
// ============================================================================

/// Matches a node whose type is exactly `expected`.
pub fn type_of<U>(expected: impl Into<NodeType>) -> Pattern<U> {
    Pattern::Type(TypeCheck {
        expected: Some(expected.into()),
        kind_of: false,
        steps: Vec::new(),
    })
}

/// Matches a node of type `expected` after up to three steps.
///
/// With one step, the step runs first and the type is checked on the event
/// after it succeeds. With two steps, they run one after the other. With
/// three, the first two run side by side and the third follows once they
/// have settled. In the two- and three-step forms the first step (and with
/// three steps the second one too) must be [structural](Pattern::is_structural).
pub fn type_with<U>(expected: impl Into<NodeType>, steps: Vec<Pattern<U>>) -> Result<Pattern<U>> {
    type_check(Some(expected.into()), false, steps)
}

/// Matches a node whose type is `expected` or a subtype of it.
pub fn kind_of<U>(expected: impl Into<NodeType>) -> Pattern<U> {
    Pattern::Type(TypeCheck {
        expected: Some(expected.into()),
        kind_of: true,
        steps: Vec::new(),
    })
}

/// [`type_with`] accepting subtypes.
pub fn kind_of_with<U>(
    expected: impl Into<NodeType>,
    steps: Vec<Pattern<U>>,
) -> Result<Pattern<U>> {
    type_check(Some(expected.into()), true, steps)
}

/// Matches the `type` event of any node.
pub fn any_type<U>() -> Pattern<U> {
    Pattern::Type(TypeCheck {
        expected: None,
        kind_of: false,
        steps: Vec::new(),
    })
}

/// Matches any node, after `sub` has succeeded.
pub fn any_type_of<U>(sub: Pattern<U>) -> Pattern<U> {
    Pattern::Type(TypeCheck {
        expected: None,
        kind_of: false,
        steps: vec![sub],
    })
}

fn type_check<U>(
    expected: Option<NodeType>,
    kind_of: bool,
    steps: Vec<Pattern<U>>,
) -> Result<Pattern<U>> {
    if steps.len() > 3 {
        return Err(PatternError::TypeArity {
            given: steps.len() + 1,
        });
    }
    let structural_slots = steps.len().saturating_sub(1);
    if let Some((slot, step)) = steps
        .iter()
        .enumerate()
        .take(structural_slots)
        .find(|(_, step)| !step.is_structural())
    {
        return Err(PatternError::NotStructural {
            slot,
            found: step.name(),
        });
    }
    Ok(Pattern::Type(TypeCheck {
        expected,
        kind_of,
        steps,
    }))
}

// ============================================================================
// Combinators
// ============================================================================

/// Alternatives.
///
/// The alternatives are followed for the whole stream, but an `any_of` never
/// reports a result on its own: it is decided by an end-of-stream signal that
/// the matcher does not raise.
pub fn any_of<U>(alternatives: Vec<Pattern<U>>) -> Pattern<U> {
    Pattern::AnyOf(alternatives)
}

/// Matches `descendant` exactly one level below a node matching `ancestor`.
pub fn ancestor<U>(ancestor: Pattern<U>, descendant: Pattern<U>) -> Pattern<U> {
    Pattern::Ancestor {
        ancestor: Box::new(ancestor),
        descendant: Box::new(descendant),
        depth: 1,
        strict: true,
    }
}

/// Matches `descendant` `depth` levels below `ancestor`, or at least `depth`
/// levels below when not `strict`.
pub fn ancestor_at<U>(
    ancestor: Pattern<U>,
    descendant: Pattern<U>,
    depth: usize,
    strict: bool,
) -> Result<Pattern<U>> {
    if depth == 0 {
        return Err(PatternError::InvalidDepth);
    }
    Ok(Pattern::Ancestor {
        ancestor: Box::new(ancestor),
        descendant: Box::new(descendant),
        depth,
        strict,
    })
}

/// Matches once every sub-pattern has matched somewhere.
///
/// The `strict` flag is recorded but positions are not compared.
pub fn sibling<U>(subs: Vec<Pattern<U>>) -> Pattern<U> {
    Pattern::Sibling { subs, strict: true }
}

// ============================================================================
// Decorators
// ============================================================================

/// Stores the payload of the event where `inner` succeeds under `name`.
pub fn capture<U>(name: impl Into<String>, inner: Pattern<U>) -> Pattern<U> {
    Pattern::Capture {
        name: name.into(),
        inner: Box::new(inner),
    }
}

/// Calls `predicate` with the captures so far when `inner` succeeds.
///
/// Each `true` return counts as one modification on the resulting
/// [`Match`](crate::Match).
pub fn hook<U, F>(predicate: F, inner: Pattern<U>) -> Pattern<U>
where
    F: Fn(&Captures<'_>, &U) -> bool + 'static,
{
    Pattern::Hook {
        hook: Rc::new(predicate),
        inner: Box::new(inner),
    }
}

/// Records `tag` on the match when `inner` succeeds.
pub fn event<U>(tag: impl Into<String>, inner: Pattern<U>) -> Pattern<U> {
    Pattern::Event {
        tag: tag.into(),
        inner: Box::new(inner),
    }
}

// ============================================================================
// Debug
// ============================================================================

fn write_list<U>(f: &mut fmt::Formatter<'_>, name: &str, subs: &[Pattern<U>], open: bool) -> fmt::Result {
    write!(f, "{}[", name)?;
    for (i, sub) in subs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{:?}", sub)?;
    }
    if open {
        f.write_str(if subs.is_empty() { ".." } else { ", .." })?;
    }
    f.write_str("]")
}

fn write_positional<U>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    expected: Option<&dyn fmt::Display>,
    sub: Option<&Pattern<U>>,
) -> fmt::Result {
    match (expected, sub) {
        (Some(e), Some(sub)) => write!(f, "{}({}, {:?})", name, e, sub),
        (Some(e), None) => write!(f, "{}({})", name, e),
        (None, Some(sub)) => write!(f, "Any{}({:?})", name, sub),
        (None, None) => write!(f, "Any{}", name),
    }
}

impl<U> fmt::Debug for Pattern<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::AnyMapping => f.write_str("AnyMapping"),
            Pattern::AnySequence => f.write_str("AnySequence"),
            Pattern::Mapping(agg) => write_list(f, "Mapping", &agg.subs, !agg.strict),
            Pattern::Sequence(agg) => write_list(f, "Sequence", &agg.subs, !agg.strict),
            Pattern::AttributeSet(agg) => write_list(f, "AttributeSet", &agg.subs, !agg.strict),
            Pattern::Key { expected, sub } => write_positional(
                f,
                "Key",
                expected.as_ref().map(|e| e as &dyn fmt::Display),
                sub.as_deref(),
            ),
            Pattern::Index { expected, sub } => write_positional(
                f,
                "Index",
                expected.as_ref().map(|e| e as &dyn fmt::Display),
                sub.as_deref(),
            ),
            Pattern::Attribute { expected, sub } => write_positional(
                f,
                "Attribute",
                expected.as_ref().map(|e| e as &dyn fmt::Display),
                sub.as_deref(),
            ),
            Pattern::Value(Some(expected)) => write!(f, "Value({})", expected),
            Pattern::Value(None) => f.write_str("AnyValue"),
            Pattern::Compare(condition) => write!(f, "Compare({})", condition),
            Pattern::Type(check) => {
                let name = if check.kind_of { "KindOf" } else { "Type" };
                match &check.expected {
                    Some(expected) => write!(f, "{}({}", name, expected)?,
                    None if check.steps.is_empty() => return f.write_str("AnyType"),
                    None => f.write_str("AnyType(")?,
                }
                for (i, step) in check.steps.iter().enumerate() {
                    if i > 0 || check.expected.is_some() {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}", step)?;
                }
                f.write_str(")")
            }
            Pattern::AnyOf(subs) => write_list(f, "AnyOf", subs, false),
            Pattern::Ancestor {
                ancestor,
                descendant,
                depth,
                strict,
            } => {
                write!(f, "Ancestor({:?}, {:?}, depth={}", ancestor, descendant, depth)?;
                if !strict {
                    f.write_str(", ..")?;
                }
                f.write_str(")")
            }
            Pattern::Sibling { subs, .. } => write_list(f, "Sibling", subs, false),
            Pattern::Capture { name, inner } => write!(f, "Capture({:?}, {:?})", name, inner),
            Pattern::Hook { inner, .. } => write!(f, "Hook({:?})", inner),
            Pattern::Event { tag, inner } => write!(f, "Event({:?}, {:?})", tag, inner),
        }
    }
}
