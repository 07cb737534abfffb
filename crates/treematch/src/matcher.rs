//! Match driver and executors.
//!
//! The [`TreeMatcher`] struct wraps a [`Pattern`] with its run configuration
//! and executes it against trees. One pass over the event stream runs many
//! attempts side by side: a fresh attempt is spawned at every event, so the
//! pattern is tried from every position at once.

use std::collections::{BTreeSet, VecDeque};

use tracing::{debug, trace};

use crate::context::{Captures, Context, Root, State};
use crate::node::Node;
use crate::pattern::Pattern;
use crate::uid::Uid;
use crate::walk::{walk, Payload};

/// A pattern ready to run, with its run configuration.
///
/// # Example
///
/// ```
/// use treematch::{capture, type_with, NodeType, TreeMatcher, Node, value};
///
/// let tree = Node::from(serde_json::json!({"a": 5, "b": [5, 6]}));
/// let fives = TreeMatcher::new(capture("n", value(5i64)));
///
/// let found = fives.matches(&tree, &());
/// assert_eq!(found.len(), 2);
/// assert!(found.iter().all(|m| m.capture("n").is_some()));
///
/// let first = TreeMatcher::new(type_with(NodeType::Int, vec![value(6i64)]).unwrap());
/// assert!(first.any(&tree, &()));
/// ```
pub struct TreeMatcher<U = ()> {
    pattern: Pattern<U>,
    limit: Option<usize>,
    max_live_attempts: Option<usize>,
}

impl<U> TreeMatcher<U> {
    /// Creates a matcher with no limits.
    pub fn new(pattern: Pattern<U>) -> Self {
        TreeMatcher {
            pattern,
            limit: None,
            max_live_attempts: None,
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Stops after `n` matches.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Keeps at most `n` attempts alive, retiring the oldest first.
    ///
    /// Bounds memory on large trees at the cost of missing matches that need
    /// more than `n` events to complete.
    pub fn max_live_attempts(mut self, n: usize) -> Self {
        self.max_live_attempts = Some(n);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the pattern.
    pub fn pattern(&self) -> &Pattern<U> {
        &self.pattern
    }

    /// Returns the match limit, if set.
    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the live attempt bound, if set.
    pub fn get_max_live_attempts(&self) -> Option<usize> {
        self.max_live_attempts
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Runs the pattern over `tree`.
    ///
    /// Matches are ordered by the event that completed them, then by the
    /// event that spawned them. `user_data` is handed untouched to hooks.
    pub fn matches<'a>(&self, tree: &'a Node, user_data: &U) -> Vec<Match<'a>> {
        self.run(tree, user_data, self.limit)
    }

    /// Returns the first match, if any.
    pub fn find<'a>(&self, tree: &'a Node, user_data: &U) -> Option<Match<'a>> {
        self.run(tree, user_data, Some(1)).into_iter().next()
    }

    /// Counts the matches.
    pub fn count(&self, tree: &Node, user_data: &U) -> usize {
        self.matches(tree, user_data).len()
    }

    /// Returns `true` if the pattern matches anywhere.
    pub fn any(&self, tree: &Node, user_data: &U) -> bool {
        self.find(tree, user_data).is_some()
    }

    fn run<'a>(&self, tree: &'a Node, user_data: &U, limit: Option<usize>) -> Vec<Match<'a>> {
        let mut found = Vec::new();
        if limit == Some(0) {
            return found;
        }

        let mut live: VecDeque<Attempt<'a>> = VecDeque::new();
        for (position, event) in walk(tree).enumerate() {
            live.push_back(Attempt::spawn(&self.pattern, position));
            if let Some(max) = self.max_live_attempts {
                while live.len() > max {
                    if let Some(evicted) = live.pop_front() {
                        trace!(start = evicted.start, "evicted oldest attempt");
                    }
                }
            }

            let mut survivors = VecDeque::with_capacity(live.len());
            for mut attempt in live.drain(..) {
                match self
                    .pattern
                    .tick(&event, &mut attempt.ctx, &mut attempt.root, user_data)
                {
                    State::Running => survivors.push_back(attempt),
                    State::Success => {
                        let found_match = attempt.finish(position);
                        debug!(
                            uid = %found_match.uid,
                            start = found_match.start,
                            end = position,
                            "pattern matched"
                        );
                        found.push(found_match);
                        if limit.is_some_and(|n| found.len() >= n) {
                            debug!(matches = found.len(), "match limit reached");
                            return found;
                        }
                    }
                    State::Failed => trace!(start = attempt.start, end = position, "attempt failed"),
                }
            }
            live = survivors;
        }

        debug!(
            matches = found.len(),
            unfinished = live.len(),
            "event stream exhausted"
        );
        found
    }
}

/// One run of the pattern, spawned at one event.
struct Attempt<'a> {
    ctx: Context,
    root: Root<'a>,
    start: usize,
}

impl<'a> Attempt<'a> {
    fn spawn<U>(pattern: &Pattern<U>, start: usize) -> Self {
        Attempt {
            ctx: Context::new(pattern),
            root: Root::new(),
            start,
        }
    }

    fn finish(self, end: usize) -> Match<'a> {
        Match {
            uid: self.ctx.anchor().clone(),
            captures: self.root.captures,
            events: self.root.events,
            modifications: self.root.modifications,
            start: self.start,
            end,
        }
    }
}

/// A successful attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    uid: Uid,
    captures: Captures<'a>,
    events: BTreeSet<String>,
    modifications: usize,
    start: usize,
    end: usize,
}

impl<'a> Match<'a> {
    /// Position of the matched node.
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// All captures, by name.
    pub fn captures(&self) -> &Captures<'a> {
        &self.captures
    }

    /// A single capture.
    pub fn capture(&self, name: &str) -> Option<&Payload<'a>> {
        self.captures.get(name)
    }

    /// Tags recorded by event decorators.
    pub fn events(&self) -> &BTreeSet<String> {
        &self.events
    }

    /// Returns `true` if `tag` was recorded.
    pub fn has_event(&self, tag: &str) -> bool {
        self.events.contains(tag)
    }

    /// Number of hook calls that reported a modification.
    pub fn modifications(&self) -> usize {
        self.modifications
    }

    /// Index of the event at which the attempt was spawned.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index of the event at which the attempt succeeded.
    pub fn end(&self) -> usize {
        self.end
    }
}
