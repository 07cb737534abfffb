//! Per-attempt match state.
//!
//! Every live attempt owns one [`Context`] tree shaped like its pattern, plus
//! one [`Root`] record holding what decorators produced along the way.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::pattern::Pattern;
use crate::uid::Uid;
use crate::walk::Payload;

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// More events are needed.
    Running,
    /// The pattern holds.
    Success,
    /// The pattern cannot hold in this attempt.
    Failed,
}

impl State {
    /// Returns `true` for [`State::Running`].
    pub fn is_running(self) -> bool {
        self == State::Running
    }
}

/// Sub-step a matcher is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Enter,
    Tag,
    Container,
    Sub,
    Concurrent,
    Final,
}

/// Match state of one pattern node within one attempt.
#[derive(Debug)]
pub(crate) struct Context {
    pub phase: Phase,
    pub state: State,
    pub uid: Option<Uid>,
    pub children: Vec<Context>,
    pub successes: usize,
    /// End-of-stream signal read by `AnyOf`. Never raised by the driver.
    pub terminated: bool,
}

impl Context {
    /// Builds the full context tree for `pattern`.
    pub fn new<U>(pattern: &Pattern<U>) -> Self {
        Context {
            phase: Phase::Enter,
            state: State::Running,
            uid: None,
            children: pattern.children().into_iter().map(Context::new).collect(),
            successes: 0,
            terminated: false,
        }
    }

    /// Records `state` and returns it.
    pub fn settle(&mut self, state: State) -> State {
        self.state = state;
        state
    }

    pub fn succeed(&mut self, uid: Uid) -> State {
        self.uid = Some(uid);
        self.settle(State::Success)
    }

    pub fn fail(&mut self) -> State {
        self.settle(State::Failed)
    }

    /// Returns this context and all its descendants to their initial epoch.
    pub fn reset(&mut self) {
        self.phase = Phase::Enter;
        self.state = State::Running;
        self.uid = None;
        self.successes = 0;
        self.terminated = false;
        for child in &mut self.children {
            child.reset();
        }
    }

    /// The uid a successful context must carry.
    ///
    /// # Panics
    ///
    /// Panics if the context succeeded without establishing a uid.
    pub fn anchor(&self) -> &Uid {
        self.uid
            .as_ref()
            .expect("a successful match context always carries a uid")
    }
}

/// Captured payloads keyed by capture name.
pub type Captures<'a> = BTreeMap<String, Payload<'a>>;

/// Side-effect record shared by every context of one attempt.
#[derive(Debug, Default)]
pub struct Root<'a> {
    pub captures: Captures<'a>,
    pub events: BTreeSet<String>,
    pub modifications: usize,
}

impl<'a> Root<'a> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{any_key, any_value, mapping, value};

    #[test]
    fn tree_mirrors_pattern() {
        let pattern: Pattern = mapping(vec![any_key(), value(1i64), any_value()]);
        let ctx = Context::new(&pattern);
        assert_eq!(ctx.children.len(), 3);
        assert!(ctx.children.iter().all(|c| c.children.is_empty()));
        assert_eq!(ctx.state, State::Running);
        assert_eq!(ctx.phase, Phase::Enter);
    }

    #[test]
    fn reset_is_recursive() {
        let pattern: Pattern = mapping(vec![any_value()]);
        let mut ctx = Context::new(&pattern);
        ctx.phase = Phase::Container;
        ctx.successes = 1;
        ctx.succeed(Uid::root());
        ctx.children[0].succeed(Uid::root().child(0));

        ctx.reset();

        assert_eq!(ctx.phase, Phase::Enter);
        assert_eq!(ctx.state, State::Running);
        assert_eq!(ctx.uid, None);
        assert_eq!(ctx.successes, 0);
        assert_eq!(ctx.children[0].state, State::Running);
        assert_eq!(ctx.children[0].uid, None);
    }

    #[test]
    #[should_panic(expected = "carries a uid")]
    fn anchor_without_uid_panics() {
        let pattern: Pattern = any_value();
        let ctx = Context::new(&pattern);
        let _ = ctx.anchor();
    }

    #[test]
    fn state_serializes_lowercase() {
        let json = serde_json::to_string(&[State::Running, State::Success, State::Failed]).unwrap();
        assert_eq!(json, r#"["running","success","failed"]"#);
        let back: Vec<State> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![State::Running, State::Success, State::Failed]);
    }
}
