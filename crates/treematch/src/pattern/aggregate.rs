//! AND and OR matchers over several sub-patterns.
//!
//! Sub-patterns run side by side. Only contexts still running are ticked;
//! failed ones are reset as long as the group makes progress, so a branch
//! that lost track can start over on a later element.

use crate::context::{Context, Phase, Root, State};
use crate::walk::{Event, EventKind};

use super::{Aggregate, Pattern};

/// Running and successful sub-contexts after one round of ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct Progress {
    pub running: usize,
    pub successes: usize,
}

/// Ticks every running sub-context once and counts the outcome.
///
/// With `same_level`, the first success fixes the group uid (the parent of
/// its uid), and later successes from another parent are reset uncounted.
pub(super) fn tick_subs<'a, U>(
    subs: &[Pattern<U>],
    event: &Event<'a>,
    ctx: &mut Context,
    root: &mut Root<'a>,
    user_data: &U,
    same_level: bool,
) -> Progress {
    let mut progress = Progress::default();
    for (sub, child) in subs.iter().zip(ctx.children.iter_mut()) {
        if child.state.is_running() {
            sub.tick(event, child, root, user_data);
        }
        match child.state {
            State::Running => progress.running += 1,
            State::Success if same_level => {
                let parent = child.anchor().parent();
                let group = ctx.uid.get_or_insert_with(|| parent.clone());
                if *group == parent {
                    progress.successes += 1;
                } else {
                    child.reset();
                }
            }
            State::Success => progress.successes += 1,
            State::Failed => {}
        }
    }
    progress
}

/// Keeps a group alive while it makes progress, resetting failed members.
pub(super) fn settle_partial(ctx: &mut Context, progress: Progress) -> State {
    if progress.running == 0 && progress.successes == 0 {
        return ctx.fail();
    }
    for child in ctx
        .children
        .iter_mut()
        .filter(|c| c.state == State::Failed)
    {
        child.reset();
    }
    ctx.settle(State::Running)
}

impl<U> Aggregate<U> {
    /// `Mapping` / `Sequence` / `AttributeSet`, closing on `close`.
    pub(super) fn tick<'a>(
        &self,
        close: EventKind,
        event: &Event<'a>,
        ctx: &mut Context,
        root: &mut Root<'a>,
        user_data: &U,
    ) -> State {
        if ctx.phase == Phase::Enter {
            ctx.phase = Phase::Container;
        }

        let at_group = ctx.uid.as_ref().map_or(true, |group| *group == event.uid);
        if event.kind == close && at_group {
            if ctx.successes != self.subs.len() {
                return ctx.fail();
            }
            if self.strict && self.subs.len() != event.payload.len() {
                return ctx.fail();
            }
            let uid = ctx.uid.clone().unwrap_or_else(|| event.uid.clone());
            return ctx.succeed(uid);
        }

        let progress = tick_subs(&self.subs, event, ctx, root, user_data, true);
        ctx.successes = progress.successes;
        settle_partial(ctx, progress)
    }
}

/// `AnyOf`: follows every alternative, resetting the ones that fail.
///
/// The verdict is only given on a `type` event once the context has been
/// told the stream ended.
pub(super) fn any_of<'a, U>(
    subs: &[Pattern<U>],
    event: &Event<'a>,
    ctx: &mut Context,
    root: &mut Root<'a>,
    user_data: &U,
) -> State {
    if ctx.phase == Phase::Enter {
        ctx.phase = Phase::Final;
    }

    if ctx.terminated && event.kind == EventKind::Type {
        if ctx.children.iter().any(|c| c.state == State::Success) {
            return ctx.succeed(event.uid.clone());
        }
        return ctx.fail();
    }

    for (sub, child) in subs.iter().zip(ctx.children.iter_mut()) {
        if child.state.is_running() {
            sub.tick(event, child, root, user_data);
        }
        if child.state == State::Failed {
            child.reset();
        }
    }
    ctx.settle(State::Running)
}
