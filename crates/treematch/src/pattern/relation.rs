//! Relational matchers: ancestry and siblings.

use crate::context::{Context, Phase, Root, State};
use crate::walk::Event;

use super::aggregate::{settle_partial, tick_subs};
use super::Pattern;

/// Borrowed parameters of an ancestor pattern.
pub(super) struct Lineage<'p, U> {
    pub ancestor: &'p Pattern<U>,
    pub descendant: &'p Pattern<U>,
    pub depth: usize,
    pub strict: bool,
}

/// `Ancestor`: the descendant first, then an ancestor at the right distance.
///
/// Context children are `[ancestor, descendant]`. The descendant's success
/// position is kept as the reference uid; the ancestor is retried from
/// scratch after each failure until one of its successes sits on the
/// reference path.
pub(super) fn ancestor<'a, U>(
    lineage: Lineage<'_, U>,
    event: &Event<'a>,
    ctx: &mut Context,
    root: &mut Root<'a>,
    user_data: &U,
) -> State {
    if ctx.phase == Phase::Enter {
        let state = lineage
            .descendant
            .tick(event, &mut ctx.children[1], root, user_data);
        if state != State::Success {
            return ctx.settle(state);
        }
        ctx.phase = Phase::Final;
        ctx.uid = Some(event.uid.clone());
        return ctx.settle(State::Running);
    }

    match lineage
        .ancestor
        .tick(event, &mut ctx.children[0], root, user_data)
    {
        State::Running => return ctx.settle(State::Running),
        State::Failed => {
            ctx.children[0].reset();
            return ctx.settle(State::Running);
        }
        State::Success => {}
    }

    let Some(distance) = ctx.anchor().distance_from(&event.uid) else {
        return ctx.fail();
    };
    if distance == lineage.depth || (!lineage.strict && distance > lineage.depth) {
        ctx.settle(State::Success)
    } else if distance < lineage.depth {
        ctx.children[0].reset();
        ctx.settle(State::Running)
    } else {
        ctx.fail()
    }
}

/// `Sibling`: every sub-pattern, in any position.
pub(super) fn sibling<'a, U>(
    subs: &[Pattern<U>],
    event: &Event<'a>,
    ctx: &mut Context,
    root: &mut Root<'a>,
    user_data: &U,
) -> State {
    if ctx.phase == Phase::Enter {
        ctx.phase = Phase::Container;
    }

    let progress = tick_subs(subs, event, ctx, root, user_data, false);
    ctx.successes = progress.successes;
    if progress.successes == subs.len() {
        let uid = match ctx.children.first() {
            Some(first) => first.anchor().clone(),
            None => event.uid.clone(),
        };
        return ctx.succeed(uid);
    }
    settle_partial(ctx, progress)
}
