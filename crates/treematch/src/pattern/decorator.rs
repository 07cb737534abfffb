//! Decorators: side effects on the attempt's [`Root`] when the wrapped
//! pattern succeeds.

use tracing::trace;

use crate::context::{Captures, Context, Root, State};
use crate::walk::Event;

use super::Pattern;

/// Ticks the wrapped pattern (context child 0).
fn forward<'a, U>(
    inner: &Pattern<U>,
    event: &Event<'a>,
    ctx: &mut Context,
    root: &mut Root<'a>,
    user_data: &U,
) -> State {
    inner.tick(event, &mut ctx.children[0], root, user_data)
}

/// Succeeds with the wrapped pattern's uid.
fn adopt(ctx: &mut Context) -> State {
    let uid = ctx.children[0].anchor().clone();
    ctx.succeed(uid)
}

pub(super) fn capture<'a, U>(
    name: &str,
    inner: &Pattern<U>,
    event: &Event<'a>,
    ctx: &mut Context,
    root: &mut Root<'a>,
    user_data: &U,
) -> State {
    let state = forward(inner, event, ctx, root, user_data);
    if state != State::Success {
        return ctx.settle(state);
    }
    trace!(capture = name, uid = %event.uid, "captured");
    root.captures.insert(name.to_string(), event.payload);
    adopt(ctx)
}

pub(super) fn hook<'a, U>(
    predicate: &dyn Fn(&Captures<'_>, &U) -> bool,
    inner: &Pattern<U>,
    event: &Event<'a>,
    ctx: &mut Context,
    root: &mut Root<'a>,
    user_data: &U,
) -> State {
    let state = forward(inner, event, ctx, root, user_data);
    if state != State::Success {
        return ctx.settle(state);
    }
    if predicate(&root.captures, user_data) {
        root.modifications += 1;
        trace!(modifications = root.modifications, "hook reported a modification");
    }
    adopt(ctx)
}

pub(super) fn event<'a, U>(
    tag: &str,
    inner: &Pattern<U>,
    event: &Event<'a>,
    ctx: &mut Context,
    root: &mut Root<'a>,
    user_data: &U,
) -> State {
    let state = forward(inner, event, ctx, root, user_data);
    if state != State::Success {
        return ctx.settle(state);
    }
    root.events.insert(tag.to_string());
    adopt(ctx)
}
