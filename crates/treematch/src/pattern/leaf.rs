//! Single-position matchers: containers, positions, scalars and types.

use crate::context::{Context, Phase, Root, State};
use crate::node::Scalar;
use crate::walk::{Event, EventKind, Payload};

use super::{Pattern, TypeCheck};

/// `AnyMapping` / `AnySequence`: decided on the first event.
pub(super) fn any_container(close: EventKind, event: &Event<'_>, ctx: &mut Context) -> State {
    if event.kind == close {
        ctx.succeed(event.uid.clone())
    } else {
        ctx.fail()
    }
}

/// `Value` / `Compare`: decided on the first event.
pub(super) fn scalar(
    accepts: impl Fn(&Scalar) -> bool,
    event: &Event<'_>,
    ctx: &mut Context,
) -> State {
    match event.payload.as_scalar() {
        Some(scalar) if event.kind == EventKind::Value && accepts(scalar) => {
            ctx.succeed(event.uid.clone())
        }
        _ => ctx.fail(),
    }
}

/// `Key` / `Index` / `Attribute`.
///
/// The optional sub-pattern runs first; the positional tag is expected on
/// the event right after the one where it succeeded.
pub(super) fn positional<'a, U>(
    tag: EventKind,
    accepts: impl Fn(&Payload<'a>) -> bool,
    sub: Option<&Pattern<U>>,
    event: &Event<'a>,
    ctx: &mut Context,
    root: &mut Root<'a>,
    user_data: &U,
) -> State {
    if ctx.phase == Phase::Enter {
        if let Some(sub) = sub {
            let child = &mut ctx.children[0];
            if child.state != State::Success {
                let state = sub.tick(event, child, root, user_data);
                if state != State::Success {
                    return ctx.settle(state);
                }
            }
        }
        ctx.phase = Phase::Tag;
        return ctx.settle(State::Running);
    }

    if event.kind == tag && accepts(&event.payload) {
        ctx.succeed(event.uid.clone())
    } else {
        ctx.fail()
    }
}

impl<U> TypeCheck<U> {
    pub(super) fn tick<'a>(
        &self,
        event: &Event<'a>,
        ctx: &mut Context,
        root: &mut Root<'a>,
        user_data: &U,
    ) -> State {
        if ctx.phase == Phase::Enter {
            ctx.uid = Some(event.uid.clone());
            ctx.phase = match self.steps.len() {
                0 => Phase::Final,
                1 => Phase::Sub,
                _ => Phase::Concurrent,
            };
        }

        match ctx.phase {
            Phase::Sub => {
                let state = self.steps[0].tick(event, &mut ctx.children[0], root, user_data);
                if state != State::Success {
                    return ctx.settle(state);
                }
                ctx.phase = Phase::Final;
                ctx.settle(State::Running)
            }
            Phase::Concurrent if self.steps.len() == 2 => self.chain(event, ctx, root, user_data),
            Phase::Concurrent => self.join(event, ctx, root, user_data),
            _ => self.check(event, ctx),
        }
    }

    /// Two steps: the first to success, then the second.
    fn chain<'a>(
        &self,
        event: &Event<'a>,
        ctx: &mut Context,
        root: &mut Root<'a>,
        user_data: &U,
    ) -> State {
        if ctx.children[0].state != State::Success {
            let state = self.steps[0].tick(event, &mut ctx.children[0], root, user_data);
            if state != State::Success {
                return ctx.settle(state);
            }
            return ctx.settle(State::Running);
        }

        let state = self.steps[1].tick(event, &mut ctx.children[1], root, user_data);
        if state != State::Success {
            return ctx.settle(state);
        }
        ctx.phase = Phase::Final;
        ctx.settle(State::Running)
    }

    /// Three steps: the first two side by side, then the third once neither
    /// runs and at least one succeeded.
    fn join<'a>(
        &self,
        event: &Event<'a>,
        ctx: &mut Context,
        root: &mut Root<'a>,
        user_data: &U,
    ) -> State {
        let pair = &ctx.children[..2];
        let settled = !pair.iter().any(|c| c.state.is_running());
        let any_success = pair.iter().any(|c| c.state == State::Success);

        if !(settled && any_success) {
            for (step, child) in self.steps[..2].iter().zip(&mut ctx.children[..2]) {
                if child.state.is_running() {
                    step.tick(event, child, root, user_data);
                }
            }
            if ctx.children[..2].iter().all(|c| c.state == State::Failed) {
                return ctx.fail();
            }
            return ctx.settle(State::Running);
        }

        let state = self.steps[2].tick(event, &mut ctx.children[2], root, user_data);
        if state != State::Success {
            return ctx.settle(state);
        }
        ctx.phase = Phase::Final;
        ctx.settle(State::Running)
    }

    fn check(&self, event: &Event<'_>, ctx: &mut Context) -> State {
        let Some(node) = event.payload.as_node() else {
            return ctx.fail();
        };
        if event.kind != EventKind::Type {
            return ctx.fail();
        }
        let holds = match &self.expected {
            None => true,
            Some(expected) if self.kind_of => node.node_type().is_kind_of(expected),
            Some(expected) => node.node_type() == *expected,
        };
        if holds {
            ctx.succeed(event.uid.clone())
        } else {
            ctx.fail()
        }
    }
}
