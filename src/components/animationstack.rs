//! Animation chains and the per-entity stack of chains.
//!
//! An [`AnimationChain`] is a multi-phase action (wind-up, strike, recover)
//! stored as a LIFO: the last phase given to [`AnimationChain::new`] runs
//! first. An [`AnimationStack`] is the LIFO of chains an entity owns.
//! Pushing a chain preempts the one below it, which resumes once the new
//! chain is exhausted (a getup queued beneath a knockback, for example).
//!
//! The stack keeps every live phase in a single owned arena. Each chain is a
//! contiguous span of that arena recorded by its start index, so the top
//! chain is always the last span and the executing phase is always the last
//! arena slot.

use log::debug;
use smallvec::SmallVec;

use crate::components::actor::Actor;
use crate::components::animation::Animation;

#[derive(Debug, Clone, Default)]
pub struct AnimationChain {
    phases: SmallVec<[Animation; 3]>,
}

impl AnimationChain {
    /// Build a chain. The **last** animation becomes the top and runs first.
    pub fn new(animations: impl IntoIterator<Item = Animation>) -> Self {
        Self {
            phases: animations.into_iter().collect(),
        }
    }

    pub fn single(animation: Animation) -> Self {
        Self::new([animation])
    }

    /// Tick the executing phase. The caller pops it on completion.
    pub fn tick(&mut self, actor: &mut dyn Actor) -> bool {
        debug_assert!(!self.phases.is_empty(), "ticked an empty animation chain");
        self.phases
            .last_mut()
            .is_some_and(|animation| animation.tick(actor))
    }

    pub fn top(&self) -> Option<&Animation> {
        self.phases.last()
    }

    pub fn push(&mut self, animation: Animation) {
        self.phases.push(animation);
    }

    pub fn pop(&mut self) -> Option<Animation> {
        self.phases.pop()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Phases from bottom (runs last) to top (runs next).
    pub fn iter(&self) -> impl Iterator<Item = &Animation> {
        self.phases.iter()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnimationStack {
    arena: Vec<Animation>,
    /// Arena index where each chain starts, bottom chain first.
    spans: Vec<usize>,
}

impl AnimationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a chain on top, preempting whatever is running.
    pub fn push_chain(&mut self, chain: AnimationChain) {
        if chain.is_empty() {
            debug_assert!(false, "pushed an empty animation chain");
            return;
        }
        debug!(
            "push chain [{}] over {} chain(s)",
            chain.iter().map(Animation::name).collect::<Vec<_>>().join(", "),
            self.spans.len()
        );
        self.spans.push(self.arena.len());
        self.arena.extend(chain.phases);
    }

    /// Remove the top chain with whatever phases it still holds.
    pub fn pop_chain(&mut self) -> Option<AnimationChain> {
        let start = self.spans.pop()?;
        let chain = AnimationChain::new(self.arena.drain(start..));
        debug!("pop chain ({} phase(s) left unplayed)", chain.len());
        Some(chain)
    }

    /// Remove the executing phase; drops its chain once that chain is empty.
    pub fn pop_animation(&mut self) -> Option<Animation> {
        let Some(animation) = self.arena.pop() else {
            debug_assert!(false, "popped from an empty animation stack");
            return None;
        };
        if self.spans.last() == Some(&self.arena.len()) {
            self.spans.pop();
        }
        Some(animation)
    }

    /// Tick the executing phase of the top chain.
    pub fn tick_top(&mut self, actor: &mut dyn Actor) -> bool {
        match self.arena.last_mut() {
            Some(animation) => animation.tick(actor),
            None => {
                debug_assert!(false, "ticked an empty animation stack");
                false
            }
        }
    }

    /// The executing phase.
    pub fn top(&self) -> Option<&Animation> {
        self.arena.last()
    }

    /// Phases of the top chain, bottom to top.
    pub fn top_chain(&self) -> &[Animation] {
        match self.spans.last() {
            Some(&start) => &self.arena[start..],
            None => &[],
        }
    }

    pub fn chain_count(&self) -> usize {
        self.spans.len()
    }

    pub fn animation_count(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::actor::testing::FakeActor;

    fn phase(name: &str, duration: i32) -> Animation {
        Animation::new(name, duration)
    }

    fn run_to_completion(chain: &mut AnimationChain, actor: &mut FakeActor) {
        while !chain.tick(actor) {}
        chain.pop();
    }

    #[test]
    fn test_chain_runs_last_argument_first() {
        let mut actor = FakeActor::new();
        let mut chain = AnimationChain::new([phase("a", 2), phase("b", 2), phase("c", 2)]);
        assert_eq!(chain.top().map(Animation::name), Some("c"));

        run_to_completion(&mut chain, &mut actor);
        assert_eq!(chain.top().map(Animation::name), Some("b"));
        run_to_completion(&mut chain, &mut actor);
        assert_eq!(chain.top().map(Animation::name), Some("a"));
        run_to_completion(&mut chain, &mut actor);
        assert!(chain.is_empty());
    }

    #[test]
    fn test_chain_does_not_pop_itself() {
        let mut actor = FakeActor::new();
        let mut chain = AnimationChain::single(phase("a", 1));
        assert!(chain.tick(&mut actor));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_stack_pushed_chain_preempts_and_resumes() {
        let mut stack = AnimationStack::new();
        stack.push_chain(AnimationChain::single(phase("getup", 3)));
        stack.push_chain(AnimationChain::new([phase("recover", 2), phase("knockback", 2)]));

        assert_eq!(stack.chain_count(), 2);
        assert_eq!(stack.animation_count(), 3);
        assert_eq!(stack.top().map(Animation::name), Some("knockback"));

        stack.pop_animation();
        assert_eq!(stack.chain_count(), 2);
        assert_eq!(stack.top().map(Animation::name), Some("recover"));

        stack.pop_animation();
        assert_eq!(stack.chain_count(), 1);
        assert_eq!(stack.top().map(Animation::name), Some("getup"));

        stack.pop_animation();
        assert!(stack.is_empty());
        assert_eq!(stack.animation_count(), 0);
    }

    #[test]
    fn test_pop_chain_discards_remaining_phases() {
        let mut stack = AnimationStack::new();
        stack.push_chain(AnimationChain::single(phase("idle", 3)));
        stack.push_chain(AnimationChain::new([
            phase("recover", 2),
            phase("strike", 2),
            phase("windup", 2),
        ]));

        let popped = stack.pop_chain().map(|c| c.len());
        assert_eq!(popped, Some(3));
        assert_eq!(stack.top_chain().len(), 1);
        assert_eq!(stack.top().map(Animation::name), Some("idle"));
    }

    #[test]
    fn test_tick_top_only_advances_executing_phase() {
        let mut actor = FakeActor::new();
        let mut stack = AnimationStack::new();
        stack.push_chain(AnimationChain::single(phase("below", 5)));
        stack.push_chain(AnimationChain::single(phase("above", 5)));

        stack.tick_top(&mut actor);
        stack.tick_top(&mut actor);

        assert_eq!(stack.top().map(Animation::ticks_left), Some(3));
        stack.pop_chain();
        assert_eq!(stack.top().map(Animation::ticks_left), Some(5));
    }

    #[test]
    fn test_empty_stack_queries() {
        let stack = AnimationStack::new();
        assert!(stack.top().is_none());
        assert!(stack.top_chain().is_empty());
        assert_eq!(stack.chain_count(), 0);
    }
}
