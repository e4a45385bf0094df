//! Per-tick input resource.
//!
//! The core never polls devices. Whatever drives the simulation (a window
//! layer, a replay, a test) feeds [`InputEvent`]s into [`InputState`], which
//! exposes a three-state edge signal per logical [`Action`] plus an optional
//! pointer payload. [`ScriptedInput`] replays events keyed by tick for the
//! headless runner.
use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashMap;

/// Edge state of an action for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldState {
    #[default]
    Idle,
    /// Went down this tick.
    Press,
    /// Still down since an earlier tick.
    Hold,
    /// Went up this tick.
    Release,
}

impl HoldState {
    pub fn is_down(self) -> bool {
        matches!(self, HoldState::Press | HoldState::Hold)
    }
}

/// Logical actions the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move,
    Target,
    Cancel,
    Hotbar1,
    Hotbar2,
    Hotbar3,
    Hotbar4,
    /// Pointer hover position, no button.
    PointerInfo,
}

impl Action {
    pub const COUNT: usize = 8;
    pub const ALL: [Action; Action::COUNT] = [
        Action::Move,
        Action::Target,
        Action::Cancel,
        Action::Hotbar1,
        Action::Hotbar2,
        Action::Hotbar3,
        Action::Hotbar4,
        Action::PointerInfo,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Edge state with the pointer position captured for the action.
pub struct ActionState {
    pub state: HoldState,
    pub pointer: Option<Vec2>,
}

/// Something that happened on an input device during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Press(Action, Option<Vec2>),
    Release(Action),
    /// Pointer moved while associated with the action.
    Point(Action, Vec2),
}

/// Resource capturing the per-tick action state relevant to gameplay.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    actions: [ActionState; Action::COUNT],
}

impl InputState {
    pub fn get(&self, action: Action) -> ActionState {
        self.actions[action.index()]
    }

    pub fn state(&self, action: Action) -> HoldState {
        self.get(action).state
    }

    pub fn is_down(&self, action: Action) -> bool {
        self.state(action).is_down()
    }

    pub fn pointer(&self, action: Action) -> Option<Vec2> {
        self.get(action).pointer
    }

    /// Age edges by one tick: presses become holds, releases become idle.
    pub fn advance(&mut self) {
        for action in &mut self.actions {
            action.state = match action.state {
                HoldState::Press | HoldState::Hold => HoldState::Hold,
                HoldState::Release | HoldState::Idle => HoldState::Idle,
            };
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(action, pointer) => {
                let slot = &mut self.actions[action.index()];
                slot.state = HoldState::Press;
                if pointer.is_some() {
                    slot.pointer = pointer;
                }
            }
            InputEvent::Release(action) => {
                let slot = &mut self.actions[action.index()];
                if slot.state.is_down() {
                    slot.state = HoldState::Release;
                }
            }
            InputEvent::Point(action, pointer) => {
                self.actions[action.index()].pointer = Some(pointer);
            }
        }
    }
}

/// Input events replayed at fixed ticks.
#[derive(Resource, Debug, Clone, Default)]
pub struct ScriptedInput {
    events: FxHashMap<u64, Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, tick: u64, event: InputEvent) -> Self {
        self.events.entry(tick).or_default().push(event);
        self
    }

    pub fn events_for(&self, tick: u64) -> &[InputEvent] {
        self.events.get(&tick).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputstate_default_all_idle() {
        let input = InputState::default();
        for action in Action::ALL {
            assert_eq!(input.state(action), HoldState::Idle);
            assert!(input.pointer(action).is_none());
        }
    }

    #[test]
    fn test_press_hold_release_cycle() {
        let mut input = InputState::default();
        input.apply(InputEvent::Press(Action::Move, Some(Vec2::new(3.0, 4.0))));
        assert_eq!(input.state(Action::Move), HoldState::Press);
        assert_eq!(input.pointer(Action::Move), Some(Vec2::new(3.0, 4.0)));

        input.advance();
        assert_eq!(input.state(Action::Move), HoldState::Hold);
        assert!(input.is_down(Action::Move));

        input.apply(InputEvent::Release(Action::Move));
        assert_eq!(input.state(Action::Move), HoldState::Release);
        assert!(!input.is_down(Action::Move));

        input.advance();
        assert_eq!(input.state(Action::Move), HoldState::Idle);
        // pointer payload survives the release
        assert_eq!(input.pointer(Action::Move), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_release_without_press_stays_idle() {
        let mut input = InputState::default();
        input.apply(InputEvent::Release(Action::Target));
        assert_eq!(input.state(Action::Target), HoldState::Idle);
    }

    #[test]
    fn test_point_updates_payload_only() {
        let mut input = InputState::default();
        input.apply(InputEvent::Point(Action::PointerInfo, Vec2::ONE));
        assert_eq!(input.state(Action::PointerInfo), HoldState::Idle);
        assert_eq!(input.pointer(Action::PointerInfo), Some(Vec2::ONE));
    }

    #[test]
    fn test_scripted_input_groups_by_tick() {
        let script = ScriptedInput::new()
            .at(3, InputEvent::Press(Action::Target, None))
            .at(3, InputEvent::Point(Action::PointerInfo, Vec2::ZERO))
            .at(7, InputEvent::Release(Action::Target));
        assert_eq!(script.events_for(3).len(), 2);
        assert_eq!(script.events_for(7), &[InputEvent::Release(Action::Target)]);
        assert!(script.events_for(4).is_empty());
        assert_eq!(script.len(), 3);
    }
}
