//! State Machine Runtime
//!
//! Flat, event-driven state machines for interaction states.
//!
//! States are plain enums that describe their own transition table through
//! [`StateTransitions`]. A [`StateCell`] holds the current state, applies
//! events and keeps a bounded transition history for debugging and tests.

use std::collections::VecDeque;
use std::hash::Hash;

/// Identifier for an event type
pub type EventId = u32;

/// Maximum number of transitions kept in a cell's history
const HISTORY_CAPACITY: usize = 64;

/// Trait for enums that define their own transitions
///
/// # Example
///
/// ```rust
/// use pullrefresh_core::StateTransitions;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Closed,
///     Open,
/// }
///
/// const PUSH: u32 = 1;
/// const PULL: u32 = 2;
///
/// impl StateTransitions for Door {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Door::Closed, PUSH) => Some(Door::Open),
///             (Door::Open, PULL) => Some(Door::Closed),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Door::Closed.on_event(PUSH), Some(Door::Open));
/// assert_eq!(Door::Closed.on_event(PULL), None);
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

/// A state machine instance holding one state value
#[derive(Debug, Clone)]
pub struct StateCell<S: StateTransitions> {
    current: S,
    /// History of state transitions (for debugging)
    history: VecDeque<(S, EventId, S)>,
}

impl<S: StateTransitions> StateCell<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: VecDeque::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventId) -> Option<S> {
        let from = self.current;
        let to = from.on_event(event)?;

        tracing::trace!("fsm {:?} --{}--> {:?}", from, event, to);

        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back((from, event, to));
        self.current = to;
        Some(to)
    }

    /// Iterate transition history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(S, EventId, S)> {
        self.history.iter()
    }

    /// States entered, oldest first
    pub fn visited(&self) -> Vec<S> {
        self.history.iter().map(|(_, _, to)| *to).collect()
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for StateCell<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
