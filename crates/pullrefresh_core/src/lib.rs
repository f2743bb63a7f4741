//! Pull-to-refresh core
//!
//! Platform-neutral building blocks shared by the pull container:
//!
//! - **Touch events**: multi-pointer down/move/up/cancel stream with pointer lookup
//! - **Scroll axes**: nested-scroll axis flags
//! - **State cells**: event-driven state machines with transition history

pub mod events;
pub mod fsm;

pub use events::{Pointers, PointerId, ScrollAxes, TouchEvent, TouchPointer};
pub use fsm::{EventId, StateCell, StateTransitions};
