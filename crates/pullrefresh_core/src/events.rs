//! Touch input model
//!
//! Pointer events as delivered by the host platform. Every event carries
//! enough pointer state for a consumer to follow one active finger across
//! multi-touch changes without keeping its own pointer table.

use smallvec::SmallVec;

/// Platform pointer identifier (stable for the lifetime of one touch)
pub type PointerId = i32;

/// Pointer list of a single event; most gestures use one or two fingers
pub type Pointers = SmallVec<[TouchPointer; 4]>;

/// Touch pointer state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPointer {
    /// Pointer ID (for multi-touch)
    pub id: PointerId,
    /// X coordinate in container space
    pub x: f32,
    /// Y coordinate in container space
    pub y: f32,
}

impl TouchPointer {
    pub const fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// Touch event types
#[derive(Debug, Clone, PartialEq)]
pub enum TouchEvent {
    /// First finger touched down
    Down { pointer: TouchPointer },
    /// An additional finger touched down; `pointers` includes it
    PointerDown {
        pointer: TouchPointer,
        pointers: Pointers,
    },
    /// One or more fingers moved
    Move { pointers: Pointers },
    /// A non-final finger lifted; `pointers` holds the fingers still down
    PointerUp {
        pointer: TouchPointer,
        pointers: Pointers,
    },
    /// Last finger lifted
    Up { pointer: TouchPointer },
    /// Gesture cancelled by the system
    Cancel,
}

impl TouchEvent {
    pub fn down(id: PointerId, x: f32, y: f32) -> Self {
        TouchEvent::Down {
            pointer: TouchPointer::new(id, x, y),
        }
    }

    /// Single-pointer move
    pub fn move_to(id: PointerId, x: f32, y: f32) -> Self {
        TouchEvent::Move {
            pointers: SmallVec::from_slice(&[TouchPointer::new(id, x, y)]),
        }
    }

    pub fn moves(pointers: &[TouchPointer]) -> Self {
        TouchEvent::Move {
            pointers: SmallVec::from_slice(pointers),
        }
    }

    /// Additional finger `pointer` down while `others` stay down
    pub fn pointer_down(pointer: TouchPointer, others: &[TouchPointer]) -> Self {
        let mut pointers = Pointers::from_slice(others);
        pointers.push(pointer);
        TouchEvent::PointerDown { pointer, pointers }
    }

    /// Finger `pointer` lifted while `remaining` stay down
    pub fn pointer_up(pointer: TouchPointer, remaining: &[TouchPointer]) -> Self {
        TouchEvent::PointerUp {
            pointer,
            pointers: Pointers::from_slice(remaining),
        }
    }

    pub fn up(id: PointerId, x: f32, y: f32) -> Self {
        TouchEvent::Up {
            pointer: TouchPointer::new(id, x, y),
        }
    }

    /// Find a pointer by id anywhere in this event
    pub fn find(&self, id: PointerId) -> Option<TouchPointer> {
        match self {
            TouchEvent::Down { pointer } | TouchEvent::Up { pointer } => {
                (pointer.id == id).then_some(*pointer)
            }
            TouchEvent::PointerDown { pointer, pointers }
            | TouchEvent::PointerUp { pointer, pointers } => {
                if pointer.id == id {
                    Some(*pointer)
                } else {
                    pointers.iter().copied().find(|p| p.id == id)
                }
            }
            TouchEvent::Move { pointers } => pointers.iter().copied().find(|p| p.id == id),
            TouchEvent::Cancel => None,
        }
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            TouchEvent::Down { .. } => "down",
            TouchEvent::PointerDown { .. } => "pointer_down",
            TouchEvent::Move { .. } => "move",
            TouchEvent::PointerUp { .. } => "pointer_up",
            TouchEvent::Up { .. } => "up",
            TouchEvent::Cancel => "cancel",
        }
    }
}

/// Nested-scroll axis flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollAxes {
    bits: u8,
}

impl ScrollAxes {
    pub const NONE: ScrollAxes = ScrollAxes { bits: 0 };
    pub const HORIZONTAL: ScrollAxes = ScrollAxes { bits: 0b01 };
    pub const VERTICAL: ScrollAxes = ScrollAxes { bits: 0b10 };
    pub const BOTH: ScrollAxes = ScrollAxes { bits: 0b11 };

    /// Create from raw bits
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits: bits & 0b11 }
    }

    pub const fn bits(&self) -> u8 {
        self.bits
    }

    pub const fn vertical(&self) -> bool {
        self.bits & Self::VERTICAL.bits != 0
    }

    pub const fn horizontal(&self) -> bool {
        self.bits & Self::HORIZONTAL.bits != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub const fn union(self, other: ScrollAxes) -> ScrollAxes {
        ScrollAxes {
            bits: self.bits | other.bits,
        }
    }
}
