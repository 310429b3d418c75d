//! Input model: the drag state machine and the listeners it owns.
//!
//! `DragState` is the active gesture tracked between pointer-down and
//! pointer-up. A `Dragging` state always owns a `SessionListeners` guard; the
//! global pointer-move and pointer-up listeners on the `InputSurface` stay
//! attached exactly as long as that guard is alive. Leaving `Dragging` by any
//! path drops the guard and detaches both.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::coords::Point;
use crate::doc::{BoxKey, TemplateKey};

/// Global listeners a drag session attaches to the whole input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
}

/// Pointer cursor shown over a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    /// Box at rest.
    #[default]
    Grab,
    /// Box being dragged.
    Move,
}

/// The whole-window input surface that session listeners attach to.
///
/// Cloning yields another handle to the same listener set.
#[derive(Debug, Clone, Default)]
pub struct InputSurface {
    attached: Rc<RefCell<BTreeSet<ListenerKind>>>,
}

impl InputSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a listener of this kind is currently attached.
    #[must_use]
    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.attached.borrow().contains(&kind)
    }

    /// Number of listeners currently attached.
    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.attached.borrow().len()
    }

    /// Attach the move and up listeners for a new session.
    ///
    /// Both stay attached until the returned guard is dropped.
    #[must_use]
    pub fn attach_session(&self) -> SessionListeners {
        let mut attached = self.attached.borrow_mut();
        attached.insert(ListenerKind::PointerMove);
        attached.insert(ListenerKind::PointerUp);
        tracing::trace!("session listeners attached");
        SessionListeners { surface: self.clone() }
    }
}

/// Scoped ownership of a session's global listeners.
pub struct SessionListeners {
    surface: InputSurface,
}

impl Drop for SessionListeners {
    fn drop(&mut self) {
        let mut attached = self.surface.attached.borrow_mut();
        attached.remove(&ListenerKind::PointerMove);
        attached.remove(&ListenerKind::PointerUp);
        tracing::trace!("session listeners detached");
    }
}

impl fmt::Debug for SessionListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionListeners").finish_non_exhaustive()
    }
}

/// What the user grabbed to start the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "template", rename_all = "snake_case")]
pub enum DragKind {
    /// An existing box on the canvas.
    Instance,
    /// A box freshly pulled off the given template.
    TemplateSource(TemplateKey),
}

/// Reference frame of an active drag.
///
/// Positions are recomputed from this fixed frame on every move, never
/// accumulated, so skipped or duplicated move events do not drift.
#[derive(Debug)]
pub struct DragSession {
    /// Box being moved. Looked up in the store on every event.
    pub key: BoxKey,
    pub kind: DragKind,
    /// Canvas-local pointer position at pointer-down.
    pub start_pointer: Point,
    /// Box position at pointer-down.
    pub start_position: Point,
    listeners: SessionListeners,
}

impl DragSession {
    #[must_use]
    pub fn new(key: BoxKey, kind: DragKind, start_pointer: Point, start_position: Point, listeners: SessionListeners) -> Self {
        Self { key, kind, start_pointer, start_position, listeners }
    }

    /// Box position for a pointer at `pointer` (canvas-local).
    #[must_use]
    pub fn position_for(&self, pointer: Point) -> Point {
        Point {
            x: self.start_position.x + (pointer.x - self.start_pointer.x),
            y: self.start_position.y + (pointer.y - self.start_pointer.y),
        }
    }

    /// Consume the session, detaching its listeners.
    pub fn end(self) {
        drop(self.listeners);
    }
}

/// Internal state for the drag state machine.
#[derive(Debug, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A box is following the pointer.
    Dragging(DragSession),
}

impl DragState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(session),
        }
    }
}
