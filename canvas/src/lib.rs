//! Drag-and-drop engine for the box board.
//!
//! The board has a sidebar of box templates and a canvas of box instances.
//! Pressing on a template pulls a new box off it and drags it in one gesture;
//! pressing on a box drags it; releasing a box outside the canvas deletes it.
//! The host (a browser component or the replay binary) forwards raw pointer
//! events to the engine and renders from the store's snapshots.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Templates, box instances, and the copy-on-write [`doc::EntityStore`] |
//! | [`coords`] | Screen to canvas-local coordinate translation |
//! | [`zorder`] | Monotonic stacking-order allocator |
//! | [`input`] | Drag state machine and scoped session listeners |
//! | [`hit`] | Hit-testing canvas points against boxes |
//! | [`config`] | Environment-driven engine configuration |
//! | [`consts`] | Shared numeric constants (resting z, out-of-bounds sentinel) |

pub mod config;
pub mod consts;
pub mod coords;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod zorder;
