use std::sync::Arc;

use web_sys::Element;

use crate::config::EngineConfig;
use crate::coords::{CanvasBounds, CanvasRect, Point, to_canvas_local};
use crate::doc::{BoxFields, BoxInstance, BoxKey, BoxTemplate, EntityStore, StoreError, TemplateKey};
use crate::hit;
use crate::input::{Cursor, DragKind, DragSession, DragState, InputSurface, ListenerKind};
use crate::zorder::ZOrderAllocator;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
///
/// These describe what already happened in the store; the presentation layer
/// applies them (or re-reads the snapshots) and never mutates entities itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    BoxCreated(BoxInstance),
    BoxMoved { key: BoxKey, x: f64, y: f64 },
    BoxRestacked { key: BoxKey, z: i64 },
    BoxDeleted { key: BoxKey },
    SidebarRestacked { z: i64 },
    TemplateRestacked { key: TemplateKey, z: i64 },
    SetCursor { key: BoxKey, cursor: Cursor },
}

/// Core engine state: all logic that doesn't depend on the DOM.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    doc: EntityStore,
    zorder: ZOrderAllocator,
    input: DragState,
    surface: InputSurface,
    canvas: Box<dyn CanvasBounds>,
    sidebar_z: i64,
    config: EngineConfig,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with an unmounted canvas and the given config.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            doc: EntityStore::new(),
            zorder: ZOrderAllocator::new(config.sidebar_rest_z),
            input: DragState::Idle,
            surface: InputSurface::new(),
            canvas: Box::new(None::<CanvasRect>),
            sidebar_z: config.sidebar_rest_z,
            config,
        }
    }

    /// Bind the source of the canvas rectangle. Queried on every pointer event.
    pub fn set_canvas(&mut self, canvas: Box<dyn CanvasBounds>) {
        self.canvas = canvas;
    }

    // --- Templates ---

    /// Add a template to the sidebar. Called by the creation form after it
    /// has validated the fields.
    ///
    /// # Errors
    ///
    /// Returns `KeySpaceExhausted` if no template key is left.
    pub fn create_template(&mut self, fields: BoxFields) -> Result<TemplateKey, StoreError> {
        let key = self.doc.create_template(fields, self.config.sidebar_rest_z)?;
        tracing::debug!(%key, "template created");
        Ok(key)
    }

    // --- Input events ---

    /// Pointer-down on an existing box: start dragging it.
    pub fn on_pointer_down_box(&mut self, key: BoxKey, screen_pt: Point) -> Vec<Action> {
        self.begin_session(key, DragKind::Instance, screen_pt)
    }

    /// Pointer-down on a template: spawn a box at the pointer and start
    /// dragging it in the same gesture.
    pub fn on_pointer_down_template(&mut self, template: TemplateKey, screen_pt: Point) -> Vec<Action> {
        if self.input.is_dragging() {
            tracing::trace!(%template, "pointer-down ignored: drag in progress");
            return Vec::new();
        }
        let Some(fields) = self.doc.get_template(template).map(|t| t.fields.clone()) else {
            tracing::trace!(%template, "pointer-down ignored: no such template");
            return Vec::new();
        };

        let at = self.canvas_local(screen_pt);
        let z = self.zorder.allocate_next();
        let key = match self.doc.create_instance(fields, at, z) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(error = %e, %template, "spawn failed");
                return Vec::new();
            }
        };
        tracing::debug!(%key, %template, x = at.x, y = at.y, "box spawned");

        let mut actions: Vec<Action> = self.doc.get_box(key).cloned().map(Action::BoxCreated).into_iter().collect();
        actions.extend(self.begin_session(key, DragKind::TemplateSource(template), screen_pt));
        actions
    }

    /// Pointer-down at a screen point: drag the topmost box under it, if any.
    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.input.is_dragging() {
            tracing::trace!("pointer-down ignored: drag in progress");
            return Vec::new();
        }
        let local = self.canvas_local(screen_pt);
        match hit::hit_test(local, &self.doc) {
            Some(key) => self.begin_session(key, DragKind::Instance, screen_pt),
            None => Vec::new(),
        }
    }

    /// Pointer-move anywhere on the input surface.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if !self.surface.is_attached(ListenerKind::PointerMove) {
            return Vec::new();
        }
        let DragState::Dragging(session) = &self.input else {
            return Vec::new();
        };
        let key = session.key;
        let pos = session.position_for(self.canvas_local(screen_pt));

        if !self.doc.update_position(key, pos.x, pos.y) {
            return Vec::new();
        }
        tracing::trace!(%key, x = pos.x, y = pos.y, "box moved");
        vec![Action::BoxMoved { key, x: pos.x, y: pos.y }]
    }

    /// Pointer-up anywhere on the input surface: drop or delete the box and
    /// end the session.
    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        if !self.surface.is_attached(ListenerKind::PointerUp) {
            return Vec::new();
        }
        let DragState::Dragging(session) = std::mem::take(&mut self.input) else {
            return Vec::new();
        };

        let key = session.key;
        let pointer = self.canvas_local(screen_pt);
        let mut actions = Vec::new();

        if pointer.is_outside_canvas() {
            if self.doc.remove_instance(key) {
                tracing::debug!(%key, x = pointer.x, y = pointer.y, "box released outside canvas; deleted");
                actions.push(Action::BoxDeleted { key });
            }
        } else if let Some(b) = self.doc.get_box(key) {
            tracing::debug!(%key, x = b.x, y = b.y, "box dropped");
            actions.push(Action::SetCursor { key, cursor: Cursor::Grab });
        }

        let rest = self.config.sidebar_rest_z;
        self.sidebar_z = rest;
        actions.push(Action::SidebarRestacked { z: rest });
        if let DragKind::TemplateSource(template) = session.kind {
            if self.doc.update_template_z(template, rest) {
                actions.push(Action::TemplateRestacked { key: template, z: rest });
            }
        }

        session.end();
        actions
    }

    // --- Queries ---

    /// Current box snapshot.
    #[must_use]
    pub fn boxes(&self) -> Arc<Vec<BoxInstance>> {
        self.doc.boxes()
    }

    /// Current template snapshot.
    #[must_use]
    pub fn templates(&self) -> Arc<Vec<BoxTemplate>> {
        self.doc.templates()
    }

    /// Look up a box by key.
    #[must_use]
    pub fn box_by_key(&self, key: BoxKey) -> Option<&BoxInstance> {
        self.doc.get_box(key)
    }

    /// Look up a template by key.
    #[must_use]
    pub fn template_by_key(&self, key: TemplateKey) -> Option<&BoxTemplate> {
        self.doc.get_template(key)
    }

    /// Read-only view of the store.
    #[must_use]
    pub fn doc(&self) -> &EntityStore {
        &self.doc
    }

    /// Stacking order of the template sidebar.
    #[must_use]
    pub fn sidebar_z(&self) -> i64 {
        self.sidebar_z
    }

    /// Highest stacking order handed out so far.
    #[must_use]
    pub fn top_z(&self) -> i64 {
        self.zorder.current_max()
    }

    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        &self.input
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    /// Handle to the surface the session listeners attach to.
    #[must_use]
    pub fn surface(&self) -> &InputSurface {
        &self.surface
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Pretty JSON dump of the templates, for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if the snapshot cannot be encoded.
    pub fn templates_debug_json(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string_pretty(self.doc.templates().as_slice())?;
        tracing::debug!(templates = %json, "current templates");
        Ok(json)
    }

    // --- Internals ---

    fn canvas_local(&self, screen_pt: Point) -> Point {
        to_canvas_local(self.canvas.bounding_rect(), screen_pt)
    }

    /// Idle → Dragging. Restacks synchronously, then attaches the session
    /// listeners.
    fn begin_session(&mut self, key: BoxKey, kind: DragKind, screen_pt: Point) -> Vec<Action> {
        if self.input.is_dragging() {
            tracing::trace!(%key, "pointer-down ignored: drag in progress");
            return Vec::new();
        }
        let Some(start_position) = self.doc.get_box(key).map(BoxInstance::position) else {
            tracing::trace!(%key, "pointer-down ignored: no such box");
            return Vec::new();
        };
        let start_pointer = self.canvas_local(screen_pt);
        let mut actions = Vec::new();

        if let DragKind::TemplateSource(template) = kind {
            let z = self.zorder.allocate_next();
            self.sidebar_z = z;
            actions.push(Action::SidebarRestacked { z });
            if self.doc.update_template_z(template, z) {
                actions.push(Action::TemplateRestacked { key: template, z });
            }
        }

        let z = self.zorder.allocate_next();
        self.doc.update_z(key, z);
        actions.push(Action::BoxRestacked { key, z });
        actions.push(Action::SetCursor { key, cursor: Cursor::Move });

        tracing::debug!(%key, ?kind, x = start_pointer.x, y = start_pointer.y, z, "drag started");
        let listeners = self.surface.attach_session();
        self.input = DragState::Dragging(DragSession::new(key, kind, start_pointer, start_position, listeners));
        actions
    }
}

/// A DOM element measured with `getBoundingClientRect`. Detached elements
/// report no rectangle.
impl CanvasBounds for Element {
    fn bounding_rect(&self) -> Option<CanvasRect> {
        if !self.is_connected() {
            return None;
        }
        let rect = self.get_bounding_client_rect();
        Some(CanvasRect::new(rect.left(), rect.top()))
    }
}

/// The full engine. Wraps `EngineCore` and measures the browser canvas element.
pub struct Engine {
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: Element) -> Self {
        Self::with_config(canvas, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(canvas: Element, config: EngineConfig) -> Self {
        let mut core = EngineCore::with_config(config);
        core.set_canvas(Box::new(canvas));
        Self { core }
    }

    // --- Delegated inputs ---

    /// # Errors
    ///
    /// Returns `KeySpaceExhausted` if no template key is left.
    pub fn create_template(&mut self, fields: BoxFields) -> Result<TemplateKey, StoreError> {
        self.core.create_template(fields)
    }

    pub fn on_pointer_down_box(&mut self, key: BoxKey, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_down_box(key, screen_pt)
    }

    pub fn on_pointer_down_template(&mut self, template: TemplateKey, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_down_template(template, screen_pt)
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn boxes(&self) -> Arc<Vec<BoxInstance>> {
        self.core.boxes()
    }

    #[must_use]
    pub fn templates(&self) -> Arc<Vec<BoxTemplate>> {
        self.core.templates()
    }

    #[must_use]
    pub fn sidebar_z(&self) -> i64 {
        self.core.sidebar_z()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.core.is_dragging()
    }
}
