//! Drives an `EngineCore` from a script, playing the part of the browser.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::cell::Cell;
use std::rc::Rc;

use canvas::config::EngineConfig;
use canvas::coords::{CanvasRect, Point};
use canvas::doc::{BoxInstance, BoxKey, BoxTemplate, TemplateKey};
use canvas::engine::{Action, EngineCore};
use canvas::input::DragKind;
use serde::Serialize;

use crate::error::CliError;
use crate::script::{ScriptEvent, template_fields};

/// Final state printed after a replay.
#[derive(Debug, Serialize)]
pub struct Report {
    pub boxes: Vec<BoxInstance>,
    pub templates: Vec<BoxTemplate>,
    pub sidebar_z: i64,
    /// The session still open when the script ended, if any.
    pub dragging: Option<DraggingReport>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DraggingReport {
    pub key: BoxKey,
    pub kind: DragKind,
}

pub struct Replay {
    core: EngineCore,
    rect: Rc<Cell<Option<CanvasRect>>>,
}

impl Replay {
    /// A fresh board whose canvas sits at `rect` (`None` = unmounted).
    #[must_use]
    pub fn new(config: EngineConfig, rect: Option<CanvasRect>) -> Self {
        let rect = Rc::new(Cell::new(rect));
        let mut core = EngineCore::with_config(config);
        core.set_canvas(Box::new(Rc::clone(&rect)));
        Self { core, rect }
    }

    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    /// Apply every event in order.
    ///
    /// # Errors
    ///
    /// Stops at the first event the host could not have produced.
    pub fn run(&mut self, events: &[ScriptEvent]) -> Result<(), CliError> {
        for (index, event) in events.iter().enumerate() {
            let actions = self.apply(index, event)?;
            for action in &actions {
                tracing::debug!(index, ?action, "engine action");
            }
        }
        Ok(())
    }

    /// Apply one event and return the engine's actions.
    ///
    /// # Errors
    ///
    /// Returns a `CliError` for invalid form input or for pointer-downs on
    /// entities that are not on screen.
    pub fn apply(&mut self, index: usize, event: &ScriptEvent) -> Result<Vec<Action>, CliError> {
        let actions = match event {
            ScriptEvent::CreateTemplate { width, height, color } => {
                let fields = template_fields(index, *width, *height, color)?;
                let key = self.core.create_template(fields)?;
                tracing::info!(index, %key, "template created");
                Vec::new()
            }
            ScriptEvent::Canvas { left, top } => {
                self.rect.set(Some(CanvasRect::new(*left, *top)));
                Vec::new()
            }
            ScriptEvent::Unmount => {
                self.rect.set(None);
                Vec::new()
            }
            ScriptEvent::DownBox { key, x, y } => {
                let key = BoxKey(*key);
                if self.core.box_by_key(key).is_none() {
                    return Err(CliError::UnknownBox { index, key: key.0 });
                }
                self.core.on_pointer_down_box(key, Point::new(*x, *y))
            }
            ScriptEvent::DownTemplate { key, x, y } => {
                let key = TemplateKey(*key);
                if self.core.template_by_key(key).is_none() {
                    return Err(CliError::UnknownTemplate { index, key: key.0 });
                }
                self.core.on_pointer_down_template(key, Point::new(*x, *y))
            }
            ScriptEvent::Down { x, y } => self.core.on_pointer_down(Point::new(*x, *y)),
            ScriptEvent::Move { x, y } => self.core.on_pointer_move(Point::new(*x, *y)),
            ScriptEvent::Up { x, y } => self.core.on_pointer_up(Point::new(*x, *y)),
            ScriptEvent::DebugTemplates => {
                let json = self.core.templates_debug_json()?;
                tracing::info!(index, templates = %json, "current templates");
                Vec::new()
            }
        };
        Ok(actions)
    }

    /// Snapshot the board for output.
    #[must_use]
    pub fn report(&self) -> Report {
        let dragging = self
            .core
            .drag_state()
            .session()
            .map(|s| DraggingReport { key: s.key, kind: s.kind });
        Report {
            boxes: self.core.boxes().to_vec(),
            templates: self.core.templates().to_vec(),
            sidebar_z: self.core.sidebar_z(),
            dragging,
        }
    }
}
