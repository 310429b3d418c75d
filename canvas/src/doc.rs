//! Document model: box templates, box instances, and the in-memory store.
//!
//! `BoxTemplate` is the reusable prototype shown in the sidebar;
//! `BoxInstance` is a box placed on the canvas. Both carry the same visual
//! fields (`BoxFields`) and each lives in its own dense key space.
//!
//! `EntityStore` owns both collections. Every mutation publishes a fresh
//! `Arc` snapshot of the affected collection, so a presentation layer can
//! detect changes with `Arc::ptr_eq` against the snapshot it last rendered.
//! Previous snapshots are never mutated.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::coords::Point;

/// Identity of a box instance on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoxKey(pub u64);

/// Identity of a box template in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateKey(pub u64);

impl fmt::Display for BoxKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "box#{}", self.0)
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template#{}", self.0)
    }
}

/// Visual fields shared by templates and the instances spawned from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxFields {
    /// Width in canvas units. Always > 0 (validated by the caller).
    pub width: u32,
    /// Height in canvas units. Always > 0 (validated by the caller).
    pub height: u32,
    /// CSS color string, e.g. `"#ffffff"`.
    pub color: String,
}

/// A reusable prototype in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxTemplate {
    pub key: TemplateKey,
    #[serde(flatten)]
    pub fields: BoxFields,
    /// Stacking order; tracks the sidebar while a spawn drag is in progress.
    pub z: i64,
}

/// A box placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxInstance {
    pub key: BoxKey,
    /// Left edge in canvas-local coordinates.
    pub x: f64,
    /// Top edge in canvas-local coordinates.
    pub y: f64,
    #[serde(flatten)]
    pub fields: BoxFields,
    /// Stacking order; higher values render above lower ones.
    pub z: i64,
}

impl BoxInstance {
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether a canvas-local point falls inside this box's bounds.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x
            && pt.x <= self.x + f64::from(self.fields.width)
            && pt.y >= self.y
            && pt.y <= self.y + f64::from(self.fields.height)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{space} key space exhausted")]
    KeySpaceExhausted { space: &'static str },
}

/// In-memory store of templates and box instances.
#[derive(Debug, Clone)]
pub struct EntityStore {
    boxes: Arc<Vec<BoxInstance>>,
    templates: Arc<Vec<BoxTemplate>>,
    next_box_key: u64,
    next_template_key: u64,
}

impl EntityStore {
    /// Create an empty store with both key spaces starting at 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            boxes: Arc::new(Vec::new()),
            templates: Arc::new(Vec::new()),
            next_box_key: 0,
            next_template_key: 0,
        }
    }

    // --- Snapshots ---

    /// Current box snapshot, in creation order.
    #[must_use]
    pub fn boxes(&self) -> Arc<Vec<BoxInstance>> {
        Arc::clone(&self.boxes)
    }

    /// Current template snapshot, in creation order.
    #[must_use]
    pub fn templates(&self) -> Arc<Vec<BoxTemplate>> {
        Arc::clone(&self.templates)
    }

    // --- Creation ---

    /// Append a new box instance and return its freshly minted key.
    ///
    /// # Errors
    ///
    /// Returns `KeySpaceExhausted` once every `u64` key has been handed out.
    pub fn create_instance(&mut self, fields: BoxFields, at: Point, z: i64) -> Result<BoxKey, StoreError> {
        let key = BoxKey(self.next_box_key);
        self.next_box_key = self
            .next_box_key
            .checked_add(1)
            .ok_or(StoreError::KeySpaceExhausted { space: "box" })?;

        let instance = BoxInstance { key, x: at.x, y: at.y, fields, z };
        self.edit_boxes(|boxes| boxes.push(instance));
        Ok(key)
    }

    /// Append a new template and return its freshly minted key.
    ///
    /// # Errors
    ///
    /// Returns `KeySpaceExhausted` once every `u64` key has been handed out.
    pub fn create_template(&mut self, fields: BoxFields, z: i64) -> Result<TemplateKey, StoreError> {
        let key = TemplateKey(self.next_template_key);
        self.next_template_key = self
            .next_template_key
            .checked_add(1)
            .ok_or(StoreError::KeySpaceExhausted { space: "template" })?;

        let template = BoxTemplate { key, fields, z };
        self.edit_templates(|templates| templates.push(template));
        Ok(key)
    }

    // --- Mutation ---

    /// Remove a box, preserving the order of the rest. Returns false if absent.
    pub fn remove_instance(&mut self, key: BoxKey) -> bool {
        let Some(index) = self.find_index_by_key(key) else {
            tracing::trace!(%key, "remove skipped: no such box");
            return false;
        };
        self.edit_boxes(|boxes| {
            boxes.remove(index);
        });
        true
    }

    /// Overwrite a box's position. Returns false if absent.
    pub fn update_position(&mut self, key: BoxKey, x: f64, y: f64) -> bool {
        let Some(index) = self.find_index_by_key(key) else {
            tracing::trace!(%key, "move skipped: no such box");
            return false;
        };
        self.edit_boxes(|boxes| {
            boxes[index].x = x;
            boxes[index].y = y;
        });
        true
    }

    /// Overwrite a box's stacking order. Returns false if absent.
    pub fn update_z(&mut self, key: BoxKey, z: i64) -> bool {
        let Some(index) = self.find_index_by_key(key) else {
            tracing::trace!(%key, "restack skipped: no such box");
            return false;
        };
        self.edit_boxes(|boxes| boxes[index].z = z);
        true
    }

    /// Overwrite a template's stacking order. Returns false if absent.
    pub fn update_template_z(&mut self, key: TemplateKey, z: i64) -> bool {
        let Some(index) = self.templates.iter().position(|t| t.key == key) else {
            tracing::trace!(%key, "restack skipped: no such template");
            return false;
        };
        self.edit_templates(|templates| templates[index].z = z);
        true
    }

    // --- Lookup ---

    /// Index of a box within the current snapshot.
    #[must_use]
    pub fn find_index_by_key(&self, key: BoxKey) -> Option<usize> {
        self.boxes.iter().position(|b| b.key == key)
    }

    #[must_use]
    pub fn get_box(&self, key: BoxKey) -> Option<&BoxInstance> {
        self.boxes.iter().find(|b| b.key == key)
    }

    #[must_use]
    pub fn get_template(&self, key: TemplateKey) -> Option<&BoxTemplate> {
        self.templates.iter().find(|t| t.key == key)
    }

    /// Return all boxes sorted by `(z, key)` for draw order.
    #[must_use]
    pub fn sorted_boxes(&self) -> Vec<&BoxInstance> {
        let mut boxes: Vec<&BoxInstance> = self.boxes.iter().collect();
        boxes.sort_by(|a, b| a.z.cmp(&b.z).then_with(|| a.key.cmp(&b.key)));
        boxes
    }

    /// Number of boxes on the canvas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns `true` if the canvas holds no boxes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    // --- Copy-on-write helpers ---

    fn edit_boxes(&mut self, f: impl FnOnce(&mut Vec<BoxInstance>)) {
        let mut next = Vec::clone(&self.boxes);
        f(&mut next);
        self.boxes = Arc::new(next);
    }

    fn edit_templates(&mut self, f: impl FnOnce(&mut Vec<BoxTemplate>)) {
        let mut next = Vec::clone(&self.templates);
        f(&mut next);
        self.templates = Arc::new(next);
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
