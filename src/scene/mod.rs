//! Minimal host scene: named objects with generational ids, an ordered
//! selection, and the document-level overlay display flags.

pub mod document;

pub use document::{CameraSpec, ObjectSpec, SceneDocument, load_document};

use crate::measure::{ObjectKind, Point3, Selectable};
use crate::render::{LayoutSettings, OverlayConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Handle referencing an object within a [`Scene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId {
    index: u32,
    generation: u32,
}

impl ObjectId {
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub const fn index(self) -> u32 {
        self.index
    }

    pub const fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
    pub position: Point3,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind, position: Point3) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
        }
    }

    pub fn empty(name: impl Into<String>, position: Point3) -> Self {
        Self::new(name, ObjectKind::Empty, position)
    }
}

impl Selectable for SceneObject {
    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> Point3 {
        self.position
    }
}

/// Overlay toggles stored with the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFlags {
    pub axis: bool,
    pub dimensions: bool,
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("object {0:?} is not alive in this scene")]
    NoSuchObject(ObjectId),
    #[error("no object named {0:?}")]
    UnknownObject(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("scene document error: {0}")]
    Document(#[from] serde_json::Error),
}

#[derive(Default)]
struct ObjectRecord {
    generation: u32,
    object: Option<SceneObject>,
}

#[derive(Default)]
pub struct Scene {
    records: Vec<ObjectRecord>,
    free_list: Vec<u32>,
    selection: Vec<ObjectId>,
    display: DisplayFlags,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, object: SceneObject) -> ObjectId {
        if let Some(index) = self.free_list.pop() {
            let record = &mut self.records[index as usize];
            record.object = Some(object);
            ObjectId::new(index, record.generation)
        } else {
            let index = self.records.len() as u32;
            self.records.push(ObjectRecord {
                generation: 0,
                object: Some(object),
            });
            ObjectId::new(index, 0)
        }
    }

    pub fn despawn(&mut self, id: ObjectId) -> Result<SceneObject, SceneError> {
        self.validate(id)?;
        self.selection.retain(|selected| *selected != id);
        let record = &mut self.records[id.index as usize];
        record.generation = record.generation.wrapping_add(1);
        self.free_list.push(id.index);
        record.object.take().ok_or(SceneError::NoSuchObject(id))
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.records
            .get(id.index as usize)
            .map(|record| record.object.is_some() && record.generation == id.generation)
            .unwrap_or(false)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        if !self.contains(id) {
            return None;
        }
        self.records[id.index as usize].object.as_ref()
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        if !self.contains(id) {
            return None;
        }
        self.records[id.index as usize].object.as_mut()
    }

    pub fn set_position(&mut self, id: ObjectId, position: Point3) -> Result<(), SceneError> {
        let object = self.get_mut(id).ok_or(SceneError::NoSuchObject(id))?;
        object.position = position;
        Ok(())
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.records.iter().enumerate().filter_map(|(index, record)| {
            record
                .object
                .as_ref()
                .map(|object| (ObjectId::new(index as u32, record.generation), object))
        })
    }

    /// Appends to the selection; reselecting keeps its earlier place.
    pub fn select(&mut self, id: ObjectId) -> Result<(), SceneError> {
        self.validate(id)?;
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
        Ok(())
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<ObjectId, SceneError> {
        let id = self
            .find_by_name(name)
            .ok_or_else(|| SceneError::UnknownObject(name.to_string()))?;
        self.select(id)?;
        Ok(id)
    }

    pub fn deselect(&mut self, id: ObjectId) {
        self.selection.retain(|selected| *selected != id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &[ObjectId] {
        &self.selection
    }

    /// Selected objects in selection order.
    pub fn selected_objects(&self) -> Vec<&SceneObject> {
        self.selection.iter().filter_map(|id| self.get(*id)).collect()
    }

    pub fn display(&self) -> DisplayFlags {
        self.display
    }

    pub fn set_display(&mut self, display: DisplayFlags) {
        self.display = display;
    }

    pub fn toggle_axis(&mut self) -> bool {
        self.display.axis = !self.display.axis;
        self.display.axis
    }

    pub fn toggle_dimensions(&mut self) -> bool {
        self.display.dimensions = !self.display.dimensions;
        self.display.dimensions
    }

    /// Snapshot of the display flags for one redraw.
    pub fn overlay_config(&self, layout: LayoutSettings) -> OverlayConfig {
        OverlayConfig::new(self.display.axis, self.display.dimensions).with_layout(layout)
    }

    fn validate(&self, id: ObjectId) -> Result<(), SceneError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(SceneError::NoSuchObject(id))
        }
    }
}
