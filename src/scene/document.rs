use super::{DisplayFlags, Scene, SceneError, SceneObject};
use crate::measure::{ObjectKind, Point3};
use crate::render::{LayoutSettings, ViewProjection};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: ObjectKind,
    pub position: [f64; 3],
}

fn default_kind() -> ObjectKind {
    ObjectKind::Empty
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSpec {
    pub eye: [f64; 3],
    pub target: [f64; 3],
    pub up: [f64; 3],
    pub fov_y_degrees: f64,
    pub viewport: [f64; 2],
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            eye: [10.0, -10.0, 8.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 0.0, 1.0],
            fov_y_degrees: 50.0,
            viewport: [1280.0, 720.0],
        }
    }
}

impl CameraSpec {
    pub fn projector(&self) -> ViewProjection {
        ViewProjection::look_at(
            Point3::from_array(self.eye),
            Point3::from_array(self.target),
            Point3::from_array(self.up),
            self.fov_y_degrees.to_radians(),
            DVec2::from_array(self.viewport),
        )
    }
}

/// On-disk description of a scene, its selection and the view to draw it in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDocument {
    pub objects: Vec<ObjectSpec>,
    /// Object names in selection order.
    #[serde(default)]
    pub selection: Vec<String>,
    #[serde(default)]
    pub display: DisplayFlags,
    #[serde(default)]
    pub camera: CameraSpec,
    #[serde(default)]
    pub layout: LayoutSettings,
}

impl SceneDocument {
    pub fn from_json_str(source: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn build_scene(&self) -> Result<Scene, SceneError> {
        let mut scene = Scene::new();
        for spec in &self.objects {
            scene.spawn(SceneObject::new(
                spec.name.clone(),
                spec.kind,
                Point3::from_array(spec.position),
            ));
        }
        for name in &self.selection {
            scene.select_by_name(name)?;
        }
        scene.set_display(self.display);
        log::debug!(
            "[scene] built {} objects, {} selected",
            self.objects.len(),
            scene.selection().len()
        );
        Ok(scene)
    }
}

pub fn load_document(path: &Path) -> Result<SceneDocument, SceneError> {
    let source = std::fs::read_to_string(path)?;
    SceneDocument::from_json_str(&source)
}
