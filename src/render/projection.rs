use super::Point2;
use crate::measure::Point3;
use glam::{DMat4, DVec2};
use serde::{Deserialize, Serialize};

/// World-to-screen mapping for the viewport the overlay is drawn into.
pub trait Projector {
    /// `None` when the point cannot be placed on screen (behind the eye).
    fn project(&self, point: Point3) -> Option<Point2>;
    fn viewport_size(&self) -> DVec2;
}

/// Font service used to centre and align overlay text.
pub trait TextMetrics {
    fn text_width(&self, text: &str, size: f32) -> f64;
}

/// Fixed-advance approximation for hosts without real font metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonospaceMetrics {
    /// Glyph advance as a fraction of the font size.
    pub advance: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str, size: f32) -> f64 {
        text.chars().count() as f64 * f64::from(size) * self.advance
    }
}

/// Camera matrix plus viewport size, projecting like a perspective 3D view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    view_proj: DMat4,
    viewport: DVec2,
}

impl ViewProjection {
    const NEAR: f64 = 0.01;
    const FAR: f64 = 10_000.0;

    pub fn new(view_proj: DMat4, viewport: DVec2) -> Self {
        Self {
            view_proj,
            viewport,
        }
    }

    pub fn look_at(
        eye: Point3,
        target: Point3,
        up: Point3,
        fov_y_radians: f64,
        viewport: DVec2,
    ) -> Self {
        let aspect = if viewport.y > 0.0 {
            viewport.x / viewport.y
        } else {
            1.0
        };
        let projection = DMat4::perspective_rh(fov_y_radians, aspect, Self::NEAR, Self::FAR);
        let view = DMat4::look_at_rh(eye, target, up);
        Self::new(projection * view, viewport)
    }
}

impl Projector for ViewProjection {
    fn project(&self, point: Point3) -> Option<Point2> {
        let clip = self.view_proj * point.extend(1.0);
        if clip.w <= f64::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Point2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (ndc.y + 1.0) * 0.5 * self.viewport.y,
        ))
    }

    fn viewport_size(&self) -> DVec2 {
        self.viewport
    }
}
