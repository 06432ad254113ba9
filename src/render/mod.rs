pub mod config;
pub mod overlay;
pub mod palette;
pub mod projection;

pub use config::{ConfigError, LayoutSettings, OverlayConfig};
pub use overlay::{compute_overlay, compute_selection_overlay};
pub use projection::{MonospaceMetrics, Projector, TextMetrics, ViewProjection};

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Screen-space position in viewport pixels, origin bottom-left.
pub type Point2 = DVec2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Immediate-mode primitive handed to the host rasterizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    LineStrip {
        points: Vec<Point2>,
        color: Rgba,
        width: f32,
        stippled: bool,
    },
    FilledPolygon {
        points: Vec<Point2>,
        color: Rgba,
    },
    Text {
        position: Point2,
        content: String,
        size: f32,
        right_aligned: bool,
        color: Rgba,
    },
}

impl DrawCommand {
    pub fn label(&self) -> &'static str {
        match self {
            DrawCommand::LineStrip { .. } => "line_strip",
            DrawCommand::FilledPolygon { .. } => "filled_polygon",
            DrawCommand::Text { .. } => "text",
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

/// Everything drawn for one redraw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayFrame {
    pub frame_index: u64,
    pub commands: Vec<DrawCommand>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("renderer expected frame {expected} but backend acknowledged {got}")]
    FrameOutOfOrder { expected: u64, got: u64 },
    #[error("overlay backend failure: {0}")]
    Backend(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Host drawing service. Returns the frame index it actually drew.
pub trait OverlayBackend: Send {
    fn label(&self) -> &'static str;
    fn submit(&mut self, frame: &OverlayFrame) -> RenderResult<u64>;
}

pub struct Renderer {
    backend: Box<dyn OverlayBackend>,
    frame_index: u64,
}

impl Renderer {
    pub fn new(backend: Box<dyn OverlayBackend>) -> Self {
        Self {
            backend,
            frame_index: 0,
        }
    }

    pub fn render(&mut self, commands: Vec<DrawCommand>) -> RenderResult<()> {
        let next_index = self.frame_index + 1;
        let frame = OverlayFrame {
            frame_index: next_index,
            commands,
        };

        let acknowledged = self.backend.submit(&frame)?;
        if acknowledged != next_index {
            return Err(RenderError::FrameOutOfOrder {
                expected: next_index,
                got: acknowledged,
            });
        }

        self.frame_index = next_index;
        Ok(())
    }

    pub fn backend_label(&self) -> &'static str {
        self.backend.label()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

#[derive(Default)]
pub struct NullOverlayBackend;

impl OverlayBackend for NullOverlayBackend {
    fn label(&self) -> &'static str {
        "Null Overlay Backend"
    }

    fn submit(&mut self, frame: &OverlayFrame) -> RenderResult<u64> {
        log::debug!(
            "[renderer] frame {} - discarding {} draw commands",
            frame.frame_index,
            frame.commands.len()
        );
        Ok(frame.frame_index)
    }
}

/// Keeps submitted frames so callers can inspect what would have been drawn.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    frames: std::sync::Arc<std::sync::Mutex<Vec<OverlayFrame>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submitted frames, oldest first. Clones share the same history.
    pub fn frames(&self) -> Vec<OverlayFrame> {
        self.frames
            .lock()
            .map(|frames| frames.clone())
            .unwrap_or_default()
    }

    pub fn last_frame(&self) -> Option<OverlayFrame> {
        self.frames
            .lock()
            .ok()
            .and_then(|frames| frames.last().cloned())
    }
}

impl OverlayBackend for RecordingBackend {
    fn label(&self) -> &'static str {
        "Recording Overlay Backend"
    }

    fn submit(&mut self, frame: &OverlayFrame) -> RenderResult<u64> {
        let mut frames = self
            .frames
            .lock()
            .map_err(|_| RenderError::Backend("recording history poisoned".to_string()))?;
        frames.push(frame.clone());
        Ok(frame.frame_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LaggingBackend;

    impl OverlayBackend for LaggingBackend {
        fn label(&self) -> &'static str {
            "lagging"
        }

        fn submit(&mut self, frame: &OverlayFrame) -> RenderResult<u64> {
            Ok(frame.frame_index.saturating_sub(1))
        }
    }

    #[test]
    fn renderer_advances_frames() {
        let backend = RecordingBackend::new();
        let mut renderer = Renderer::new(Box::new(backend.clone()));
        renderer.render(Vec::new()).expect("first frame");
        renderer.render(Vec::new()).expect("second frame");

        assert_eq!(renderer.frame_index(), 2);
        let frames = backend.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].frame_index, 2);
    }

    #[test]
    fn renderer_rejects_out_of_order_acknowledgement() {
        let mut renderer = Renderer::new(Box::new(LaggingBackend));
        let err = renderer.render(Vec::new()).unwrap_err();
        assert_eq!(
            err,
            RenderError::FrameOutOfOrder {
                expected: 1,
                got: 0
            }
        );
        assert_eq!(renderer.frame_index(), 0);
    }

    #[test]
    fn draw_commands_serialize_with_kind_tag() {
        let command = DrawCommand::Text {
            position: Point2::new(1.0, 2.0),
            content: "5.0 lin".to_string(),
            size: 18.0,
            right_aligned: true,
            color: palette::READOUT,
        };
        let json = serde_json::to_string(&command).expect("serialize");
        assert!(json.contains("\"kind\":\"text\""));
        assert_eq!(command.text(), Some("5.0 lin"));
    }
}
