use crate::editor::{EditorError, MeasurementSurface, OverlaySubscription, ViewportKind};
use crate::measure::{MeasurementSnapshot, resolve};
use crate::render::{
    ConfigError, DrawCommand, LayoutSettings, MonospaceMetrics, NullOverlayBackend,
    OverlayBackend, Projector, Renderer, TextMetrics, compute_overlay,
};
use crate::scene::{Scene, SceneDocument, SceneError};
use thiserror::Error;

const DEFAULT_MAX_FRAMES: u32 = 3;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Redraw loop tying the scene selection to the overlay backend.
pub struct Engine {
    scene: Scene,
    layout: LayoutSettings,
    renderer: Renderer,
    surface: MeasurementSurface,
    projector: Box<dyn Projector>,
    metrics: Box<dyn TextMetrics>,
    subscription: Option<OverlaySubscription>,
    max_frames: u32,
}

impl Engine {
    pub fn new(scene: Scene, projector: Box<dyn Projector>) -> Self {
        Self::with_backend(scene, projector, Box::new(NullOverlayBackend))
    }

    pub fn with_backend(
        scene: Scene,
        projector: Box<dyn Projector>,
        backend: Box<dyn OverlayBackend>,
    ) -> Self {
        let renderer = Renderer::new(backend);
        log::info!("[engine] overlay backend: {}", renderer.backend_label());
        Self {
            scene,
            layout: LayoutSettings::default(),
            renderer,
            surface: MeasurementSurface::default(),
            projector,
            metrics: Box::new(MonospaceMetrics::default()),
            subscription: None,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }

    /// Builds the scene, camera and layout described by a document.
    pub fn from_document(
        document: &SceneDocument,
        backend: Box<dyn OverlayBackend>,
    ) -> Result<Self, EngineError> {
        let scene = document.build_scene()?;
        let mut engine = Self::with_backend(scene, Box::new(document.camera.projector()), backend);
        engine.set_layout(document.layout)?;
        Ok(engine)
    }

    pub fn set_layout(&mut self, layout: LayoutSettings) -> Result<(), ConfigError> {
        layout.validate()?;
        self.layout = layout;
        Ok(())
    }

    pub fn layout(&self) -> &LayoutSettings {
        &self.layout
    }

    pub fn configure_max_frames(&mut self, frames: u32) {
        self.max_frames = frames.max(1);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn surface(&self) -> &MeasurementSurface {
        &self.surface
    }

    pub fn latest_snapshot(&self) -> Option<&MeasurementSnapshot> {
        self.surface.latest()
    }

    pub fn frame_index(&self) -> u64 {
        self.renderer.frame_index()
    }

    /// Attaches a subscriber to every following redraw. Replaces (and
    /// cancels) any earlier subscription.
    pub fn begin_overlay<F, C>(
        &mut self,
        viewport: ViewportKind,
        on_frame: F,
        on_cancel: C,
    ) -> Result<OverlaySubscription, EditorError>
    where
        F: FnMut(u64, &[DrawCommand]) + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        let subscription = crate::editor::begin_overlay(viewport, on_frame, on_cancel)?;
        if let Some(previous) = self.subscription.replace(subscription.clone()) {
            previous.cancel();
        }
        Ok(subscription)
    }

    /// Whether redraws currently produce overlay frames. Without a
    /// subscription the engine draws unconditionally.
    pub fn is_drawing(&self) -> bool {
        self.subscription
            .as_ref()
            .map_or(true, |subscription| subscription.ensure_active().is_ok())
    }

    /// Runs one redraw. Returns the drawn frame index, or `None` once the
    /// overlay has been cancelled or the backend refused the frame.
    pub fn step(&mut self) -> Option<u64> {
        if !self.is_drawing() {
            log::debug!("[engine] overlay cancelled; skipping redraw");
            return None;
        }

        let frame = self.renderer.frame_index() + 1;
        let markers = resolve(self.scene.selected_objects());
        let snapshot = markers
            .as_ref()
            .map(|markers| MeasurementSnapshot::capture(markers, self.layout.display_precision));
        self.surface.record(frame, snapshot);

        let commands = match &markers {
            Some(markers) => {
                let config = self.scene.overlay_config(self.layout);
                compute_overlay(markers, &config, &*self.projector, &*self.metrics)
            }
            None => Vec::new(),
        };
        log::debug!("[engine] frame {frame}: {} draw commands", commands.len());

        if let Some(subscription) = &self.subscription {
            subscription.deliver(frame, &commands);
        }

        match self.renderer.render(commands) {
            Ok(()) => Some(self.renderer.frame_index()),
            Err(err) => {
                log::error!("[engine] render error: {err}");
                None
            }
        }
    }

    pub fn run(&mut self) {
        for _ in 0..self.max_frames {
            if self.step().is_none() && !self.is_drawing() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::Point3;
    use crate::render::{Point2, RecordingBackend};
    use crate::scene::SceneObject;
    use glam::DVec2;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TopDown;

    impl Projector for TopDown {
        fn project(&self, point: Point3) -> Option<Point2> {
            Some(point.truncate() * 10.0)
        }

        fn viewport_size(&self) -> DVec2 {
            DVec2::new(800.0, 600.0)
        }
    }

    fn pair_scene() -> Scene {
        let mut scene = Scene::new();
        scene.spawn(SceneObject::empty("A", Point3::ZERO));
        scene.spawn(SceneObject::empty("B", Point3::new(3.0, 4.0, 0.0)));
        scene.select_by_name("A").expect("A");
        scene.select_by_name("B").expect("B");
        scene
    }

    #[test]
    fn run_draws_every_frame_and_records_snapshot() {
        let backend = RecordingBackend::new();
        let mut engine =
            Engine::with_backend(pair_scene(), Box::new(TopDown), Box::new(backend.clone()));
        engine.configure_max_frames(2);
        engine.run();

        assert_eq!(engine.frame_index(), 2);
        assert_eq!(backend.frames().len(), 2);
        assert_eq!(
            engine.latest_snapshot().and_then(|s| s.linear_distance()),
            Some("5.0")
        );
        assert_eq!(engine.surface().change_count(), 1);
    }

    #[test]
    fn unresolved_selection_draws_an_empty_frame() {
        let backend = RecordingBackend::new();
        let mut engine =
            Engine::with_backend(Scene::new(), Box::new(TopDown), Box::new(backend.clone()));
        assert_eq!(engine.step(), Some(1));
        assert!(backend.last_frame().expect("frame").commands.is_empty());
        assert!(engine.latest_snapshot().is_none());
    }

    #[test]
    fn cancelled_subscription_stops_redraws() {
        let delivered = Arc::new(AtomicUsize::new(0));
        let mut engine = Engine::new(pair_scene(), Box::new(TopDown));
        let subscription = {
            let delivered = Arc::clone(&delivered);
            engine
                .begin_overlay(
                    ViewportKind::View3d,
                    move |_, commands| {
                        assert!(!commands.is_empty());
                        delivered.fetch_add(1, Ordering::SeqCst);
                    },
                    || {},
                )
                .expect("3d viewport")
        };

        assert_eq!(engine.step(), Some(1));
        subscription.cancel();
        assert_eq!(engine.step(), None);
        engine.configure_max_frames(5);
        engine.run();

        assert_eq!(delivered.load(Ordering::SeqCst), 1);
        assert_eq!(engine.frame_index(), 1);
    }

    #[test]
    fn invalid_layout_is_rejected() {
        let mut engine = Engine::new(Scene::new(), Box::new(TopDown));
        let layout = LayoutSettings {
            dimension_offset: -1.0,
            ..LayoutSettings::default()
        };
        assert_eq!(
            engine.set_layout(layout),
            Err(ConfigError::InvalidDimensionOffset(-1.0))
        );
        assert_eq!(engine.layout().dimension_offset, 2.0);
    }
}
