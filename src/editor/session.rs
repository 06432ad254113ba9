use super::EditorError;
use crate::render::DrawCommand;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Kind of editor area an overlay is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportKind {
    View3d,
    ImageEditor,
    TextEditor,
    Properties,
    Other,
}

type FrameCallback = Box<dyn FnMut(u64, &[DrawCommand]) + Send>;
type CancelCallback = Box<dyn FnOnce() + Send>;

struct SubscriptionState {
    active: AtomicBool,
    frames: AtomicU64,
    on_frame: Mutex<FrameCallback>,
    on_cancel: Mutex<Option<CancelCallback>>,
}

/// Handle to a running overlay. Clones share the same subscription, so the
/// host's input handling can cancel what its redraw loop is drawing.
#[derive(Clone)]
pub struct OverlaySubscription {
    state: Arc<SubscriptionState>,
}

/// Starts an overlay on a 3D viewport.
///
/// `on_frame` sees every frame's draw commands until the subscription is
/// cancelled; `on_cancel` runs exactly once, on the first `cancel()`.
pub fn begin_overlay<F, C>(
    viewport: ViewportKind,
    on_frame: F,
    on_cancel: C,
) -> Result<OverlaySubscription, EditorError>
where
    F: FnMut(u64, &[DrawCommand]) + Send + 'static,
    C: FnOnce() + Send + 'static,
{
    if viewport != ViewportKind::View3d {
        log::warn!("[editor] overlay requested for {viewport:?}; a 3D viewport is required");
        return Err(EditorError::NotAViewport(viewport));
    }

    log::debug!("[editor] overlay subscription started");
    Ok(OverlaySubscription {
        state: Arc::new(SubscriptionState {
            active: AtomicBool::new(true),
            frames: AtomicU64::new(0),
            on_frame: Mutex::new(Box::new(on_frame)),
            on_cancel: Mutex::new(Some(Box::new(on_cancel))),
        }),
    })
}

impl OverlaySubscription {
    pub fn is_active(&self) -> bool {
        self.state.active.load(Ordering::SeqCst)
    }

    pub fn ensure_active(&self) -> Result<(), EditorError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(EditorError::Cancelled)
        }
    }

    /// Hands a drawn frame to the subscriber. Returns `false` once cancelled.
    pub fn deliver(&self, frame_index: u64, commands: &[DrawCommand]) -> bool {
        if !self.is_active() {
            return false;
        }
        match self.state.on_frame.lock() {
            Ok(mut on_frame) => {
                (*on_frame)(frame_index, commands);
                self.state.frames.fetch_add(1, Ordering::SeqCst);
                true
            }
            Err(_) => {
                log::error!("[editor] frame callback poisoned; cancelling overlay");
                self.cancel();
                false
            }
        }
    }

    pub fn frames_delivered(&self) -> u64 {
        self.state.frames.load(Ordering::SeqCst)
    }

    /// Stops the overlay. Later calls are no-ops.
    pub fn cancel(&self) {
        if !self.state.active.swap(false, Ordering::SeqCst) {
            return;
        }
        let callback = self
            .state
            .on_cancel
            .lock()
            .ok()
            .and_then(|mut slot| slot.take());
        if let Some(on_cancel) = callback {
            on_cancel();
        }
        log::debug!(
            "[editor] overlay cancelled after {} frames",
            self.frames_delivered()
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Host input events the overlay cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Press(MouseButton),
    Release(MouseButton),
    Click(MouseButton),
    WheelUp,
    WheelDown,
    Key(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Let the host handle the event; `redraw` asks for a viewport refresh.
    PassThrough { redraw: bool },
    Cancel,
}

/// Default mapping from input events to overlay behaviour: view navigation
/// passes through and refreshes, releasing the cancel button ends the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalPolicy {
    pub cancel_button: MouseButton,
}

impl Default for ModalPolicy {
    fn default() -> Self {
        Self {
            cancel_button: MouseButton::Right,
        }
    }
}

impl ModalPolicy {
    pub fn classify(&self, event: InputEvent) -> EventDisposition {
        match event {
            InputEvent::Release(button) if button == self.cancel_button => EventDisposition::Cancel,
            InputEvent::Press(MouseButton::Middle)
            | InputEvent::Release(MouseButton::Middle)
            | InputEvent::WheelUp
            | InputEvent::WheelDown
            | InputEvent::Click(MouseButton::Left) => EventDisposition::PassThrough { redraw: true },
            _ => EventDisposition::PassThrough { redraw: false },
        }
    }

    /// Classifies `event` and cancels `subscription` when it asks to.
    pub fn apply(&self, event: InputEvent, subscription: &OverlaySubscription) -> EventDisposition {
        let disposition = self.classify(event);
        if disposition == EventDisposition::Cancel {
            subscription.cancel();
        }
        disposition
    }
}
