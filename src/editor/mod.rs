pub mod clipboard;
pub mod panel;
pub mod readout;
pub mod session;

pub use clipboard::{Clipboard, MemoryClipboard, copy_distance};
pub use panel::{PanelAction, PanelModel, PanelRow, PanelToggle};
pub use readout::MeasurementSurface;
pub use session::{
    EventDisposition, InputEvent, ModalPolicy, MouseButton, OverlaySubscription, ViewportKind,
    begin_overlay,
};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("overlay needs a 3D viewport, got {0:?}")]
    NotAViewport(ViewportKind),
    #[error("only a marker pair has a distance to copy")]
    NothingToCopy,
    #[error("overlay was cancelled")]
    Cancelled,
}
