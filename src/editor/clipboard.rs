use super::EditorError;
use crate::measure::MeasurementSnapshot;

/// Host text clipboard.
pub trait Clipboard {
    fn set_text(&mut self, text: String);
}

/// In-process clipboard used by tests and the command-line tool.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: String) {
        self.contents = Some(text);
    }
}

/// Puts the rounded linear distance of a marker pair on the clipboard and
/// returns the copied text.
pub fn copy_distance(
    snapshot: &MeasurementSnapshot,
    clipboard: &mut dyn Clipboard,
) -> Result<String, EditorError> {
    let distance = snapshot
        .linear_distance()
        .ok_or(EditorError::NothingToCopy)?
        .to_string();
    clipboard.set_text(distance.clone());
    log::info!("[editor] copied distance {distance}");
    Ok(distance)
}
