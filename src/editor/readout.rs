use crate::measure::MeasurementSnapshot;

/// Latest measurement readout shown to the user.
#[derive(Debug, Default)]
pub struct MeasurementSurface {
    latest: Option<MeasurementSnapshot>,
    last_frame: Option<u64>,
    changes: u64,
}

impl MeasurementSurface {
    /// Stores the frame's snapshot (or its absence) and reports whether the
    /// readout differs from the previous frame.
    pub fn record(&mut self, frame: u64, snapshot: Option<MeasurementSnapshot>) -> bool {
        let changed = self.latest != snapshot;
        if changed {
            self.changes = self.changes.saturating_add(1);
            log::debug!("[editor] frame {frame} readout changed: {snapshot:?}");
        }
        self.last_frame = Some(frame);
        self.latest = snapshot;
        changed
    }

    pub fn latest(&self) -> Option<&MeasurementSnapshot> {
        self.latest.as_ref()
    }

    pub fn last_frame(&self) -> Option<u64> {
        self.last_frame
    }

    pub fn change_count(&self) -> u64 {
        self.changes
    }
}
