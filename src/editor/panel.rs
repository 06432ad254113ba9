//! Side-panel description. The host lays the rows out with its own widgets;
//! this module only decides what the rows are.

use crate::measure::{MarkerSet, MeasurementSnapshot, Selectable, resolve};
use crate::scene::DisplayFlags;
use serde::Serialize;

pub const PANEL_TITLE: &str = "Calliper";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelToggle {
    Axis,
    Dimensions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PanelAction {
    DrawToViewport,
    CancelDrawing,
    CopyDistance { distance: String },
    DrawAngles,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum PanelRow {
    Label {
        text: String,
    },
    Toggles {
        toggles: Vec<(PanelToggle, bool)>,
    },
    Actions {
        actions: Vec<PanelAction>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelModel {
    pub title: &'static str,
    pub rows: Vec<PanelRow>,
}

impl PanelModel {
    /// Whether the panel should be shown for this selection at all.
    pub fn poll<'a, S, I>(selection: I) -> bool
    where
        S: Selectable + ?Sized + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        resolve(selection).is_some()
    }

    pub fn from_selection<'a, S, I>(selection: I, display: DisplayFlags, places: u32) -> Option<Self>
    where
        S: Selectable + ?Sized + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        resolve(selection).map(|markers| Self::from_markers(&markers, display, places))
    }

    pub fn from_markers(markers: &MarkerSet, display: DisplayFlags, places: u32) -> Self {
        let rows = match markers {
            MarkerSet::Pair([from, to]) => {
                let distance = MeasurementSnapshot::capture(markers, places)
                    .linear_distance()
                    .unwrap_or_default()
                    .to_string();
                vec![
                    PanelRow::Label {
                        text: format!("{}  -->  {}", from.name, to.name),
                    },
                    PanelRow::Toggles {
                        toggles: vec![
                            (PanelToggle::Axis, display.axis),
                            (PanelToggle::Dimensions, display.dimensions),
                        ],
                    },
                    PanelRow::Actions {
                        actions: vec![PanelAction::DrawToViewport, PanelAction::CancelDrawing],
                    },
                    PanelRow::Label {
                        text: distance.clone(),
                    },
                    PanelRow::Actions {
                        actions: vec![PanelAction::CopyDistance { distance }],
                    },
                ]
            }
            MarkerSet::Triangle(corners) => {
                let mut rows: Vec<PanelRow> = corners
                    .iter()
                    .enumerate()
                    .map(|(index, corner)| PanelRow::Label {
                        text: format!("{} ) {}", index + 1, corner.name),
                    })
                    .collect();
                rows.push(PanelRow::Actions {
                    actions: vec![PanelAction::DrawAngles],
                });
                rows
            }
        };

        Self {
            title: PANEL_TITLE,
            rows,
        }
    }

    pub fn actions(&self) -> impl Iterator<Item = &PanelAction> {
        self.rows.iter().flat_map(|row| match row {
            PanelRow::Actions { actions } => actions.as_slice(),
            _ => &[][..],
        })
    }
}
