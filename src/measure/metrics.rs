use super::Point3;
use super::selection::MarkerSet;
use super::wedge::angle_triples;
use serde::{Deserialize, Serialize};

/// World axis selector for per-axis deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const fn ordered() -> [Axis; 3] {
        [Axis::X, Axis::Y, Axis::Z]
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    pub fn component(self, point: Point3) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
            Axis::Z => point.z,
        }
    }
}

/// Interior angle at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub radians: f64,
    pub degrees: f64,
}

impl Angle {
    pub fn from_radians(radians: f64) -> Self {
        Self {
            radians,
            degrees: radians.to_degrees(),
        }
    }

    /// `"<radians> , <degrees>"`, both rounded to `places` decimals.
    pub fn label(&self, places: u32) -> String {
        format!(
            "{} , {}",
            format_display(self.radians, places),
            format_display(self.degrees, places)
        )
    }
}

pub fn linear_distance(a: Point3, b: Point3) -> f64 {
    (a - b).length()
}

pub fn axis_delta(axis: Axis, a: Point3, b: Point3) -> f64 {
    (axis.component(a) - axis.component(b)).abs()
}

/// Angle at `shared` between the arms towards `prev` and `next`.
///
/// Returns `None` when either arm has zero length or a non-finite coordinate.
pub fn triangle_angle(prev: Point3, shared: Point3, next: Point3) -> Option<Angle> {
    vector_angle(prev - shared, next - shared).map(Angle::from_radians)
}

/// Unsigned angle between two vectors in `[0, pi]`.
pub(crate) fn vector_angle(a: Point3, b: Point3) -> Option<f64> {
    let (a, b) = (unit(a)?, unit(b)?);
    Some(a.dot(b).clamp(-1.0, 1.0).acos())
}

/// Direction of `v`, scaled down first so huge coordinates cannot overflow
/// the length.
fn unit(v: Point3) -> Option<Point3> {
    let scale = v.abs().max_element();
    if !(scale > 0.0) || !scale.is_finite() {
        return None;
    }
    (v / scale).try_normalize()
}

/// Most decimal places an f64 readout can carry meaningfully.
pub const MAX_DISPLAY_PRECISION: u32 = 15;

/// Rounds for display only; callers keep the unrounded value for geometry.
/// `places` is capped at [`MAX_DISPLAY_PRECISION`].
pub fn round_display(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places.min(MAX_DISPLAY_PRECISION) as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

/// Rounded value as text, always with at least one fractional digit.
pub fn format_display(value: f64, places: u32) -> String {
    let rounded = round_display(value, places);
    let text = rounded.to_string();
    if rounded.is_finite() && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleReadout {
    pub vertex: String,
    pub radians: String,
    pub degrees: String,
}

/// Rounded textual metrics for one redraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MeasurementSnapshot {
    Pair {
        from: String,
        to: String,
        linear: String,
        dx: String,
        dy: String,
        dz: String,
    },
    Triangle {
        angles: Vec<AngleReadout>,
    },
}

impl MeasurementSnapshot {
    pub fn capture(markers: &MarkerSet, places: u32) -> Self {
        match markers {
            MarkerSet::Pair([from, to]) => {
                let (a, b) = (from.position, to.position);
                MeasurementSnapshot::Pair {
                    from: from.name.clone(),
                    to: to.name.clone(),
                    linear: format_display(linear_distance(a, b), places),
                    dx: format_display(axis_delta(Axis::X, a, b), places),
                    dy: format_display(axis_delta(Axis::Y, a, b), places),
                    dz: format_display(axis_delta(Axis::Z, a, b), places),
                }
            }
            MarkerSet::Triangle(corners) => {
                let positions = [corners[0].position, corners[1].position, corners[2].position];
                let angles = angle_triples(positions)
                    .iter()
                    .zip(corners.iter())
                    .filter_map(|(triple, corner)| {
                        let angle = triangle_angle(triple.prev, triple.shared, triple.next)?;
                        Some(AngleReadout {
                            vertex: corner.name.clone(),
                            radians: format_display(angle.radians, places),
                            degrees: format_display(angle.degrees, places),
                        })
                    })
                    .collect();
                MeasurementSnapshot::Triangle { angles }
            }
        }
    }

    /// Rounded linear distance, only available for a marker pair.
    pub fn linear_distance(&self) -> Option<&str> {
        match self {
            MeasurementSnapshot::Pair { linear, .. } => Some(linear),
            MeasurementSnapshot::Triangle { .. } => None,
        }
    }

    /// Viewport readout lines, top to bottom.
    pub fn readout_lines(&self) -> Vec<String> {
        match self {
            MeasurementSnapshot::Pair {
                linear, dx, dy, dz, ..
            } => vec![
                format!("{dx} x"),
                format!("{dy} y"),
                format!("{dz} z"),
                format!("{linear} lin"),
            ],
            MeasurementSnapshot::Triangle { angles } => angles
                .iter()
                .map(|angle| format!("{}: {} , {}", angle.vertex, angle.radians, angle.degrees))
                .collect(),
        }
    }
}
