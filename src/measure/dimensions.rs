//! Engineering-style dimension lines for a marker pair.
//!
//! Every dimension is a pair of extension strokes running from the measured
//! edge's endpoints to an offset copy of that edge, plus the offset reference
//! line itself. The offset side is picked from coordinate comparisons alone so
//! the lines never sit on top of the skeleton they annotate.

use super::Point3;
use super::metrics::vector_angle;
use super::tetrahedron::TetrahedronSkeleton;
use glam::DMat3;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::f64::consts::{FRAC_PI_2, PI};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    X,
    Y,
    Z,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionLine {
    pub kind: DimensionKind,
    /// Endpoints of the measured edge.
    pub source: [Point3; 2],
    /// The same endpoints displaced to the dimension side.
    pub offset: [Point3; 2],
}

impl DimensionLine {
    fn shifted(kind: DimensionKind, source: [Point3; 2], shift: Point3) -> Self {
        Self {
            kind,
            source,
            offset: [source[0] + shift, source[1] + shift],
        }
    }

    pub fn extension_strokes(&self) -> [[Point3; 2]; 2] {
        [
            [self.source[0], self.offset[0]],
            [self.source[1], self.offset[1]],
        ]
    }

    pub fn reference_line(&self) -> [Point3; 2] {
        self.offset
    }

    pub fn shift(&self) -> Point3 {
        self.offset[0] - self.source[0]
    }
}

/// Sign of the y offset used by the x dimension; the z dimension uses the
/// opposite side.
fn y_direction(skeleton: &TetrahedronSkeleton) -> f64 {
    if skeleton.base3.y > skeleton.apex.y {
        1.0
    } else {
        -1.0
    }
}

fn x_direction(skeleton: &TetrahedronSkeleton) -> f64 {
    if skeleton.base3.x > skeleton.apex.x {
        -1.0
    } else {
        1.0
    }
}

/// Ground-plane rotation (about world Z) of the linear dimension's offset.
///
/// Returns `None` only when a coordinate is NaN and the quadrant cannot be
/// decided.
pub fn linear_offset_angle(skeleton: &TetrahedronSkeleton) -> Option<f64> {
    let TetrahedronSkeleton {
        apex,
        base1,
        base2,
        base3,
    } = *skeleton;

    let along_x = apex.x.partial_cmp(&base3.x)?;
    let along_y = apex.y.partial_cmp(&base3.y)?;

    match (along_x, along_y) {
        (Ordering::Greater, Ordering::Greater) => vector_angle(base1 - base3, base2 - base3),
        (Ordering::Greater, Ordering::Less) => {
            vector_angle(base2 - base1, base3 - base1).map(|angle| angle + 1.5 * PI)
        }
        (Ordering::Less, Ordering::Greater) => {
            vector_angle(base2 - base1, base3 - base1).map(|angle| angle - FRAC_PI_2)
        }
        (Ordering::Less, Ordering::Less) => {
            vector_angle(base2 - base1, base3 - base1).map(|angle| FRAC_PI_2 - angle)
        }
        (_, Ordering::Equal) => Some(PI),
        (Ordering::Equal, _) => Some(FRAC_PI_2),
    }
}

/// Lays out the x, y, z and linear dimensions, in that order. Axis dimensions
/// without extent are skipped.
pub fn layout_dimensions(skeleton: &TetrahedronSkeleton, offset: f64) -> Vec<DimensionLine> {
    let TetrahedronSkeleton {
        apex,
        base1,
        base2,
        base3,
    } = *skeleton;
    let y_dir = y_direction(skeleton);
    let x_dir = x_direction(skeleton);
    let mut lines = Vec::with_capacity(4);

    if base3.y != apex.y {
        lines.push(DimensionLine::shifted(
            DimensionKind::X,
            [base3, base2],
            Point3::new(0.0, y_dir * offset, 0.0),
        ));
    }

    if base3.x != apex.x {
        lines.push(DimensionLine::shifted(
            DimensionKind::Y,
            [base2, base1],
            Point3::new(x_dir * offset, 0.0, 0.0),
        ));
    }

    if apex.z != base3.z {
        lines.push(DimensionLine::shifted(
            DimensionKind::Z,
            [apex, base1],
            Point3::new(0.0, -y_dir * offset, 0.0),
        ));
    }

    match linear_offset_angle(skeleton) {
        Some(angle) => {
            let marker = DMat3::from_rotation_z(angle) * Point3::new(0.0, -y_dir * offset, 0.0);
            lines.push(DimensionLine::shifted(
                DimensionKind::Linear,
                [base3, apex],
                marker,
            ));
        }
        None => {
            log::warn!("[dimensions] linear offset quadrant undecidable; skipping linear dimension");
        }
    }

    lines
}
