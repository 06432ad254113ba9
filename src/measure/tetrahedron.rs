use super::Point3;
use super::metrics::{Axis, axis_delta, linear_distance};
use serde::{Deserialize, Serialize};

/// Axis-aligned decomposition of the displacement between two points.
///
/// `apex -> base1` is the z leg, `base1 -> base2` the y leg and
/// `base2 -> base3` the x leg; `apex -> base3` is the direct line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TetrahedronSkeleton {
    pub apex: Point3,
    pub base1: Point3,
    pub base2: Point3,
    pub base3: Point3,
}

/// Builds the skeleton for two points. The point with the greater z becomes
/// the apex; on equal z the first argument does.
pub fn decompose(p1: Point3, p2: Point3) -> TetrahedronSkeleton {
    let (apex, base3) = if p2.z > p1.z { (p2, p1) } else { (p1, p2) };
    TetrahedronSkeleton {
        apex,
        base1: Point3::new(apex.x, apex.y, base3.z),
        base2: Point3::new(apex.x, base3.y, base3.z),
        base3,
    }
}

impl TetrahedronSkeleton {
    /// Leg endpoints for one axis.
    pub fn leg(&self, axis: Axis) -> [Point3; 2] {
        match axis {
            Axis::X => [self.base3, self.base2],
            Axis::Y => [self.base2, self.base1],
            Axis::Z => [self.apex, self.base1],
        }
    }

    pub fn leg_length(&self, axis: Axis) -> f64 {
        let [from, to] = self.leg(axis);
        axis_delta(axis, from, to)
    }

    pub fn linear_length(&self) -> f64 {
        linear_distance(self.apex, self.base3)
    }
}
