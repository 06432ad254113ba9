//! Angle fans for a three-marker selection.

use super::Point3;
use super::metrics::{Angle, linear_distance, triangle_angle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WedgeSettings {
    /// Arc subdivisions per fan.
    pub divisions: usize,
    /// Fan radius is the shortest triangle edge divided by this.
    pub radius_divisor: f64,
}

impl Default for WedgeSettings {
    fn default() -> Self {
        Self {
            divisions: 24,
            radius_divisor: 3.0,
        }
    }
}

/// One triangle corner: the angle sits at `shared`, between the arms towards
/// `prev` and `next`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleTriple {
    pub prev: Point3,
    pub shared: Point3,
    pub next: Point3,
}

impl AngleTriple {
    pub fn angle(&self) -> Option<Angle> {
        triangle_angle(self.prev, self.shared, self.next)
    }
}

/// Corner triples in selection order: at p1, p2, then p3.
pub fn angle_triples([p1, p2, p3]: [Point3; 3]) -> [AngleTriple; 3] {
    [
        AngleTriple {
            prev: p3,
            shared: p1,
            next: p2,
        },
        AngleTriple {
            prev: p1,
            shared: p2,
            next: p3,
        },
        AngleTriple {
            prev: p2,
            shared: p3,
            next: p1,
        },
    ]
}

pub fn wedge_radius([p1, p2, p3]: [Point3; 3], divisor: f64) -> f64 {
    let shortest = linear_distance(p1, p2)
        .min(linear_distance(p2, p3))
        .min(linear_distance(p3, p1));
    shortest / divisor
}

/// Only built by [`build_wedges`], so the fan always holds the shared vertex
/// at both ends around at least one arc point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AngleWedge {
    pub triple: AngleTriple,
    pub angle: Angle,
    pub radius: f64,
    /// Closed fan: the shared vertex, the arc points, the shared vertex again.
    polygon: Vec<Point3>,
}

impl AngleWedge {
    /// Halfway between the corner and the middle of the arc.
    pub fn label_anchor(&self) -> Point3 {
        let first = self.polygon[0];
        let middle = self.polygon[self.polygon.len() / 2];
        first.lerp(middle, 0.5)
    }

    pub fn polygon(&self) -> &[Point3] {
        &self.polygon
    }

    pub fn arc(&self) -> &[Point3] {
        &self.polygon[1..self.polygon.len() - 1]
    }
}

/// Piecewise-linear arc of `radius` around `triple.shared`, closed into a fan.
///
/// Points are interpolated on the chord between the two arms and pushed back
/// out to `radius`. Returns `None` when an arm is empty or the chord passes
/// through the corner (arms pointing in opposite directions).
pub fn fan_polygon(triple: &AngleTriple, radius: f64, divisions: usize) -> Option<Vec<Point3>> {
    if !(radius > 0.0) || !radius.is_finite() || divisions == 0 {
        return None;
    }
    let AngleTriple { prev, shared, next } = *triple;
    let len_prev = linear_distance(prev, shared);
    let len_next = linear_distance(next, shared);
    if len_prev == 0.0 || len_next == 0.0 {
        return None;
    }

    let point1 = shared.lerp(prev, radius / len_prev);
    let point2 = shared.lerp(next, radius / len_next);
    let tolerance = radius * 1e-9;

    let mut polygon = Vec::with_capacity(divisions + 3);
    polygon.push(shared);
    for notch in 0..=divisions {
        let on_chord = point1.lerp(point2, notch as f64 / divisions as f64);
        let reach = linear_distance(on_chord, shared);
        if reach <= tolerance {
            return None;
        }
        polygon.push(shared.lerp(on_chord, radius / reach));
    }
    polygon.push(shared);
    Some(polygon)
}

/// Wedges for every corner that is not degenerate, in corner order.
pub fn build_wedges(points: [Point3; 3], settings: &WedgeSettings) -> Vec<AngleWedge> {
    let radius = wedge_radius(points, settings.radius_divisor);
    angle_triples(points)
        .into_iter()
        .filter_map(|triple| {
            let angle = triple.angle();
            let polygon = fan_polygon(&triple, radius, settings.divisions);
            match (angle, polygon) {
                (Some(angle), Some(polygon)) => Some(AngleWedge {
                    triple,
                    angle,
                    radius,
                    polygon,
                }),
                _ => {
                    log::warn!(
                        "[wedge] degenerate corner at {:?}; skipping wedge",
                        triple.shared
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn right_triangle() -> [Point3; 3] {
        [
            Point3::ZERO,
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ]
    }

    #[test]
    fn radius_is_a_third_of_the_shortest_edge() {
        assert!((wedge_radius(right_triangle(), 3.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn right_triangle_angles() {
        let wedges = build_wedges(right_triangle(), &WedgeSettings::default());
        assert_eq!(wedges.len(), 3);
        assert!((wedges[0].angle.radians - FRAC_PI_2).abs() < EPS);
        let sum: f64 = wedges.iter().map(|wedge| wedge.angle.radians).sum();
        assert!((sum - PI).abs() < EPS);
        assert!((wedges[1].angle.radians + wedges[2].angle.radians - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn fan_is_closed_and_on_the_circle() {
        let wedges = build_wedges(right_triangle(), &WedgeSettings::default());
        for wedge in &wedges {
            assert_eq!(wedge.polygon.len(), 24 + 3);
            assert_eq!(wedge.polygon.first(), Some(&wedge.triple.shared));
            assert_eq!(wedge.polygon.last(), Some(&wedge.triple.shared));
            for point in wedge.arc() {
                let reach = linear_distance(*point, wedge.triple.shared);
                assert!((reach - wedge.radius).abs() < EPS);
            }
        }
    }

    #[test]
    fn label_sits_inside_the_fan() {
        let wedges = build_wedges(right_triangle(), &WedgeSettings::default());
        let anchor = wedges[0].label_anchor();
        // Corner at the origin spans +x to +y; the anchor bisects it at half radius.
        let expected = Point3::new(0.5, 0.5, 0.0).normalize() * 0.5;
        assert!((anchor - expected).length() < EPS);
    }

    #[test]
    fn coincident_points_produce_no_wedges() {
        let points = [Point3::ZERO, Point3::ZERO, Point3::new(1.0, 0.0, 0.0)];
        assert!(build_wedges(points, &WedgeSettings::default()).is_empty());
    }

    #[test]
    fn straight_corner_is_skipped() {
        let points = [
            Point3::new(-1.0, 0.0, 0.0),
            Point3::ZERO,
            Point3::new(2.0, 0.0, 0.0),
        ];
        let wedges = build_wedges(points, &WedgeSettings::default());
        assert!(wedges.iter().all(|wedge| wedge.triple.shared != Point3::ZERO));
    }
}
