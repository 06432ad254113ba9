use calliper::measure::{
    Axis, Point3, WedgeSettings, axis_delta, build_wedges, decompose, layout_dimensions,
    linear_distance, triangle_angle, wedge_radius,
};
use proptest::prelude::*;
use std::f64::consts::PI;

fn coordinate() -> impl Strategy<Value = f64> {
    -100.0f64..100.0
}

fn point() -> impl Strategy<Value = Point3> {
    (coordinate(), coordinate(), coordinate()).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

fn doubled_area(a: Point3, b: Point3, c: Point3) -> f64 {
    (b - a).cross(c - a).length()
}

proptest! {
    #[test]
    fn distance_is_symmetric_and_zero_only_for_equal_points(a in point(), b in point()) {
        prop_assert_eq!(linear_distance(a, b), linear_distance(b, a));
        prop_assert!(linear_distance(a, b) >= 0.0);
        prop_assert_eq!(linear_distance(a, a), 0.0);
        if (a - b).abs().max_element() > 1e-6 {
            prop_assert!(linear_distance(a, b) > 0.0);
        }
    }

    #[test]
    fn axis_deltas_are_symmetric_and_compose_the_distance(a in point(), b in point()) {
        let mut sum = 0.0;
        for axis in Axis::ordered() {
            let delta = axis_delta(axis, a, b);
            prop_assert_eq!(delta, axis_delta(axis, b, a));
            prop_assert!(delta >= 0.0);
            sum += delta * delta;
        }
        let linear = linear_distance(a, b);
        prop_assert!((sum.sqrt() - linear).abs() <= 1e-9 * linear.max(1.0));
    }

    #[test]
    fn decomposition_walks_one_axis_per_leg(a in point(), b in point()) {
        let skeleton = decompose(a, b);
        prop_assert!(skeleton.apex.z >= skeleton.base3.z);
        prop_assert_eq!(skeleton.base1.z, skeleton.base3.z);
        prop_assert_eq!(skeleton.base2.z, skeleton.base3.z);
        prop_assert_eq!(skeleton.base2.y, skeleton.base3.y);
        prop_assert_eq!(skeleton.base1.truncate(), skeleton.apex.truncate());

        let legs = Axis::ordered().map(|axis| skeleton.leg_length(axis));
        let linear = skeleton.linear_length();
        let recomposed = legs.iter().map(|leg| leg * leg).sum::<f64>().sqrt();
        prop_assert!((recomposed - linear).abs() <= 1e-9 * linear.max(1.0));
    }

    #[test]
    fn dimension_lines_keep_their_source_length(a in point(), b in point(), offset in 0.1f64..10.0) {
        let skeleton = decompose(a, b);
        for line in layout_dimensions(&skeleton, offset) {
            let source = linear_distance(line.source[0], line.source[1]);
            let shifted = linear_distance(line.offset[0], line.offset[1]);
            prop_assert!((source - shifted).abs() <= 1e-9 * source.max(1.0));
            prop_assert!((line.shift().length() - offset).abs() <= 1e-9 * offset.max(1.0));
        }
    }

    #[test]
    fn triangle_angles_sum_to_pi(a in point(), b in point(), c in point()) {
        prop_assume!(doubled_area(a, b, c) > 1.0);
        let sum = [
            triangle_angle(c, a, b),
            triangle_angle(a, b, c),
            triangle_angle(b, c, a),
        ]
        .into_iter()
        .map(|angle| angle.map(|angle| angle.radians))
        .sum::<Option<f64>>();
        let sum = sum.expect("non-degenerate triangle has three angles");
        prop_assert!((sum - PI).abs() < 1e-6);
    }

    #[test]
    fn wedge_arcs_lie_on_the_radius(a in point(), b in point(), c in point()) {
        prop_assume!(doubled_area(a, b, c) > 1.0);
        let settings = WedgeSettings::default();
        let wedges = build_wedges([a, b, c], &settings);
        prop_assert_eq!(wedges.len(), 3);

        let radius = wedge_radius([a, b, c], settings.radius_divisor);
        let shortest = linear_distance(a, b)
            .min(linear_distance(b, c))
            .min(linear_distance(c, a));
        prop_assert!((radius * 3.0 - shortest).abs() <= 1e-9 * shortest.max(1.0));

        for wedge in &wedges {
            let polygon = wedge.polygon();
            prop_assert_eq!(polygon.len(), settings.divisions + 3);
            prop_assert_eq!(polygon.first(), Some(&wedge.triple.shared));
            prop_assert_eq!(polygon.last(), Some(&wedge.triple.shared));
            for arc_point in wedge.arc() {
                let reach = linear_distance(*arc_point, wedge.triple.shared);
                prop_assert!((reach - radius).abs() <= 1e-9 * radius.max(1.0));
            }
        }
    }
}
