//! Pure measurement geometry: marker resolution, metrics, the tetrahedron
//! decomposition, dimension-line layout and angle wedges.
//!
//! Nothing in here touches the renderer; everything works in world space on
//! `glam::DVec3` and is recomputed from scratch every redraw.

pub mod dimensions;
pub mod metrics;
pub mod selection;
pub mod tetrahedron;
pub mod wedge;

pub use dimensions::{DimensionKind, DimensionLine, layout_dimensions, linear_offset_angle};
pub use metrics::{
    Angle, Axis, MAX_DISPLAY_PRECISION, MeasurementSnapshot, axis_delta, format_display, linear_distance, round_display,
    triangle_angle,
};
pub use selection::{Marker, MarkerSet, ObjectKind, Selectable, resolve};
pub use tetrahedron::{TetrahedronSkeleton, decompose};
pub use wedge::{AngleTriple, AngleWedge, WedgeSettings, angle_triples, build_wedges, wedge_radius};

/// World-space position of a marker.
pub type Point3 = glam::DVec3;
