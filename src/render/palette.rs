use super::Rgba;

pub const DIRECT_LINE: Rgba = Rgba::new(0.7, 0.7, 0.7, 0.5);
pub const SKELETON_LINEAR: Rgba = Rgba::new(0.6, 0.6, 0.6, 0.8);
pub const SKELETON_X: Rgba = Rgba::new(1.0, 0.1, 0.1, 0.8);
pub const SKELETON_Y: Rgba = Rgba::new(0.0, 1.0, 0.1, 0.8);
pub const SKELETON_Z: Rgba = Rgba::new(0.1, 0.3, 1.0, 0.8);
pub const SKELETON_HELPER: Rgba = Rgba::new(0.3, 0.3, 0.3, 0.6);
pub const DIMENSION: Rgba = Rgba::new(0.203, 0.8, 1.0, 0.8);
pub const WEDGE_FILL: Rgba = Rgba::new(0.103, 0.3, 0.6, 0.4);
pub const ANGLE_LABEL: Rgba = Rgba::new(0.83, 0.8, 0.9, 0.7);
pub const READOUT: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
