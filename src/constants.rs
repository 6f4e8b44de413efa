use glam::Vec3;

// Tuning constants for shot generation, shared by the library and the native frontend.

// Orbit zones, expressed as a percentage draw in [0, 100)
pub const ORBIT_PERCENT_RANGE: u32 = 100;
pub const ORBIT_FRONT_END: u32 = 35; // [0, 35) front
pub const ORBIT_LEFT_END: u32 = 60; // [35, 60) left
pub const ORBIT_BACK_END: u32 = 75; // [60, 75) back, [75, 100) right

// Orbit spans in degrees
pub const FRONT_AND_BACK_ANGLE: i32 = 110;
pub const SIDES_ANGLE: i32 = 70;

// Additional rules
pub const VERTICAL_ANGLE_MAX_DEG: f32 = 30.0;
pub const VERTICAL_ELEVATION_LIMIT_DEG: f32 = 80.0; // never tilt closer than this to the pole
pub const ROLL_ANGLE_MAX_DEG: f32 = 15.0;
pub const VERTICAL_RULE_PROBABILITY: f32 = 0.5;
pub const ROLL_RULE_PROBABILITY: f32 = 0.2;

// Upper bound on candidates per generate call
pub const MAX_SHOT_COUNT: usize = 10_000;

// Default lens
pub const DEFAULT_FOVY_DEG: f32 = 45.0;
pub const DEFAULT_ASPECT: f32 = 16.0 / 9.0;
pub const DEFAULT_ZNEAR: f32 = 0.1;
pub const DEFAULT_ZFAR: f32 = 1000.0;

// Name of the implicit root node of every scene graph
pub const ROOT_NODE_NAME: &str = "scene";

/// World up axis used by every orbit.
#[inline]
pub fn world_up() -> Vec3 {
    Vec3::Y
}
