use glam::Vec3;
use log::debug;
use rand::Rng;

use super::ShotRule;
use crate::constants::{
    world_up, FRONT_AND_BACK_ANGLE, ORBIT_BACK_END, ORBIT_FRONT_END, ORBIT_LEFT_END,
    ORBIT_PERCENT_RANGE, SIDES_ANGLE,
};
use crate::error::Result;
use crate::scene::{NodeId, SceneGraph};

/// Angular band an orbit angle is drawn from.
///
/// Zones are weighted 35/25/15/25 (front/left/back/right) so generated shots
/// favour front and side coverage over shots from behind the subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrbitZone {
    Front,
    Left,
    Back,
    Right,
}

impl OrbitZone {
    pub const ALL: [OrbitZone; 4] = [
        OrbitZone::Front,
        OrbitZone::Left,
        OrbitZone::Back,
        OrbitZone::Right,
    ];

    /// Zone for a percentage draw in [0, 100). Values past the range fall in
    /// the last zone.
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage < ORBIT_FRONT_END {
            OrbitZone::Front
        } else if percentage < ORBIT_LEFT_END {
            OrbitZone::Left
        } else if percentage < ORBIT_BACK_END {
            OrbitZone::Back
        } else {
            OrbitZone::Right
        }
    }

    /// Width in degrees of the uniform draw feeding [`angle_from_sample`](Self::angle_from_sample).
    pub fn sample_span(self) -> i32 {
        match self {
            OrbitZone::Front | OrbitZone::Back => FRONT_AND_BACK_ANGLE,
            OrbitZone::Left | OrbitZone::Right => SIDES_ANGLE,
        }
    }

    /// Orbit angle in degrees for a draw `sample` in `[0, sample_span)`.
    pub fn angle_from_sample(self, sample: i32) -> i32 {
        let half = FRONT_AND_BACK_ANGLE / 2;
        match self {
            OrbitZone::Front => sample - half,
            OrbitZone::Left => -sample - half,
            OrbitZone::Back => {
                // Fold the front band onto the opposite hemisphere
                let angle = sample - half;
                if angle >= 0 {
                    180 - angle
                } else {
                    -(180 + angle)
                }
            }
            OrbitZone::Right => sample + half,
        }
    }
}

/// Draw a zone and an orbit angle in degrees.
pub fn sample_orbit_angle<R: Rng + ?Sized>(rng: &mut R) -> (OrbitZone, i32) {
    let percentage = rng.gen_range(0..ORBIT_PERCENT_RANGE);
    let zone = OrbitZone::from_percentage(percentage);
    let sample = rng.gen_range(0..zone.sample_span());
    (zone, zone.angle_from_sample(sample))
}

/// Swings the camera around the vertical axis through the focus point.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitingRule {
    focus: Vec3,
    zone: Option<OrbitZone>,
    angle: f32,
}

impl OrbitingRule {
    pub fn new<R: Rng + ?Sized>(focus: Vec3, rng: &mut R) -> Self {
        let (zone, degrees) = sample_orbit_angle(rng);
        Self {
            focus,
            zone: Some(zone),
            angle: (degrees as f32).to_radians(),
        }
    }

    /// Rule with a fixed angle and no zone.
    pub fn with_angle_degrees(focus: Vec3, degrees: f32) -> Self {
        Self {
            focus,
            zone: None,
            angle: degrees.to_radians(),
        }
    }

    pub fn focus(&self) -> Vec3 {
        self.focus
    }

    pub fn zone(&self) -> Option<OrbitZone> {
        self.zone
    }

    /// Orbit angle in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn angle_degrees(&self) -> f32 {
        self.angle.to_degrees()
    }
}

impl ShotRule for OrbitingRule {
    fn name(&self) -> &'static str {
        "orbiting"
    }

    fn adjust(&self, scene: &mut SceneGraph, camera: NodeId) -> Result<()> {
        debug!(
            "orbiting {camera:?} by {:.1} deg ({:?}) around {}",
            self.angle_degrees(),
            self.zone,
            self.focus
        );
        scene.rotate_around_point(camera, self.focus, world_up(), self.angle)?;
        Ok(())
    }
}
