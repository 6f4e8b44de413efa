use glam::{Mat4, Vec3};
use log::{debug, info};
use rand::prelude::*;

use crate::constants::{
    MAX_SHOT_COUNT, ROLL_ANGLE_MAX_DEG, ROLL_RULE_PROBABILITY, VERTICAL_ANGLE_MAX_DEG,
    VERTICAL_RULE_PROBABILITY,
};
use crate::error::{Result, ShotError};
use crate::rules::{OrbitZone, OrbitingRule, RollRule, Rule, ShotRule, VerticalAngleRule};
use crate::scene::{NodeId, SceneGraph, Transform};

#[derive(Clone, Debug)]
pub struct ShotParams {
    pub vertical_max_deg: f32,
    pub roll_max_deg: f32,
    pub vertical_probability: f32,
    pub roll_probability: f32,
}

impl Default for ShotParams {
    fn default() -> Self {
        Self {
            vertical_max_deg: VERTICAL_ANGLE_MAX_DEG,
            roll_max_deg: ROLL_ANGLE_MAX_DEG,
            vertical_probability: VERTICAL_RULE_PROBABILITY,
            roll_probability: ROLL_RULE_PROBABILITY,
        }
    }
}

/// One generated camera framing.
#[derive(Clone, Debug)]
pub struct Shot {
    pub index: usize,
    pub rules: Vec<&'static str>,
    pub orbit_zone: Option<OrbitZone>,
    pub orbit_degrees: f32,
    pub local: Transform,
    pub world: Mat4,
}

pub struct ShotGenerator {
    pub params: ShotParams,
    rng: StdRng,
}

impl ShotGenerator {
    pub fn new(params: ShotParams, seed: u64) -> Self {
        Self {
            params,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, seed: Option<u64>) {
        let new_seed = seed.unwrap_or_else(|| self.rng.gen());
        self.rng = StdRng::seed_from_u64(new_seed);
    }

    /// Rule chain for one shot: always an orbit, optionally a vertical angle
    /// change and a roll.
    pub fn plan(&mut self, focus: Vec3) -> Vec<Rule> {
        let mut rules = vec![Rule::from(OrbitingRule::new(focus, &mut self.rng))];
        if self.rng.gen_bool(probability(self.params.vertical_probability)) {
            let max = self.params.vertical_max_deg;
            rules.push(VerticalAngleRule::new(focus, max, &mut self.rng).into());
        }
        if self.rng.gen_bool(probability(self.params.roll_probability)) {
            rules.push(RollRule::new(self.params.roll_max_deg, &mut self.rng).into());
        }
        rules
    }

    /// Plan a shot and leave the camera at the new framing.
    pub fn apply_new_shot(
        &mut self,
        scene: &mut SceneGraph,
        camera: NodeId,
        focus: Vec3,
    ) -> Result<Vec<Rule>> {
        let rules = self.plan(focus);
        for rule in &rules {
            rule.apply(scene, camera)?;
        }
        Ok(rules)
    }

    /// Generate `count` candidate framings, each starting from the camera's
    /// current transform. The camera is back at that transform afterwards,
    /// also when a rule fails. At most [`MAX_SHOT_COUNT`] shots per call.
    pub fn generate(
        &mut self,
        scene: &mut SceneGraph,
        camera: NodeId,
        focus: Vec3,
        count: usize,
    ) -> Result<Vec<Shot>> {
        if count > MAX_SHOT_COUNT {
            return Err(ShotError::TooManyShots {
                requested: count,
                max: MAX_SHOT_COUNT,
            });
        }
        let original = *scene.local(camera)?;
        let mut shots = Vec::with_capacity(count);
        for index in 0..count {
            let taken = self.take_shot(scene, camera, focus, index);
            scene.set_local(camera, original)?;
            scene.update_world_matrices();
            let shot = taken?;
            debug!("shot {index}: {:?} {:.1} deg", shot.rules, shot.orbit_degrees);
            shots.push(shot);
        }
        info!("generated {} shots around {}", shots.len(), focus);
        Ok(shots)
    }

    fn take_shot(
        &mut self,
        scene: &mut SceneGraph,
        camera: NodeId,
        focus: Vec3,
        index: usize,
    ) -> Result<Shot> {
        let rules = self.apply_new_shot(scene, camera, focus)?;
        let orbit = rules.iter().find_map(|r| match r {
            Rule::Orbiting(o) => Some(o),
            _ => None,
        });
        Ok(Shot {
            index,
            rules: rules.iter().map(|r| r.name()).collect(),
            orbit_zone: orbit.and_then(|o| o.zone()),
            orbit_degrees: orbit.map(|o| o.angle_degrees()).unwrap_or(0.0),
            local: *scene.local(camera)?,
            world: scene.world_matrix(camera)?,
        })
    }
}

fn probability(p: f32) -> f64 {
    (p as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_always_starts_with_orbit() {
        let mut generator = ShotGenerator::new(ShotParams::default(), 3);
        for _ in 0..50 {
            let rules = generator.plan(Vec3::ZERO);
            assert!(matches!(rules[0], Rule::Orbiting(_)));
            assert!(rules.len() <= 3);
        }
    }

    #[test]
    fn disabled_extras_give_single_rule() {
        let params = ShotParams {
            vertical_probability: 0.0,
            roll_probability: 0.0,
            ..ShotParams::default()
        };
        let mut generator = ShotGenerator::new(params, 9);
        for _ in 0..20 {
            assert_eq!(generator.plan(Vec3::ZERO).len(), 1);
        }
    }

    #[test]
    fn same_seed_same_plan() {
        let mut a = ShotGenerator::new(ShotParams::default(), 11);
        let mut b = ShotGenerator::new(ShotParams::default(), 11);
        assert_eq!(a.plan(Vec3::ONE), b.plan(Vec3::ONE));
        a.reseed(Some(5));
        b.reseed(Some(5));
        assert_eq!(a.plan(Vec3::ONE), b.plan(Vec3::ONE));
    }
}
