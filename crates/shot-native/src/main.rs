use anyhow::{anyhow, bail, Context};
use glam::Vec3;
use log::{info, warn};

use shot_explorer::{
    CameraLens, SceneGraph, ShotGenerator, ShotParams, Transform, MAX_SHOT_COUNT,
};

// Stand-in board: a character at the origin, camera on a rig in front of it
const FOCUS: [f32; 3] = [0.0, 1.6, 0.0];
const RIG_POSITION: [f32; 3] = [0.0, 0.0, 4.0];
const CAMERA_OFFSET: [f32; 3] = [0.0, 1.6, 0.0];

struct Options {
    seed: u64,
    count: usize,
    aspect: f32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            seed: 1,
            count: 8,
            aspect: shot_explorer::DEFAULT_ASPECT,
        }
    }
}

fn parse_options(args: impl Iterator<Item = String>) -> anyhow::Result<Options> {
    let mut opts = Options::default();
    let mut args = args.skip(1);
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| anyhow!("missing value for {flag}"))?;
        match flag.as_str() {
            "--seed" => opts.seed = value.parse().with_context(|| format!("bad seed {value}"))?,
            "--count" => {
                opts.count = value
                    .parse()
                    .with_context(|| format!("bad count {value}"))?
            }
            "--aspect" => {
                opts.aspect = value
                    .parse()
                    .with_context(|| format!("bad aspect {value}"))?
            }
            _ => bail!("unknown option {flag} (expected --seed, --count, --aspect)"),
        }
    }
    if opts.count > MAX_SHOT_COUNT {
        bail!("count must be at most {MAX_SHOT_COUNT}, got {}", opts.count);
    }
    if opts.aspect.is_nan() || opts.aspect <= 0.0 {
        bail!("aspect must be positive, got {}", opts.aspect);
    }
    Ok(opts)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = parse_options(std::env::args())?;
    let focus = Vec3::from(FOCUS);
    let lens = CameraLens::default().with_aspect(opts.aspect);

    let mut scene = SceneGraph::new();
    let rig = scene.add_node(
        "camera-rig",
        scene.root(),
        Transform::new().with_position(Vec3::from(RIG_POSITION)),
    )?;
    let eye = Vec3::from(RIG_POSITION) + Vec3::from(CAMERA_OFFSET);
    let camera = scene.add_node(
        "camera",
        rig,
        Transform::looking_at(eye, focus, Vec3::Y)
            .with_position(Vec3::from(CAMERA_OFFSET)),
    )?;
    scene.update_world_matrices();

    info!(
        "generating {} shots (seed {}, aspect {:.3})",
        opts.count, opts.seed, opts.aspect
    );
    let mut generator = ShotGenerator::new(ShotParams::default(), opts.seed);
    let shots = generator.generate(&mut scene, camera, focus, opts.count)?;

    for shot in &shots {
        let eye = shot.world.transform_point3(Vec3::ZERO);
        let zone = shot
            .orbit_zone
            .map(|z| format!("{z:?}"))
            .unwrap_or_else(|| "-".to_string());
        match lens.frames_point(shot.world, focus) {
            Some(ndc) => println!(
                "#{:<3} {:<6} {:>7.1} deg  eye ({:>6.2}, {:>6.2}, {:>6.2})  focus ndc ({:.3}, {:.3})  {}",
                shot.index,
                zone,
                shot.orbit_degrees,
                eye.x,
                eye.y,
                eye.z,
                ndc.x,
                ndc.y,
                shot.rules.join("+")
            ),
            None => warn!("shot {} lost sight of the focus point", shot.index),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        std::iter::once("shot-native".to_string())
            .chain(list.iter().map(|s| s.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn defaults_without_flags() {
        let opts = parse_options(args(&[])).unwrap();
        assert_eq!(opts.seed, 1);
        assert_eq!(opts.count, 8);
    }

    #[test]
    fn parses_all_flags() {
        let opts = parse_options(args(&["--seed", "42", "--count", "3", "--aspect", "2.39"])).unwrap();
        assert_eq!(opts.seed, 42);
        assert_eq!(opts.count, 3);
        assert!((opts.aspect - 2.39).abs() < 1e-6);
    }

    #[test]
    fn rejects_unknown_and_bad_values() {
        assert!(parse_options(args(&["--zoom", "2"])).is_err());
        assert!(parse_options(args(&["--count", "many"])).is_err());
        assert!(parse_options(args(&["--aspect", "0"])).is_err());
        assert!(parse_options(args(&["--seed"])).is_err());
    }

    #[test]
    fn caps_shot_count() {
        let max = MAX_SHOT_COUNT.to_string();
        assert_eq!(parse_options(args(&["--count", &max])).unwrap().count, MAX_SHOT_COUNT);
        let huge = usize::MAX.to_string();
        assert!(parse_options(args(&["--count", &huge])).is_err());
    }
}
