use anyhow::{Context, Result};
use motion::Environment;
use renderer::{Viewer, ViewerConfig};
use scenecfg::SceneConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::{parse_surface_size, Args};
use crate::defaults;

const DEFAULT_SURFACE_SIZE: (u32, u32) = (1280, 720);

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let mut scene = load_scene(&args)?;
    apply_overrides(&mut scene, &args);

    let surface_size = match args.size.as_deref() {
        Some(raw) => parse_surface_size(raw).map_err(anyhow::Error::msg)?,
        None => DEFAULT_SURFACE_SIZE,
    };
    let environment = Environment {
        reduced_motion: args.reduced_motion,
        mobile: args.mobile,
        dark: args.dark,
    };
    let seed = args.seed.unwrap_or_else(rand::random);

    tracing::info!(
        mode = %scene.prism.mode,
        seed,
        reduced_motion = environment.reduced_motion,
        dark = environment.dark,
        marquee = scene.marquee.is_some(),
        "starting prismloop"
    );

    Viewer::new(ViewerConfig {
        scene,
        surface_size,
        seed,
        environment,
    })
    .run()
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_scene(args: &Args) -> Result<SceneConfig> {
    match args.scene.as_deref() {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load scene {}", path.display())),
        None => defaults::default_scene(),
    }
}

fn apply_overrides(scene: &mut SceneConfig, args: &Args) {
    if let Some(mode) = args.mode {
        scene.prism.mode = mode;
    }
    if let Some(time_scale) = args.time_scale {
        scene.prism.time_scale = time_scale;
    }
    if args.no_suspend {
        scene.prism.suspend_when_offscreen = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use scenecfg::AnimationMode;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("prismloop").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn overrides_replace_scene_values() {
        let mut scene = defaults::default_scene().unwrap();
        apply_overrides(
            &mut scene,
            &args(&["--mode", "3drotate", "--time-scale", "2", "--no-suspend"]),
        );
        assert_eq!(scene.prism.mode, AnimationMode::Spin);
        assert_eq!(scene.prism.time_scale, 2.0);
        assert!(!scene.prism.suspend_when_offscreen);
    }

    #[test]
    fn no_overrides_leave_scene_untouched() {
        let mut scene = defaults::default_scene().unwrap();
        let before = scene.prism.time_scale;
        apply_overrides(&mut scene, &args(&[]));
        assert_eq!(scene.prism.mode, AnimationMode::Rotate);
        assert_eq!(scene.prism.time_scale, before);
        assert!(scene.prism.suspend_when_offscreen);
    }
}
