use std::path::PathBuf;

use clap::Parser;
use scenecfg::AnimationMode;

#[derive(Parser, Debug)]
#[command(
    name = "prismloop",
    author,
    version,
    about = "Raymarched prism background with an infinite logo marquee",
    arg_required_else_help = false
)]
pub struct Args {
    /// Scene TOML file; the bundled default scene is used when omitted.
    #[arg(value_name = "SCENE")]
    pub scene: Option<PathBuf>,

    /// Override the prism animation mode: `rotate`, `hover`, or `3drotate`.
    #[arg(long, value_name = "MODE", value_parser = parse_mode)]
    pub mode: Option<AnimationMode>,

    /// Override the window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Seed for the per-instance spin rates; random when omitted.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Honor a reduced-motion preference: freeze shader time and replace
    /// hover tilt with the static pose.
    #[arg(long, env = "PRISMLOOP_REDUCED_MOTION")]
    pub reduced_motion: bool,

    /// Keep the render loop scheduled while the window is occluded.
    #[arg(long)]
    pub no_suspend: bool,

    /// Override the prism time scale from the scene file.
    #[arg(long, value_name = "FACTOR")]
    pub time_scale: Option<f32>,

    /// Dark presentation context; selects the scene's dark opacity.
    #[arg(long)]
    pub dark: bool,

    /// Small-viewport presentation; applies the scene's mobile scale.
    #[arg(long)]
    pub mobile: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

pub fn parse_mode(value: &str) -> Result<AnimationMode, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "rotate" => Ok(AnimationMode::Rotate),
        "hover" => Ok(AnimationMode::Hover),
        "3drotate" | "spin" => Ok(AnimationMode::Spin),
        other => Err(format!(
            "unknown animation mode '{other}'; expected rotate, hover, or 3drotate"
        )),
    }
}

pub fn parse_surface_size(value: &str) -> Result<(u32, u32), String> {
    let trimmed = value.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("size '{trimmed}' must look like 1280x720"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| format!("invalid width in '{trimmed}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| format!("invalid height in '{trimmed}'"))?;
    if width == 0 || height == 0 {
        return Err(format!("size '{trimmed}' must be non-zero"));
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_accepts_original_spelling() {
        assert_eq!(parse_mode("3drotate").unwrap(), AnimationMode::Spin);
        assert_eq!(parse_mode("Rotate").unwrap(), AnimationMode::Rotate);
        assert_eq!(parse_mode("hover").unwrap(), AnimationMode::Hover);
        assert!(parse_mode("orbit").is_err());
    }

    #[test]
    fn surface_size_parses_and_rejects_zero() {
        assert_eq!(parse_surface_size("1280x720").unwrap(), (1280, 720));
        assert_eq!(parse_surface_size(" 640X480 ").unwrap(), (640, 480));
        assert!(parse_surface_size("1280").is_err());
        assert!(parse_surface_size("0x720").is_err());
    }

    #[test]
    fn flags_round_trip_through_clap() {
        let args = Args::try_parse_from([
            "prismloop",
            "scene.toml",
            "--mode",
            "hover",
            "--size",
            "800x600",
            "--seed",
            "7",
            "--reduced-motion",
            "--no-suspend",
            "--dark",
        ])
        .unwrap();
        assert_eq!(args.scene.as_deref().unwrap().to_str(), Some("scene.toml"));
        assert_eq!(args.mode, Some(AnimationMode::Hover));
        assert_eq!(args.size.as_deref(), Some("800x600"));
        assert_eq!(args.seed, Some(7));
        assert!(args.reduced_motion);
        assert!(args.no_suspend);
        assert!(args.dark);
        assert!(!args.mobile);
    }
}
