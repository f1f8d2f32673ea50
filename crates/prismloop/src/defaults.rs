use anyhow::{Context, Result};
use scenecfg::SceneConfig;

/// Bundled scene used when no scene file is given on the command line.
pub const DEFAULT_SCENE: &str = include_str!("../scenes/default.toml");

pub fn default_scene() -> Result<SceneConfig> {
    SceneConfig::from_toml_str(DEFAULT_SCENE).context("bundled default scene failed to parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_scene_parses() {
        let scene = default_scene().unwrap();
        let marquee = scene.marquee.expect("bundled scene carries a marquee");
        assert!(!marquee.items.is_empty());
        assert!(marquee.pause_on_hover);
    }
}
