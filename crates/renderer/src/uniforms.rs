use bytemuck::{Pod, Zeroable};

use motion::{Mat3, PrismParams, MAT3_IDENTITY};

/// CPU mirror of the prism uniform block.
///
/// The layout matches the `PrismParams` block in
/// [`crate::shaders::PRISM_FRAGMENT_GLSL`] and therefore must observe std140
/// alignment rules; everything is packed into vec4 slots so there is no
/// implicit padding to get wrong.
#[repr(C, align(16))]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct PrismUniforms {
    /// (width, height, offset_px.x, offset_px.y)
    pub resolution: [f32; 4],
    pub rot0: [f32; 4],
    pub rot1: [f32; 4],
    pub rot2: [f32; 4],
    /// (time, time_scale, px_scale, use_base_wobble)
    pub timing: [f32; 4],
    /// (glow, bloom, noise, saturation)
    pub look0: [f32; 4],
    /// (hue_shift, color_frequency, center_shift, min_axis)
    pub look1: [f32; 4],
    /// (inv_base_half, inv_height, opacity, transparent)
    pub look2: [f32; 4],
}

impl PrismUniforms {
    pub fn new(params: &PrismParams, width: u32, height: u32) -> Self {
        let mut uniforms = Self {
            resolution: [width as f32, height as f32, 0.0, 0.0],
            rot0: [0.0; 4],
            rot1: [0.0; 4],
            rot2: [0.0; 4],
            timing: [0.0, params.time_scale, 0.0, 1.0],
            look0: [params.glow, params.bloom, params.noise, params.saturation],
            look1: [
                params.hue_shift,
                params.color_frequency,
                params.center_shift,
                params.min_axis,
            ],
            look2: [
                params.inv_base_half,
                params.inv_height,
                params.opacity,
                if params.transparent { 1.0 } else { 0.0 },
            ],
        };
        uniforms.set_rotation(&MAT3_IDENTITY);
        uniforms
    }

    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution[0] = width;
        self.resolution[1] = height;
    }

    /// Prism center offset, already scaled to device pixels.
    pub fn set_offset_px(&mut self, x: f32, y: f32) {
        self.resolution[2] = x;
        self.resolution[3] = y;
    }

    pub fn set_rotation(&mut self, rotation: &Mat3) {
        self.rot0 = [rotation[0], rotation[1], rotation[2], 0.0];
        self.rot1 = [rotation[3], rotation[4], rotation[5], 0.0];
        self.rot2 = [rotation[6], rotation[7], rotation[8], 0.0];
    }

    pub fn set_time(&mut self, time: f32) {
        self.timing[0] = time;
    }

    pub fn set_px_scale(&mut self, px_scale: f32) {
        self.timing[2] = px_scale;
    }

    pub fn set_use_base_wobble(&mut self, enabled: bool) {
        self.timing[3] = if enabled { 1.0 } else { 0.0 };
    }
}

/// CPU mirror of the marquee strip uniform block; must match the
/// `StripParams` block in the strip shaders.
#[repr(C, align(16))]
#[derive(Clone, Copy, Pod, Zeroable)]
pub(crate) struct StripUniforms {
    /// (viewport_width, viewport_height, translation_px, strip_top_px)
    pub viewport: [f32; 4],
    /// (hovered_quad, hover_scale, fade_enabled, has_fade_color)
    pub hover: [f32; 4],
    /// (fade r, fade g, fade b, item_opacity)
    pub fade_color: [f32; 4],
}

impl StripUniforms {
    pub fn set_translation(&mut self, translation_px: f32) {
        self.viewport[2] = translation_px;
    }

    pub fn set_hovered_quad(&mut self, quad: Option<usize>) {
        self.hover[0] = quad.map(|index| index as f32).unwrap_or(-1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion::{mat3_from_euler, Environment};
    use scenecfg::PrismSettings;
    use std::mem::{align_of, size_of};

    #[test]
    fn prism_uniforms_follow_std140_layout() {
        assert_eq!(align_of::<PrismUniforms>(), 16);
        assert_eq!(size_of::<PrismUniforms>(), 128);

        let params = PrismParams::resolve(&PrismSettings::default(), &Environment::default());
        let uniforms = PrismUniforms::new(&params, 1920, 1080);
        let base = &uniforms as *const _ as usize;
        assert_eq!((&uniforms.rot0 as *const _ as usize) - base, 16);
        assert_eq!((&uniforms.timing as *const _ as usize) - base, 64);
        assert_eq!((&uniforms.look2 as *const _ as usize) - base, 112);
    }

    #[test]
    fn strip_uniforms_follow_std140_layout() {
        assert_eq!(align_of::<StripUniforms>(), 16);
        assert_eq!(size_of::<StripUniforms>(), 48);
    }

    #[test]
    fn rotation_columns_are_packed_with_zero_w() {
        let params = PrismParams::resolve(&PrismSettings::default(), &Environment::default());
        let mut uniforms = PrismUniforms::new(&params, 640, 480);
        let rotation = mat3_from_euler(0.4, -0.2, 0.9);
        uniforms.set_rotation(&rotation);
        assert_eq!(uniforms.rot0[..3], rotation[0..3]);
        assert_eq!(uniforms.rot1[..3], rotation[3..6]);
        assert_eq!(uniforms.rot2[..3], rotation[6..9]);
        assert_eq!(uniforms.rot0[3], 0.0);
    }

    #[test]
    fn hovered_quad_sentinel_is_negative() {
        let mut uniforms = StripUniforms::zeroed();
        uniforms.set_hovered_quad(None);
        assert_eq!(uniforms.hover[0], -1.0);
        uniforms.set_hovered_quad(Some(3));
        assert_eq!(uniforms.hover[0], 3.0);
    }
}
