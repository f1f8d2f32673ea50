use scenecfg::{AnimationMode, PrismSettings};

/// Smallest accepted geometry/scale value; keeps the reciprocal uniforms and
/// the distance field finite.
const MIN_DIMENSION: f32 = 1e-3;

/// Ambient presentation context supplied by the host at construction.
///
/// The original read these from media queries; the native port treats them as
/// injected values so tests and the CLI can set them explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment {
    /// Platform reports a reduced-motion preference.
    pub reduced_motion: bool,
    /// Small-viewport device; applies the mobile scale multiplier.
    pub mobile: bool,
    /// Dark presentation context; selects the dark opacity.
    pub dark: bool,
}

/// Clamped prism parameters, resolved once from raw settings.
///
/// All numeric inputs are forced into safe ranges here so the render loop and
/// the shader never see a degenerate value. Fields that exist only as derived
/// uniforms (reciprocals, center shift) are computed up front.
#[derive(Debug, Clone, Copy)]
pub struct PrismParams {
    pub mode: AnimationMode,
    pub height: f32,
    pub base_half: f32,
    pub glow: f32,
    pub noise: f32,
    pub saturation: f32,
    pub scale: f32,
    pub hue_shift: f32,
    pub color_frequency: f32,
    pub bloom: f32,
    /// Zero when the platform prefers reduced motion, regardless of settings.
    pub time_scale: f32,
    pub hover_strength: f32,
    pub inertia: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub transparent: bool,
    pub suspend_when_offscreen: bool,
    pub dpr_cap: f32,
    /// Surface opacity for the active light/dark context.
    pub opacity: f32,
    pub reduced_motion: bool,
    // Derived uniform values.
    pub center_shift: f32,
    pub inv_base_half: f32,
    pub inv_height: f32,
    pub min_axis: f32,
}

impl PrismParams {
    /// Clamps raw settings into renderable parameters.
    pub fn resolve(settings: &PrismSettings, env: &Environment) -> Self {
        let height = settings.height.max(MIN_DIMENSION);
        let base_half = (settings.base_width.max(MIN_DIMENSION)) * 0.5;
        let mobile_factor = if env.mobile {
            settings.mobile_scale.max(MIN_DIMENSION)
        } else {
            1.0
        };
        let scale = (settings.scale * mobile_factor).max(MIN_DIMENSION);
        let time_scale = if env.reduced_motion {
            0.0
        } else {
            settings.time_scale.max(0.0)
        };
        // Hover tilt under reduced motion degrades to the static rotate path.
        let mode = if env.reduced_motion && settings.mode == AnimationMode::Hover {
            AnimationMode::Rotate
        } else {
            settings.mode
        };

        Self {
            mode,
            height,
            base_half,
            glow: settings.glow.max(0.0),
            noise: settings.noise.max(0.0),
            saturation: if settings.transparent { 1.5 } else { 1.0 },
            scale,
            hue_shift: settings.hue_shift,
            color_frequency: settings.color_frequency.max(0.0),
            bloom: settings.bloom.max(0.0),
            time_scale,
            hover_strength: settings.hover_strength.max(0.0),
            inertia: settings.inertia.clamp(0.0, 1.0),
            offset_x: settings.offset.x,
            offset_y: settings.offset.y,
            transparent: settings.transparent,
            suspend_when_offscreen: settings.suspend_when_offscreen,
            dpr_cap: settings.dpr_cap.max(MIN_DIMENSION),
            opacity: if env.dark {
                settings.opacity_dark.clamp(0.0, 1.0)
            } else {
                settings.opacity_light.clamp(0.0, 1.0)
            },
            reduced_motion: env.reduced_motion,
            center_shift: height * 0.25,
            inv_base_half: 1.0 / base_half,
            inv_height: 1.0 / height,
            min_axis: base_half.min(height),
        }
    }
}

/// Device pixel ratio actually used for the drawing buffer.
pub fn effective_dpr(cap: f32, device: f32) -> f32 {
    let device = if device > 0.0 { device } else { 1.0 };
    cap.max(MIN_DIMENSION).min(device)
}

/// World-units-per-device-pixel factor fed to the fragment stage.
///
/// A zero-height drawing buffer is treated as one pixel tall so the factor
/// stays finite while layout settles.
pub fn pixel_scale(drawing_buffer_height: u32, scale: f32) -> f32 {
    let height = drawing_buffer_height.max(1) as f32;
    1.0 / (height * 0.1 * scale.max(MIN_DIMENSION))
}
