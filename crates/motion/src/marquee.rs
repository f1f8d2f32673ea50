use scenecfg::{MarqueeItem, MarqueeSettings};

/// The strip renders the item sequence exactly this many times back-to-back;
/// wrapping at one sequence width is what makes the loop seamless.
pub const SEQUENCE_COPIES: usize = 2;

/// Fraction of the strip width over which the edge fade ramps in/out.
const FADE_IN_END: f32 = 0.12;
const FADE_OUT_START: f32 = 0.88;

/// Resolved horizontal layout of one copy of the item sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceLayout {
    /// Left edge of each item relative to the copy origin.
    pub positions: Vec<f32>,
    pub widths: Vec<f32>,
    /// Wrap modulus: item widths plus one gap between consecutive items.
    pub width: f32,
}

impl SequenceLayout {
    /// Copy `index` starts at `index * width`; both copies share positions.
    pub fn copy_origin(&self, index: usize) -> f32 {
        index as f32 * self.width
    }
}

/// Time-driven scroll state for the infinite logo strip.
///
/// The offset advances by wall-clock delta, wraps into `[0, width)`, and is
/// rendered as a negative translation of the track. A zero measured width
/// freezes the offset until layout settles.
pub struct Marquee {
    speed: f32,
    sign: f32,
    gap: f32,
    item_height: f32,
    pause_on_hover: bool,
    scale_on_hover: bool,
    fade_out: bool,
    label: String,
    sequence_width: f32,
    offset: f32,
    paused: bool,
}

impl Marquee {
    pub fn new(settings: &MarqueeSettings) -> Self {
        Self {
            speed: settings.speed.max(0.0),
            sign: settings.direction.sign(),
            gap: settings.gap.max(0.0),
            item_height: settings.item_height.max(1.0),
            pause_on_hover: settings.pause_on_hover,
            scale_on_hover: settings.scale_on_hover,
            fade_out: settings.fade_out,
            label: settings.label.clone(),
            sequence_width: 0.0,
            offset: 0.0,
            paused: false,
        }
    }

    /// Natural rendered width of an item at the configured height. Images
    /// keep their native aspect; glyphs occupy a square cell.
    pub fn natural_width(&self, item: &MarqueeItem, aspect: Option<f32>) -> f32 {
        match item {
            MarqueeItem::Image { .. } => self.item_height * aspect.unwrap_or(1.1).max(0.01),
            MarqueeItem::Glyph { .. } => self.item_height,
        }
    }

    /// Lays out one copy of the sequence and records its width as the wrap
    /// modulus. Call again whenever an item's rendered size changes; the
    /// running offset is re-wrapped rather than reset.
    pub fn measure(&mut self, item_widths: &[f32]) -> SequenceLayout {
        let mut positions = Vec::with_capacity(item_widths.len());
        let mut x = 0.0f32;
        for (index, width) in item_widths.iter().enumerate() {
            positions.push(x);
            x += width;
            if index + 1 < item_widths.len() {
                x += self.gap;
            }
        }
        let layout = SequenceLayout {
            positions,
            widths: item_widths.to_vec(),
            width: x,
        };
        self.set_sequence_width(layout.width);
        layout
    }

    fn set_sequence_width(&mut self, width: f32) {
        self.sequence_width = width.max(0.0);
        if self.sequence_width > 0.0 {
            self.offset = wrap(self.offset, self.sequence_width);
        }
    }

    /// Advances the scroll by `dt` seconds and returns the wrapped offset.
    /// While paused, or before a non-zero width is measured, the offset is
    /// held rather than reset so resuming never jumps.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if !self.paused && self.sequence_width > 0.0 {
            self.offset = wrap(self.offset + self.sign * self.speed * dt, self.sequence_width);
        }
        self.offset
    }

    /// Pointer entered/left the strip. Only pauses when configured to.
    pub fn set_hovered(&mut self, hovered: bool) {
        if self.pause_on_hover {
            self.paused = hovered;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True while the strip advances on its own. A paused, zero-speed, or
    /// unmeasured strip does not need frames.
    pub fn is_moving(&self) -> bool {
        !self.paused && self.speed > 0.0 && self.sequence_width > 0.0
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Horizontal translation applied to the track when rendering.
    pub fn translation(&self) -> f32 {
        -self.offset
    }

    pub fn sequence_width(&self) -> f32 {
        self.sequence_width
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    pub fn scale_on_hover(&self) -> bool {
        self.scale_on_hover
    }

    /// Accessible name of the whole strip.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of back-to-back copies the renderer must draw.
    pub fn copies() -> usize {
        SEQUENCE_COPIES
    }

    /// Copies beyond the first are purely decorative and hidden from
    /// assistive technology.
    pub fn copy_is_decorative(index: usize) -> bool {
        index > 0
    }

    /// Horizontal alpha mask: fully transparent at the extreme edges, fully
    /// opaque inside the middle band. `x` is normalized to the strip width.
    pub fn fade_alpha(&self, x: f32) -> f32 {
        if !self.fade_out {
            return 1.0;
        }
        let x = x.clamp(0.0, 1.0);
        if x < FADE_IN_END {
            x / FADE_IN_END
        } else if x > FADE_OUT_START {
            (1.0 - x) / (1.0 - FADE_OUT_START)
        } else {
            1.0
        }
    }
}

fn wrap(offset: f32, width: f32) -> f32 {
    let mut wrapped = offset % width;
    if wrapped < 0.0 {
        wrapped += width;
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenecfg::Direction;

    fn settings() -> MarqueeSettings {
        MarqueeSettings::default()
    }

    fn marquee_with(mutate: impl FnOnce(&mut MarqueeSettings)) -> Marquee {
        let mut raw = settings();
        mutate(&mut raw);
        Marquee::new(&raw)
    }

    #[test]
    fn measured_width_counts_gaps_between_items() {
        let mut marquee = marquee_with(|s| s.gap = 10.0);
        let layout = marquee.measure(&[40.0, 60.0, 50.0]);
        assert_eq!(layout.width, 170.0);
        assert_eq!(layout.positions, vec![0.0, 50.0, 120.0]);
    }

    #[test]
    fn offset_stays_wrapped_under_irregular_frame_times() {
        let mut marquee = marquee_with(|s| {
            s.speed = 200.0;
            s.gap = 10.0;
        });
        marquee.measure(&[40.0, 60.0, 50.0]);
        let deltas = [0.016, 0.5, 0.001, 2.0, 0.033, 0.25, 5.0];
        for dt in deltas.iter().cycle().take(200) {
            let offset = marquee.advance(*dt);
            assert!(offset >= 0.0 && offset < 170.0, "offset {offset} escaped");
        }
    }

    #[test]
    fn reverse_direction_negates_delta_with_same_magnitude() {
        let mut forward = marquee_with(|s| s.gap = 10.0);
        let mut reverse = marquee_with(|s| {
            s.gap = 10.0;
            s.direction = Direction::Reverse;
        });
        forward.measure(&[40.0, 60.0, 50.0]);
        reverse.measure(&[40.0, 60.0, 50.0]);

        let f = forward.advance(0.25);
        let r = reverse.advance(0.25);
        assert!((f - 30.0).abs() < 1e-4);
        assert!((r - 140.0).abs() < 1e-4);
        assert!(((170.0 - r) - f).abs() < 1e-4);
    }

    #[test]
    fn hover_pause_is_idempotent_and_holds_the_offset() {
        let mut marquee = marquee_with(|s| s.gap = 10.0);
        marquee.measure(&[40.0, 60.0, 50.0]);
        marquee.advance(0.5);
        let before = marquee.offset();

        marquee.set_hovered(true);
        marquee.set_hovered(false);
        assert_eq!(marquee.offset(), before);

        marquee.set_hovered(true);
        marquee.advance(3.0);
        assert_eq!(marquee.offset(), before);
        marquee.set_hovered(false);
        let resumed = marquee.advance(0.1);
        let mut fresh = marquee_with(|s| s.gap = 10.0);
        fresh.measure(&[40.0, 60.0, 50.0]);
        fresh.advance(0.5);
        let unpaused = fresh.advance(0.1);
        assert!((resumed - unpaused).abs() < 1e-4);
    }

    #[test]
    fn moving_requires_width_speed_and_no_pause() {
        let mut marquee = marquee_with(|_| {});
        assert!(!marquee.is_moving());
        marquee.measure(&[50.0]);
        assert!(marquee.is_moving());
        marquee.set_hovered(true);
        assert!(!marquee.is_moving());
        marquee.set_hovered(false);

        let mut still = marquee_with(|s| s.speed = 0.0);
        still.measure(&[50.0]);
        assert!(!still.is_moving());
    }

    #[test]
    fn pause_without_hover_flag_keeps_scrolling() {
        let mut marquee = marquee_with(|s| s.pause_on_hover = false);
        marquee.measure(&[100.0]);
        marquee.set_hovered(true);
        assert!(marquee.advance(0.1) > 0.0);
    }

    #[test]
    fn both_copies_share_one_layout() {
        let mut marquee = marquee_with(|s| s.gap = 8.0);
        let layout = marquee.measure(&[30.0, 45.0]);
        assert_eq!(layout.copy_origin(0), 0.0);
        assert_eq!(layout.copy_origin(1), layout.width);
        assert!(!Marquee::copy_is_decorative(0));
        assert!(Marquee::copy_is_decorative(1));
    }

    #[test]
    fn zero_width_freezes_the_offset() {
        let mut marquee = marquee_with(|_| {});
        assert_eq!(marquee.advance(1.0), 0.0);
        marquee.measure(&[]);
        assert_eq!(marquee.advance(1.0), 0.0);
        // Width shows up later; motion starts without a jump.
        marquee.measure(&[50.0]);
        let offset = marquee.advance(0.1);
        assert!(offset > 0.0 && offset < 50.0);
    }

    #[test]
    fn remeasure_rewraps_without_resetting() {
        let mut marquee = marquee_with(|s| s.gap = 0.0);
        marquee.measure(&[100.0, 100.0]);
        marquee.advance(1.0); // offset 120
        assert!((marquee.offset() - 120.0).abs() < 1e-4);
        marquee.measure(&[50.0, 50.0]);
        assert!((marquee.offset() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn full_loop_returns_to_start() {
        let mut marquee = marquee_with(|s| {
            s.speed = 17.0;
            s.gap = 10.0;
        });
        marquee.measure(&[40.0, 60.0, 50.0]);
        assert_eq!(marquee.sequence_width(), 170.0);
        let offset = marquee.advance(10.0);
        assert_eq!(offset, 0.0);

        // The same distance covered by many uneven frames lands on the wrap
        // boundary within float tolerance.
        let mut stepped = marquee_with(|s| {
            s.speed = 17.0;
            s.gap = 10.0;
        });
        stepped.measure(&[40.0, 60.0, 50.0]);
        let mut remaining = 10.0f32;
        while remaining > 0.0 {
            let dt = remaining.min(1.0 / 60.0);
            stepped.advance(dt);
            remaining -= dt;
        }
        let near_zero = stepped.offset().min(170.0 - stepped.offset());
        assert!(near_zero < 1e-2, "offset {} not at wrap", stepped.offset());
    }

    #[test]
    fn fade_band_matches_the_mask() {
        let marquee = marquee_with(|_| {});
        assert_eq!(marquee.fade_alpha(0.0), 0.0);
        assert_eq!(marquee.fade_alpha(0.12), 1.0);
        assert_eq!(marquee.fade_alpha(0.5), 1.0);
        assert_eq!(marquee.fade_alpha(0.88), 1.0);
        assert_eq!(marquee.fade_alpha(1.0), 0.0);
        assert!((marquee.fade_alpha(0.06) - 0.5).abs() < 1e-4);

        let solid = marquee_with(|s| s.fade_out = false);
        assert_eq!(solid.fade_alpha(0.0), 1.0);
    }

    #[test]
    fn glyphs_are_square_and_images_keep_aspect() {
        let marquee = marquee_with(|s| s.item_height = 40.0);
        let glyph = MarqueeItem::Glyph {
            glyph: "λ".into(),
            title: "Lambda".into(),
            href: None,
        };
        let image = MarqueeItem::Image {
            src: "logo.png".into(),
            alt: "Logo".into(),
            title: None,
            href: None,
        };
        assert_eq!(marquee.natural_width(&glyph, None), 40.0);
        assert_eq!(marquee.natural_width(&image, Some(2.0)), 80.0);
    }
}
