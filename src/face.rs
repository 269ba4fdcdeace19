//! Analog watch face with shaded hands.
//!
//! Draws a background, an optional 12 o'clock dot, and hour and minute
//! hands as thick strokes from the screen centre. Every shape is also
//! drawn as a silhouette into the identity buffer so the cast pass can
//! light, darken and shadow them.

use crate::canvas::Canvas;
use crate::cast::CastStats;
use crate::config::FaceConfig;
use crate::context::{ShadowContext, ShadowError};
use crate::identity::Identity;
use crate::palette::PaletteColor;
use crate::surface::{PixelFormat, Surface};
use crate::trig::{cos_lookup, deg_to_angle, sin_lookup, TRIG_MAX_RATIO};

pub const BACKGROUND_COLOR: PaletteColor = PaletteColor::DARK_GRAY;
pub const MINUTE_HAND_COLOR: PaletteColor = PaletteColor::CHROME_YELLOW;
pub const DOT_COLOR: PaletteColor = PaletteColor::CHROME_YELLOW;

/// Stroke width of both hands.
pub const HAND_WIDTH: u8 = 9;
pub const DOT_RADIUS: i32 = 5;
const DOT_INSET: i32 = 2;
const MINUTE_HAND_MARGIN: i32 = 16;
/// Rectangular screens pull the minute hand in a little further.
const RECT_MINUTE_HAND_MARGIN: i32 = 17;
const HOUR_HAND_MARGIN: i32 = 42;

/// Everything that changes between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceScene {
    pub hours: u8,
    pub minutes: u8,
    /// Phone connection; the dot is hidden while disconnected.
    pub bluetooth: bool,
    /// Battery charge 0..=100, drives the hour hand color.
    pub battery_percent: u8,
    /// Intro animation progress 0..=100; hands grow to full length at 100
    /// and the dot only appears once it is done.
    pub intro_percent: u8,
}

impl Default for FaceScene {
    fn default() -> Self {
        Self { hours: 10, minutes: 10, bluetooth: true, battery_percent: 100, intro_percent: 100 }
    }
}

impl FaceScene {
    fn is_animating(&self) -> bool {
        self.intro_percent < 100
    }

    /// Hour hand angle in degrees clockwise from 12.
    pub fn hour_degrees(&self) -> i32 {
        let hours = i32::from(self.hours % 12);
        hours * 30 + self.minute_degrees() / 12
    }

    /// Minute hand angle in degrees clockwise from 12.
    pub fn minute_degrees(&self) -> i32 {
        i32::from(self.minutes % 60) * 6
    }

    /// Green when full, red when empty.
    pub fn hour_color(&self) -> PaletteColor {
        let pct = u32::from(self.battery_percent.min(100));
        let red = (100 - pct) * 255 / 100;
        let green = pct * 255 / 100;
        PaletteColor::from_rgb(red as u8, green as u8, 128)
    }
}

/// Identities assigned while rendering a frame, plus the cast results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedFace {
    pub hour: Identity,
    pub minute: Identity,
    pub dot: Option<Identity>,
    pub stats: CastStats,
}

/// Watch face renderer.
#[derive(Debug, Clone, Default)]
pub struct WatchFace {
    heights: FaceConfig,
}

impl WatchFace {
    pub fn new(heights: FaceConfig) -> Self {
        Self { heights }
    }

    /// Draw one frame and shade it with light travelling at `light_degrees`.
    pub fn render(
        &self,
        canvas: &mut Canvas,
        shadows: &mut ShadowContext,
        scene: &FaceScene,
        light_degrees: i32,
    ) -> Result<RenderedFace, ShadowError> {
        shadows.begin_frame()?;

        let [inner, outer] = self.heights.hour_hand;
        let hour = shadows.register(inner, outer, None);
        let [inner, outer] = self.heights.minute_hand;
        let minute = shadows.register(inner, outer, None);

        canvas.fill(BACKGROUND_COLOR);
        let dot = self.draw_dot(canvas, shadows, scene)?;
        self.draw_hands(canvas, shadows, scene, hour, minute)?;

        let stats = shadows.cast_shadows(canvas, deg_to_angle(light_degrees))?;
        Ok(RenderedFace { hour, minute, dot, stats })
    }

    fn draw_dot(
        &self,
        canvas: &mut Canvas,
        shadows: &mut ShadowContext,
        scene: &FaceScene,
    ) -> Result<Option<Identity>, ShadowError> {
        if !scene.bluetooth || scene.is_animating() {
            return Ok(None);
        }
        let [inner, outer] = self.heights.dot;
        let dot = shadows.register(inner, outer, None);

        let (w, h) = (i32::from(canvas.width()), i32::from(canvas.height()));
        let centre = (w / 2, h / 2);
        let pos = polar(centre, w.min(h) / 2 - DOT_INSET, 0);

        canvas.fill_circle(pos, DOT_RADIUS, DOT_COLOR);
        shadows.with_identity_pass(canvas, |c| c.fill_circle(pos, DOT_RADIUS, dot.fill_color()))?;
        Ok(Some(dot))
    }

    fn draw_hands(
        &self,
        canvas: &mut Canvas,
        shadows: &mut ShadowContext,
        scene: &FaceScene,
        hour: Identity,
        minute: Identity,
    ) -> Result<(), ShadowError> {
        let (w, h) = (i32::from(canvas.width()), i32::from(canvas.height()));
        let centre = (w / 2 - 1, h / 2 - 1);

        let max_radius = h / 2;
        let anim_radius = max_radius - max_radius * i32::from(scene.intro_percent.min(100)) / 100;
        let minute_margin = match canvas.frame_info().format {
            PixelFormat::Indexed8 => RECT_MINUTE_HAND_MARGIN,
            PixelFormat::Indexed8Circular => MINUTE_HAND_MARGIN,
        };
        // Intro runs 0 -> 100, so `anim_radius` shrinks and the hands grow.
        let hand_radius = |margin: i32| max_radius - (anim_radius + margin).clamp(margin, max_radius);
        let minute_radius = hand_radius(minute_margin);
        let hour_radius = hand_radius(HOUR_HAND_MARGIN);

        let minute_tip = polar(centre, minute_radius, scene.minute_degrees());
        let hour_tip = polar(centre, hour_radius, scene.hour_degrees());

        canvas.draw_line(centre, minute_tip, HAND_WIDTH, MINUTE_HAND_COLOR);
        canvas.draw_line(centre, hour_tip, HAND_WIDTH, scene.hour_color());

        shadows.with_identity_pass(canvas, |c| {
            c.draw_line(centre, minute_tip, HAND_WIDTH, minute.fill_color());
            c.draw_line(centre, hour_tip, HAND_WIDTH, hour.fill_color());
        })
    }
}

/// Point `radius` pixels from `centre`, `degrees` clockwise from 12 o'clock.
fn polar(centre: (i32, i32), radius: i32, degrees: i32) -> (i32, i32) {
    let angle = deg_to_angle(degrees);
    (
        centre.0 + radius * sin_lookup(angle) / TRIG_MAX_RATIO,
        centre.1 - radius * cos_lookup(angle) / TRIG_MAX_RATIO,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(canvas: &mut Canvas, scene: FaceScene) -> (ShadowContext, RenderedFace) {
        let mut shadows = ShadowContext::new();
        let face = WatchFace::default();
        let rendered = face.render(canvas, &mut shadows, &scene, 45).unwrap();
        (shadows, rendered)
    }

    #[test]
    fn test_any_light_angle_renders() {
        let face = WatchFace::default();
        let scene = FaceScene::default();
        let mut shadows = ShadowContext::new();

        let mut wrapped = Canvas::rect(144, 168);
        let far = face.render(&mut wrapped, &mut shadows, &scene, 300_000).unwrap();
        let mut plain = Canvas::rect(144, 168);
        let near = face.render(&mut plain, &mut shadows, &scene, 120).unwrap();

        assert_eq!(far.stats, near.stats);
        assert_eq!(wrapped.to_image(), plain.to_image());
        face.render(&mut plain, &mut shadows, &scene, i32::MIN).unwrap();
    }

    #[test]
    fn test_hand_angles() {
        let scene = FaceScene { hours: 15, minutes: 30, ..FaceScene::default() };
        assert_eq!(scene.minute_degrees(), 180);
        assert_eq!(scene.hour_degrees(), 90 + 15);
    }

    #[test]
    fn test_hour_color_follows_battery() {
        let full = FaceScene { battery_percent: 100, ..FaceScene::default() };
        let empty = FaceScene { battery_percent: 0, ..FaceScene::default() };
        assert_eq!(full.hour_color(), PaletteColor::MEDIUM_SPRING_GREEN);
        assert_eq!(empty.hour_color(), PaletteColor::FASHION_MAGENTA);
    }

    #[test]
    fn test_polar_cardinal_points() {
        assert_eq!(polar((50, 50), 10, 0), (50, 40));
        assert_eq!(polar((50, 50), 10, 90), (60, 50));
        assert_eq!(polar((50, 50), 10, 180), (50, 60));
    }

    #[test]
    fn test_hands_are_recorded_in_identity_buffer() {
        let mut canvas = Canvas::rect(144, 168);
        let scene = FaceScene { hours: 3, minutes: 0, ..FaceScene::default() };
        let (shadows, rendered) = render(&mut canvas, scene);

        // Centre (71, 83): hour hand drawn last wins.
        assert_eq!(shadows.identity_at(83, 71), Some(rendered.hour));
        assert_eq!(shadows.identity_at(83, 91), Some(rendered.hour));
        assert_eq!(shadows.identity_at(53, 71), Some(rendered.minute));
        assert_eq!(shadows.identity_at(160, 10), Some(Identity::Clear));
        assert!(rendered.stats.visited > 0);
        assert!(canvas.antialiased());
    }

    #[test]
    fn test_dot_needs_connection_and_finished_intro() {
        let mut canvas = Canvas::rect(144, 168);
        let (shadows, rendered) = render(&mut canvas, FaceScene::default());
        let dot = rendered.dot.expect("dot shown");
        assert_eq!(shadows.identity_at(14, 72), Some(dot));

        let (_, rendered) =
            render(&mut canvas, FaceScene { bluetooth: false, ..FaceScene::default() });
        assert_eq!(rendered.dot, None);

        let (_, rendered) =
            render(&mut canvas, FaceScene { intro_percent: 40, ..FaceScene::default() });
        assert_eq!(rendered.dot, None);
    }

    #[test]
    fn test_intro_start_collapses_hands() {
        let mut canvas = Canvas::rect(144, 168);
        let scene = FaceScene { hours: 3, minutes: 0, intro_percent: 0, ..FaceScene::default() };
        let (shadows, _) = render(&mut canvas, scene);
        assert_eq!(shadows.identity_at(53, 71), Some(Identity::Clear));
    }

    #[test]
    fn test_round_face_renders() {
        let mut canvas = Canvas::round(180);
        let (shadows, rendered) = render(&mut canvas, FaceScene::default());
        assert!(rendered.dot.is_some());
        assert_eq!(shadows.identity_at(89, 89), Some(rendered.hour));
    }
}
