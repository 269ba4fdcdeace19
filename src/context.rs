//! Identity buffer ownership and draw-target switching.
//!
//! A [`ShadowContext`] is created by the hosting application and passed to
//! every shading call. It owns the object registry and an identity buffer
//! with exactly the geometry of the display's frame buffer.
//!
//! Per frame:
//!
//! 1. [`ShadowContext::begin_frame`] (or [`ShadowContext::reset_identities`]
//!    when objects are registered once for the whole session)
//! 2. for each shape: [`ShadowContext::register`], draw the shape normally,
//!    then draw its silhouette filled with [`Identity::fill_color`] between
//!    [`ShadowContext::begin_identity_pass`] and
//!    [`ShadowContext::end_identity_pass`]
//! 3. [`ShadowContext::cast_shadows`]
//!
//! # Example
//!
//! ```
//! use pixelshade::canvas::Canvas;
//! use pixelshade::context::ShadowContext;
//! use pixelshade::palette::PaletteColor;
//!
//! let mut canvas = Canvas::rect(32, 32);
//! let mut shadows = ShadowContext::new();
//!
//! shadows.begin_frame().unwrap();
//! canvas.fill(PaletteColor::DARK_GRAY);
//! let disc = shadows.register(2, 3, None);
//! canvas.fill_circle((16, 16), 8, PaletteColor::CHROME_YELLOW);
//! shadows
//!     .with_identity_pass(&mut canvas, |c| c.fill_circle((16, 16), 8, disc.fill_color()))
//!     .unwrap();
//! let stats = shadows.cast_shadows(&mut canvas, 0).unwrap();
//! assert!(stats.shadowed > 0);
//! ```

use crate::addressing::{Offset, RowLayout};
use crate::cast::{self, CastSettings, CastStats, OffsetUnit};
use crate::identity::{Identity, CLEAR_BYTE};
use crate::registry::{ObjectRegistry, ShadowAttributes};
use crate::surface::{FrameInfo, Surface};
use thiserror::Error;

/// Misuse of the identity pass protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShadowError {
    /// `begin_identity_pass` called while a pass is already open
    #[error("identity pass already active; passes must not nest")]
    PassAlreadyActive,
    /// `end_identity_pass` called without a matching begin
    #[error("no identity pass is active")]
    NoActivePass,
    /// An operation that needs the visible buffer ran inside a pass
    #[error("cannot {operation} while an identity pass is active")]
    PassActive { operation: &'static str },
    /// The surface no longer matches the identity buffer
    #[error("surface is {actual}, identity buffer was created for {expected}")]
    FrameMismatch { expected: FrameInfo, actual: FrameInfo },
    /// The surface's draw target is shorter than its geometry requires
    #[error("draw target holds {actual} bytes, frame needs {needed}")]
    TargetTooSmall { needed: usize, actual: usize },
}

/// Off-screen buffer holding one identity byte per pixel.
#[derive(Debug, Clone)]
struct IdentityBuffer {
    info: FrameInfo,
    layout: RowLayout,
    data: Vec<u8>,
}

impl IdentityBuffer {
    fn for_surface<S: Surface + ?Sized>(surface: &S) -> Self {
        let info = surface.frame_info();
        let layout = surface.row_layout();
        let data = vec![CLEAR_BYTE; layout.storage_len()];
        tracing::debug!(frame = %info, bytes = data.len(), "allocated identity buffer");
        Self { info, layout, data }
    }

    fn clear(&mut self) {
        self.data.fill(CLEAR_BYTE);
    }
}

/// Draw target state between begin and end of a silhouette pass.
#[derive(Debug)]
struct ActivePass {
    visible: Vec<u8>,
    antialiased: bool,
}

/// Shading state for one display session.
#[derive(Debug, Default)]
pub struct ShadowContext {
    registry: ObjectRegistry,
    settings: CastSettings,
    buffer: Option<IdentityBuffer>,
    active: Option<ActivePass>,
}

impl ShadowContext {
    /// Context with default cast settings. The identity buffer is allocated
    /// on the first [`begin_identity_pass`](Self::begin_identity_pass).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CastSettings) -> Self {
        Self { settings, ..Self::default() }
    }

    pub fn settings(&self) -> CastSettings {
        self.settings
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Register a shadow-casting object for this frame.
    pub fn register(
        &mut self,
        inner_height: i32,
        outer_height: i32,
        over: Option<Identity>,
    ) -> Identity {
        self.registry.register(inner_height, outer_height, over)
    }

    /// Attributes of a registered identity.
    pub fn attributes_of(&self, identity: Identity) -> Option<&ShadowAttributes> {
        self.registry.lookup(identity)
    }

    /// Whether a silhouette pass is open.
    pub fn is_pass_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether the identity buffer has been allocated.
    pub fn is_initialized(&self) -> bool {
        self.buffer.is_some()
    }

    /// Redirect `surface` draws into the identity buffer.
    ///
    /// Allocates and clears the buffer on first use. Antialiasing is turned
    /// off until [`end_identity_pass`](Self::end_identity_pass) because
    /// blended edges would produce identities nobody registered.
    pub fn begin_identity_pass<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<(), ShadowError> {
        if self.active.is_some() {
            return Err(ShadowError::PassAlreadyActive);
        }
        let buffer = self.ensure_buffer(surface)?;
        check_target(surface, &buffer.layout)?;
        let identities = std::mem::take(&mut buffer.data);
        let visible = surface.swap_target(identities);
        let antialiased = surface.antialiased();
        surface.set_antialiased(false);
        self.active = Some(ActivePass { visible, antialiased });
        tracing::trace!("identity pass started");
        Ok(())
    }

    /// Put the visible buffer back as draw target and restore antialiasing.
    pub fn end_identity_pass<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<(), ShadowError> {
        let Some(pass) = self.active.take() else {
            return Err(ShadowError::NoActivePass);
        };
        let identities = surface.swap_target(pass.visible);
        surface.set_antialiased(pass.antialiased);
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.data = identities;
        }
        tracing::trace!("identity pass ended");
        Ok(())
    }

    /// Run `draw` with the identity buffer as draw target.
    pub fn with_identity_pass<S, F, R>(
        &mut self,
        surface: &mut S,
        draw: F,
    ) -> Result<R, ShadowError>
    where
        S: Surface + ?Sized,
        F: FnOnce(&mut S) -> R,
    {
        self.begin_identity_pass(surface)?;
        let result = draw(surface);
        self.end_identity_pass(surface)?;
        Ok(result)
    }

    /// Clear every identity back to background.
    ///
    /// Does nothing before the buffer exists.
    pub fn reset_identities(&mut self) -> Result<(), ShadowError> {
        if self.active.is_some() {
            return Err(ShadowError::PassActive { operation: "reset identities" });
        }
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.clear();
        }
        Ok(())
    }

    /// Start a frame whose objects are registered from scratch: rewinds the
    /// registry and clears identities.
    pub fn begin_frame(&mut self) -> Result<(), ShadowError> {
        self.reset_identities()?;
        self.registry.clear();
        Ok(())
    }

    /// Shade the visible buffer of `surface` for light coming at `angle`
    /// (0x10000 = full turn, 0 points along +x).
    pub fn cast_shadows<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        angle: i32,
    ) -> Result<CastStats, ShadowError> {
        if self.active.is_some() {
            return Err(ShadowError::PassActive { operation: "cast shadows" });
        }
        let Some(buffer) = self.buffer.as_ref() else {
            tracing::trace!("cast_shadows before any identity pass, nothing to shade");
            return Ok(CastStats::default());
        };
        let actual = surface.frame_info();
        if actual != buffer.info {
            return Err(ShadowError::FrameMismatch { expected: buffer.info, actual });
        }

        check_target(surface, &buffer.layout)?;

        let unit = OffsetUnit::from_angle(angle, self.settings);
        let visible = surface.target_mut();
        let stats = cast::cast_shadows(&buffer.data, &buffer.layout, &self.registry, visible, unit);
        tracing::debug!(
            angle,
            visited = stats.visited,
            lightened = stats.lightened,
            darkened = stats.darkened,
            shadowed = stats.shadowed,
            out_of_bounds = stats.out_of_bounds,
            "cast shadows"
        );
        Ok(stats)
    }

    /// Identity recorded at `(row, col)`, `None` outside the display or
    /// before the buffer exists.
    pub fn identity_at(&self, row: usize, col: usize) -> Option<Identity> {
        if self.active.is_some() {
            return None;
        }
        let buffer = self.buffer.as_ref()?;
        let index = buffer.layout.index_of(row, col, Offset::ZERO)?;
        Some(Identity::from_byte(buffer.data[index]))
    }

    /// Raw identity bytes, `None` before allocation or during a pass.
    pub fn identity_bytes(&self) -> Option<&[u8]> {
        if self.active.is_some() {
            return None;
        }
        self.buffer.as_ref().map(|b| b.data.as_slice())
    }

    /// Release the identity buffer. The registry is kept.
    pub fn teardown(&mut self) -> Result<(), ShadowError> {
        if self.active.is_some() {
            return Err(ShadowError::PassActive { operation: "tear down" });
        }
        if self.buffer.take().is_some() {
            tracing::debug!("identity buffer released");
        }
        Ok(())
    }

    fn ensure_buffer<S: Surface + ?Sized>(
        &mut self,
        surface: &S,
    ) -> Result<&mut IdentityBuffer, ShadowError> {
        let actual = surface.frame_info();
        let buffer = self.buffer.get_or_insert_with(|| IdentityBuffer::for_surface(surface));
        if buffer.info != actual {
            return Err(ShadowError::FrameMismatch { expected: buffer.info, actual });
        }
        Ok(buffer)
    }
}

/// The draw target must cover every byte `layout` can address.
fn check_target<S: Surface + ?Sized>(
    surface: &S,
    layout: &RowLayout,
) -> Result<(), ShadowError> {
    let (needed, actual) = (layout.storage_len(), surface.target().len());
    if actual < needed {
        return Err(ShadowError::TargetTooSmall { needed, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::palette::PaletteColor;

    #[test]
    fn test_buffer_created_lazily() {
        let mut canvas = Canvas::rect(10, 10);
        let mut shadows = ShadowContext::new();
        assert!(!shadows.is_initialized());
        assert_eq!(shadows.identity_at(0, 0), None);

        shadows.begin_identity_pass(&mut canvas).unwrap();
        shadows.end_identity_pass(&mut canvas).unwrap();

        assert!(shadows.is_initialized());
        assert_eq!(shadows.identity_at(0, 0), Some(Identity::Clear));
    }

    #[test]
    fn test_silhouette_lands_in_identity_buffer_only() {
        let mut canvas = Canvas::rect(10, 10);
        canvas.fill(PaletteColor::DARK_GRAY);
        let mut shadows = ShadowContext::new();
        let id = shadows.register(1, 1, None);

        shadows
            .with_identity_pass(&mut canvas, |c| c.fill_rect(2, 2, 3, 3, id.fill_color()))
            .unwrap();

        assert_eq!(shadows.identity_at(3, 3), Some(id));
        assert_eq!(shadows.identity_at(0, 0), Some(Identity::Clear));
        assert_eq!(canvas.pixel(3, 3), Some(PaletteColor::DARK_GRAY));
    }

    #[test]
    fn test_pass_disables_and_restores_antialiasing() {
        let mut canvas = Canvas::rect(4, 4);
        let mut shadows = ShadowContext::new();
        assert!(canvas.antialiased());

        shadows.begin_identity_pass(&mut canvas).unwrap();
        assert!(!canvas.antialiased());
        shadows.end_identity_pass(&mut canvas).unwrap();
        assert!(canvas.antialiased());

        canvas.set_antialiased(false);
        shadows.with_identity_pass(&mut canvas, |_| ()).unwrap();
        assert!(!canvas.antialiased());
    }

    #[test]
    fn test_nested_begin_is_rejected() {
        let mut canvas = Canvas::rect(4, 4);
        let mut shadows = ShadowContext::new();
        shadows.begin_identity_pass(&mut canvas).unwrap();
        assert_eq!(shadows.begin_identity_pass(&mut canvas), Err(ShadowError::PassAlreadyActive));
        shadows.end_identity_pass(&mut canvas).unwrap();
    }

    #[test]
    fn test_unmatched_end_is_rejected() {
        let mut canvas = Canvas::rect(4, 4);
        let mut shadows = ShadowContext::new();
        assert_eq!(shadows.end_identity_pass(&mut canvas), Err(ShadowError::NoActivePass));
    }

    #[test]
    fn test_operations_inside_pass_are_rejected() {
        let mut canvas = Canvas::rect(4, 4);
        let mut shadows = ShadowContext::new();
        shadows.begin_identity_pass(&mut canvas).unwrap();

        assert!(matches!(shadows.reset_identities(), Err(ShadowError::PassActive { .. })));
        assert!(matches!(
            shadows.cast_shadows(&mut canvas, 0),
            Err(ShadowError::PassActive { .. })
        ));
        assert!(matches!(shadows.teardown(), Err(ShadowError::PassActive { .. })));
        assert!(matches!(shadows.begin_frame(), Err(ShadowError::PassActive { .. })));

        shadows.end_identity_pass(&mut canvas).unwrap();
        assert!(shadows.begin_frame().is_ok());
    }

    #[test]
    fn test_reset_clears_every_pixel() {
        let mut canvas = Canvas::round(15);
        let mut shadows = ShadowContext::new();
        let id = shadows.register(1, 1, None);
        shadows.with_identity_pass(&mut canvas, |c| c.fill(id.fill_color())).unwrap();
        assert!(shadows.identity_bytes().unwrap().iter().all(|&b| b == id.to_byte()));

        shadows.reset_identities().unwrap();

        assert!(shadows.identity_bytes().unwrap().iter().all(|&b| b == CLEAR_BYTE));
    }

    #[test]
    fn test_frame_mismatch_detected() {
        let mut small = Canvas::rect(4, 4);
        let mut large = Canvas::rect(8, 8);
        let mut shadows = ShadowContext::new();
        shadows.with_identity_pass(&mut small, |_| ()).unwrap();

        assert!(matches!(
            shadows.begin_identity_pass(&mut large),
            Err(ShadowError::FrameMismatch { .. })
        ));
        assert!(!shadows.is_pass_active());
        assert!(matches!(
            shadows.cast_shadows(&mut large, 0),
            Err(ShadowError::FrameMismatch { .. })
        ));
    }

    /// Surface whose target can be truncated behind the context's back.
    struct TruncatedSurface {
        inner: Canvas,
        keep: usize,
    }

    impl Surface for TruncatedSurface {
        fn frame_info(&self) -> FrameInfo {
            self.inner.frame_info()
        }

        fn row_windows(&self) -> Option<Vec<crate::addressing::RowWindow>> {
            self.inner.row_windows()
        }

        fn swap_target(&mut self, buffer: Vec<u8>) -> Vec<u8> {
            self.inner.swap_target(buffer)
        }

        fn target(&self) -> &[u8] {
            &self.inner.target()[..self.keep]
        }

        fn target_mut(&mut self) -> &mut [u8] {
            &mut self.inner.target_mut()[..self.keep]
        }

        fn antialiased(&self) -> bool {
            self.inner.antialiased()
        }

        fn set_antialiased(&mut self, enabled: bool) {
            self.inner.set_antialiased(enabled)
        }
    }

    #[test]
    fn test_short_draw_target_is_rejected() {
        let mut surface = TruncatedSurface { inner: Canvas::rect(8, 8), keep: 64 };
        let mut shadows = ShadowContext::new();
        let id = shadows.register(1, 4, None);
        shadows.with_identity_pass(&mut surface, |s| s.inner.fill(id.fill_color())).unwrap();

        surface.keep = 40;
        assert_eq!(
            shadows.cast_shadows(&mut surface, 0),
            Err(ShadowError::TargetTooSmall { needed: 64, actual: 40 })
        );
        assert_eq!(
            shadows.begin_identity_pass(&mut surface),
            Err(ShadowError::TargetTooSmall { needed: 64, actual: 40 })
        );
        assert!(!shadows.is_pass_active());
    }

    #[test]
    fn test_cast_before_any_pass_is_a_no_op() {
        let mut canvas = Canvas::rect(4, 4);
        let mut shadows = ShadowContext::new();
        assert_eq!(shadows.cast_shadows(&mut canvas, 0), Ok(CastStats::default()));
    }

    #[test]
    fn test_teardown_then_reuse() {
        let mut canvas = Canvas::rect(4, 4);
        let mut shadows = ShadowContext::new();
        shadows.with_identity_pass(&mut canvas, |_| ()).unwrap();
        shadows.teardown().unwrap();
        assert!(!shadows.is_initialized());

        // a new session allocates again
        shadows.with_identity_pass(&mut canvas, |_| ()).unwrap();
        assert!(shadows.is_initialized());
    }

    #[test]
    fn test_begin_frame_rewinds_registry() {
        let mut shadows = ShadowContext::new();
        let first = shadows.register(1, 2, None);
        shadows.register(3, 4, None);
        shadows.begin_frame().unwrap();
        assert_eq!(shadows.register(5, 6, None), first);
        assert_eq!(shadows.attributes_of(first), Some(&ShadowAttributes::new(5, 6)));
    }
}
