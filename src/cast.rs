//! The shadow casting pass.
//!
//! Reads the identity buffer, samples it along the light direction and
//! rewrites colors of the visible buffer:
//!
//! - **Self-shading**: an object pixel whose neighbour `inner_height` steps
//!   towards the light belongs to the same shape but whose neighbour away
//!   from the light does not sits on the shadow side and gets darker; the
//!   mirrored case sits on the lit side and gets lighter.
//! - **Cast shadow**: the pixel `outer_height` steps away from the light is
//!   darkened when it belongs to something of strictly lower elevation
//!   (background is always lowest).
//!
//! Only the visible buffer is written. All arithmetic is integer; offsets
//! are truncated towards zero.

use crate::addressing::{Offset, RowLayout};
use crate::identity::Identity;
use crate::palette::{darker, lighter, PaletteColor};
use crate::registry::{ObjectRegistry, ShadowAttributes};
use crate::trig::{cos_lookup, sin_lookup, TRIG_MAX_RATIO};

/// Default distance scale: with [`DEFAULT_HEIGHT_SCALE`] this gives two
/// pixels of offset per unit of height.
pub const DEFAULT_REACH: i32 = 20_000;

/// Default height divisor.
pub const DEFAULT_HEIGHT_SCALE: i32 = 10_000;

/// Fixed-point scaling of light offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastSettings {
    /// Length of the light vector before dividing by `height_scale`.
    pub reach: i32,
    /// Divisor applied to `reach * height`. Must be non-zero.
    pub height_scale: i32,
}

impl Default for CastSettings {
    fn default() -> Self {
        Self { reach: DEFAULT_REACH, height_scale: DEFAULT_HEIGHT_SCALE }
    }
}

/// Light direction scaled by the reach factor.
///
/// Angle 0 points along +x, a quarter turn along +y (down the screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetUnit {
    x: i64,
    y: i64,
    height_scale: i64,
}

impl OffsetUnit {
    /// Light vector for `angle` on the 0x10000 full-turn scale.
    pub fn from_angle(angle: i32, settings: CastSettings) -> Self {
        let reach = i64::from(settings.reach);
        let ratio = i64::from(TRIG_MAX_RATIO);
        Self {
            x: i64::from(cos_lookup(angle)) * reach / ratio,
            y: i64::from(sin_lookup(angle)) * reach / ratio,
            height_scale: i64::from(settings.height_scale).max(1),
        }
    }

    /// Pixel offset for an object of the given height.
    pub fn scaled(&self, height: i32) -> Offset {
        let h = i64::from(height);
        let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        Offset::new(clamp(self.x * h / self.height_scale), clamp(self.y * h / self.height_scale))
    }
}

/// Counters reported by one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastStats {
    /// Object pixels examined.
    pub visited: usize,
    /// Light-facing edge pixels brightened.
    pub lightened: usize,
    /// Shadow-facing edge pixels darkened.
    pub darkened: usize,
    /// Pixels darkened by another object's cast shadow.
    pub shadowed: usize,
    /// Shading decisions skipped because a sample left the display.
    pub out_of_bounds: usize,
}

/// Run the casting pass over one frame.
///
/// `identities` and `visible` share `layout`. Background pixels are skipped
/// without touching the registry.
pub fn cast_shadows(
    identities: &[u8],
    layout: &RowLayout,
    registry: &ObjectRegistry,
    visible: &mut [u8],
    unit: OffsetUnit,
) -> CastStats {
    let mut stats = CastStats::default();

    for row in 0..layout.height() {
        let Some(columns) = layout.columns(row) else { continue };
        for col in columns {
            let Some(here) = layout.index_of(row, col, Offset::ZERO) else { continue };
            let identity = Identity::from_byte(identities[here]);
            let Some(attributes) = registry.lookup(identity) else { continue };
            stats.visited += 1;

            if attributes.inner_height != 0 {
                self_shade(
                    identities, layout, visible, row, col, here, identity, attributes, unit,
                    &mut stats,
                );
            }
            if attributes.outer_height != 0 {
                cast_onto(
                    identities, layout, registry, visible, row, col, identity, attributes, unit,
                    &mut stats,
                );
            }
        }
    }

    stats
}

fn self_shade(
    identities: &[u8],
    layout: &RowLayout,
    visible: &mut [u8],
    row: usize,
    col: usize,
    here: usize,
    identity: Identity,
    attributes: &ShadowAttributes,
    unit: OffsetUnit,
    stats: &mut CastStats,
) {
    let offset = unit.scaled(attributes.inner_height);
    let (Some(plus), Some(minus)) = (
        layout.index_of(row, col, offset),
        layout.index_of(row, col, offset.reversed()),
    ) else {
        stats.out_of_bounds += 1;
        return;
    };

    let id_plus = Identity::from_byte(identities[plus]);
    let id_minus = Identity::from_byte(identities[minus]);
    if id_plus == identity && id_minus == identity {
        return;
    }

    let same_shape = |other: Identity| {
        other == identity
            || attributes.over.is_some_and(|over| other.is_clear() || other == over)
    };
    let color = PaletteColor::from_argb(visible[here]);
    match (same_shape(id_plus), same_shape(id_minus)) {
        (false, true) => {
            visible[here] = darker(color).argb();
            stats.darkened += 1;
        }
        (true, false) => {
            visible[here] = lighter(color).argb();
            stats.lightened += 1;
        }
        // outline corner or thin sliver, leave as drawn
        _ => {}
    }
}

fn cast_onto(
    identities: &[u8],
    layout: &RowLayout,
    registry: &ObjectRegistry,
    visible: &mut [u8],
    row: usize,
    col: usize,
    identity: Identity,
    attributes: &ShadowAttributes,
    unit: OffsetUnit,
    stats: &mut CastStats,
) {
    let Some(target) = layout.index_of(row, col, unit.scaled(attributes.outer_height)) else {
        stats.out_of_bounds += 1;
        return;
    };

    let id_target = Identity::from_byte(identities[target]);
    if id_target == identity {
        return;
    }
    let target_rank = registry.lookup(id_target).map_or(i64::MIN, ShadowAttributes::elevation);
    if attributes.elevation() > target_rank {
        visible[target] = darker(PaletteColor::from_argb(visible[target])).argb();
        stats.shadowed += 1;
    }
}
