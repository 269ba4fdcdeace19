//! Palette byte encoding and the shading lookup table.
//!
//! Display pixels are single bytes laid out as `0bAARRGGBB`: two bits of
//! alpha followed by two bits per color channel. Only the low six bits
//! select one of the 64 base colors, so shading works on those bits and
//! always yields an opaque color.
//!
//! # Examples
//!
//! ```
//! use pixelshade::palette::{darker, lighter, PaletteColor};
//!
//! assert_eq!(darker(PaletteColor::CHROME_YELLOW), PaletteColor::WINDSOR_TAN);
//! assert_eq!(lighter(PaletteColor::CHROME_YELLOW), PaletteColor::YELLOW);
//! ```

use image::Rgba;

/// Number of base colors addressable by the low six bits of a pixel byte.
pub const BASE_COLOR_COUNT: usize = 64;

/// Bits of a pixel byte that select the base color.
pub const BASE_MASK: u8 = 0b0011_1111;

/// Alpha bits of a pixel byte.
pub const ALPHA_MASK: u8 = 0b1100_0000;

/// A palette color stored as a single `0bAARRGGBB` byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PaletteColor(pub u8);

impl PaletteColor {
    /// Fully transparent pixel.
    pub const CLEAR: Self = Self(0x00);

    pub const BLACK: Self = Self(0xC0);
    pub const OXFORD_BLUE: Self = Self(0xC1);
    pub const DUKE_BLUE: Self = Self(0xC2);
    pub const BLUE: Self = Self(0xC3);
    pub const DARK_GREEN: Self = Self(0xC4);
    pub const MIDNIGHT_GREEN: Self = Self(0xC5);
    pub const COBALT_BLUE: Self = Self(0xC6);
    pub const BLUE_MOON: Self = Self(0xC7);
    pub const ISLAMIC_GREEN: Self = Self(0xC8);
    pub const JAEGER_GREEN: Self = Self(0xC9);
    pub const TIFFANY_BLUE: Self = Self(0xCA);
    pub const VIVID_CERULEAN: Self = Self(0xCB);
    pub const GREEN: Self = Self(0xCC);
    pub const MALACHITE: Self = Self(0xCD);
    pub const MEDIUM_SPRING_GREEN: Self = Self(0xCE);
    pub const CYAN: Self = Self(0xCF);
    pub const BULGARIAN_ROSE: Self = Self(0xD0);
    pub const IMPERIAL_PURPLE: Self = Self(0xD1);
    pub const INDIGO: Self = Self(0xD2);
    pub const ELECTRIC_ULTRAMARINE: Self = Self(0xD3);
    pub const ARMY_GREEN: Self = Self(0xD4);
    pub const DARK_GRAY: Self = Self(0xD5);
    pub const LIBERTY: Self = Self(0xD6);
    pub const VERY_LIGHT_BLUE: Self = Self(0xD7);
    pub const KELLY_GREEN: Self = Self(0xD8);
    pub const MAY_GREEN: Self = Self(0xD9);
    pub const CADET_BLUE: Self = Self(0xDA);
    pub const PICTON_BLUE: Self = Self(0xDB);
    pub const BRIGHT_GREEN: Self = Self(0xDC);
    pub const SCREAMIN_GREEN: Self = Self(0xDD);
    pub const MEDIUM_AQUAMARINE: Self = Self(0xDE);
    pub const ELECTRIC_BLUE: Self = Self(0xDF);
    pub const DARK_CANDY_APPLE_RED: Self = Self(0xE0);
    pub const JAZZBERRY_JAM: Self = Self(0xE1);
    pub const PURPLE: Self = Self(0xE2);
    pub const VIVID_VIOLET: Self = Self(0xE3);
    pub const WINDSOR_TAN: Self = Self(0xE4);
    pub const ROSE_VALE: Self = Self(0xE5);
    pub const PURPUREUS: Self = Self(0xE6);
    pub const LAVENDER_INDIGO: Self = Self(0xE7);
    pub const LIMERICK: Self = Self(0xE8);
    pub const BRASS: Self = Self(0xE9);
    pub const LIGHT_GRAY: Self = Self(0xEA);
    pub const BABY_BLUE_EYES: Self = Self(0xEB);
    pub const SPRING_BUD: Self = Self(0xEC);
    pub const INCHWORM: Self = Self(0xED);
    pub const MINT_GREEN: Self = Self(0xEE);
    pub const CELESTE: Self = Self(0xEF);
    pub const RED: Self = Self(0xF0);
    pub const FOLLY: Self = Self(0xF1);
    pub const FASHION_MAGENTA: Self = Self(0xF2);
    pub const MAGENTA: Self = Self(0xF3);
    pub const ORANGE: Self = Self(0xF4);
    pub const SUNSET_ORANGE: Self = Self(0xF5);
    pub const BRILLIANT_ROSE: Self = Self(0xF6);
    pub const SHOCKING_PINK: Self = Self(0xF7);
    pub const CHROME_YELLOW: Self = Self(0xF8);
    pub const RAJAH: Self = Self(0xF9);
    pub const MELON: Self = Self(0xFA);
    pub const RICH_BRILLIANT_LAVENDER: Self = Self(0xFB);
    pub const YELLOW: Self = Self(0xFC);
    pub const ICTERINE: Self = Self(0xFD);
    pub const PASTEL_YELLOW: Self = Self(0xFE);
    pub const WHITE: Self = Self(0xFF);
    /// Wrap a raw `0bAARRGGBB` byte.
    pub const fn from_argb(argb: u8) -> Self {
        Self(argb)
    }

    /// Opaque color for a base index; only the low six bits of `index` are used.
    pub const fn from_base(index: u8) -> Self {
        Self(ALPHA_MASK | (index & BASE_MASK))
    }

    /// Quantize 8-bit channels down to the nearest-below palette color.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(ALPHA_MASK | ((r >> 6) << 4) | ((g >> 6) << 2) | (b >> 6))
    }

    /// Raw byte value.
    pub const fn argb(self) -> u8 {
        self.0
    }

    /// Index into the 64 base colors, ignoring alpha.
    pub const fn base_index(self) -> usize {
        (self.0 & BASE_MASK) as usize
    }

    /// Whether both alpha bits are set.
    pub const fn is_opaque(self) -> bool {
        self.0 & ALPHA_MASK == ALPHA_MASK
    }

    /// Darker perceptual neighbor, see [`darker`].
    pub fn darker(self) -> Self {
        darker(self)
    }

    /// Lighter perceptual neighbor, see [`lighter`].
    pub fn lighter(self) -> Self {
        lighter(self)
    }

    /// Average two colors channel by channel (alpha included).
    ///
    /// Used for antialiased edges. Averaging two unrelated colors yields a
    /// third color that matches neither input.
    pub fn blend(self, other: Self) -> Self {
        let mut out = 0u8;
        for shift in [0u8, 2, 4, 6] {
            let a = (self.0 >> shift) & 0b11;
            let b = (other.0 >> shift) & 0b11;
            out |= ((a + b + 1) / 2) << shift;
        }
        Self(out)
    }

    /// Expand to 8-bit RGBA for image output.
    pub fn to_rgba(self) -> Rgba<u8> {
        let expand = |shift: u8| ((self.0 >> shift) & 0b11) * 85;
        Rgba([expand(4), expand(2), expand(0), expand(6)])
    }
}

type P = PaletteColor;

/// `(darker, lighter)` neighbor for each base color, indexed by [`PaletteColor::base_index`].
pub const SHADE_TABLE: [(PaletteColor, PaletteColor); BASE_COLOR_COUNT] = [
    (P::BLACK, P::DARK_GRAY), // BLACK
    (P::BLACK, P::DUKE_BLUE), // OXFORD_BLUE
    (P::OXFORD_BLUE, P::BLUE), // DUKE_BLUE
    (P::DUKE_BLUE, P::BLUE_MOON), // BLUE
    (P::BLACK, P::MAY_GREEN), // DARK_GREEN
    (P::OXFORD_BLUE, P::CADET_BLUE), // MIDNIGHT_GREEN
    (P::DUKE_BLUE, P::VIVID_CERULEAN), // COBALT_BLUE
    (P::BLUE, P::PICTON_BLUE), // BLUE_MOON
    (P::DARK_GREEN, P::GREEN), // ISLAMIC_GREEN
    (P::DARK_GREEN, P::MALACHITE), // JAEGER_GREEN
    (P::MIDNIGHT_GREEN, P::MEDIUM_SPRING_GREEN), // TIFFANY_BLUE
    (P::COBALT_BLUE, P::CELESTE), // VIVID_CERULEAN
    (P::ISLAMIC_GREEN, P::INCHWORM), // GREEN
    (P::JAEGER_GREEN, P::MINT_GREEN), // MALACHITE
    (P::TIFFANY_BLUE, P::CELESTE), // MEDIUM_SPRING_GREEN
    (P::BLUE, P::CELESTE), // CYAN
    (P::BLACK, P::DARK_CANDY_APPLE_RED), // BULGARIAN_ROSE
    (P::BLACK, P::PURPLE), // IMPERIAL_PURPLE
    (P::OXFORD_BLUE, P::VIVID_VIOLET), // INDIGO
    (P::OXFORD_BLUE, P::BABY_BLUE_EYES), // ELECTRIC_ULTRAMARINE
    (P::BLACK, P::BRASS), // ARMY_GREEN
    (P::BLACK, P::LIGHT_GRAY), // DARK_GRAY
    (P::OXFORD_BLUE, P::BABY_BLUE_EYES), // LIBERTY
    (P::DUKE_BLUE, P::BABY_BLUE_EYES), // VERY_LIGHT_BLUE
    (P::DARK_GREEN, P::SPRING_BUD), // KELLY_GREEN
    (P::MIDNIGHT_GREEN, P::MALACHITE), // MAY_GREEN
    (P::MIDNIGHT_GREEN, P::MEDIUM_SPRING_GREEN), // CADET_BLUE
    (P::COBALT_BLUE, P::CELESTE), // PICTON_BLUE
    (P::KELLY_GREEN, P::MINT_GREEN), // BRIGHT_GREEN
    (P::GREEN, P::MINT_GREEN), // SCREAMIN_GREEN
    (P::JAEGER_GREEN, P::CELESTE), // MEDIUM_AQUAMARINE
    (P::TIFFANY_BLUE, P::CELESTE), // ELECTRIC_BLUE
    (P::BULGARIAN_ROSE, P::SUNSET_ORANGE), // DARK_CANDY_APPLE_RED
    (P::IMPERIAL_PURPLE, P::MAGENTA), // JAZZBERRY_JAM
    (P::IMPERIAL_PURPLE, P::SHOCKING_PINK), // PURPLE
    (P::IMPERIAL_PURPLE, P::BABY_BLUE_EYES), // VIVID_VIOLET
    (P::BLACK, P::RAJAH), // WINDSOR_TAN
    (P::BULGARIAN_ROSE, P::MELON), // ROSE_VALE
    (P::PURPLE, P::RICH_BRILLIANT_LAVENDER), // PURPUREUS
    (P::PURPLE, P::RICH_BRILLIANT_LAVENDER), // LAVENDER_INDIGO
    (P::ARMY_GREEN, P::SPRING_BUD), // LIMERICK
    (P::ARMY_GREEN, P::SPRING_BUD), // BRASS
    (P::DARK_GRAY, P::WHITE), // LIGHT_GRAY
    (P::ELECTRIC_ULTRAMARINE, P::WHITE), // BABY_BLUE_EYES
    (P::KELLY_GREEN, P::WHITE), // SPRING_BUD
    (P::SPRING_BUD, P::WHITE), // INCHWORM
    (P::SCREAMIN_GREEN, P::WHITE), // MINT_GREEN
    (P::ELECTRIC_BLUE, P::WHITE), // CELESTE
    (P::DARK_CANDY_APPLE_RED, P::SUNSET_ORANGE), // RED
    (P::ROSE_VALE, P::BRILLIANT_ROSE), // FOLLY
    (P::JAZZBERRY_JAM, P::BRILLIANT_ROSE), // FASHION_MAGENTA
    (P::JAZZBERRY_JAM, P::RICH_BRILLIANT_LAVENDER), // MAGENTA
    (P::WINDSOR_TAN, P::RAJAH), // ORANGE
    (P::RED, P::MELON), // SUNSET_ORANGE
    (P::FASHION_MAGENTA, P::RICH_BRILLIANT_LAVENDER), // BRILLIANT_ROSE
    (P::JAZZBERRY_JAM, P::RICH_BRILLIANT_LAVENDER), // SHOCKING_PINK
    (P::WINDSOR_TAN, P::YELLOW), // CHROME_YELLOW
    (P::CHROME_YELLOW, P::ICTERINE), // RAJAH
    (P::SUNSET_ORANGE, P::WHITE), // MELON
    (P::MAGENTA, P::WHITE), // RICH_BRILLIANT_LAVENDER
    (P::CHROME_YELLOW, P::YELLOW), // YELLOW
    (P::YELLOW, P::PASTEL_YELLOW), // ICTERINE
    (P::ICTERINE, P::WHITE), // PASTEL_YELLOW
    (P::LIGHT_GRAY, P::WHITE), // WHITE
];

/// Darker neighbor of `color`, always opaque.
#[inline]
pub fn darker(color: PaletteColor) -> PaletteColor {
    SHADE_TABLE[color.base_index()].0
}

/// Lighter neighbor of `color`, always opaque.
#[inline]
pub fn lighter(color: PaletteColor) -> PaletteColor {
    SHADE_TABLE[color.base_index()].1
}

/// Both neighbors as `(darker, lighter)`.
#[inline]
pub fn shade_pair(color: PaletteColor) -> (PaletteColor, PaletteColor) {
    SHADE_TABLE[color.base_index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_base_colors() -> impl Iterator<Item = PaletteColor> {
        (0..BASE_COLOR_COUNT as u8).map(PaletteColor::from_base)
    }

    #[test]
    fn test_table_covers_every_base_color() {
        assert_eq!(SHADE_TABLE.len(), BASE_COLOR_COUNT);
        assert_eq!(
            shade_pair(PaletteColor::WHITE),
            (PaletteColor::LIGHT_GRAY, PaletteColor::WHITE)
        );
    }

    #[test]
    fn test_table_entries_are_opaque_palette_colors() {
        for color in all_base_colors() {
            let (dark, light) = shade_pair(color);
            assert!(dark.is_opaque(), "darker({:?}) = {:?} is not opaque", color, dark);
            assert!(light.is_opaque(), "lighter({:?}) = {:?} is not opaque", color, light);
        }
    }

    #[test]
    fn test_table_is_deterministic() {
        for color in all_base_colors() {
            assert_eq!(darker(color), darker(color));
            assert_eq!(lighter(color), lighter(color));
            assert_eq!(shade_pair(color), (darker(color), lighter(color)));
        }
    }

    #[test]
    fn test_alpha_bits_are_ignored() {
        let transparent_red = PaletteColor::from_argb(PaletteColor::RED.argb() & BASE_MASK);
        assert_eq!(darker(transparent_red), darker(PaletteColor::RED));
        assert_eq!(lighter(transparent_red), lighter(PaletteColor::RED));
    }

    #[test]
    fn test_known_neighbors() {
        assert_eq!(darker(PaletteColor::WHITE), PaletteColor::LIGHT_GRAY);
        assert_eq!(lighter(PaletteColor::WHITE), PaletteColor::WHITE);
        assert_eq!(darker(PaletteColor::BLACK), PaletteColor::BLACK);
        assert_eq!(lighter(PaletteColor::BLACK), PaletteColor::DARK_GRAY);
        assert_eq!(darker(PaletteColor::MELON), PaletteColor::SUNSET_ORANGE);
    }

    #[test]
    fn test_not_an_involution() {
        // lighter then darker does not have to come back
        let c = PaletteColor::WHITE;
        assert_ne!(darker(lighter(c)), c);
    }

    #[test]
    fn test_named_constants_match_base_order() {
        assert_eq!(PaletteColor::BLACK.base_index(), 0);
        assert_eq!(PaletteColor::DARK_GRAY.base_index(), 0b01_01_01);
        assert_eq!(PaletteColor::LIGHT_GRAY.base_index(), 0b10_10_10);
        assert_eq!(PaletteColor::WHITE.base_index(), 63);
    }

    #[test]
    fn test_from_rgb_quantizes() {
        assert_eq!(PaletteColor::from_rgb(255, 0, 0), PaletteColor::RED);
        assert_eq!(PaletteColor::from_rgb(0, 255, 0), PaletteColor::GREEN);
        assert_eq!(PaletteColor::from_rgb(90, 90, 90), PaletteColor::DARK_GRAY);
    }

    #[test]
    fn test_to_rgba() {
        assert_eq!(PaletteColor::WHITE.to_rgba(), Rgba([255, 255, 255, 255]));
        assert_eq!(PaletteColor::RED.to_rgba(), Rgba([255, 0, 0, 255]));
        assert_eq!(PaletteColor::CLEAR.to_rgba(), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_blend_mixes_channels() {
        assert_eq!(PaletteColor::BLACK.blend(PaletteColor::WHITE), PaletteColor::LIGHT_GRAY);
        assert_eq!(PaletteColor::RED.blend(PaletteColor::RED), PaletteColor::RED);
    }
}
