//! Object identities stored in the identity buffer.
//!
//! An identity is either [`Identity::Clear`] (no object covers the pixel) or
//! one registered [`ObjectId`]. On the drawing surface an identity has to
//! travel as an ordinary palette byte, so [`Identity::fill_color`] and
//! [`Identity::from_byte`] are the only places where the two meet.

use crate::palette::{PaletteColor, ALPHA_MASK, BASE_MASK};

/// Maximum number of live objects between two registry resets.
pub const CAPACITY: usize = 64;

/// High bits marking a byte as "an object occupies this pixel".
pub const IDENTITY_TAG: u8 = ALPHA_MASK;

/// Byte written to the identity buffer for background pixels.
pub const CLEAR_BYTE: u8 = 0x00;

/// Slot index of a registered object, always below [`CAPACITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u8);

impl ObjectId {
    /// Build an id from a slot index, wrapping into `0..CAPACITY`.
    pub const fn from_slot(slot: usize) -> Self {
        Self((slot % CAPACITY) as u8)
    }

    /// Registry slot index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What occupies one pixel of the identity buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Identity {
    /// Background, no registered object drawn here.
    #[default]
    Clear,
    /// A registered object.
    Object(ObjectId),
}

impl Identity {
    /// Decode an identity-buffer byte.
    ///
    /// Any byte without the full tag is background. This also covers
    /// stray partially transparent values.
    pub const fn from_byte(byte: u8) -> Self {
        if byte & IDENTITY_TAG == IDENTITY_TAG {
            Self::Object(ObjectId(byte & BASE_MASK))
        } else {
            Self::Clear
        }
    }

    /// Encode for storage in the identity buffer.
    pub const fn to_byte(self) -> u8 {
        match self {
            Self::Clear => CLEAR_BYTE,
            Self::Object(id) => IDENTITY_TAG | id.0,
        }
    }

    /// Color to fill a silhouette with while an identity pass is active.
    pub const fn fill_color(self) -> PaletteColor {
        PaletteColor::from_argb(self.to_byte())
    }

    /// Registered object, if any.
    pub const fn object(self) -> Option<ObjectId> {
        match self {
            Self::Clear => None,
            Self::Object(id) => Some(id),
        }
    }

    pub const fn is_clear(self) -> bool {
        matches!(self, Self::Clear)
    }
}

impl From<ObjectId> for Identity {
    fn from(id: ObjectId) -> Self {
        Self::Object(id)
    }
}
