//! Visual projection: [`Color`] and the status palette.
//!
//! Renderers never inspect search state directly; they map each cell's
//! [`Status`] through [`Status::color`].

use crate::cell::Status;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const GREEN: Self = Self::from_rgb(0, 255, 0);
    pub const RED: Self = Self::from_rgb(255, 0, 0);
    pub const ORANGE: Self = Self::from_rgb(255, 165, 0);
    pub const PURPLE: Self = Self::from_rgb(128, 0, 128);
    pub const TURQUOISE: Self = Self::from_rgb(64, 224, 208);
    pub const YELLOW: Self = Self::from_rgb(255, 255, 0);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl Status {
    /// Fill colour for a cell holding this status.
    pub const fn color(self) -> Color {
        match self {
            Status::Empty => Color::WHITE,
            Status::Barrier => Color::BLACK,
            Status::Open => Color::GREEN,
            Status::Closed => Color::RED,
            Status::Start => Color::ORANGE,
            Status::Waypoint => Color::PURPLE,
            Status::End => Color::TURQUOISE,
            Status::Path => Color::YELLOW,
        }
    }
}
