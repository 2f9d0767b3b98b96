//! Per-tile collision flags: [`CollisionFlags`].
//!
//! Bit values match the collision words exported by the game server, so a
//! snapshot's `flags` column can be wrapped without translation.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// Bitmask of collision categories set on one tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CollisionFlags(pub u32);

impl CollisionFlags {
    pub const OPEN: Self = Self(0);
    pub const WALL_NORTH_WEST: Self = Self(0x1);
    pub const WALL_NORTH: Self = Self(0x2);
    pub const WALL_NORTH_EAST: Self = Self(0x4);
    pub const WALL_EAST: Self = Self(0x8);
    pub const WALL_SOUTH_EAST: Self = Self(0x10);
    pub const WALL_SOUTH: Self = Self(0x20);
    pub const WALL_SOUTH_WEST: Self = Self(0x40);
    pub const WALL_WEST: Self = Self(0x80);
    /// A blocking object occupies the tile.
    pub const LOC: Self = Self(0x100);
    pub const FLOOR_DECORATION: Self = Self(0x40000);
    pub const FLOOR: Self = Self(0x200000);
    pub const ROOF: Self = Self(0x8000_0000);

    /// Every directional wall bit.
    pub const WALLS: Self = Self(0xFF);

    /// Every bit this model knows about. Snapshot flags outside this mask
    /// are carried through untouched.
    pub const KNOWN: Self = Self(
        Self::WALLS.0 | Self::LOC.0 | Self::FLOOR_DECORATION.0 | Self::FLOOR.0 | Self::ROOF.0,
    );

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether this mask shares at least one bit with `other`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Whether the mask is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return the mask with the bits of `other` cleared.
    #[inline]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// The raw flag word.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for CollisionFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollisionFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CollisionFlags {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for CollisionFlags {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl From<u32> for CollisionFlags {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<CollisionFlags> for u32 {
    fn from(f: CollisionFlags) -> Self {
        f.0
    }
}

impl fmt::Display for CollisionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(CollisionFlags, &str); 12] = [
            (CollisionFlags::WALL_NORTH_WEST, "WALL_NORTH_WEST"),
            (CollisionFlags::WALL_NORTH, "WALL_NORTH"),
            (CollisionFlags::WALL_NORTH_EAST, "WALL_NORTH_EAST"),
            (CollisionFlags::WALL_EAST, "WALL_EAST"),
            (CollisionFlags::WALL_SOUTH_EAST, "WALL_SOUTH_EAST"),
            (CollisionFlags::WALL_SOUTH, "WALL_SOUTH"),
            (CollisionFlags::WALL_SOUTH_WEST, "WALL_SOUTH_WEST"),
            (CollisionFlags::WALL_WEST, "WALL_WEST"),
            (CollisionFlags::LOC, "LOC"),
            (CollisionFlags::FLOOR_DECORATION, "FLOOR_DECORATION"),
            (CollisionFlags::FLOOR, "FLOOR"),
            (CollisionFlags::ROOF, "ROOF"),
        ];
        if self.is_empty() {
            return f.write_str("OPEN");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        let unknown = self.without(Self::KNOWN);
        if !unknown.is_empty() {
            if !first {
                f.write_str("|")?;
            }
            write!(f, "{:#x}", unknown.0)?;
        }
        Ok(())
    }
}
