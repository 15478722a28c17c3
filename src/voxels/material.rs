//! # Material Module
//!
//! Material identifiers and the canonicalization table used for vein matching.
//!
//! Some materials have "activated" variants that the world swaps in on touch, e.g.
//! redstone ore lights up when a player hits it. Both forms must be treated as one vein, so
//! matching always compares canonical ids. The canonical id is never written back to the
//! world or used for drops.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Activated variant id → base id.
static CANONICAL_MATERIALS: phf::Map<u32, u32> = phf::phf_map! {
    // lit redstone ore → redstone ore
    74u32 => 73u32,
};

/// Integer identifier of a cell's content.
///
/// `MaterialId::EMPTY` (0) is the empty cell.
#[repr(transparent)]
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    bytemuck::Pod,
    bytemuck::Zeroable,
)]
pub struct MaterialId(pub u32);

impl MaterialId {
    /// The empty cell.
    pub const EMPTY: Self = Self(0);

    /// Returns `true` for the empty cell.
    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    /// Normalizes an activated variant to its base id.
    ///
    /// Ids without an entry in the canonicalization table are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use vein_miner::voxels::MaterialId;
    ///
    /// assert_eq!(MaterialId(74).canonical(), MaterialId(73));
    /// assert_eq!(MaterialId(73).canonical(), MaterialId(73));
    /// ```
    pub fn canonical(self) -> Self {
        CANONICAL_MATERIALS
            .get(&self.0)
            .map(|base| Self(*base))
            .unwrap_or(self)
    }

    /// Returns `true` if `self` belongs to the same vein as `target`.
    ///
    /// The empty cell never matches anything, not even another empty cell.
    pub fn matches(self, target: Self) -> bool {
        !self.is_empty() && self.canonical() == target.canonical()
    }
}

impl From<u32> for MaterialId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_canonical_redstone_pair() {
        assert_eq!(MaterialId(74).canonical(), MaterialId(73));
        assert_eq!(MaterialId(73).canonical(), MaterialId(73));
    }

    #[test_case(74, 73, true ; "lit variant matches base")]
    #[test_case(73, 73, true ; "base matches itself")]
    #[test_case(73, 74, true ; "base matches lit target")]
    #[test_case(16, 73, false ; "coal does not match redstone")]
    #[test_case(0, 0, false ; "empty never matches")]
    fn test_matches(candidate: u32, target: u32, expected: bool) {
        assert_eq!(MaterialId(candidate).matches(MaterialId(target)), expected);
    }
}
