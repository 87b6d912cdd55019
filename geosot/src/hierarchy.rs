//! Navigation over the cell hierarchy.
//!
//! Every GeoSOT-3D cell is split into 8 children on the next level. On octal strings this is a
//! prefix relation: a child code is its parent code with one more digit. On packed codes the
//! same operations are done by setting or clearing one bit of every axis field.

use crate::geosot3d::{GeoSot1dCode, GeoSot3dCode, OctalCode};
use crate::grid::{free_bits, MAX_LEVEL};

const CHILDREN: u8 = 8;
const DIGITS: [char; CHILDREN as usize] = ['0', '1', '2', '3', '4', '5', '6', '7'];

impl OctalCode {
    /// Parent cell. The parent of a level 1 code is the root, the root is its own parent.
    pub fn parent(&self) -> OctalCode {
        let mut digits = self.as_str().to_owned();
        digits.pop();
        OctalCode::from_digits_unchecked(digits)
    }

    /// The 8 child cells in the order of their last digit. Level 32 cells have no children.
    pub fn children(&self) -> Vec<OctalCode> {
        if self.level() >= MAX_LEVEL {
            return vec![];
        }

        DIGITS
            .iter()
            .map(|digit| {
                let mut digits = String::with_capacity(self.level() as usize + 1);
                digits.push_str(self.as_str());
                digits.push(*digit);
                OctalCode::from_digits_unchecked(digits)
            })
            .collect()
    }

    /// Returns true if `other` lies inside this cell and is not this cell. The root is an ancestor
    /// of every other code.
    pub fn is_ancestor_of(&self, other: &OctalCode) -> bool {
        self.level() < other.level() && other.as_str().starts_with(self.as_str())
    }

    /// The cell at `level` that contains this cell, or `None` if `level` is finer than the level of
    /// this code. Level 0 gives the root.
    pub fn ancestor(&self, level: u8) -> Option<OctalCode> {
        if level > self.level() {
            return None;
        }

        Some(OctalCode::from_digits_unchecked(
            self.as_str()[..level as usize].to_owned(),
        ))
    }
}

impl GeoSot3dCode {
    /// Parent cell, or `None` for level 1 codes.
    pub fn parent(&self) -> Option<GeoSot3dCode> {
        self.ancestor(self.level().checked_sub(1)?)
    }

    /// The cell at `level` that contains this cell. `None` if `level` is 0 or is finer than the
    /// level of this code.
    pub fn ancestor(&self, level: u8) -> Option<GeoSot3dCode> {
        if level > self.level() {
            return None;
        }

        GeoSot3dCode::from_axes(self.lon(), self.lat(), self.ele(), level).ok()
    }

    /// The 8 child cells, ordered the same way as [`OctalCode::children`]. Level 32 cells have no
    /// children.
    pub fn children(&self) -> Vec<GeoSot3dCode> {
        let level = self.level();
        if level >= MAX_LEVEL {
            return vec![];
        }

        let shift = free_bits(level + 1);
        let (lon, lat, ele) = (self.lon().bits(), self.lat().bits(), self.ele().bits());
        (0..CHILDREN as u32)
            .map(|digit| {
                GeoSot3dCode::from_parts(
                    lon | ((digit & 1) << shift),
                    lat | (((digit >> 1) & 1) << shift),
                    ele | (((digit >> 2) & 1) << shift),
                    level + 1,
                )
            })
            .collect()
    }

    /// Returns true if `other` lies inside this cell and is not this cell.
    pub fn is_ancestor_of(&self, other: &GeoSot3dCode) -> bool {
        self.level() < other.level() && other.ancestor(self.level()) == Some(*self)
    }
}

impl GeoSot1dCode {
    /// Parent cell, or `None` for level 1 codes.
    pub fn parent(&self) -> Option<GeoSot1dCode> {
        GeoSot3dCode::from(*self).parent().map(GeoSot1dCode::from)
    }

    /// The 8 child cells, ordered the same way as [`OctalCode::children`].
    pub fn children(&self) -> Vec<GeoSot1dCode> {
        GeoSot3dCode::from(*self)
            .children()
            .into_iter()
            .map(GeoSot1dCode::from)
            .collect()
    }
}
