//! Spatial relationship between two GeoSOT-3D cells.

use serde::{Deserialize, Serialize};

use crate::geosot3d::GeoSot3dCode;

/// Relationship of cell `a` to cell `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopologicalRelationship {
    /// Cells do not touch.
    Disjoint,
    /// `a` is a coarser cell that contains `b`.
    Contain,
    /// `a` is a finer cell inside `b`.
    ContainedBy,
    /// Cells of the same level share a face.
    SurfaceAdjacent,
    /// Cells of the same level share an edge only.
    EdgeAdjacent,
    /// Cells of the same level share a corner only.
    CornerAdjacent,
    /// Same cell.
    Equal,
}

/// Classifies the relationship of `a` to `b`.
///
/// Cells of different levels are compared by their octal strings, so only strict containment is
/// detected: a coarse cell touching a finer one is reported as `Disjoint`.
pub fn classify(a: &GeoSot3dCode, b: &GeoSot3dCode) -> TopologicalRelationship {
    if a.level() != b.level() {
        let (a_octal, b_octal) = (a.to_octal(), b.to_octal());
        let relationship = if a_octal.is_ancestor_of(&b_octal) {
            TopologicalRelationship::Contain
        } else if b_octal.is_ancestor_of(&a_octal) {
            TopologicalRelationship::ContainedBy
        } else {
            TopologicalRelationship::Disjoint
        };

        log::debug!("Cross-level cells {a_octal} and {b_octal} classified as {relationship:?}");
        return relationship;
    }

    if a == b {
        return TopologicalRelationship::Equal;
    }

    let offset = a.offset_from(b);
    let steps = [offset.x, offset.y, offset.z].map(i32::unsigned_abs);
    if steps.iter().any(|step| *step > 1) {
        return TopologicalRelationship::Disjoint;
    }

    match steps.iter().filter(|step| **step == 1).count() {
        1 => TopologicalRelationship::SurfaceAdjacent,
        2 => TopologicalRelationship::EdgeAdjacent,
        3 => TopologicalRelationship::CornerAdjacent,
        // different bits below the level only
        _ => TopologicalRelationship::Equal,
    }
}

impl GeoSot3dCode {
    /// Relationship of this cell to `other`. See [`classify`].
    pub fn relationship(&self, other: &GeoSot3dCode) -> TopologicalRelationship {
        classify(self, other)
    }
}
