//! Axis-aligned bounding volumes for trajectory regions.

use glam::{Mat4, Vec3};

use crate::error::AtomataError;

/// Axis-aligned box enclosing every atom of a trajectory.
///
/// Invariant: `min <= max` on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    min: Vec3,
    max: Vec3,
}

impl BoundingVolume {
    /// Box spanning two corners, in any order.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box containing every point.
    ///
    /// # Errors
    ///
    /// Returns [`AtomataError::EmptyGeometry`] when `points` is empty.
    pub fn from_points<'a, I>(points: I) -> Result<Self, AtomataError>
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        let mut iter = points.into_iter();
        let Some(&first) = iter.next() else {
            return Err(AtomataError::EmptyGeometry { slot: None });
        };
        let (min, max) = iter.fold((first, first), |(min, max), &p| {
            (min.min(p), max.max(p))
        });
        Ok(Self { min, max })
    }

    /// Minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Extent along each axis (`max - min`).
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Copy of this box moved by `by`.
    #[must_use]
    pub fn translated(&self, by: Vec3) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    /// Whether the two boxes overlap on all three axes.
    ///
    /// Intervals are compared inclusively: boxes that merely touch along a
    /// face, edge, or corner count as intersecting, so separated regions
    /// always keep a strictly positive gap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Transform mapping the unit cube `[0, 1]^3` onto this box, used to
    /// draw the region outline.
    #[must_use]
    pub fn outline_transform(&self) -> Mat4 {
        Mat4::from_translation(self.min) * Mat4::from_scale(self.size())
    }
}
