//! Axis-aligned boxes in two and three dimensions.

use crate::error::ScenarioError;
use normal_core::math::vector::{Vec2, Vec3};

/// Axis-aligned rectangle given by its min and max corners.
///
/// Invariant: `max >= min` on both axes and all coordinates are finite.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb2 {
    min: Vec2<f64>,
    max: Vec2<f64>,
}

impl Aabb2 {
    /// Creates a rectangle, validating the corner order.
    ///
    /// `name` labels the box in the error.
    pub fn new(name: &'static str, min: Vec2<f64>, max: Vec2<f64>) -> Result<Self, ScenarioError> {
        let valid = min.to_array().iter().chain(max.to_array().iter()).all(|v| v.is_finite())
            && max.x >= min.x
            && max.y >= min.y;
        if !valid {
            return Err(ScenarioError::InvalidBounds {
                name,
                min: min.to_array().to_vec(),
                max: max.to_array().to_vec(),
            });
        }
        Ok(Self { min, max })
    }

    /// Creates a rectangle of full extents `size` centred on `center`.
    ///
    /// Callers guarantee non-negative sizes.
    #[inline]
    pub(crate) fn centred(center: Vec2<f64>, size: Vec2<f64>) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Min corner.
    #[inline]
    pub fn min(&self) -> Vec2<f64> {
        self.min
    }

    /// Max corner.
    #[inline]
    pub fn max(&self) -> Vec2<f64> {
        self.max
    }

    /// Full extents `max - min`.
    #[inline]
    pub fn size(&self) -> Vec2<f64> {
        self.max - self.min
    }

    /// Centre point.
    #[inline]
    pub fn center(&self) -> Vec2<f64> {
        (self.min + self.max) * 0.5
    }

    /// Maps unit coordinates `(tx, ty)` to `min + t * (max - min)`.
    #[inline]
    pub fn point_at(&self, tx: f64, ty: f64) -> Vec2<f64> {
        self.min + self.size().component_mul(Vec2::new(tx, ty))
    }

    /// Applies `p -> (p + shift) * scale` to both corners.
    #[inline]
    pub(crate) fn transformed(&self, shift: Vec2<f64>, scale: f64) -> Self {
        Self {
            min: (self.min + shift) * scale,
            max: (self.max + shift) * scale,
        }
    }
}

/// Axis-aligned box given by its min and max corners.
///
/// Invariant: `max >= min` on every axis and all coordinates are finite.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb3 {
    min: Vec3<f64>,
    max: Vec3<f64>,
}

impl Aabb3 {
    /// Creates a box, validating the corner order.
    pub fn new(name: &'static str, min: Vec3<f64>, max: Vec3<f64>) -> Result<Self, ScenarioError> {
        let valid = min.to_array().iter().chain(max.to_array().iter()).all(|v| v.is_finite())
            && max.x >= min.x
            && max.y >= min.y
            && max.z >= min.z;
        if !valid {
            return Err(ScenarioError::InvalidBounds {
                name,
                min: min.to_array().to_vec(),
                max: max.to_array().to_vec(),
            });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub(crate) fn centred(center: Vec3<f64>, size: Vec3<f64>) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Min corner.
    #[inline]
    pub fn min(&self) -> Vec3<f64> {
        self.min
    }

    /// Max corner.
    #[inline]
    pub fn max(&self) -> Vec3<f64> {
        self.max
    }

    /// Full extents `max - min`.
    #[inline]
    pub fn size(&self) -> Vec3<f64> {
        self.max - self.min
    }

    /// Centre point.
    #[inline]
    pub fn center(&self) -> Vec3<f64> {
        (self.min + self.max) * 0.5
    }

    /// Maps unit coordinates to `min + t * (max - min)`.
    #[inline]
    pub fn point_at(&self, tx: f64, ty: f64, tz: f64) -> Vec3<f64> {
        self.min + self.size().component_mul(Vec3::new(tx, ty, tz))
    }

    /// Returns one of the eight corners.
    ///
    /// Bit 0 of `index` selects x, bit 1 selects y and bit 2 selects z; a
    /// clear bit takes the min coordinate, a set bit the max. Bits above 2
    /// are ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use normal_core::math::vector::Vec3;
    /// use normal_sampling::scenario::Aabb3;
    ///
    /// let b = Aabb3::new("A", Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 2.0, 3.0)).unwrap();
    /// assert_eq!(b.corner(0), Vec3::new(0.0, 0.0, 0.0));
    /// assert_eq!(b.corner(5), Vec3::new(1.0, 0.0, 3.0));
    /// assert_eq!(b.corner(7), b.max());
    /// ```
    #[inline]
    pub fn corner(&self, index: usize) -> Vec3<f64> {
        Vec3::new(
            if index & 1 == 0 { self.min.x } else { self.max.x },
            if index & 2 == 0 { self.min.y } else { self.max.y },
            if index & 4 == 0 { self.min.z } else { self.max.z },
        )
    }

    #[inline]
    pub(crate) fn transformed(&self, shift: Vec3<f64>, scale: f64) -> Self {
        Self {
            min: (self.min + shift) * scale,
            max: (self.max + shift) * scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = Aabb2::new("B", Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)).unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidBounds { name: "B", .. }));

        assert!(Aabb3::new("C", Vec3::splat(0.0), Vec3::new(1.0, 1.0, -1.0)).is_err());
        assert!(Aabb3::new("C", Vec3::splat(0.0), Vec3::new(1.0, f64::NAN, 1.0)).is_err());
    }

    #[test]
    fn test_point_degenerate_box_allowed() {
        let p = Aabb2::new("A", Vec2::new(2.0, 3.0), Vec2::new(2.0, 3.0)).unwrap();
        assert_eq!(p.point_at(0.7, 0.2), Vec2::new(2.0, 3.0));
        assert_eq!(p.size(), Vec2::splat(0.0));
    }

    #[test]
    fn test_centred_uses_full_extents() {
        let b = Aabb3::centred(Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 4.0, 0.5));
        assert_eq!(b.min(), Vec3::new(0.0, -1.0, 0.75));
        assert_eq!(b.max(), Vec3::new(2.0, 3.0, 1.25));
        assert_eq!(b.center(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_point_at_maps_unit_square() {
        let b = Aabb2::new("A", Vec2::new(-1.0, 2.0), Vec2::new(3.0, 4.0)).unwrap();
        assert_eq!(b.point_at(0.0, 0.0), b.min());
        assert_eq!(b.point_at(0.5, 0.5), Vec2::new(1.0, 3.0));
    }

    #[test]
    fn test_all_corners_distinct() {
        let b = Aabb3::new("A", Vec3::splat(0.0), Vec3::new(1.0, 2.0, 4.0)).unwrap();
        let mut sums: Vec<f64> = (0..8).map(|i| {
            let c = b.corner(i);
            c.x + c.y + c.z
        }).collect();
        sums.sort_by(|a, b| a.partial_cmp(b).unwrap());
        sums.dedup();
        assert_eq!(sums, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }
}
