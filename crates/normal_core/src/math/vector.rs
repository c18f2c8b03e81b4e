//! Fixed-size vector types for planar and spatial normals.
//!
//! This module provides:
//! - [`Vec2`]: planar vector with the perpendicular rotation used for line normals
//! - [`Vec3`]: spatial vector with the cross product used for triangle normals
//! - [`NormalVector`]: the operations every normal history and metric needs,
//!   implemented by both vector types
//!
//! All types are generic over `T: num_traits::Float`; the sampling engine
//! instantiates them with `f64`.

use num_traits::{Float, One, Zero};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Operations shared by planar and spatial normal vectors.
///
/// Normal histories, running averages, the uncertainty metric and the
/// angular difference functions are written once against this trait.
///
/// # Examples
///
/// ```rust
/// use normal_core::math::vector::{NormalVector, Vec2};
///
/// let v = Vec2::new(3.0_f64, 4.0);
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(Vec2::new(0.0_f64, 2.0).try_normalize(), Some(Vec2::new(0.0, 1.0)));
/// assert_eq!(Vec2::<f64>::zero().try_normalize(), None);
/// ```
pub trait NormalVector:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + Send
    + Sync
{
    /// Scalar component type.
    type Scalar: Float + Debug + Send + Sync;

    /// Number of components.
    const DIMENSION: usize;

    /// Returns the zero vector.
    fn zero() -> Self;

    /// Euclidean inner product.
    fn dot(self, other: Self) -> Self::Scalar;

    /// Multiplies every component by `factor`.
    fn scale(self, factor: Self::Scalar) -> Self;

    /// Squared Euclidean length.
    #[inline]
    fn length_squared(self) -> Self::Scalar {
        self.dot(self)
    }

    /// Euclidean length.
    #[inline]
    fn length(self) -> Self::Scalar {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector in the same direction.
    ///
    /// Zero-length input yields NaN components; use [`try_normalize`](Self::try_normalize)
    /// when the input may be degenerate.
    #[inline]
    fn normalize(self) -> Self {
        self.scale(Self::Scalar::one() / self.length())
    }

    /// Returns the unit vector in the same direction, or `None` when the
    /// length is zero or not finite.
    #[inline]
    fn try_normalize(self) -> Option<Self> {
        let length = self.length();
        if length > Self::Scalar::zero() && length.is_finite() {
            Some(self.scale(Self::Scalar::one() / length))
        } else {
            None
        }
    }
}

/// Two-component vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2<T> {
    /// X component
    pub x: T,
    /// Y component
    pub y: T,
}

impl<T: Float> Vec2<T> {
    /// Creates a vector from its components.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Creates a vector with both components equal to `value`.
    #[inline]
    pub fn splat(value: T) -> Self {
        Self { x: value, y: value }
    }

    /// Counter-clockwise perpendicular `(-y, x)`.
    ///
    /// The normal of the segment `a -> b` is `(b - a).perp()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use normal_core::math::vector::Vec2;
    ///
    /// assert_eq!(Vec2::new(1.0_f64, 0.0).perp(), Vec2::new(0.0, 1.0));
    /// ```
    #[inline]
    pub fn perp(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// Component-wise product.
    #[inline]
    pub fn component_mul(self, other: Self) -> Self {
        Self {
            x: self.x * other.x,
            y: self.y * other.y,
        }
    }

    /// Components as an array.
    #[inline]
    pub fn to_array(self) -> [T; 2] {
        [self.x, self.y]
    }
}

/// Three-component vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3<T> {
    /// X component
    pub x: T,
    /// Y component
    pub y: T,
    /// Z component
    pub z: T,
}

impl<T: Float> Vec3<T> {
    /// Creates a vector from its components.
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with all components equal to `value`.
    #[inline]
    pub fn splat(value: T) -> Self {
        Self {
            x: value,
            y: value,
            z: value,
        }
    }

    /// Right-handed cross product.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use normal_core::math::vector::Vec3;
    ///
    /// let x = Vec3::new(1.0_f64, 0.0, 0.0);
    /// let y = Vec3::new(0.0_f64, 1.0, 0.0);
    /// assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
    /// ```
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Component-wise product.
    #[inline]
    pub fn component_mul(self, other: Self) -> Self {
        Self {
            x: self.x * other.x,
            y: self.y * other.y,
            z: self.z * other.z,
        }
    }

    /// Components as an array.
    #[inline]
    pub fn to_array(self) -> [T; 3] {
        [self.x, self.y, self.z]
    }
}

macro_rules! impl_vector_ops {
    ($name:ident { $($field:ident),+ }, $dim:expr) => {
        impl<T: Float> Add for $name<T> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl<T: Float> AddAssign for $name<T> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                $(self.$field = self.$field + rhs.$field;)+
            }
        }

        impl<T: Float> Sub for $name<T> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl<T: Float> Neg for $name<T> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl<T: Float> Mul<T> for $name<T> {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: T) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl<T: Float + Debug + Send + Sync> NormalVector for $name<T> {
            type Scalar = T;

            const DIMENSION: usize = $dim;

            #[inline]
            fn zero() -> Self {
                Self { $($field: T::zero()),+ }
            }

            #[inline]
            fn dot(self, other: Self) -> T {
                T::zero() $(+ self.$field * other.$field)+
            }

            #[inline]
            fn scale(self, factor: T) -> Self {
                self * factor
            }
        }
    };
}

impl_vector_ops!(Vec2 { x, y }, 2);
impl_vector_ops!(Vec3 { x, y, z }, 3);
