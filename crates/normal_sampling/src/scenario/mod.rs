//! Box geometry that normals are sampled from.
//!
//! - [`bounds`]: [`Aabb2`] and [`Aabb3`], validated axis-aligned boxes
//! - [`planar`]: [`Scenario2D`], two rectangles and a line normal
//! - [`spatial`]: [`Scenario3D`], three boxes and a triangle normal
//!
//! Scenarios are either drawn from a generator with parameter ranges or
//! built from explicit corners. Normalisation moves A's min corner to the
//! origin and scales A's x-extent to one; the normalised corners form the
//! feature vectors written to datasets.

pub mod bounds;
pub mod planar;
pub mod spatial;

pub use bounds::{Aabb2, Aabb3};
pub use planar::{Scenario2D, Scenario2DParams};
pub use spatial::{Scenario3D, Scenario3DParams};

use crate::error::ScenarioError;

fn validate_range(name: &'static str, min: f64, max: f64) -> Result<(), ScenarioError> {
    if min.is_finite() && max.is_finite() && min >= 0.0 && max >= min {
        Ok(())
    } else {
        Err(ScenarioError::InvalidRange { name, min, max })
    }
}

/// Box extents must be strictly positive so box A can be normalised.
fn validate_size_range(min: f64, max: f64) -> Result<(), ScenarioError> {
    validate_range("size", min, max)?;
    if min > 0.0 {
        Ok(())
    } else {
        Err(ScenarioError::InvalidRange { name: "size", min, max })
    }
}

fn check_finite(features: &[f64]) -> Result<(), ScenarioError> {
    match features.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ScenarioError::NonFiniteFeature {
            index,
            value: features[index],
        }),
        None => Ok(()),
    }
}
