//! Cross-section properties of hollow circular tubes.

use std::f64::consts::PI;

/// Annular cross-section described by its outer diameter and wall thickness,
/// both in metres.
///
/// No checks are made on construction. A wall thicker than the outer radius
/// yields a negative inner diameter and non-physical section properties; see
/// [`BeamSpec::validate`](crate::BeamSpec::validate) for the checked route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TubeSection {
    /// Outer diameter in metres.
    pub outer_diameter: f64,
    /// Wall thickness in metres.
    pub thickness: f64,
}

impl TubeSection {
    /// Create a [`TubeSection`] with explicit dimensions.
    #[must_use]
    pub const fn new(outer_diameter: f64, thickness: f64) -> Self {
        Self {
            outer_diameter,
            thickness,
        }
    }

    /// Inner diameter `D - 2t` in metres.
    #[must_use]
    pub fn inner_diameter(self) -> f64 {
        self.outer_diameter - 2.0 * self.thickness
    }

    /// Area of the annulus in square metres.
    ///
    /// Computed as the outer disc minus the inner disc, `π(D/2)² - π(d/2)²`.
    ///
    /// # Examples
    /// ```
    /// use beamx::tube;
    ///
    /// let section = tube(0.05, 0.005);
    /// assert!((section.area() - 7.0686e-4).abs() < 1.0e-8);
    /// ```
    #[must_use]
    pub fn area(self) -> f64 {
        let outer = PI * (self.outer_diameter / 2.0).powf(2.0);
        let inner = PI * (self.inner_diameter() / 2.0).powf(2.0);
        outer - inner
    }

    /// Second moment of area about a diameter in metres to the fourth power.
    ///
    /// Uses `I = π/64 (D⁴ - d⁴)`. It tends to zero as the wall thickness tends
    /// to zero and to the solid rod value `πD⁴/64` as the wall fills the tube.
    #[must_use]
    pub fn second_moment_of_area(self) -> f64 {
        (PI / 64.0) * (self.outer_diameter.powf(4.0) - self.inner_diameter().powf(4.0))
    }
}

/// Convenience helper for creating [`TubeSection`] instances.
///
/// # Examples
/// ```
/// use beamx::tube;
///
/// let section = tube(0.05, 0.005);
/// assert_eq!(section.inner_diameter(), 0.04);
/// ```
#[must_use]
pub const fn tube(outer_diameter: f64, thickness: f64) -> TubeSection {
    TubeSection::new(outer_diameter, thickness)
}

/// Area of a hollow circular section in square metres.
#[must_use]
pub fn cross_section_area(outer_diameter: f64, thickness: f64) -> f64 {
    tube(outer_diameter, thickness).area()
}

/// Second moment of area of a hollow circular section in metres to the fourth power.
#[must_use]
pub fn second_moment_of_area(outer_diameter: f64, thickness: f64) -> f64 {
    tube(outer_diameter, thickness).second_moment_of_area()
}
