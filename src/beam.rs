//! Closed-form tip deflection of a hollow cantilever tube.
//!
//! The beam is clamped at one end and carries a fixed point mass at the free
//! end plus its own weight. Both contributions come from Euler-Bernoulli beam
//! theory, see <https://en.wikipedia.org/wiki/Deflection_(engineering)>.

use crate::errors::BeamSpecError;
use crate::record::DeflectionResult;
use crate::section::{tube, TubeSection};

/// Gravitational acceleration in metres per second squared.
pub const GRAVITY: f64 = 9.81;

/// Mass in kilograms hanging from the free end of every beam.
pub const TIP_MASS: f64 = 5.0;

/// Weight and mass of a tube of the given dimensions.
///
/// Returns `(weight, mass)` where `weight = A ρ g` in newtons is the load that
/// [`self_weight_deflection`] treats as the distributed load `w`, and
/// `mass = A ρ L` is in kilograms.
#[must_use]
pub fn mass_and_weight(diameter: f64, length: f64, thickness: f64, density: f64) -> (f64, f64) {
    let area = tube(diameter, thickness).area();
    let weight = area * density * GRAVITY;
    let mass = area * density * length;
    (weight, mass)
}

/// Tip deflection in metres caused by [`TIP_MASS`] at the free end.
///
/// `δ = m g L³ / (3 E I)`
#[must_use]
pub fn point_load_deflection(length: f64, elasticity: f64, thickness: f64, diameter: f64) -> f64 {
    let i = tube(diameter, thickness).second_moment_of_area();
    (TIP_MASS * GRAVITY * length.powf(3.0)) / (3.0 * elasticity * i)
}

/// Tip deflection in metres caused by the beam's own weight.
///
/// `δ = w L⁴ / (8 E I)` with `w` taken from [`mass_and_weight`].
#[must_use]
pub fn self_weight_deflection(
    density: f64,
    length: f64,
    elasticity: f64,
    thickness: f64,
    diameter: f64,
) -> f64 {
    let (weight, _) = mass_and_weight(diameter, length, thickness, density);
    let i = tube(diameter, thickness).second_moment_of_area();
    weight * length.powf(4.0) / (8.0 * elasticity * i)
}

/// Combined tip deflection of a loaded cantilever tube.
///
/// # Examples
/// ```
/// use beamx::total_deflection;
///
/// let result = total_deflection(7850.0, 1.0, 200.0e9, 0.005, 0.05, Some("steel"));
/// assert_eq!(result.material.as_deref(), Some("steel"));
/// assert!((result.deflection - 6.3915e-4).abs() < 1.0e-8);
/// assert!((result.weight - 5.5488).abs() < 1.0e-4);
/// ```
#[must_use]
pub fn total_deflection(
    density: f64,
    length: f64,
    elasticity: f64,
    thickness: f64,
    diameter: f64,
    material_name: Option<&str>,
) -> DeflectionResult {
    let (_, mass) = mass_and_weight(diameter, length, thickness, density);
    let deflection = point_load_deflection(length, elasticity, thickness, diameter)
        + self_weight_deflection(density, length, elasticity, thickness, diameter);
    DeflectionResult {
        deflection,
        material: material_name.map(str::to_owned),
        length,
        weight: mass,
        diameter,
        thickness,
        elasticity,
    }
}

/// The physical description of one cantilever tube, in SI units.
#[derive(Clone, Debug, PartialEq)]
pub struct BeamSpec {
    /// Optional material name carried into the result.
    pub material: Option<String>,
    /// Free length in metres.
    pub length: f64,
    /// Tube cross-section.
    pub section: TubeSection,
    /// Elastic modulus in pascals.
    pub elastic_modulus: f64,
    /// Material density in kilograms per cubic metre.
    pub density: f64,
}

impl BeamSpec {
    /// Check that every parameter is physically meaningful.
    ///
    /// [`BeamSpec::evaluate`] does not call this; degenerate inputs still
    /// produce (degenerate) numbers.
    ///
    /// # Errors
    ///
    /// Returns the first [`BeamSpecError`] found, checking length, diameter,
    /// thickness, wall ratio, modulus and density in that order.
    ///
    /// # Examples
    /// ```
    /// use beamx::{tube, BeamSpec, BeamSpecError};
    ///
    /// let spec = BeamSpec {
    ///     material: None,
    ///     length: 1.0,
    ///     section: tube(0.05, 0.03),
    ///     elastic_modulus: 200.0e9,
    ///     density: 7850.0,
    /// };
    /// assert!(matches!(spec.validate(), Err(BeamSpecError::WallTooThick { .. })));
    /// ```
    pub fn validate(&self) -> Result<(), BeamSpecError> {
        let TubeSection {
            outer_diameter: diameter,
            thickness,
        } = self.section;
        if self.length <= 0.0 {
            return Err(BeamSpecError::NonPositiveLength {
                length: self.length,
            });
        }
        if diameter <= 0.0 {
            return Err(BeamSpecError::NonPositiveDiameter { diameter });
        }
        if thickness <= 0.0 {
            return Err(BeamSpecError::NonPositiveThickness { thickness });
        }
        if thickness >= diameter / 2.0 {
            return Err(BeamSpecError::WallTooThick {
                thickness,
                diameter,
            });
        }
        if self.elastic_modulus <= 0.0 {
            return Err(BeamSpecError::NonPositiveElasticModulus {
                elastic_modulus: self.elastic_modulus,
            });
        }
        if self.density <= 0.0 {
            return Err(BeamSpecError::NonPositiveDensity {
                density: self.density,
            });
        }
        Ok(())
    }

    /// Compute the combined tip deflection for this beam.
    #[must_use]
    pub fn evaluate(&self) -> DeflectionResult {
        total_deflection(
            self.density,
            self.length,
            self.elastic_modulus,
            self.section.thickness,
            self.section.outer_diameter,
            self.material.as_deref(),
        )
    }
}
