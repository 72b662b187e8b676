//! Newtonian acceleration law.

use super::repr::{Acceleration, Distance, Mass, Position};

/// Gravitational constant, m³·kg⁻¹·s⁻².
pub const G: f64 = 6.6743e-11;

/// Separations at or under this distance contribute no acceleration.
pub const MIN_SEPARATION: Distance = 1.0;

/// Acceleration felt by a body displaced by `displacement` from an attractor
/// of mass `mass`. The result points toward the attractor.
///
/// `|a| = G·M / r²`. When `r <= MIN_SEPARATION` the direction is meaningless
/// and the magnitude unbounded, so the contribution is zero.
pub fn acceleration(mass: Mass, displacement: &Position) -> Acceleration {
    let distance_sq = displacement.norm_squared();
    if distance_sq <= MIN_SEPARATION * MIN_SEPARATION {
        return Acceleration::zeros();
    }
    let distance = distance_sq.sqrt();
    let magnitude = G * mass / distance_sq;
    displacement * (-magnitude / distance)
}

/// Specific orbital energy (J/kg) of a body around an attractor of mass `mass`.
pub fn specific_energy(mass: Mass, displacement: &Position, velocity: &Position) -> f64 {
    0.5 * velocity.norm_squared() - G * mass / displacement.norm()
}

/// Speed of a circular orbit of radius `distance`.
pub fn circular_speed(mass: Mass, distance: Distance) -> f64 {
    (G * mass / distance).sqrt()
}

/// Period of a circular orbit of radius `distance`, in seconds.
pub fn orbital_period(mass: Mass, distance: Distance) -> f64 {
    std::f64::consts::TAU * (distance.powi(3) / (G * mass)).sqrt()
}
