//! Semi-implicit (symplectic) Euler over the star → planet → moon hierarchy.
//!
//! Every body first drifts with the velocity it had at the end of the previous
//! tick, then gets kicked by the acceleration evaluated at its new position.
//! Planets only feel the star. Moons feel the star and their parent planet,
//! whose position has already been advanced for this tick when the moons are
//! processed.

use super::entity::{Moon, Planet, Star};
use super::gravity;
use super::repr::{Mass, Position, Seconds};

/// Advances every planet, and every moon it owns, by `time_step` seconds.
pub fn step(star: &Star, planets: &mut [Planet], time_step: Seconds) {
    let star_position = star.get_position();

    for planet in planets.iter_mut() {
        planet.position += planet.velocity * time_step;

        let planet_acceleration = gravity::acceleration(star.mass, &(planet.position - star_position));

        let parent_position = planet.position;
        let parent_mass = planet.mass;
        for moon in planet.moons.iter_mut() {
            step_moon(
                moon,
                star.mass,
                &star_position,
                parent_mass,
                &parent_position,
                time_step,
            );
        }

        planet.velocity += planet_acceleration * time_step;
    }
}

fn step_moon(
    moon: &mut Moon,
    star_mass: Mass,
    star_position: &Position,
    parent_mass: Mass,
    parent_position: &Position,
    time_step: Seconds,
) {
    moon.position += moon.velocity * time_step;

    let from_star = gravity::acceleration(star_mass, &(moon.position - star_position));
    moon.velocity += from_star * time_step;

    let from_parent = gravity::acceleration(parent_mass, &(moon.position - parent_position));
    moon.velocity += from_parent * time_step;
}
