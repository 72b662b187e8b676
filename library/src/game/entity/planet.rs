use super::moon::Moon;
use crate::game::repr::{Distance, Mass, Position, Speed, Velocity};

#[derive(Clone, PartialEq, Debug)]
pub struct Planet {
    pub(crate) name: String,
    pub(crate) position: Position,
    pub(crate) velocity: Velocity,
    pub(crate) radius: Distance,
    pub(crate) mass: Mass,
    pub(crate) moons: Vec<Moon>,
}

impl Planet {
    pub fn new(
        name: String,
        position: Position,
        velocity: Velocity,
        radius: Distance,
        mass: Mass,
    ) -> Planet {
        Planet {
            name,
            position,
            velocity,
            radius,
            mass,
            moons: Vec::default(),
        }
    }

    /// Places a moon `apoapsis` meters from the planet along +x, moving with
    /// the planet plus `initial_speed` along +y.
    pub fn spawn_moon(
        &mut self,
        name: String,
        apoapsis: Distance,
        initial_speed: Speed,
        radius: Distance,
    ) -> &Moon {
        let position = self.position + Position::new(apoapsis, 0.);
        let velocity = self.velocity + Velocity::new(0., initial_speed);
        self.moons.push(Moon::new(name, position, velocity, radius));
        &self.moons[self.moons.len() - 1]
    }

    pub fn borrow_name(&self) -> &str {
        &self.name
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn get_velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn get_radius(&self) -> Distance {
        self.radius
    }

    pub fn get_mass(&self) -> Mass {
        self.mass
    }

    pub fn borrow_moons(&self) -> &[Moon] {
        &self.moons
    }

    pub fn borrow_moon(&self, name: &str) -> Option<&Moon> {
        self.moons.iter().find(|m| m.name == name)
    }
}
