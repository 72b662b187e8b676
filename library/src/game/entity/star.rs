use crate::error::Error;
use crate::game::repr::{Distance, Mass, Position};
use crate::Result;

pub const SUN_NAME: &str = "Sun";
pub const SUN_MASS: Mass = 1.989e30;
pub const SUN_RADIUS: Distance = 695_508_000.;

/// The single gravity source of a system. It sits at the origin and never moves.
#[derive(Clone, PartialEq, Debug)]
pub struct Star {
    pub(crate) name: String,
    pub(crate) radius: Distance,
    pub(crate) mass: Mass,
}

impl Star {
    pub fn new(name: &str, radius: Distance, mass: Mass) -> Result<Star> {
        if !mass.is_finite() || mass <= 0. {
            return Err(Error::InvalidStar(format!(
                "mass {} must be finite and positive",
                mass
            )));
        }
        if !radius.is_finite() || radius < 0. {
            return Err(Error::InvalidStar(format!(
                "radius {} must be finite and non-negative",
                radius
            )));
        }
        Ok(Star {
            name: name.to_string(),
            radius,
            mass,
        })
    }

    pub fn sun() -> Star {
        Star {
            name: SUN_NAME.to_string(),
            radius: SUN_RADIUS,
            mass: SUN_MASS,
        }
    }

    pub fn borrow_name(&self) -> &str {
        &self.name
    }

    pub fn get_position(&self) -> Position {
        Position::zeros()
    }

    pub fn get_radius(&self) -> Distance {
        self.radius
    }

    pub fn get_mass(&self) -> Mass {
        self.mass
    }
}
