use crate::game::repr::{Distance, Position, Velocity};

#[derive(Clone, PartialEq, Debug)]
pub struct Moon {
    pub(crate) name: String,
    pub(crate) position: Position,
    pub(crate) velocity: Velocity,
    pub(crate) radius: Distance,
}

impl Moon {
    pub fn new(name: String, position: Position, velocity: Velocity, radius: Distance) -> Moon {
        Moon {
            name,
            position,
            velocity,
            radius,
        }
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
}
