use serde::{Deserialize, Serialize};

use crate::game::entity::BodyKind;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BodyInfo {
    pub name: String,
    pub kind: BodyKind,
    pub parent: Option<String>,
    pub position: [f64; 2],
    pub radius: f64,
}

/// Everything a renderer may read, copied once per completed tick.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Snapshot {
    pub tick: u64,
    pub elapsed: f64,
    pub time_scale: f64,
    pub bodies: Vec<BodyInfo>,
}

impl Snapshot {
    pub fn borrow_body(&self, name: &str) -> Option<&BodyInfo> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Like [`Snapshot::borrow_body`], restricted to planets. Moons may share
    /// a planet's name.
    pub fn borrow_planet(&self, name: &str) -> Option<&BodyInfo> {
        self.bodies
            .iter()
            .find(|b| b.kind == BodyKind::Planet && b.name == name)
    }

    pub fn borrow_star(&self) -> Option<&BodyInfo> {
        self.bodies.iter().find(|b| b.kind == BodyKind::Star)
    }
}
