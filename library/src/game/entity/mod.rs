use serde::{Deserialize, Serialize};

pub mod moon;
pub mod planet;
pub mod star;

pub use moon::Moon;
pub use planet::Planet;
pub use star::Star;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

impl BodyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyKind::Star => "Star",
            BodyKind::Planet => "Planet",
            BodyKind::Moon => "Moon",
        }
    }
}
