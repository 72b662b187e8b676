pub use nalgebra::Vector2;

pub type Distance = f64; // m
pub type Speed = f64; // m/s
pub type Mass = f64; // kg
pub type Seconds = f64; // simulated s

pub type Position = Vector2<f64>;
pub type Velocity = Vector2<f64>;
pub type Acceleration = Vector2<f64>;

