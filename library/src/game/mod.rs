pub mod entity;
pub mod gravity;
pub mod integrator;
pub mod repr;
pub mod system;
