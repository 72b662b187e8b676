use std::path::Path;

use super::entity::{BodyKind, Planet, Star};
use super::integrator;
use super::repr::{Position, Seconds, Velocity};
use crate::config::SystemConfig;
use crate::error::Error;
use crate::snapshot::{BodyInfo, Snapshot};
use crate::Result;

/// One star and the planets, with their moons, that orbit it.
#[derive(Clone, Debug)]
pub struct SolarSystem {
    pub(crate) star: Star,
    pub(crate) planets: Vec<Planet>,
    pub(crate) ticks: u64,
    pub(crate) elapsed: Seconds,
}

impl SolarSystem {
    pub fn new(star: Star) -> SolarSystem {
        SolarSystem {
            star,
            planets: Vec::default(),
            ticks: 0,
            elapsed: 0.,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SolarSystem> {
        let config = SystemConfig::from_path(path)?;
        SolarSystem::from_config(Star::sun(), &config)
    }

    pub fn from_config(star: Star, config: &SystemConfig) -> Result<SolarSystem> {
        config.validate()?;

        let mut system = SolarSystem::new(star);

        for descriptor in &config.planets {
            let mut planet = Planet::new(
                descriptor.name.clone(),
                Position::new(descriptor.aphelion, 0.),
                Velocity::new(0., descriptor.initial_speed),
                descriptor.radius,
                descriptor.mass,
            );

            if planet.mass == 0. && !descriptor.moons.is_empty() {
                log::warn!(
                    "{} has no mass, its {} moon(s) will only feel {}",
                    planet.name,
                    descriptor.moons.len(),
                    system.star.name
                );
            }

            for moon in &descriptor.moons {
                planet.spawn_moon(
                    moon.name.clone(),
                    moon.apoapsis,
                    moon.initial_speed,
                    moon.radius,
                );
            }

            system.add_planet(planet)?;
        }

        log::info!(
            "System ready: {} and {} planet(s), {} body(ies) total",
            system.star.name,
            system.planets.len(),
            system.body_count()
        );

        Ok(system)
    }

    pub fn add_planet(&mut self, planet: Planet) -> Result<()> {
        if self.planets.iter().any(|p| p.name == planet.name) {
            return Err(Error::DuplicatePlanet(planet.name));
        }
        self.planets.push(planet);
        Ok(())
    }

    /// One tick: every body advances by the same `time_step`.
    pub fn step(&mut self, time_step: Seconds) {
        integrator::step(&self.star, &mut self.planets, time_step);
        self.ticks += 1;
        self.elapsed += time_step;
    }

    pub fn borrow_star(&self) -> &Star {
        &self.star
    }

    pub fn borrow_planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn borrow_planet(&self, name: &str) -> Option<&Planet> {
        self.planets.iter().find(|p| p.name == name)
    }

    pub fn get_ticks(&self) -> u64 {
        self.ticks
    }

    pub fn get_elapsed(&self) -> Seconds {
        self.elapsed
    }

    pub fn body_count(&self) -> usize {
        1 + self
            .planets
            .iter()
            .map(|p| 1 + p.moons.len())
            .sum::<usize>()
    }

    pub fn snapshot(&self, time_scale: f64) -> Snapshot {
        let mut bodies = Vec::with_capacity(self.body_count());

        let star_position = self.star.get_position();
        bodies.push(BodyInfo {
            name: self.star.name.clone(),
            kind: BodyKind::Star,
            parent: None,
            position: [star_position.x, star_position.y],
            radius: self.star.radius,
        });

        for planet in &self.planets {
            bodies.push(BodyInfo {
                name: planet.name.clone(),
                kind: BodyKind::Planet,
                parent: None,
                position: [planet.position.x, planet.position.y],
                radius: planet.radius,
            });

            for moon in &planet.moons {
                bodies.push(BodyInfo {
                    name: moon.name.clone(),
                    kind: BodyKind::Moon,
                    parent: Some(planet.name.clone()),
                    position: [moon.position.x, moon.position.y],
                    radius: moon.radius,
                });
            }
        }

        Snapshot {
            tick: self.ticks,
            elapsed: self.elapsed,
            time_scale,
            bodies,
        }
    }
}
