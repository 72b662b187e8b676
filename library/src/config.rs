//! Planet and moon descriptors loaded once at startup.
//!
//! The document is a plain list of planets, in YAML or JSON:
//!
//! ```yaml
//! - name: Earth
//!   aphelion: 1.521e11      # m, initial x position
//!   initial_speed: 29290    # m/s, initial y velocity
//!   radius: 6.371e6         # m
//!   mass: 5.972e24          # kg, optional
//!   moons:                  # optional
//!     - name: Moon
//!       apoapsis: 4.054e8   # m, x offset from the planet
//!       initial_speed: 970  # m/s, added to the planet's y velocity
//!       radius: 1.7374e6    # m
//! ```
//!
//! Unknown keys are ignored.

use crate::error::Error;
use crate::Result;
use is_printable::IsPrintable;
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MoonConfig {
    pub name: String,
    pub apoapsis: f64,
    pub initial_speed: f64,
    pub radius: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlanetConfig {
    pub name: String,
    pub aphelion: f64,
    pub initial_speed: f64,
    pub radius: f64,
    #[serde(default)]
    pub mass: f64,
    #[serde(default)]
    pub moons: Vec<MoonConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(transparent)]
pub struct SystemConfig {
    pub planets: Vec<PlanetConfig>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<ConfigFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(Error::UnsupportedConfigFormat(path.to_path_buf())),
        }
    }
}

impl SystemConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        info!("Loading {}", path.display());
        let text =
            fs::read_to_string(path).map_err(|err| Error::ConfigOpenError(path.to_path_buf(), err))?;
        Self::parse(&text, format, path)
    }

    /// Parses and validates `text`. `origin` only labels errors.
    pub fn parse(text: &str, format: ConfigFormat, origin: &Path) -> Result<SystemConfig> {
        let config: SystemConfig = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(text)
                .map_err(|err| Error::ConfigYamlError(PathBuf::from(origin), err))?,
            ConfigFormat::Json => serde_json::from_str(text)
                .map_err(|err| Error::ConfigJsonError(PathBuf::from(origin), err))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.planets.is_empty() {
            return Err(Error::EmptySystem);
        }

        if let Some(name) = self.planets.iter().map(|p| p.name.as_str()).duplicates().next() {
            return Err(Error::DuplicatePlanet(name.to_string()));
        }

        for planet in &self.planets {
            planet.validate()?;
        }

        Ok(())
    }
}

impl PlanetConfig {
    fn validate(&self) -> Result<()> {
        check_name(&self.name)?;
        check_finite(&self.name, "aphelion", self.aphelion)?;
        check_finite(&self.name, "initial_speed", self.initial_speed)?;
        check_non_negative(&self.name, "radius", self.radius)?;
        check_non_negative(&self.name, "mass", self.mass)?;

        if let Some(name) = self.moons.iter().map(|m| m.name.as_str()).duplicates().next() {
            return Err(Error::DuplicateMoon(self.name.clone(), name.to_string()));
        }

        for moon in &self.moons {
            check_name(&moon.name)?;
            check_finite(&moon.name, "apoapsis", moon.apoapsis)?;
            check_finite(&moon.name, "initial_speed", moon.initial_speed)?;
            check_non_negative(&moon.name, "radius", moon.radius)?;
            if moon.apoapsis == 0. {
                return Err(Error::InvalidBody(
                    moon.name.clone(),
                    format!("apoapsis must not be zero (it would sit inside {})", self.name),
                ));
            }
        }

        Ok(())
    }
}

fn check_name(name: &String) -> Result<()> {
    if name.trim().is_empty() || !name.is_printable() {
        return Err(Error::InvalidBody(
            name.clone(),
            "name must be non-empty and printable".to_string(),
        ));
    }
    Ok(())
}

fn check_finite(name: &str, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::InvalidBody(
            name.to_string(),
            format!("{} must be finite, got {}", field, value),
        ));
    }
    Ok(())
}

fn check_non_negative(name: &str, field: &str, value: f64) -> Result<()> {
    check_finite(name, field, value)?;
    if value < 0. {
        return Err(Error::InvalidBody(
            name.to_string(),
            format!("{} must not be negative, got {}", field, value),
        ));
    }
    Ok(())
}
