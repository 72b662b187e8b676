use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Can't open configuration {0}: {1}")]
    ConfigOpenError(PathBuf, std::io::Error),
    #[error("YAML: can't deserialize {0}: {1}")]
    ConfigYamlError(PathBuf, serde_yaml::Error),
    #[error("JSON: can't deserialize {0}: {1}")]
    ConfigJsonError(PathBuf, serde_json::Error),
    #[error("Unsupported configuration format for {0} (expected .yml, .yaml or .json)")]
    UnsupportedConfigFormat(PathBuf),
    #[error("Invalid body '{0}': {1}")]
    InvalidBody(String, String),
    #[error("Planet '{0}' is declared more than once")]
    DuplicatePlanet(String),
    #[error("Moon '{1}' is declared more than once around '{0}'")]
    DuplicateMoon(String, String),
    #[error("Configuration holds no planet")]
    EmptySystem,
    #[error("Invalid star: {0}")]
    InvalidStar(String),
    #[error("Invalid time scale {0}: must be finite and non-negative")]
    InvalidTimeScale(f64),
    #[error("Invalid tick frequency {0} Hz: must be finite and positive")]
    InvalidFrequency(f64),
    #[error("Physics task encountered an error: {0}")]
    CriticalFromPhysics(String),
}
