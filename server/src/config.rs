use std::{
    env,
    error::Error,
    fmt::{self, Display},
    num::ParseIntError,
    path::PathBuf,
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MODEL_PATH: &str = "ml-model.json";

/// Startup settings of the prediction service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
}

impl ServerConfig {
    /// Reads `HOST`, `PORT` and `MODEL_PATH` from the process environment.
    ///
    /// # Errors
    /// Returns a `ConfigErr` if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigErr> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of a variable, `None` when it is unset.
    ///
    /// # Returns
    /// The configuration with defaults for every unset variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigErr::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            model_path: lookup("MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
                .into(),
        })
    }

    /// The address to bind the listener to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug)]
pub enum ConfigErr {
    InvalidPort {
        value: String,
        source: ParseIntError,
    },
}

impl Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::InvalidPort { value, source } => {
                write!(f, "invalid PORT {value:?}: {source}")
            }
        }
    }
}

impl Error for ConfigErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigErr::InvalidPort { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(vars: &'a [(&str, &str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        move |key| vars.get(key).map(|value| value.to_string())
    }

    #[test]
    fn defaults_bind_every_interface_on_8080() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.model_path, PathBuf::from("ml-model.json"));
    }

    #[test]
    fn port_and_model_path_are_overridable() {
        let config =
            ServerConfig::from_lookup(lookup(&[("PORT", "9090"), ("MODEL_PATH", "/models/m.json")]))
                .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.model_path, PathBuf::from("/models/m.json"));
    }

    #[test]
    fn invalid_port_is_rejected() {
        for value in ["http", "", "70000", "-1"] {
            let err = ServerConfig::from_lookup(lookup(&[("PORT", value)])).unwrap_err();
            assert!(matches!(err, ConfigErr::InvalidPort { value: ref v, .. } if v == value));
        }
    }
}
