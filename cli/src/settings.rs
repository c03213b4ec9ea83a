use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use todo_core::{ControllerConfig, Reconcile};

use crate::args::Args;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Deserialize)]
pub struct Server {
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Request {
    /// Zero disables the timeout.
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileMode {
    Merge,
    Refetch,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub request: Request,
    pub reconcile: ReconcileMode,
}

impl Settings {
    /// Defaults, then the optional TOML file at `path`, then `TODO__*`
    /// environment variables.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.base_url", DEFAULT_BASE_URL)?
            .set_default("request.timeout_secs", 10)?
            .set_default("reconcile", "merge")?
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("TODO").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Command-line flags win over every other source.
    pub fn apply_overrides(&mut self, args: &Args) {
        if let Some(base_url) = &args.base_url {
            self.server.base_url = base_url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.request.timeout_secs = timeout;
        }
        if args.refetch {
            self.reconcile = ReconcileMode::Refetch;
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            request_timeout: self.request_timeout(),
            reconcile: match self.reconcile {
                ReconcileMode::Merge => Reconcile::Merge,
                ReconcileMode::Refetch => Reconcile::Refetch,
            },
        }
    }
}
