//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ORBITAL_*` environment variables and an
//! optional configuration file, in OrthoConfig's usual precedence order.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::page::DEFAULT_PUBLIC_URL;

const DEFAULT_TEMPLATE_PATH: &str = "frontend/dist/index.html";

/// Configuration values for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ORBITAL")]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[ortho_config(default = "0.0.0.0:8080".to_owned())]
    pub bind_addr: String,
    /// HTML shell produced by the frontend build.
    pub template_path: Option<PathBuf>,
    /// JSON catalogue seeding the in-memory product store.
    pub catalogue_path: Option<PathBuf>,
    /// Public base URL used in canonical and Open Graph links.
    pub public_url: Option<String>,
}

impl ServerSettings {
    /// Configured listen address, `0.0.0.0:8080` unless overridden.
    ///
    /// # Errors
    /// Returns `InvalidInput` when the value is not a socket address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let raw = self.bind_addr.as_str();
        raw.parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {err}"),
            )
        })
    }

    /// Configured template path, falling back to `frontend/dist/index.html`.
    #[must_use]
    pub fn template_path(&self) -> PathBuf {
        self.template_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_PATH))
    }

    /// Configured catalogue path, if any.
    #[must_use]
    pub fn catalogue_path(&self) -> Option<&PathBuf> {
        self.catalogue_path.as_ref()
    }

    /// Configured public URL, falling back to the production site.
    ///
    /// # Errors
    /// Returns `InvalidInput` when the value is not an absolute URL.
    pub fn public_url(&self) -> io::Result<Url> {
        let raw = self.public_url.as_deref().unwrap_or(DEFAULT_PUBLIC_URL);
        Url::parse(raw).map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid public url {raw:?}: {err}"),
            )
        })
    }
}
