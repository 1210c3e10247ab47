//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::page::{PageTemplate, SiteMetadata};
use crate::outbound::InMemoryCatalogue;
use crate::settings::ServerSettings;

/// Everything the server needs before it binds a socket.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) template: Arc<PageTemplate>,
    pub(crate) site: SiteMetadata,
    pub(crate) catalogue: Arc<InMemoryCatalogue>,
}

impl ServerConfig {
    /// Construct a configuration from already loaded parts.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, template: PageTemplate, site: SiteMetadata) -> Self {
        Self {
            bind_addr,
            template: Arc::new(template),
            site,
            catalogue: Arc::new(InMemoryCatalogue::default()),
        }
    }

    /// Replace the product and owner store.
    #[must_use]
    pub fn with_catalogue(mut self, catalogue: InMemoryCatalogue) -> Self {
        self.catalogue = Arc::new(catalogue);
        self
    }

    /// Load the template and catalogue named by `settings`.
    ///
    /// Without a catalogue path the store starts empty, so every product
    /// lookup yields `not_found`.
    ///
    /// # Errors
    /// Propagates invalid addresses or URLs and unreadable files.
    pub fn from_settings(settings: &ServerSettings) -> std::io::Result<Self> {
        let bind_addr = settings.bind_addr()?;
        let template_path = settings.template_path();
        let template = PageTemplate::load(&template_path).map_err(|err| {
            std::io::Error::new(
                err.kind(),
                format!("failed to read template {}: {err}", template_path.display()),
            )
        })?;
        let site = SiteMetadata::with_public_url(&settings.public_url()?);
        let catalogue = match settings.catalogue_path() {
            Some(path) => InMemoryCatalogue::load(path)?,
            None => {
                warn!("no catalogue configured; serving an empty product store");
                InMemoryCatalogue::default()
            }
        };
        info!(
            template = %template_path.display(),
            products = catalogue.product_count(),
            "server configured"
        );
        Ok(Self::new(bind_addr, template, site).with_catalogue(catalogue))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Site metadata used when rendering pages.
    #[must_use]
    pub fn site(&self) -> &SiteMetadata {
        &self.site
    }
}
