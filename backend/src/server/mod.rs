//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::page::PageComposer;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::pages::render_page;
use crate::inbound::http::products::{get_product, search_products};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::json_config;

/// Shared state handed to every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    /// Probe state flipped once the server is bound.
    pub health_state: web::Data<HealthState>,
    /// Ports and page composer used by the handlers.
    pub http_state: web::Data<HttpState>,
}

/// Wire the in-memory catalogue into both ports and the page composer.
#[must_use]
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let pages = PageComposer::new(
        config.template.clone(),
        config.site.clone(),
        config.catalogue.clone(),
        config.catalogue.clone(),
    );
    web::Data::new(HttpState::new(config.catalogue.clone(), Arc::new(pages)))
}

/// Assemble the application: product API under `/products`, health probes,
/// and the SSR page handler for every other path.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/products")
        .service(get_product)
        .service(search_products);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app.default_service(web::route().to(render_page))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: build_http_state(config),
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
