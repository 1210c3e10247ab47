//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod product_service;
mod user_service;

#[cfg(test)]
pub use product_service::MockProductService;
pub use product_service::{ProductService, ProductServiceError};
#[cfg(test)]
pub use user_service::MockUserService;
pub use user_service::{UserService, UserServiceError};
