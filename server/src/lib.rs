pub mod config;
pub mod envelope;
pub mod routes;

pub use config::{ConfigErr, ServerConfig};
pub use envelope::{Envelope, Status};
pub use routes::{LIVENESS, router};
