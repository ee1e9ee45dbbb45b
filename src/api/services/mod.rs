pub mod admin;
pub mod go;
pub mod health;
pub mod public;

pub use go::GoService;
pub use health::{AppStartTime, HealthService};
pub use public::PublicService;
