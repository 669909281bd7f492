pub mod auth;
pub mod lifecycle;

pub use auth::{AuthService, Claims};
pub use lifecycle::{ResourceManager, Upload};
