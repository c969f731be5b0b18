pub mod health;
pub mod users;

pub use health::HealthResponse;
pub use users::{DeleteResponse, UserPayload, UserResponse};
