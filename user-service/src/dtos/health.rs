use serde::Serialize;

#[derive(Debug, Serialize, PartialEq)]
pub struct HealthResponse {
    pub status: &'static str,
    pub db: &'static str,
}

impl HealthResponse {
    pub fn connected() -> Self {
        Self {
            status: "ok",
            db: "connected",
        }
    }

    pub fn disconnected() -> Self {
        Self {
            status: "error",
            db: "disconnected",
        }
    }
}
