use axum::response::Json;
use serde_json::{Value, json};

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the voxplay API"
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Landing message for browsers once the login has gone through.
pub async fn success_page() -> Json<Value> {
    Json(json!({
        "message": "Login successful, you can now use voice commands!"
    }))
}
