use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
};
use log::{debug, warn};
use model::{FeatureVector, Predictor};

use crate::envelope::Envelope;

/// The fixed body of the liveness check.
pub const LIVENESS: &str = "I'M ALIVE!  <<<  2  <<<  4";

/// State shared by every request handler, read only after startup.
#[derive(Clone)]
pub struct AppState {
    predictor: Arc<dyn Predictor>,
}

/// Builds the service routes around an already loaded model.
///
/// # Arguments
/// * `predictor` - The prediction capability every `/predict` request is answered with.
///
/// # Returns
/// A router ready to be served.
pub fn router(predictor: Arc<dyn Predictor>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/predict", post(predict))
        .layer(DefaultBodyLimit::disable())
        .with_state(AppState { predictor })
}

async fn liveness() -> &'static str {
    LIVENESS
}

// Raw body: malformed json must still answer the error envelope, whatever the content type.
async fn predict(State(state): State<AppState>, body: Bytes) -> Json<Envelope> {
    let features = match FeatureVector::from_json_slice(&body) {
        Ok(features) => features,
        Err(e) => {
            warn!("rejected prediction request: {e}");
            return Json(Envelope::error());
        }
    };

    let value = state.predictor.predict(&features);
    if !value.is_finite() {
        warn!(value = value; "prediction is not a finite number");
        return Json(Envelope::error());
    }
    debug!(value = value; "served prediction");

    Json(Envelope::ok(value))
}
