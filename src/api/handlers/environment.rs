use crate::display::{Display, EnvironmentSnapshot};
use axum::{extract::Extension, response::Json};
use std::sync::Arc;
use tracing::{debug, instrument};

#[utoipa::path(
    get,
    path= "/api/environment",
    responses (
        (status = 200, description = "Current environment, display attributes and uptime", body = EnvironmentSnapshot)
    ),
    tag = "environment",
)]
/// Snapshot of the current display session.
#[instrument(skip(display))]
pub async fn environment(display: Extension<Arc<Display>>) -> Json<EnvironmentSnapshot> {
    let snapshot = display.session().await.snapshot();
    debug!(environment = %snapshot.environment, uptime = snapshot.uptime_seconds, "snapshot");
    Json(snapshot)
}
