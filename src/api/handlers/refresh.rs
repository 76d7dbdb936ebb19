use crate::display::Display;
use axum::{extract::Extension, response::Redirect};
use std::sync::Arc;
use tracing::instrument;

#[utoipa::path(
    post,
    path= "/refresh",
    responses (
        (status = 303, description = "Display re-initialized, redirect to the banner page")
    ),
    tag = "environment",
)]
/// Re-initialize the display: new timestamp, uptime back to zero.
#[instrument(skip(display))]
pub async fn refresh(display: Extension<Arc<Display>>) -> Redirect {
    display.refresh().await;
    Redirect::to("/")
}
