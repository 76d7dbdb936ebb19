use crate::display::{render, Display};
use axum::{extract::Extension, response::Html};
use std::sync::Arc;
use tracing::instrument;

// axum handler for the banner page
#[instrument(skip(display))]
pub async fn page(display: Extension<Arc<Display>>) -> Html<String> {
    let session = display.session().await;
    Html(render::page(&session).into_string())
}
