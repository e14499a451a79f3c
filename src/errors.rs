use std::any::Any;

use axum::response::{IntoResponse, Response};
use log::{error, warn};
use queries::StoreError;

use crate::responses::Page;

/// Failures that end a request with an error page instead of its view.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("page not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("could not read request body: {0}")]
    Body(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => Page::not_found().into_response(),
            AppError::Store(err) if err.is_not_found() => {
                warn!("{}", err);
                Page::not_found().into_response()
            }
            err => {
                error!("{}", err);
                Page::server_error().into_response()
            }
        }
    }
}

pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic"
    };
    error!("Handler panicked: {}", detail);
    Page::server_error().into_response()
}
