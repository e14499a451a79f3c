use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::flash::{self, Flash, IncomingFlashes};

/// View document handed to the presentation layer: which template to
/// render, what to flash, and the data it needs.
#[derive(Serialize)]
pub struct Page<T> {
    template: &'static str,
    flashes: Vec<Flash>,
    context: T,
    #[serde(skip)]
    status: StatusCode,
    #[serde(skip)]
    clears_flash_cookie: bool,
}

#[derive(Serialize, Clone, Copy, Debug, Default)]
pub struct Empty {}

impl<T: Serialize> Page<T> {
    pub fn new(template: &'static str, context: T) -> Self {
        Page {
            template,
            flashes: Vec::new(),
            context,
            status: StatusCode::OK,
            clears_flash_cookie: false,
        }
    }

    /// Shows the flashes of the previous redirect and consumes the cookie.
    pub fn with_flashes(mut self, incoming: IncomingFlashes) -> Self {
        if !incoming.is_empty() {
            self.clears_flash_cookie = true;
            self.flashes.extend(incoming.into_inner());
        }
        self
    }

    pub fn flash(mut self, flash: Flash) -> Self {
        self.flashes.push(flash);
        self
    }
}

impl Page<Empty> {
    pub fn home() -> Self {
        Page::new("pages/home.html", Empty {})
    }

    pub fn not_found() -> Self {
        Page {
            status: StatusCode::NOT_FOUND,
            ..Page::new("errors/404.html", Empty {})
        }
    }

    pub fn server_error() -> Self {
        Page {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            ..Page::new("errors/500.html", Empty {})
        }
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        let clears_flash_cookie = self.clears_flash_cookie;
        let mut response = (status, Json(self)).into_response();
        if clears_flash_cookie {
            response
                .headers_mut()
                .append(SET_COOKIE, flash::clear_cookie());
        }
        response
    }
}
