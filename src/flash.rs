use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Redirect, Response};
use log::warn;
use serde::Serialize;
use url::form_urlencoded;

pub const FLASH_COOKIE: &str = "fyyur_flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
        }
    }

    fn parse(level: &str) -> Option<Self> {
        match level {
            "success" => Some(Level::Success),
            "error" => Some(Level::Error),
            _ => None,
        }
    }
}

/// A one-shot notification for the next page the user sees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Flash {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Flash {
            level: Level::Error,
            message: message.into(),
        }
    }
}

fn encode(flashes: &[Flash]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for flash in flashes {
        serializer.append_pair(flash.level.as_str(), &flash.message);
    }
    serializer.finish()
}

fn decode(value: &str) -> Vec<Flash> {
    form_urlencoded::parse(value.as_bytes())
        .filter_map(|(level, message)| {
            Some(Flash {
                level: Level::parse(&level)?,
                message: message.into_owned(),
            })
        })
        .collect()
}

pub(crate) fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("fyyur_flash=; Path=/; Max-Age=0")
}

/// Flashes left in the cookie by a previous redirect.
#[derive(Debug, Default)]
pub struct IncomingFlashes(Vec<Flash>);

impl IncomingFlashes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Flash> {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for IncomingFlashes
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let prefix = format!("{FLASH_COOKIE}=");
        let flashes = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|header| header.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|cookie| cookie.trim().strip_prefix(prefix.as_str()))
            .flat_map(decode)
            .collect();
        Ok(IncomingFlashes(flashes))
    }
}

/// A 303 redirect that carries flashes to the page it points at.
pub struct FlashRedirect {
    to: String,
    flashes: Vec<Flash>,
}

impl FlashRedirect {
    pub fn to(uri: impl Into<String>, flash: Flash) -> Self {
        FlashRedirect {
            to: uri.into(),
            flashes: vec![flash],
        }
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        let mut response = Redirect::to(&self.to).into_response();
        let cookie = format!(
            "{FLASH_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            encode(&self.flashes)
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(err) => warn!("Dropping flash for {}: {}", self.to, err),
        }
        response
    }
}
