#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use fyyur::DatabaseState;
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

pub const MUSICAL_HOP: &str = "name=The+Musical+Hop&city=San+Francisco&state=CA\
    &address=1015+Folsom+Street&phone=123-123-1234&genres=Jazz&genres=Reggae\
    &website=https%3A%2F%2Fwww.themusicalhop.com\
    &facebook_link=https%3A%2F%2Fwww.facebook.com%2FTheMusicalHop\
    &seeking_talent=y&seeking_description=We+are+on+the+lookout+for+a+local+artist";

pub const GUNS_N_PETALS: &str = "name=Guns+N+Petals&city=San+Francisco&state=CA\
    &phone=326-123-5000&genres=Rock+n+Roll\
    &image_link=https%3A%2F%2Fimages.example.com%2Fguns.jpg\
    &seeking_venue=y&seeking_description=Looking+for+shows";

/// Router over a fresh in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub connection: DatabaseConnection,
}

impl TestApp {
    pub async fn new() -> Self {
        let connection = Database::connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory database");
        Migrator::up(&connection, None)
            .await
            .expect("failed to run migrations in tests");
        let router = fyyur::router(DatabaseState {
            connection: connection.clone(),
        });
        TestApp { router, connection }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        form: Option<&str>,
        cookie: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form.to_string())
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> Response {
        self.request(Method::GET, uri, None, Some(cookie)).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> Response {
        self.request(Method::POST, uri, Some(form), None).await
    }

    /// GETs `uri` and returns the view document, asserting a 200.
    pub async fn page(&self, uri: &str) -> Value {
        let response = self.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        read_json(response).await
    }

    pub async fn create_venue(&self, form: &str) -> Value {
        let page = read_json(self.post_form("/venues/create", form).await).await;
        assert_eq!(page["flashes"][0]["level"], "success", "{page}");
        page
    }

    pub async fn create_artist(&self, form: &str) -> Value {
        let page = read_json(self.post_form("/artists/create", form).await).await;
        assert_eq!(page["flashes"][0]["level"], "success", "{page}");
        page
    }
}

pub async fn read_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read response body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response is not a view document")
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("missing location header")
}

/// The `name=value` part of the first Set-Cookie header.
pub fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub fn flash_messages(page: &Value) -> Vec<String> {
    page["flashes"]
        .as_array()
        .map(|flashes| {
            flashes
                .iter()
                .filter_map(|flash| flash["message"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
