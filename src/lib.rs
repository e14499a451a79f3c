use axum::routing::{get, post, MethodRouter};
use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::catch_panic::CatchPanicLayer;

use crate::endpoint_handlers::{artists, index, not_found, shows, venues};

pub mod config;
pub mod endpoint_handlers;
pub mod errors;
pub mod flash;
pub mod forms;
pub mod responses;

#[derive(Clone)]
pub struct DatabaseState {
    pub connection: DatabaseConnection,
}

/// Methods a route does not serve get the 404 page too.
fn page(route: MethodRouter<DatabaseState>) -> MethodRouter<DatabaseState> {
    route.fallback(not_found)
}

pub fn router(state: DatabaseState) -> Router {
    Router::new()
        .route("/", page(get(index)))
        // Venues
        .route("/venues", page(get(venues::venues)))
        .route("/venues/search", page(post(venues::search)))
        .route(
            "/venues/create",
            page(get(venues::create_venue_form).post(venues::create_venue_submission)),
        )
        .route(
            "/venues/:venue_id",
            page(get(venues::show_venue).post(venues::delete_venue)),
        )
        .route(
            "/venues/:venue_id/edit",
            page(get(venues::edit_venue_form).post(venues::edit_venue_submission)),
        )
        // Artists
        .route("/artists", page(get(artists::artists)))
        .route("/artists/search", page(post(artists::search)))
        .route(
            "/artists/create",
            page(get(artists::create_artist_form).post(artists::create_artist_submission)),
        )
        .route(
            "/artists/:artist_id",
            page(get(artists::show_artist).post(artists::delete_artist)),
        )
        .route(
            "/artists/:artist_id/edit",
            page(get(artists::edit_artist_form).post(artists::edit_artist_submission)),
        )
        // Shows
        .route("/shows", page(get(shows::shows)))
        .route(
            "/shows/create",
            page(get(shows::create_show_form).post(shows::create_show_submission)),
        )
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(errors::panic_response))
        .with_state(state)
}
