use axum::extract::State;
use log::{error, warn};
use queries::artists::get_all_artists;
use queries::shows::{add_show, get_all_shows};
use queries::venues::get_all_venues;
use validator::Validate;

use crate::errors::AppError;
use crate::flash::{Flash, IncomingFlashes};
use crate::forms::{describe, FormFields, NewShowForm};
use crate::responses::show_response::{NewShowContext, ShowsContext};
use crate::responses::{Empty, Page};
use crate::DatabaseState;

pub async fn shows(
    State(state): State<DatabaseState>,
    flashes: IncomingFlashes,
) -> Result<Page<ShowsContext>, AppError> {
    let shows = get_all_shows(&state.connection).await?;
    Ok(Page::new("pages/shows.html", ShowsContext::from(shows)).with_flashes(flashes))
}

pub async fn create_show_form(
    State(state): State<DatabaseState>,
    flashes: IncomingFlashes,
) -> Result<Page<NewShowContext>, AppError> {
    let venues = get_all_venues(&state.connection).await?;
    let artists = get_all_artists(&state.connection).await?;
    Ok(Page::new("forms/new_show.html", NewShowContext::new(venues, artists)).with_flashes(flashes))
}

pub async fn create_show_submission(
    State(state): State<DatabaseState>,
    fields: FormFields,
) -> Page<Empty> {
    let form = NewShowForm::from(&fields);
    if let Err(errors) = form.validate() {
        warn!("Rejected show: {}", errors);
        return Page::home().flash(Flash::error(format!(
            "Show could not be listed. {}",
            describe(&errors)
        )));
    }
    let Some(show) = form.into_model() else {
        return Page::home().flash(Flash::error("An error occurred. Show could not be listed."));
    };

    let flash = match add_show(&state.connection, show).await {
        Ok(_) => Flash::success("Show was successfully listed!"),
        Err(err) if err.is_not_found() => {
            warn!("Rejected show: {}", err);
            Flash::error(format!("Show could not be listed. The {}.", err))
        }
        Err(err) => {
            error!("Listing show failed: {}", err);
            Flash::error("An error occurred. Show could not be listed.")
        }
    };
    Page::home().flash(flash)
}
