use axum::extract::{Path, State};
use log::{error, info, warn};
use queries::venues::{
    add_venue, delete_venue_by_id, get_venue_by_id, get_venue_detail, get_venues_by_area,
    search_venues, update_venue,
};
use validator::Validate;

use crate::endpoint_handlers::{now, parse_id, titled};
use crate::errors::AppError;
use crate::flash::{Flash, FlashRedirect, IncomingFlashes};
use crate::forms::{describe, FormFields, NewVenueForm, SearchForm, VenueEditForm};
use crate::responses::common::{FormChoices, SearchContext};
use crate::responses::venue_response::{EditVenueContext, VenueContext, VenuesContext};
use crate::responses::{Empty, Page};
use crate::DatabaseState;

pub async fn venues(
    State(state): State<DatabaseState>,
    flashes: IncomingFlashes,
) -> Result<Page<VenuesContext>, AppError> {
    let areas = get_venues_by_area(&state.connection, now()).await?;
    Ok(Page::new("pages/venues.html", VenuesContext::from(areas)).with_flashes(flashes))
}

pub async fn search(
    State(state): State<DatabaseState>,
    fields: FormFields,
) -> Result<Page<SearchContext>, AppError> {
    let form = SearchForm::from(&fields);
    let found = search_venues(&state.connection, &form.search_term, now()).await?;
    info!("Venue search {:?} matched {}", form.search_term, found.len());
    Ok(Page::new(
        "pages/search_venues.html",
        SearchContext::new(form.search_term, found),
    ))
}

pub async fn show_venue(
    State(state): State<DatabaseState>,
    Path(venue_id): Path<String>,
    flashes: IncomingFlashes,
) -> Result<Page<VenueContext>, AppError> {
    let venue_id = parse_id(&venue_id)?;
    let detail = get_venue_detail(&state.connection, venue_id, now()).await?;
    Ok(Page::new("pages/show_venue.html", VenueContext::from(detail)).with_flashes(flashes))
}

pub async fn create_venue_form(flashes: IncomingFlashes) -> Page<FormChoices> {
    Page::new("forms/new_venue.html", FormChoices::default()).with_flashes(flashes)
}

pub async fn create_venue_submission(
    State(state): State<DatabaseState>,
    fields: FormFields,
) -> Page<Empty> {
    let form = NewVenueForm::from(&fields);
    let name = form.name.clone();
    let flash = match form.validate() {
        Err(errors) => {
            warn!("Rejected venue {:?}: {}", name, errors);
            Flash::error(format!(
                "{} could not be listed. {}",
                titled("Venue", &name),
                describe(&errors)
            ))
        }
        Ok(()) => match add_venue(&state.connection, form.into_model()).await {
            Ok(venue) => Flash::success(format!("Venue {} was successfully listed!", venue.name)),
            Err(err) => {
                error!("Listing venue {:?} failed: {}", name, err);
                Flash::error(format!(
                    "An error occurred. {} could not be listed.",
                    titled("Venue", &name)
                ))
            }
        },
    };
    Page::home().flash(flash)
}

pub async fn delete_venue(
    State(state): State<DatabaseState>,
    Path(venue_id): Path<String>,
) -> Result<FlashRedirect, AppError> {
    let venue_id = parse_id(&venue_id)?;
    let flash = match delete_venue_by_id(&state.connection, venue_id).await {
        Ok(venue) => Flash::success(format!("Venue {} was successfully deleted!", venue.name)),
        Err(err) if err.is_not_found() => return Err(err.into()),
        Err(err) => {
            error!("Deleting venue {} failed: {}", venue_id, err);
            Flash::error(format!(
                "An error occurred. Venue with id {} could not be deleted.",
                venue_id
            ))
        }
    };
    Ok(FlashRedirect::to("/venues", flash))
}

pub async fn edit_venue_form(
    State(state): State<DatabaseState>,
    Path(venue_id): Path<String>,
    flashes: IncomingFlashes,
) -> Result<Page<EditVenueContext>, AppError> {
    let venue_id = parse_id(&venue_id)?;
    let venue = get_venue_by_id(&state.connection, venue_id).await?;
    Ok(Page::new("forms/edit_venue.html", EditVenueContext::from(venue)).with_flashes(flashes))
}

pub async fn edit_venue_submission(
    State(state): State<DatabaseState>,
    Path(venue_id): Path<String>,
    fields: FormFields,
) -> Result<FlashRedirect, AppError> {
    let venue_id = parse_id(&venue_id)?;
    let detail_page = format!("/venues/{venue_id}");
    let form = VenueEditForm::from(&fields);

    if let Err(errors) = form.validate() {
        let venue = get_venue_by_id(&state.connection, venue_id).await?;
        warn!("Rejected edit of venue {}: {}", venue_id, errors);
        return Ok(FlashRedirect::to(
            detail_page,
            Flash::error(format!(
                "Venue {} could not be edited. {}",
                venue.name,
                describe(&errors)
            )),
        ));
    }

    let flash = match update_venue(&state.connection, venue_id, form.into_changes()).await {
        Ok(venue) => Flash::success(format!("Venue {} was successfully edited!", venue.name)),
        Err(err) if err.is_not_found() => return Err(err.into()),
        Err(err) => {
            error!("Editing venue {} failed: {}", venue_id, err);
            Flash::error(format!(
                "An error occurred. Venue with id {} could not be edited.",
                venue_id
            ))
        }
    };
    Ok(FlashRedirect::to(detail_page, flash))
}
