use axum::extract::{Path, State};
use log::{error, info, warn};
use queries::artists::{
    add_artist, delete_artist_by_id, get_all_artists, get_artist_by_id, get_artist_detail,
    search_artists, update_artist,
};
use validator::Validate;

use crate::endpoint_handlers::{now, parse_id, titled};
use crate::errors::AppError;
use crate::flash::{Flash, FlashRedirect, IncomingFlashes};
use crate::forms::{describe, ArtistEditForm, FormFields, NewArtistForm, SearchForm};
use crate::responses::artist_response::{ArtistContext, ArtistsContext, EditArtistContext};
use crate::responses::common::{FormChoices, SearchContext};
use crate::responses::{Empty, Page};
use crate::DatabaseState;

pub async fn artists(
    State(state): State<DatabaseState>,
    flashes: IncomingFlashes,
) -> Result<Page<ArtistsContext>, AppError> {
    let artists = get_all_artists(&state.connection).await?;
    Ok(Page::new("pages/artists.html", ArtistsContext::from(artists)).with_flashes(flashes))
}

pub async fn search(
    State(state): State<DatabaseState>,
    fields: FormFields,
) -> Result<Page<SearchContext>, AppError> {
    let form = SearchForm::from(&fields);
    let found = search_artists(&state.connection, &form.search_term, now()).await?;
    info!("Artist search {:?} matched {}", form.search_term, found.len());
    Ok(Page::new(
        "pages/search_artists.html",
        SearchContext::new(form.search_term, found),
    ))
}

pub async fn show_artist(
    State(state): State<DatabaseState>,
    Path(artist_id): Path<String>,
    flashes: IncomingFlashes,
) -> Result<Page<ArtistContext>, AppError> {
    let artist_id = parse_id(&artist_id)?;
    let detail = get_artist_detail(&state.connection, artist_id, now()).await?;
    Ok(Page::new("pages/show_artist.html", ArtistContext::from(detail)).with_flashes(flashes))
}

pub async fn create_artist_form(flashes: IncomingFlashes) -> Page<FormChoices> {
    Page::new("forms/new_artist.html", FormChoices::default()).with_flashes(flashes)
}

pub async fn create_artist_submission(
    State(state): State<DatabaseState>,
    fields: FormFields,
) -> Page<Empty> {
    let form = NewArtistForm::from(&fields);
    let name = form.name.clone();
    let flash = match form.validate() {
        Err(errors) => {
            warn!("Rejected artist {:?}: {}", name, errors);
            Flash::error(format!(
                "{} could not be listed. {}",
                titled("Artist", &name),
                describe(&errors)
            ))
        }
        Ok(()) => match add_artist(&state.connection, form.into_model()).await {
            Ok(artist) => {
                Flash::success(format!("Artist {} was successfully listed!", artist.name))
            }
            Err(err) => {
                error!("Listing artist {:?} failed: {}", name, err);
                Flash::error(format!(
                    "An error occurred. {} could not be listed.",
                    titled("Artist", &name)
                ))
            }
        },
    };
    Page::home().flash(flash)
}

pub async fn delete_artist(
    State(state): State<DatabaseState>,
    Path(artist_id): Path<String>,
) -> Result<FlashRedirect, AppError> {
    let artist_id = parse_id(&artist_id)?;
    let flash = match delete_artist_by_id(&state.connection, artist_id).await {
        Ok(artist) => Flash::success(format!("Artist {} was successfully deleted!", artist.name)),
        Err(err) if err.is_not_found() => return Err(err.into()),
        Err(err) => {
            error!("Deleting artist {} failed: {}", artist_id, err);
            Flash::error(format!(
                "An error occurred. Artist with id {} could not be deleted.",
                artist_id
            ))
        }
    };
    Ok(FlashRedirect::to("/artists", flash))
}

pub async fn edit_artist_form(
    State(state): State<DatabaseState>,
    Path(artist_id): Path<String>,
    flashes: IncomingFlashes,
) -> Result<Page<EditArtistContext>, AppError> {
    let artist_id = parse_id(&artist_id)?;
    let artist = get_artist_by_id(&state.connection, artist_id).await?;
    Ok(Page::new("forms/edit_artist.html", EditArtistContext::from(artist)).with_flashes(flashes))
}

pub async fn edit_artist_submission(
    State(state): State<DatabaseState>,
    Path(artist_id): Path<String>,
    fields: FormFields,
) -> Result<FlashRedirect, AppError> {
    let artist_id = parse_id(&artist_id)?;
    let detail_page = format!("/artists/{artist_id}");
    let form = ArtistEditForm::from(&fields);

    if let Err(errors) = form.validate() {
        let artist = get_artist_by_id(&state.connection, artist_id).await?;
        warn!("Rejected edit of artist {}: {}", artist_id, errors);
        return Ok(FlashRedirect::to(
            detail_page,
            Flash::error(format!(
                "Artist {} could not be edited. {}",
                artist.name,
                describe(&errors)
            )),
        ));
    }

    let flash = match update_artist(&state.connection, artist_id, form.into_changes()).await {
        Ok(artist) => Flash::success(format!("Artist {} was successfully edited!", artist.name)),
        Err(err) if err.is_not_found() => return Err(err.into()),
        Err(err) => {
            error!("Editing artist {} failed: {}", artist_id, err);
            Flash::error(format!(
                "An error occurred. Artist with id {} could not be edited.",
                artist_id
            ))
        }
    };
    Ok(FlashRedirect::to(detail_page, flash))
}
