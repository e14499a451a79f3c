use chrono::NaiveDateTime;
use entities::{artist, show, venue};
use queries::artists::ArtistDetail;
use serde::Serialize;

use crate::responses::common::{Choice, FormChoices};

#[derive(Serialize, Clone, Debug)]
pub struct ArtistsContext {
    pub artists: Vec<Choice>,
}

impl From<Vec<artist::Model>> for ArtistsContext {
    fn from(artists: Vec<artist::Model>) -> Self {
        ArtistsContext {
            artists: artists
                .into_iter()
                .map(|artist| Choice {
                    id: artist.id,
                    name: artist.name,
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ArtistFields {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub image_link: String,
}

impl From<artist::Model> for ArtistFields {
    fn from(artist: artist::Model) -> Self {
        ArtistFields {
            id: artist.id,
            name: artist.name,
            genres: artist.genres.into(),
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ArtistShowItem {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: NaiveDateTime,
}

impl From<(show::Model, venue::Model)> for ArtistShowItem {
    fn from((show, venue): (show::Model, venue::Model)) -> Self {
        ArtistShowItem {
            venue_id: venue.id,
            venue_name: venue.name,
            venue_image_link: venue.image_link,
            start_time: show.start_time,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ArtistItem {
    #[serde(flatten)]
    pub fields: ArtistFields,
    pub past_shows: Vec<ArtistShowItem>,
    pub upcoming_shows: Vec<ArtistShowItem>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Serialize, Clone, Debug)]
pub struct ArtistContext {
    pub artist: ArtistItem,
}

impl From<ArtistDetail> for ArtistContext {
    fn from(detail: ArtistDetail) -> Self {
        let past_shows: Vec<ArtistShowItem> = detail
            .shows
            .past
            .into_iter()
            .map(ArtistShowItem::from)
            .collect();
        let upcoming_shows: Vec<ArtistShowItem> = detail
            .shows
            .upcoming
            .into_iter()
            .map(ArtistShowItem::from)
            .collect();
        ArtistContext {
            artist: ArtistItem {
                fields: detail.artist.into(),
                past_shows_count: past_shows.len(),
                upcoming_shows_count: upcoming_shows.len(),
                past_shows,
                upcoming_shows,
            },
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct EditArtistContext {
    pub artist: ArtistFields,
    #[serde(flatten)]
    pub choices: FormChoices,
}

impl From<artist::Model> for EditArtistContext {
    fn from(artist: artist::Model) -> Self {
        EditArtistContext {
            artist: artist.into(),
            choices: FormChoices::default(),
        }
    }
}
