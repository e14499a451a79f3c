use chrono::NaiveDateTime;
use entities::{artist, show, venue};
use queries::venues::{VenueArea, VenueDetail};
use serde::Serialize;

use crate::responses::common::{FormChoices, SummaryItem};

#[derive(Serialize, Clone, Debug)]
pub struct VenuesContext {
    pub areas: Vec<AreaItem>,
}

#[derive(Serialize, Clone, Debug)]
pub struct AreaItem {
    pub city: String,
    pub state: String,
    pub venues: Vec<SummaryItem>,
}

impl From<Vec<VenueArea>> for VenuesContext {
    fn from(areas: Vec<VenueArea>) -> Self {
        VenuesContext {
            areas: areas
                .into_iter()
                .map(|area| AreaItem {
                    city: area.city,
                    state: area.state,
                    venues: area.venues.into_iter().map(SummaryItem::from).collect(),
                })
                .collect(),
        }
    }
}

/// Every stored field of a venue, as the detail and edit pages show it.
#[derive(Serialize, Clone, Debug)]
pub struct VenueFields {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub image_link: String,
}

impl From<venue::Model> for VenueFields {
    fn from(venue: venue::Model) -> Self {
        VenueFields {
            id: venue.id,
            name: venue.name,
            genres: venue.genres.into(),
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.description,
            image_link: venue.image_link,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct VenueShowItem {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: NaiveDateTime,
}

impl From<(show::Model, artist::Model)> for VenueShowItem {
    fn from((show, artist): (show::Model, artist::Model)) -> Self {
        VenueShowItem {
            artist_id: artist.id,
            artist_name: artist.name,
            artist_image_link: artist.image_link,
            start_time: show.start_time,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct VenueItem {
    #[serde(flatten)]
    pub fields: VenueFields,
    pub past_shows: Vec<VenueShowItem>,
    pub upcoming_shows: Vec<VenueShowItem>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Serialize, Clone, Debug)]
pub struct VenueContext {
    pub venue: VenueItem,
}

impl From<VenueDetail> for VenueContext {
    fn from(detail: VenueDetail) -> Self {
        let past_shows: Vec<VenueShowItem> =
            detail.shows.past.into_iter().map(VenueShowItem::from).collect();
        let upcoming_shows: Vec<VenueShowItem> = detail
            .shows
            .upcoming
            .into_iter()
            .map(VenueShowItem::from)
            .collect();
        VenueContext {
            venue: VenueItem {
                fields: detail.venue.into(),
                past_shows_count: past_shows.len(),
                upcoming_shows_count: upcoming_shows.len(),
                past_shows,
                upcoming_shows,
            },
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct EditVenueContext {
    pub venue: VenueFields,
    #[serde(flatten)]
    pub choices: FormChoices,
}

impl From<venue::Model> for EditVenueContext {
    fn from(venue: venue::Model) -> Self {
        EditVenueContext {
            venue: venue.into(),
            choices: FormChoices::default(),
        }
    }
}
