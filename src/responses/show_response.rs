use chrono::NaiveDateTime;
use entities::{artist, venue};
use queries::shows::BookedShow;
use serde::Serialize;

use crate::responses::common::Choice;

#[derive(Serialize, Clone, Debug)]
pub struct ShowItem {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: NaiveDateTime,
}

impl From<BookedShow> for ShowItem {
    fn from(booked: BookedShow) -> Self {
        ShowItem {
            venue_id: booked.venue.id,
            venue_name: booked.venue.name,
            artist_id: booked.artist.id,
            artist_name: booked.artist.name,
            artist_image_link: booked.artist.image_link,
            start_time: booked.show.start_time,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ShowsContext {
    pub shows: Vec<ShowItem>,
}

impl From<Vec<BookedShow>> for ShowsContext {
    fn from(shows: Vec<BookedShow>) -> Self {
        ShowsContext {
            shows: shows.into_iter().map(ShowItem::from).collect(),
        }
    }
}

/// Venues and artists a new show can be booked with.
#[derive(Serialize, Clone, Debug)]
pub struct NewShowContext {
    pub venues: Vec<Choice>,
    pub artists: Vec<Choice>,
}

impl NewShowContext {
    pub fn new(venues: Vec<venue::Model>, artists: Vec<artist::Model>) -> Self {
        NewShowContext {
            venues: venues
                .into_iter()
                .map(|venue| Choice {
                    id: venue.id,
                    name: venue.name,
                })
                .collect(),
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
