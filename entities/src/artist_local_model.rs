use sea_orm::{ActiveValue, IntoActiveModel};

use crate::artist::ActiveModel;
use crate::genres::Genres;

#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct ArtistModel {
    pub name: String,
    pub genres: Genres,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl IntoActiveModel<ActiveModel> for ArtistModel {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(self.name),
            genres: ActiveValue::Set(self.genres),
            city: ActiveValue::Set(self.city),
            state: ActiveValue::Set(self.state),
            phone: ActiveValue::Set(self.phone),
            image_link: ActiveValue::Set(self.image_link),
            facebook_link: ActiveValue::Set(self.facebook_link),
            website: ActiveValue::Set(self.website),
            seeking_venue: ActiveValue::Set(self.seeking_venue),
            seeking_description: ActiveValue::Set(self.seeking_description),
        }
    }
}

/// Same rules as `VenueChanges`: `None` keeps, the checkbox always writes.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct ArtistChanges {
    pub name: Option<String>,
    pub genres: Option<Genres>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistChanges {
    pub fn apply(self, artist: &mut ActiveModel) {
        if let Some(name) = self.name {
            artist.name = ActiveValue::Set(name);
        }
        if let Some(genres) = self.genres {
            artist.genres = ActiveValue::Set(genres);
        }
        if let Some(city) = self.city {
            artist.city = ActiveValue::Set(city);
        }
        if let Some(state) = self.state {
            artist.state = ActiveValue::Set(state);
        }
        if let Some(phone) = self.phone {
            artist.phone = ActiveValue::Set(phone);
        }
        if let Some(image_link) = self.image_link {
            artist.image_link = ActiveValue::Set(image_link);
        }
        if let Some(facebook_link) = self.facebook_link {
            artist.facebook_link = ActiveValue::Set(facebook_link);
        }
        if let Some(website) = self.website {
            artist.website = ActiveValue::Set(website);
        }
        if let Some(seeking_description) = self.seeking_description {
            artist.seeking_description = ActiveValue::Set(seeking_description);
        }
        artist.seeking_venue = ActiveValue::Set(self.seeking_venue);
    }
}
