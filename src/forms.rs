use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use chrono::NaiveDateTime;
use entities::artist_local_model::{ArtistChanges, ArtistModel};
use entities::genres::Genres;
use entities::show_local_model::ShowModel;
use entities::venue_local_model::{VenueChanges, VenueModel};
use url::form_urlencoded;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::AppError;

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Fields of an `application/x-www-form-urlencoded` body, in submission
/// order. Repeated keys are kept, which is how multi-selects arrive.
#[derive(Debug, Default, Clone)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn parse(body: &[u8]) -> Self {
        FormFields(form_urlencoded::parse(body).into_owned().collect())
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The submitted value, or an empty string when the field is absent.
    pub fn text(&self, name: &str) -> String {
        self.value(name).unwrap_or_default().to_string()
    }

    /// `None` for absent and empty fields alike.
    pub fn non_empty(&self, name: &str) -> Option<String> {
        self.value(name)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Every non-empty value sent as `name` or `name[]`.
    pub fn list(&self, name: &str) -> Vec<String> {
        let bracketed = format!("{name}[]");
        self.0
            .iter()
            .filter(|(key, value)| (key == name || *key == bracketed) && !value.is_empty())
            .map(|(_, value)| value.to_string())
            .collect()
    }

    /// Unchecked checkboxes are not submitted at all.
    pub fn checked(&self, name: &str) -> bool {
        self.value(name).is_some()
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|err| AppError::Body(err.to_string()))?;
        Ok(FormFields::parse(&body))
    }
}

fn validate_state(state: &str) -> Result<(), ValidationError> {
    if STATES.contains(&state) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_state"))
    }
}

fn validate_genres(genres: &[String]) -> Result<(), ValidationError> {
    if genres.iter().all(|genre| GENRES.contains(&genre.as_str())) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_genre"))
    }
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || " +-().".contains(c));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if allowed && digits >= 7 {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Names of the rejected fields, sorted, for a flashed message.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();
    format!("Please check: {}.", fields.join(", "))
}

#[derive(Debug, Clone)]
pub struct SearchForm {
    pub search_term: String,
}

impl From<&FormFields> for SearchForm {
    fn from(fields: &FormFields) -> Self {
        SearchForm {
            search_term: fields.text("search_term"),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewVenueForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(custom = "validate_state")]
    pub state: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(url)]
    pub image_link: Option<String>,
    #[validate(url)]
    pub facebook_link: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(length(min = 1), custom = "validate_genres")]
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<&FormFields> for NewVenueForm {
    fn from(fields: &FormFields) -> Self {
        NewVenueForm {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            address: fields.text("address"),
            phone: fields.non_empty("phone"),
            image_link: fields.non_empty("image_link"),
            facebook_link: fields.non_empty("facebook_link"),
            website: fields.non_empty("website"),
            genres: fields.list("genres"),
            seeking_talent: fields.checked("seeking_talent"),
            seeking_description: fields.non_empty("seeking_description"),
        }
    }
}

impl NewVenueForm {
    pub fn into_model(self) -> VenueModel {
        VenueModel {
            name: self.name,
            genres: Genres(self.genres),
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone.unwrap_or_default(),
            image_link: self.image_link.unwrap_or_default(),
            facebook_link: self.facebook_link.unwrap_or_default(),
            website: self.website.unwrap_or_default(),
            seeking_talent: self.seeking_talent,
            description: self.seeking_description.unwrap_or_default(),
        }
    }
}

/// Edit submission for a venue. Empty fields mean "leave as is", so only
/// the format of what was actually sent is checked.
#[derive(Debug, Clone, Default, Validate)]
pub struct VenueEditForm {
    pub name: Option<String>,
    pub city: Option<String>,
    #[validate(custom = "validate_state")]
    pub state: Option<String>,
    pub address: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(url)]
    pub image_link: Option<String>,
    #[validate(url)]
    pub facebook_link: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(custom = "validate_genres")]
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<&FormFields> for VenueEditForm {
    fn from(fields: &FormFields) -> Self {
        VenueEditForm {
            name: fields.non_empty("name"),
            city: fields.non_empty("city"),
            state: fields.non_empty("state"),
            address: fields.non_empty("address"),
            phone: fields.non_empty("phone"),
            image_link: fields.non_empty("image_link"),
            facebook_link: fields.non_empty("facebook_link"),
            website: fields.non_empty("website"),
            genres: fields.list("genres"),
            seeking_talent: fields.checked("seeking_talent"),
            seeking_description: fields.non_empty("seeking_description"),
        }
    }
}

impl VenueEditForm {
    pub fn into_changes(self) -> VenueChanges {
        VenueChanges {
            name: self.name,
            genres: (!self.genres.is_empty()).then_some(Genres(self.genres)),
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            seeking_talent: self.seeking_talent,
            description: self.seeking_description,
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewArtistForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(custom = "validate_state")]
    pub state: String,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(url)]
    pub image_link: Option<String>,
    #[validate(url)]
    pub facebook_link: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(length(min = 1), custom = "validate_genres")]
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<&FormFields> for NewArtistForm {
    fn from(fields: &FormFields) -> Self {
        NewArtistForm {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            phone: fields.non_empty("phone"),
            image_link: fields.non_empty("image_link"),
            facebook_link: fields.non_empty("facebook_link"),
            website: fields.non_empty("website"),
            genres: fields.list("genres"),
            seeking_venue: fields.checked("seeking_venue"),
            seeking_description: fields.non_empty("seeking_description"),
        }
    }
}

impl NewArtistForm {
    pub fn into_model(self) -> ArtistModel {
        ArtistModel {
            name: self.name,
            genres: Genres(self.genres),
            city: self.city,
            state: self.state,
            phone: self.phone.unwrap_or_default(),
            image_link: self.image_link.unwrap_or_default(),
            facebook_link: self.facebook_link.unwrap_or_default(),
            website: self.website.unwrap_or_default(),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ArtistEditForm {
    pub name: Option<String>,
    pub city: Option<String>,
    #[validate(custom = "validate_state")]
    pub state: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[validate(url)]
    pub image_link: Option<String>,
    #[validate(url)]
    pub facebook_link: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(custom = "validate_genres")]
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<&FormFields> for ArtistEditForm {
    fn from(fields: &FormFields) -> Self {
        ArtistEditForm {
            name: fields.non_empty("name"),
            city: fields.non_empty("city"),
            state: fields.non_empty("state"),
            phone: fields.non_empty("phone"),
            image_link: fields.non_empty("image_link"),
            facebook_link: fields.non_empty("facebook_link"),
            website: fields.non_empty("website"),
            genres: fields.list("genres"),
            seeking_venue: fields.checked("seeking_venue"),
            seeking_description: fields.non_empty("seeking_description"),
        }
    }
}

impl ArtistEditForm {
    pub fn into_changes(self) -> ArtistChanges {
        ArtistChanges {
            name: self.name,
            genres: (!self.genres.is_empty()).then_some(Genres(self.genres)),
            city: self.city,
            state: self.state,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website: self.website,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct NewShowForm {
    #[validate(required)]
    pub venue_id: Option<i32>,
    #[validate(required)]
    pub artist_id: Option<i32>,
    #[validate(required)]
    pub start_time: Option<NaiveDateTime>,
}

impl From<&FormFields> for NewShowForm {
    fn from(fields: &FormFields) -> Self {
        let id = |name: &str| fields.value(name).and_then(|value| value.trim().parse().ok());
        NewShowForm {
            venue_id: id("venue_id"),
            artist_id: id("artist_id"),
            start_time: fields.value("start_time").and_then(parse_start_time),
        }
    }
}

impl NewShowForm {
    /// `None` unless every field parsed.
    pub fn into_model(self) -> Option<ShowModel> {
        Some(ShowModel {
            venue_id: self.venue_id?,
            artist_id: self.artist_id?,
            start_time: self.start_time?,
        })
    }
}
