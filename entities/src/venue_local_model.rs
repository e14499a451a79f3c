use sea_orm::{ActiveValue, IntoActiveModel};

use crate::genres::Genres;
use crate::venue::ActiveModel;

/// A venue as submitted through the listing form, before it has an id.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct VenueModel {
    pub name: String,
    pub genres: Genres,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_talent: bool,
    pub description: String,
}

impl IntoActiveModel<ActiveModel> for VenueModel {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(self.name),
            genres: ActiveValue::Set(self.genres),
            city: ActiveValue::Set(self.city),
            state: ActiveValue::Set(self.state),
            address: ActiveValue::Set(self.address),
            phone: ActiveValue::Set(self.phone),
            image_link: ActiveValue::Set(self.image_link),
            facebook_link: ActiveValue::Set(self.facebook_link),
            website: ActiveValue::Set(self.website),
            seeking_talent: ActiveValue::Set(self.seeking_talent),
            description: ActiveValue::Set(self.description),
        }
    }
}

/// Edits to an existing venue. A `None` field keeps the stored value;
/// `seeking_talent` comes from a checkbox and is always written.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct VenueChanges {
    pub name: Option<String>,
    pub genres: Option<Genres>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub description: Option<String>,
}

impl VenueChanges {
    pub fn apply(self, venue: &mut ActiveModel) {
        if let Some(name) = self.name {
            venue.name = ActiveValue::Set(name);
        }
        if let Some(genres) = self.genres {
            venue.genres = ActiveValue::Set(genres);
        }
        if let Some(city) = self.city {
            venue.city = ActiveValue::Set(city);
        }
        if let Some(state) = self.state {
            venue.state = ActiveValue::Set(state);
        }
        if let Some(address) = self.address {
            venue.address = ActiveValue::Set(address);
        }
        if let Some(phone) = self.phone {
            venue.phone = ActiveValue::Set(phone);
        }
        if let Some(image_link) = self.image_link {
            venue.image_link = ActiveValue::Set(image_link);
        }
        if let Some(facebook_link) = self.facebook_link {
            venue.facebook_link = ActiveValue::Set(facebook_link);
        }
        if let Some(website) = self.website {
            venue.website = ActiveValue::Set(website);
        }
        if let Some(description) = self.description {
            venue.description = ActiveValue::Set(description);
        }
        venue.seeking_talent = ActiveValue::Set(self.seeking_talent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue;

    fn stored() -> venue::Model {
        venue::Model {
            id: 1,
            name: "The Musical Hop".to_string(),
            genres: Genres(vec!["Jazz".to_string()]),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            image_link: String::new(),
            facebook_link: String::new(),
            website: String::new(),
            seeking_talent: true,
            description: "We are on the lookout for a local artist".to_string(),
        }
    }

    #[test]
    fn new_venue_leaves_id_to_the_database() {
        let active = VenueModel {
            name: "Park Square Live Music & Coffee".to_string(),
            ..Default::default()
        }
        .into_active_model();
        assert!(!active.id.is_set());
        assert_eq!(active.name.as_ref(), "Park Square Live Music & Coffee");
    }

    #[test]
    fn changes_only_touch_provided_fields() {
        let mut active: ActiveModel = stored().into();
        VenueChanges {
            city: Some("Oakland".to_string()),
            seeking_talent: false,
            ..Default::default()
        }
        .apply(&mut active);

        assert!(active.city.is_set());
        assert_eq!(active.city.as_ref(), "Oakland");
        assert!(!active.name.is_set());
        assert_eq!(active.name.as_ref(), "The Musical Hop");
        assert!(!active.genres.is_set());
        assert_eq!(active.seeking_talent.as_ref(), &false);
    }
}
