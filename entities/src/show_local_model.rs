use sea_orm::prelude::DateTime;
use sea_orm::{ActiveValue, IntoActiveModel};

use crate::show::ActiveModel;

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ShowModel {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DateTime,
}

impl IntoActiveModel<ActiveModel> for ShowModel {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            venue_id: ActiveValue::Set(self.venue_id),
            artist_id: ActiveValue::Set(self.artist_id),
            start_time: ActiveValue::Set(self.start_time),
        }
    }
}
