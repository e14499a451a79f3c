use sea_orm::entity::prelude::*;

use crate::genres::Genres;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "artist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::show::Entity")]
    Show,
}

impl Related<super::show::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Show.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
