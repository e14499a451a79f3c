use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Genre tags of a venue or an artist. Stored as a JSON array so the same
/// column works on every backend we run against.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Genres(pub Vec<String>);

impl From<Genres> for Vec<String> {
    fn from(genres: Genres) -> Self {
        genres.0
    }
}
