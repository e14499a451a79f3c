use std::collections::HashMap;

use entities::prelude::{Artist, Show, Venue};
use entities::show_local_model::ShowModel;
use entities::{artist, show, venue};
use log::info;
use sea_orm::prelude::DateTime;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::artists::find_artist;
use crate::venues::find_venue;
use crate::StoreError;

/// A show together with the venue and the artist it joins.
#[derive(Clone, Debug)]
pub struct BookedShow {
    pub show: show::Model,
    pub venue: venue::Model,
    pub artist: artist::Model,
}

/// Number of shows starting after `now`, keyed by the id in `parent`
/// (`VenueId` or `ArtistId`). Parents without upcoming shows are absent.
pub(crate) async fn upcoming_counts<C: ConnectionTrait>(
    db: &C,
    parent: show::Column,
    now: DateTime,
) -> Result<HashMap<i32, i64>, StoreError> {
    let rows: Vec<(i32, i64)> = Show::find()
        .select_only()
        .column(parent)
        .column_as(Expr::col(show::Column::Id).count(), "upcoming")
        .filter(show::Column::StartTime.gt(now))
        .group_by(parent)
        .into_tuple()
        .all(db)
        .await?;
    Ok(rows.into_iter().collect())
}

pub async fn get_all_shows(db: &DatabaseConnection) -> Result<Vec<BookedShow>, StoreError> {
    let rows = Show::find()
        .find_also_related(Venue)
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;
    let mut artist_ids: Vec<i32> = rows.iter().map(|(show, _)| show.artist_id).collect();
    artist_ids.sort_unstable();
    artist_ids.dedup();
    let artists: HashMap<i32, artist::Model> = Artist::find()
        .filter(artist::Column::Id.is_in(artist_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|artist| (artist.id, artist))
        .collect();

    Ok(rows
        .into_iter()
        .filter_map(|(show, venue)| {
            let venue = venue?;
            let artist = artists.get(&show.artist_id)?.clone();
            Some(BookedShow {
                show,
                venue,
                artist,
            })
        })
        .collect())
}

/// Books a show. Both parents must exist or nothing is written.
pub async fn add_show(db: &DatabaseConnection, show: ShowModel) -> Result<show::Model, StoreError> {
    let created = db
        .transaction::<_, show::Model, StoreError>(|txn| {
            Box::pin(async move {
                find_venue(txn, show.venue_id).await?;
                find_artist(txn, show.artist_id).await?;
                Ok(show.into_active_model().insert(txn).await?)
            })
        })
        .await?;
    info!(
        "Listed show {} of artist {} at venue {} starting {}",
        created.id, created.artist_id, created.venue_id, created.start_time
    );
    Ok(created)
}
