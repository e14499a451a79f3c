use entities::artist_local_model::{ArtistChanges, ArtistModel};
use entities::prelude::{Artist, Show, Venue};
use entities::{artist, show, venue};
use log::info;
use sea_orm::prelude::DateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{name_matches, partition_by_start, shows, EntitySummary, Partitioned, StoreError};

#[derive(Clone, Debug)]
pub struct ArtistDetail {
    pub artist: artist::Model,
    pub shows: Partitioned<(show::Model, venue::Model)>,
}

pub(crate) async fn find_artist<C: ConnectionTrait>(
    db: &C,
    artist_id: i32,
) -> Result<artist::Model, StoreError> {
    Artist::find_by_id(artist_id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "artist",
            id: artist_id,
        })
}

pub async fn get_artist_by_id(
    db: &DatabaseConnection,
    artist_id: i32,
) -> Result<artist::Model, StoreError> {
    find_artist(db, artist_id).await
}

pub async fn get_all_artists(db: &DatabaseConnection) -> Result<Vec<artist::Model>, StoreError> {
    Ok(Artist::find()
        .order_by_asc(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await?)
}

pub async fn search_artists(
    db: &DatabaseConnection,
    term: &str,
    now: DateTime,
) -> Result<Vec<EntitySummary>, StoreError> {
    let found = Artist::find()
        .filter(name_matches(artist::Column::Name, term))
        .order_by_asc(artist::Column::Name)
        .all(db)
        .await?;
    let counts = shows::upcoming_counts(db, show::Column::ArtistId, now).await?;
    Ok(found
        .into_iter()
        .map(|artist| EntitySummary {
            num_upcoming_shows: counts.get(&artist.id).copied().unwrap_or(0),
            id: artist.id,
            name: artist.name,
        })
        .collect())
}

pub async fn get_artist_detail(
    db: &DatabaseConnection,
    artist_id: i32,
    now: DateTime,
) -> Result<ArtistDetail, StoreError> {
    let artist = find_artist(db, artist_id).await?;
    let shows = Show::find()
        .filter(show::Column::ArtistId.eq(artist_id))
        .find_also_related(Venue)
        .order_by_asc(show::Column::StartTime)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(show, venue)| venue.map(|venue| (show, venue)))
        .collect();
    Ok(ArtistDetail {
        artist,
        shows: partition_by_start(shows, now, |(show, _)| show.start_time),
    })
}

pub async fn add_artist(
    db: &DatabaseConnection,
    artist: ArtistModel,
) -> Result<artist::Model, StoreError> {
    let created = db
        .transaction::<_, artist::Model, StoreError>(|txn| {
            Box::pin(async move { Ok(artist.into_active_model().insert(txn).await?) })
        })
        .await?;
    info!("Listed artist {} with id {}", created.name, created.id);
    Ok(created)
}

pub async fn update_artist(
    db: &DatabaseConnection,
    artist_id: i32,
    changes: ArtistChanges,
) -> Result<artist::Model, StoreError> {
    let updated = db
        .transaction::<_, artist::Model, StoreError>(|txn| {
            Box::pin(async move {
                let mut artist: artist::ActiveModel = find_artist(txn, artist_id).await?.into();
                changes.apply(&mut artist);
                Ok(artist.update(txn).await?)
            })
        })
        .await?;
    info!("Edited artist {} with id {}", updated.name, updated.id);
    Ok(updated)
}

pub async fn delete_artist_by_id(
    db: &DatabaseConnection,
    artist_id: i32,
) -> Result<artist::Model, StoreError> {
    let (deleted, shows_removed) = db
        .transaction::<_, (artist::Model, u64), StoreError>(|txn| {
            Box::pin(async move {
                let artist = find_artist(txn, artist_id).await?;
                let shows_removed = Show::delete_many()
                    .filter(show::Column::ArtistId.eq(artist_id))
                    .exec(txn)
                    .await?
                    .rows_affected;
                Artist::delete_by_id(artist_id).exec(txn).await?;
                Ok((artist, shows_removed))
            })
        })
        .await?;
    info!(
        "Deleted artist {} with id {} and {} of its shows",
        deleted.name, deleted.id, shows_removed
    );
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use entities::show_local_model::ShowModel;

    use super::*;
    use crate::shows::add_show;
    use crate::test_support::{at, artist, database, venue};
    use crate::venues::add_venue;

    #[tokio::test]
    async fn artist_search_counts_upcoming_shows() {
        let db = database().await;
        let now = at("2024-05-01 12:00:00");
        let park = add_venue(&db, venue("Park Square Live Music & Coffee", "San Francisco", "CA"))
            .await
            .unwrap();
        let sax = add_artist(&db, artist("The Wild Sax Band")).await.unwrap();
        add_artist(&db, artist("Matt Quevedo")).await.unwrap();
        add_artist(&db, artist("Guns N Petals")).await.unwrap();
        for start in ["2019-06-15 23:00:00", "2035-04-01 20:00:00", "2035-04-08 20:00:00"] {
            add_show(
                &db,
                ShowModel {
                    venue_id: park.id,
                    artist_id: sax.id,
                    start_time: at(start),
                },
            )
            .await
            .unwrap();
        }

        assert_eq!(search_artists(&db, "A", now).await.unwrap().len(), 3);
        let band = search_artists(&db, "band", now).await.unwrap();
        assert_eq!(band.len(), 1);
        assert_eq!(band[0].name, "The Wild Sax Band");
        assert_eq!(band[0].num_upcoming_shows, 2);
    }

    #[tokio::test]
    async fn artist_detail_names_the_venues() {
        let db = database().await;
        let now = at("2024-05-01 12:00:00");
        let park = add_venue(&db, venue("Park Square Live Music & Coffee", "San Francisco", "CA"))
            .await
            .unwrap();
        let sax = add_artist(&db, artist("The Wild Sax Band")).await.unwrap();
        add_show(
            &db,
            ShowModel {
                venue_id: park.id,
                artist_id: sax.id,
                start_time: at("2019-06-15 23:00:00"),
            },
        )
        .await
        .unwrap();

        let detail = get_artist_detail(&db, sax.id, now).await.unwrap();

        assert!(detail.shows.upcoming.is_empty());
        assert_eq!(detail.shows.past.len(), 1);
        assert_eq!(detail.shows.past[0].1.name, "Park Square Live Music & Coffee");
    }

    #[tokio::test]
    async fn partial_edit_skips_missing_fields() {
        let db = database().await;
        let guns = add_artist(&db, artist("Guns N Petals")).await.unwrap();

        let updated = update_artist(
            &db,
            guns.id,
            ArtistChanges {
                city: Some("Oakland".to_string()),
                seeking_venue: true,
                seeking_description: Some("Looking for shows in the Bay Area".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.name, "Guns N Petals");
        assert_eq!(updated.city, "Oakland");
        assert_eq!(updated.state, "CA");
        assert!(updated.seeking_venue);
        assert_eq!(updated.seeking_description, "Looking for shows in the Bay Area");

        let err = update_artist(&db, guns.id + 1, ArtistChanges::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn deleting_artist_cancels_their_shows() {
        let db = database().await;
        let park = add_venue(&db, venue("Park Square Live Music & Coffee", "San Francisco", "CA"))
            .await
            .unwrap();
        let sax = add_artist(&db, artist("The Wild Sax Band")).await.unwrap();
        add_show(
            &db,
            ShowModel {
                venue_id: park.id,
                artist_id: sax.id,
                start_time: at("2035-04-01 20:00:00"),
            },
        )
        .await
        .unwrap();

        delete_artist_by_id(&db, sax.id).await.unwrap();

        assert!(get_artist_by_id(&db, sax.id).await.unwrap_err().is_not_found());
        let detail = crate::venues::get_venue_detail(&db, park.id, at("2024-05-01 12:00:00"))
            .await
            .unwrap();
        assert!(detail.shows.upcoming.is_empty());
    }
}
