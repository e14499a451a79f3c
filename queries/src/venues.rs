use std::collections::BTreeMap;

use entities::prelude::{Artist, Show, Venue};
use entities::venue_local_model::{VenueChanges, VenueModel};
use entities::{artist, show, venue};
use log::info;
use sea_orm::prelude::DateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{name_matches, partition_by_start, shows, EntitySummary, Partitioned, StoreError};

/// Venues sharing a (state, city) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

#[derive(Clone, Debug)]
pub struct VenueDetail {
    pub venue: venue::Model,
    pub shows: Partitioned<(show::Model, artist::Model)>,
}

pub(crate) async fn find_venue<C: ConnectionTrait>(
    db: &C,
    venue_id: i32,
) -> Result<venue::Model, StoreError> {
    Venue::find_by_id(venue_id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "venue",
            id: venue_id,
        })
}

pub async fn get_venue_by_id(
    db: &DatabaseConnection,
    venue_id: i32,
) -> Result<venue::Model, StoreError> {
    find_venue(db, venue_id).await
}

pub async fn get_all_venues(db: &DatabaseConnection) -> Result<Vec<venue::Model>, StoreError> {
    Ok(Venue::find()
        .order_by_asc(venue::Column::Name)
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?)
}

/// Groups every venue by (state, city). Groups come out ordered by state then
/// city, venues inside a group by name.
pub async fn get_venues_by_area(
    db: &DatabaseConnection,
    now: DateTime,
) -> Result<Vec<VenueArea>, StoreError> {
    let venues = Venue::find().all(db).await?;
    let counts = shows::upcoming_counts(db, show::Column::VenueId, now).await?;

    let mut areas: BTreeMap<(String, String), Vec<EntitySummary>> = BTreeMap::new();
    for venue in venues {
        areas
            .entry((venue.state, venue.city))
            .or_default()
            .push(EntitySummary {
                id: venue.id,
                num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
                name: venue.name,
            });
    }
    Ok(areas
        .into_iter()
        .map(|((state, city), mut venues)| {
            venues.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            VenueArea {
                city,
                state,
                venues,
            }
        })
        .collect())
}

pub async fn search_venues(
    db: &DatabaseConnection,
    term: &str,
    now: DateTime,
) -> Result<Vec<EntitySummary>, StoreError> {
    let found = Venue::find()
        .filter(name_matches(venue::Column::Name, term))
        .order_by_asc(venue::Column::Name)
        .all(db)
        .await?;
    let counts = shows::upcoming_counts(db, show::Column::VenueId, now).await?;
    Ok(found
        .into_iter()
        .map(|venue| EntitySummary {
            num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
            id: venue.id,
            name: venue.name,
        })
        .collect())
}

pub async fn get_venue_detail(
    db: &DatabaseConnection,
    venue_id: i32,
    now: DateTime,
) -> Result<VenueDetail, StoreError> {
    let venue = find_venue(db, venue_id).await?;
    let shows = Show::find()
        .filter(show::Column::VenueId.eq(venue_id))
        .find_also_related(Artist)
        .order_by_asc(show::Column::StartTime)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(show, artist)| artist.map(|artist| (show, artist)))
        .collect();
    Ok(VenueDetail {
        venue,
        shows: partition_by_start(shows, now, |(show, _)| show.start_time),
    })
}

pub async fn add_venue(
    db: &DatabaseConnection,
    venue: VenueModel,
) -> Result<venue::Model, StoreError> {
    let created = db
        .transaction::<_, venue::Model, StoreError>(|txn| {
            Box::pin(async move { Ok(venue.into_active_model().insert(txn).await?) })
        })
        .await?;
    info!("Listed venue {} with id {}", created.name, created.id);
    Ok(created)
}

pub async fn update_venue(
    db: &DatabaseConnection,
    venue_id: i32,
    changes: VenueChanges,
) -> Result<venue::Model, StoreError> {
    let updated = db
        .transaction::<_, venue::Model, StoreError>(|txn| {
            Box::pin(async move {
                let mut venue: venue::ActiveModel = find_venue(txn, venue_id).await?.into();
                changes.apply(&mut venue);
                Ok(venue.update(txn).await?)
            })
        })
        .await?;
    info!("Edited venue {} with id {}", updated.name, updated.id);
    Ok(updated)
}

/// Deletes a venue together with every show booked there.
pub async fn delete_venue_by_id(
    db: &DatabaseConnection,
    venue_id: i32,
) -> Result<venue::Model, StoreError> {
    let (deleted, shows_removed) = db
        .transaction::<_, (venue::Model, u64), StoreError>(|txn| {
            Box::pin(async move {
                let venue = find_venue(txn, venue_id).await?;
                let shows_removed = Show::delete_many()
                    .filter(show::Column::VenueId.eq(venue_id))
                    .exec(txn)
                    .await?
                    .rows_affected;
                Venue::delete_by_id(venue_id).exec(txn).await?;
                Ok((venue, shows_removed))
            })
        })
        .await?;
    info!(
        "Deleted venue {} with id {} and {} of its shows",
        deleted.name, deleted.id, shows_removed
    );
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use entities::genres::Genres;
    use entities::show_local_model::ShowModel;

    use super::*;
    use crate::artists::add_artist;
    use crate::shows::add_show;
    use crate::test_support::{at, artist, database, venue};

    #[tokio::test]
    async fn created_venue_reads_back_verbatim() {
        let db = database().await;
        let mut submitted = venue("The Musical Hop", "San Francisco", "CA");
        submitted.website = "https://www.themusicalhop.com".to_string();
        submitted.facebook_link = "https://www.facebook.com/TheMusicalHop".to_string();
        submitted.seeking_talent = true;
        submitted.description = "We are on the lookout for a local artist".to_string();

        let created = add_venue(&db, submitted.clone()).await.unwrap();
        let stored = get_venue_by_id(&db, created.id).await.unwrap();

        assert_eq!(stored.name, submitted.name);
        assert_eq!(stored.genres, Genres(vec!["Jazz".into(), "Reggae".into()]));
        assert_eq!(stored.website, submitted.website);
        assert_eq!(stored.facebook_link, submitted.facebook_link);
        assert!(stored.seeking_talent);
        assert_eq!(stored.description, submitted.description);
    }

    #[tokio::test]
    async fn venues_group_by_state_and_city() {
        let db = database().await;
        let now = at("2024-05-01 12:00:00");
        let hop = add_venue(&db, venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        add_venue(&db, venue("Park Square Live Music & Coffee", "San Francisco", "CA"))
            .await
            .unwrap();
        add_venue(&db, venue("The Dueling Pianos Bar", "New York", "NY"))
            .await
            .unwrap();
        let guns = add_artist(&db, artist("Guns N Petals")).await.unwrap();
        add_show(
            &db,
            ShowModel {
                venue_id: hop.id,
                artist_id: guns.id,
                start_time: at("2035-04-01 20:00:00"),
            },
        )
        .await
        .unwrap();

        let areas = get_venues_by_area(&db, now).await.unwrap();

        assert_eq!(areas.len(), 2);
        assert_eq!((areas[0].state.as_str(), areas[0].city.as_str()), ("CA", "San Francisco"));
        assert_eq!(areas[1].state, "NY");
        let names: Vec<&str> = areas[0].venues.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Park Square Live Music & Coffee", "The Musical Hop"]);
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 1);
        assert_eq!(areas[0].venues[0].num_upcoming_shows, 0);
    }

    #[tokio::test]
    async fn search_ignores_case_and_matches_substrings() {
        let db = database().await;
        let now = at("2024-05-01 12:00:00");
        add_venue(&db, venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        add_venue(&db, venue("Park Square Live Music & Coffee", "San Francisco", "CA"))
            .await
            .unwrap();

        for term in ["Hop", "hop", "HOP"] {
            let found = search_venues(&db, term, now).await.unwrap();
            assert_eq!(found.len(), 1, "term {term}");
            assert_eq!(found[0].name, "The Musical Hop");
        }
        assert_eq!(search_venues(&db, "Music", now).await.unwrap().len(), 2);
        assert_eq!(search_venues(&db, "", now).await.unwrap().len(), 2);
        assert!(search_venues(&db, "100%", now).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn detail_splits_past_and_upcoming() {
        let db = database().await;
        let now = at("2024-05-01 12:00:00");
        let hop = add_venue(&db, venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let guns = add_artist(&db, artist("Guns N Petals")).await.unwrap();
        for start in ["2019-05-21 21:30:00", "2024-05-01 12:00:00", "2035-04-01 20:00:00"] {
            add_show(
                &db,
                ShowModel {
                    venue_id: hop.id,
                    artist_id: guns.id,
                    start_time: at(start),
                },
            )
            .await
            .unwrap();
        }

        let detail = get_venue_detail(&db, hop.id, now).await.unwrap();

        assert_eq!(detail.shows.past.len(), 2);
        assert_eq!(detail.shows.upcoming.len(), 1);
        assert_eq!(detail.shows.upcoming[0].1.name, "Guns N Petals");
        assert!(detail.shows.past.iter().all(|(show, _)| show.start_time <= now));
    }

    #[tokio::test]
    async fn missing_venue_is_not_found() {
        let db = database().await;
        let err = get_venue_detail(&db, 42, at("2024-05-01 12:00:00"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn empty_changes_keep_stored_values() {
        let db = database().await;
        let hop = add_venue(&db, venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();

        let updated = update_venue(
            &db,
            hop.id,
            VenueChanges {
                phone: Some("415-000-0000".to_string()),
                seeking_talent: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.phone, "415-000-0000");
        assert_eq!(updated.name, "The Musical Hop");
        assert_eq!(updated.address, hop.address);
        assert_eq!(updated.genres, hop.genres);
        assert!(updated.seeking_talent);
    }

    #[tokio::test]
    async fn delete_removes_venue_and_its_shows() {
        let db = database().await;
        let hop = add_venue(&db, venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let guns = add_artist(&db, artist("Guns N Petals")).await.unwrap();
        add_show(
            &db,
            ShowModel {
                venue_id: hop.id,
                artist_id: guns.id,
                start_time: at("2035-04-01 20:00:00"),
            },
        )
        .await
        .unwrap();

        delete_venue_by_id(&db, hop.id).await.unwrap();

        assert!(get_venue_by_id(&db, hop.id).await.unwrap_err().is_not_found());
        assert!(shows::get_all_shows(&db).await.unwrap().is_empty());
        assert!(delete_venue_by_id(&db, hop.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_shows() {
        let db = database().await;
        let hop = add_venue(&db, venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let guns = add_artist(&db, artist("Guns N Petals")).await.unwrap();
        add_show(
            &db,
            ShowModel {
                venue_id: hop.id,
                artist_id: guns.id,
                start_time: at("2035-04-01 20:00:00"),
            },
        )
        .await
        .unwrap();
        // Shows go first, then the venue row refuses to go.
        db.execute_unprepared(
            "CREATE TRIGGER keep_venue BEFORE DELETE ON venue \
             BEGIN SELECT RAISE(ABORT, 'venue is locked'); END",
        )
        .await
        .unwrap();

        let err = delete_venue_by_id(&db, hop.id).await.unwrap_err();

        assert!(matches!(err, StoreError::Database(_)));
        assert_eq!(get_venue_by_id(&db, hop.id).await.unwrap().name, "The Musical Hop");
        assert_eq!(shows::get_all_shows(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn broken_schema_is_a_database_error() {
        let db = database().await;
        db.execute_unprepared("DROP TABLE show").await.unwrap();
        db.execute_unprepared("DROP TABLE venue").await.unwrap();

        let err = add_venue(&db, venue("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap_err();

        assert!(!err.is_not_found());
        assert!(matches!(err, StoreError::Database(_)));
    }
}
