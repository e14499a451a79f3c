use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_tables::Show;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Every listing filters shows by parent and start time
        manager
            .create_index(
                Index::create()
                    .name("idx-show-venue_id")
                    .table(Show::Table)
                    .col(Show::VenueId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-show-artist_id")
                    .table(Show::Table)
                    .col(Show::ArtistId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx-show-start_time")
                    .table(Show::Table)
                    .col(Show::StartTime)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in ["idx-show-start_time", "idx-show-artist_id", "idx-show-venue_id"] {
            manager
                .drop_index(Index::drop().name(name).table(Show::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}
