use log::info;
use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240101_000001_create_tables" // Make sure this matches with the file name
    }
}

#[derive(Iden)]
pub enum Venue {
    Table,
    Id,
    Name,
    Genres,
    City,
    State,
    Address,
    Phone,
    ImageLink,
    FacebookLink,
    Website,
    SeekingTalent,
    Description,
}

#[derive(Iden)]
pub enum Artist {
    Table,
    Id,
    Name,
    Genres,
    City,
    State,
    Phone,
    ImageLink,
    FacebookLink,
    Website,
    SeekingVenue,
    SeekingDescription,
}

#[derive(Iden)]
pub enum Show {
    Table,
    Id,
    VenueId,
    ArtistId,
    StartTime,
}

fn text<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column).string().not_null().default("").to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        info!("Creating venue, artist and show tables");
        manager
            .create_table(
                Table::create()
                    .table(Venue::Table)
                    .col(
                        ColumnDef::new(Venue::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Venue::Name).string().not_null())
                    .col(ColumnDef::new(Venue::Genres).json().not_null())
                    .col(&mut text(Venue::City))
                    .col(&mut text(Venue::State))
                    .col(&mut text(Venue::Address))
                    .col(&mut text(Venue::Phone))
                    .col(&mut text(Venue::ImageLink))
                    .col(&mut text(Venue::FacebookLink))
                    .col(&mut text(Venue::Website))
                    .col(
                        ColumnDef::new(Venue::SeekingTalent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(&mut text(Venue::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Artist::Table)
                    .col(
                        ColumnDef::new(Artist::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Artist::Name).string().not_null())
                    .col(ColumnDef::new(Artist::Genres).json().not_null())
                    .col(&mut text(Artist::City))
                    .col(&mut text(Artist::State))
                    .col(&mut text(Artist::Phone))
                    .col(&mut text(Artist::ImageLink))
                    .col(&mut text(Artist::FacebookLink))
                    .col(&mut text(Artist::Website))
                    .col(
                        ColumnDef::new(Artist::SeekingVenue)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(&mut text(Artist::SeekingDescription))
                    .to_owned(),
            )
            .await?;

        // A show can't outlive its venue or its artist
        manager
            .create_table(
                Table::create()
                    .table(Show::Table)
                    .col(
                        ColumnDef::new(Show::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Show::VenueId).integer().not_null())
                    .col(ColumnDef::new(Show::ArtistId).integer().not_null())
                    .col(ColumnDef::new(Show::StartTime).date_time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-show-venue_id")
                            .from(Show::Table, Show::VenueId)
                            .to(Venue::Table, Venue::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-show-artist_id")
                            .from(Show::Table, Show::ArtistId)
                            .to(Artist::Table, Artist::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        info!("Migration ran ok!");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Show::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Artist::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Venue::Table).to_owned())
            .await?;
        Ok(())
    }
}
