use sea_orm::prelude::DateTime;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, DbErr, TransactionError};

pub mod artists;
pub mod shows;
pub mod venues;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} with id {id} does not exist")]
    NotFound { entity: &'static str, id: i32 },
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<TransactionError<StoreError>> for StoreError {
    fn from(err: TransactionError<StoreError>) -> Self {
        match err {
            TransactionError::Connection(err) => StoreError::Database(err),
            TransactionError::Transaction(err) => err,
        }
    }
}

/// A venue or an artist as it shows up in listings and search results.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntitySummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partitioned<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

/// Splits `items` into past (`start <= now`) and upcoming (`start > now`).
/// Order inside each half is preserved.
pub fn partition_by_start<T>(
    items: Vec<T>,
    now: DateTime,
    start_time: impl Fn(&T) -> DateTime,
) -> Partitioned<T> {
    let (upcoming, past) = items.into_iter().partition(|item| start_time(item) > now);
    Partitioned { past, upcoming }
}

/// Case-insensitive substring match of `term` against a text column.
/// Folding of the column is whatever the backend's `lower()` does: full
/// Unicode on Postgres, ASCII only on SQLite.
pub(crate) fn name_matches<C>(column: C, term: &str) -> SimpleExpr
where
    C: ColumnTrait + 'static,
{
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '!') {
            pattern.push('!');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('!'))
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDateTime;
    use entities::artist_local_model::ArtistModel;
    use entities::genres::Genres;
    use entities::venue_local_model::VenueModel;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::prelude::DateTime;
    use sea_orm::{Database, DatabaseConnection};

    pub async fn database() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("in-memory database");
        Migrator::up(&db, None).await.expect("migrations");
        db
    }

    pub fn at(timestamp: &str) -> DateTime {
        NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").expect("timestamp")
    }

    pub fn venue(name: &str, city: &str, state: &str) -> VenueModel {
        VenueModel {
            name: name.to_string(),
            genres: Genres(vec!["Jazz".to_string(), "Reggae".to_string()]),
            city: city.to_string(),
            state: state.to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            ..Default::default()
        }
    }

    pub fn artist(name: &str) -> ArtistModel {
        ArtistModel {
            name: name.to_string(),
            genres: Genres(vec!["Rock n Roll".to_string()]),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            ..Default::default()
        }
    }
}
