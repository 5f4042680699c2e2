use std::str::FromStr;

use sqlx::{
    Error, Pool, Sqlite, SqlitePool,
    migrate::Migrator,
    sqlite::SqliteConnectOptions,
};
use utils::assets::asset_dir;

pub mod models;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct DBService {
    pub pool: Pool<Sqlite>,
}

impl DBService {
    pub async fn new() -> Result<DBService, Error> {
        let database_url = format!(
            "sqlite://{}",
            asset_dir().join("db.sqlite").to_string_lossy()
        );
        let options = SqliteConnectOptions::from_str(&database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePool::connect_with(options).await?;
        MIGRATOR.run(&pool).await?;
        Ok(DBService { pool })
    }

    /// Wrap an existing pool. Migrations are assumed to have run already;
    /// used by tests with in-memory databases.
    pub fn from_pool(pool: Pool<Sqlite>) -> DBService {
        DBService { pool }
    }
}
