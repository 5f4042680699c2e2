pub mod error;
pub mod middleware;
pub mod routes;

use db::DBService;

/// Shared handler state: the database service behind every route.
#[derive(Clone)]
pub struct AppState {
    db: DBService,
}

impl AppState {
    pub fn new(db: DBService) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }
}
