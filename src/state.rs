use sqlx::SqlitePool;

use crate::checkout::CheckoutClient;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub checkout: CheckoutClient,
}
