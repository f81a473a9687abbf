use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::auth::repo::seaorm::SeaOrmUserStore;
use service::auth::AuthService;

/// Shared handler state: the connection pool plus the auth service built
/// over it at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmUserStore>>,
}
