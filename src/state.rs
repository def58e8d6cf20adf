//! Shared application state passed to every handler.

use mongodb::Database;

use crate::services::auth_service::AuthService;

/// State shared across all routes.
///
/// Both fields are cheap to clone: the database handle clones a reference to
/// the driver's internal connection pool, and the auth service clones its
/// prepared keys.
#[derive(Clone)]
pub struct AppState {
    /// Handle to the application database.
    pub db: Database,
    /// Token issuing and verification service.
    pub auth: AuthService,
}

impl AppState {
    pub fn new(db: Database, auth: AuthService) -> Self {
        Self { db, auth }
    }
}
