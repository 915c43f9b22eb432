use std::collections::HashMap;
use std::sync::Arc;

use barberbook_core::catalog::Catalog;
use barberbook_core::session::BookingSession;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::ServerConfig;

/// In-memory booking sessions, keyed by session id.
///
/// Each session is owned by exactly one user flow; the lock only arbitrates
/// map access, not cross-session state.
pub type SessionStore = Arc<RwLock<HashMap<Uuid, BookingSession>>>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (the booking ledger).
    pub pool: barberbook_db::DbPool,
    /// The service/staff catalog, loaded once at startup and read-only after.
    pub catalog: Arc<Catalog>,
    /// Active booking sessions.
    pub sessions: SessionStore,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
