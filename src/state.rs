use crate::auth::jwt::JwtKeys;
use crate::auth::repo::{PgUserRepo, UserRepo};
use crate::config::JwtConfig;
use crate::entries::repo::{EntryRepo, PgEntryRepo};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub keys: JwtKeys,
    pub users: Arc<dyn UserRepo>,
    pub entries: Arc<dyn EntryRepo>,
}

impl AppState {
    /// Wires the Postgres-backed stores onto an already connected pool.
    pub fn from_pool(jwt: &JwtConfig, db: PgPool) -> Self {
        let users = Arc::new(PgUserRepo::new(db.clone())) as Arc<dyn UserRepo>;
        let entries = Arc::new(PgEntryRepo::new(db)) as Arc<dyn EntryRepo>;
        Self::from_parts(jwt, users, entries)
    }

    pub fn from_parts(
        jwt: &JwtConfig,
        users: Arc<dyn UserRepo>,
        entries: Arc<dyn EntryRepo>,
    ) -> Self {
        Self {
            keys: JwtKeys::from_config(jwt),
            users,
            entries,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::auth::repo::mem::MemUserRepo;
        use crate::entries::repo::mem::MemEntryRepo;

        let jwt = JwtConfig {
            secret: "test".into(),
            issuer: "test".into(),
            audience: "test".into(),
            ttl_minutes: 5,
        };

        Self::from_parts(
            &jwt,
            Arc::new(MemUserRepo::default()),
            Arc::new(MemEntryRepo::default()),
        )
    }
}
