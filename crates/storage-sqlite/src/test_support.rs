//! Fresh migrated databases for repository tests.

use std::sync::Arc;

use tempfile::TempDir;

use crate::db::{create_pool, init, run_migrations, spawn_writer, DbPool, WriteHandle};

/// Creates a migrated database in a temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the pool is used. Must be
/// called from within a tokio runtime because it starts the writer actor.
pub fn setup() -> (TempDir, Arc<DbPool>, WriteHandle) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("schoolfeed.db");
    let db_path = init(db_path.to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone()).unwrap();
    (dir, pool, writer)
}
