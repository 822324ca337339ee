use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use log::debug;
use schoolfeed_core::errors::{DatabaseError, Error, Result};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A write job runs against the actor's connection inside one immediate
// transaction. The return type is erased so a single channel carries every job.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type ErasedReply = Result<Box<dyn Any + Send + 'static>>;

/// Capacity of the job queue.
const WRITE_QUEUE_SIZE: usize = 1024;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<ErasedReply>,
    )>,
}

impl WriteHandle {
    /// Executes a job on the writer actor's dedicated connection.
    ///
    /// The job is committed when it returns `Ok` and rolled back otherwise.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| writer_gone("writer actor has stopped"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_gone("writer actor dropped the reply"))??;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| writer_gone("unexpected writer result type"))
    }
}

fn writer_gone(reason: &str) -> Error {
    Error::Database(DatabaseError::Internal(reason.to_string()))
}

/// Spawns a background task that is the only writer to the database.
///
/// The actor takes one connection from the pool up front and holds it for its
/// whole lifetime, processing jobs strictly in arrival order. It stops once
/// every `WriteHandle` has been dropped.
pub fn spawn_writer(pool: DbPool) -> Result<WriteHandle> {
    let mut conn = pool.get().map_err(StorageError::from)?;
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<ErasedReply>,
    )>(WRITE_QUEUE_SIZE);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result: ErasedReply = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| {
                    debug!("Write transaction rolled back: {}", e);
                    e.into()
                });

            // The caller may have gone away (cancelled request)
            let _ = reply_tx.send(result);
        }
        debug!("Writer actor stopped");
    });

    Ok(WriteHandle { tx })
}
