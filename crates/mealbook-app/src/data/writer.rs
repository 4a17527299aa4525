//! Background persistence writer
//!
//! Whole-value writes are handed to a dedicated thread so callers never wait
//! on disk. Each value replaces the previous one completely, so when several
//! writes for the same key are queued only the newest is written.

use crate::data::storage::KeyValueStore;
use crate::error::Result;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

enum WriteJob {
    Write { key: String, value: String },
    Flush(Sender<()>),
    Shutdown,
}

/// Owns the writer thread; dropping it drains the queue and joins the thread
pub struct PersistWorker {
    tx: Sender<WriteJob>,
    failures: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl PersistWorker {
    /// Spawn the writer thread for `store`
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let (tx, rx) = unbounded();
        let failures = Arc::new(AtomicU64::new(0));
        let thread_failures = Arc::clone(&failures);

        let handle = std::thread::Builder::new()
            .name("favorites-writer".into())
            .spawn(move || run(rx, store, thread_failures))?;

        Ok(Self {
            tx,
            failures,
            handle: Some(handle),
        })
    }

    /// Queue a write of `value` under `key`
    pub fn submit(&self, key: &str, value: String) {
        let job = WriteJob::Write {
            key: key.to_string(),
            value,
        };
        if self.tx.send(job).is_err() {
            self.failures.fetch_add(1, Ordering::Relaxed);
            tracing::error!(key, "persistence writer has stopped; change kept in memory only");
        }
    }

    /// Block until every write submitted before this call has been attempted
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = bounded(1);
        if self.tx.send(WriteJob::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    /// Number of writes that failed so far
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

impl Drop for PersistWorker {
    fn drop(&mut self) {
        let _ = self.tx.send(WriteJob::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("persistence writer thread panicked");
            }
        }
    }
}

/// Jobs drained from the queue in one go
#[derive(Default)]
struct Batch {
    /// Latest value per key, in first-submission order
    writes: Vec<(String, String)>,
    acks: Vec<Sender<()>>,
    shutdown: bool,
}

impl Batch {
    fn absorb(&mut self, job: WriteJob) {
        match job {
            WriteJob::Write { key, value } => {
                match self.writes.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => slot.1 = value,
                    None => self.writes.push((key, value)),
                }
            }
            WriteJob::Flush(ack) => self.acks.push(ack),
            WriteJob::Shutdown => self.shutdown = true,
        }
    }
}

fn run(rx: Receiver<WriteJob>, store: Arc<dyn KeyValueStore>, failures: Arc<AtomicU64>) {
    while let Ok(job) = rx.recv() {
        let mut batch = Batch::default();
        batch.absorb(job);
        while let Ok(job) = rx.try_recv() {
            batch.absorb(job);
        }

        for (key, value) in &batch.writes {
            match store.set(key, value) {
                Ok(()) => tracing::debug!(key = %key, bytes = value.len(), "persisted"),
                Err(e) => {
                    failures.fetch_add(1, Ordering::Relaxed);
                    tracing::error!(
                        key = %key,
                        error = %e,
                        "failed to persist; change kept in memory only"
                    );
                }
            }
        }

        for ack in batch.acks {
            let _ = ack.send(());
        }

        if batch.shutdown {
            break;
        }
    }
}
