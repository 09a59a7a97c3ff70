//! Background save queue
//!
//! A single tokio task owns all writes. Snapshots are submitted without
//! waiting and written one at a time, in submission order, so an older
//! snapshot can never land after a newer one. When several snapshots are
//! already waiting, only the newest is written.
//!
//! Failed writes are logged and dropped; the next mutation carries the full
//! state again.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

use super::persistence::Persistence;
use crate::models::ListCollection;
use crate::store::SnapshotSink;

/// Commands sent to the save task
#[derive(Debug)]
pub enum SaveCommand {
    /// Write this snapshot
    Save(ListCollection),
    /// Acknowledge once everything submitted earlier has been handled
    Flush(oneshot::Sender<()>),
    /// Handle pending work, acknowledge, then stop
    Shutdown(oneshot::Sender<()>),
}

/// Counters shared between the task and its handles
#[derive(Debug, Default)]
struct QueueStats {
    written: AtomicU64,
    failed: AtomicU64,
    coalesced: AtomicU64,
}

/// Handle to the save task
///
/// Cheap to clone; the task stops when every handle is dropped or on
/// `shutdown`.
#[derive(Debug, Clone)]
pub struct SaveHandle {
    command_tx: mpsc::UnboundedSender<SaveCommand>,
    stats: Arc<QueueStats>,
}

/// Spawn the save task on the current tokio runtime
pub fn spawn_save_queue(persistence: Persistence) -> SaveHandle {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let stats = Arc::new(QueueStats::default());

    tokio::spawn(save_task_loop(persistence, command_rx, stats.clone()));

    SaveHandle { command_tx, stats }
}

impl SaveHandle {
    /// Queue a snapshot without waiting for it to be written
    pub fn enqueue(&self, snapshot: ListCollection) {
        if self.command_tx.send(SaveCommand::Save(snapshot)).is_err() {
            warn!("Save queue is closed, snapshot dropped");
        }
    }

    /// Wait until every snapshot queued so far has been handled
    ///
    /// Returns false if the task is no longer running.
    pub async fn flush(&self) -> bool {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.command_tx.send(SaveCommand::Flush(ack_tx)).is_err() {
            return false;
        }
        ack_rx.await.is_ok()
    }

    /// Finish pending writes and stop the task
    pub async fn shutdown(&self) -> bool {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.command_tx.send(SaveCommand::Shutdown(ack_tx)).is_err() {
            return false;
        }
        ack_rx.await.is_ok()
    }

    /// Whether the task is still accepting commands
    pub fn is_running(&self) -> bool {
        !self.command_tx.is_closed()
    }

    /// Snapshots written successfully
    pub fn written(&self) -> u64 {
        self.stats.written.load(Ordering::Relaxed)
    }

    /// Writes that failed
    pub fn failed(&self) -> u64 {
        self.stats.failed.load(Ordering::Relaxed)
    }

    /// Snapshots skipped because a newer one was already queued
    pub fn coalesced(&self) -> u64 {
        self.stats.coalesced.load(Ordering::Relaxed)
    }
}

impl SnapshotSink for SaveHandle {
    fn submit(&self, snapshot: ListCollection) {
        self.enqueue(snapshot);
    }
}

/// Main loop of the save task
async fn save_task_loop(
    persistence: Persistence,
    mut command_rx: mpsc::UnboundedReceiver<SaveCommand>,
    stats: Arc<QueueStats>,
) {
    // A non-save command pulled out while coalescing
    let mut deferred: Option<SaveCommand> = None;

    loop {
        let command = match deferred.take() {
            Some(command) => command,
            None => match command_rx.recv().await {
                Some(command) => command,
                None => break,
            },
        };

        match command {
            SaveCommand::Save(mut snapshot) => {
                // Only consecutive saves are merged; flushes keep their place
                while let Ok(next) = command_rx.try_recv() {
                    match next {
                        SaveCommand::Save(newer) => {
                            snapshot = newer;
                            stats.coalesced.fetch_add(1, Ordering::Relaxed);
                        }
                        other => {
                            deferred = Some(other);
                            break;
                        }
                    }
                }

                match persistence.save(&snapshot).await {
                    Ok(()) => {
                        stats.written.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(e) => {
                        stats.failed.fetch_add(1, Ordering::Relaxed);
                        error!(
                            error = %e,
                            recoverable = e.is_recoverable(),
                            hint = e.recovery_suggestion().unwrap_or("-"),
                            "Failed to save shopping lists"
                        );
                    }
                }
            }
            SaveCommand::Flush(ack) => {
                let _ = ack.send(());
            }
            SaveCommand::Shutdown(ack) => {
                let _ = ack.send(());
                break;
            }
        }
    }

    debug!("Save queue stopped");
}
