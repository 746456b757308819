/*!
 * Continuous conversion on file changes.
 *
 * Write events for each path are debounced independently: a write arms a
 * deadline one window ahead, further writes to the same path push that
 * deadline back, and once the path has been quiet for the whole window the
 * reprocess callback runs for it.
 *
 * All deadlines belong to a single task (`run_debounced`) that alternates
 * between receiving events and sleeping until the earliest deadline, so no
 * locking is involved and a superseded deadline can never fire.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::errors::{NotesError, Result};

/// Events forwarded from the filesystem watcher
#[derive(Debug)]
pub enum WatchEvent {
    /// A file was written
    Written(PathBuf),
    /// The notification backend reported an error
    Failed(notify::Error),
}

/// Per-path deadlines of pending reconversions
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadlines: HashMap<PathBuf, Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadlines: HashMap::new(),
        }
    }

    /// Arm or re-arm the deadline for `path`. Returns true when a pending
    /// deadline was replaced.
    pub fn arm(&mut self, path: PathBuf, now: Instant) -> bool {
        self.deadlines.insert(path, now + self.window).is_some()
    }

    pub fn is_pending(&self, path: &Path) -> bool {
        self.deadlines.contains_key(path)
    }

    pub fn pending(&self) -> usize {
        self.deadlines.len()
    }

    /// Earliest armed deadline, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// Remove and return every path whose deadline is at or before `now`
    pub fn take_expired(&mut self, now: Instant) -> Vec<PathBuf> {
        let mut expired: Vec<PathBuf> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(path, _)| path.clone())
            .collect();

        for path in &expired {
            self.deadlines.remove(path);
        }

        expired.sort();
        expired
    }
}

/// Debounce `events` and call `reprocess` once per quiet path.
///
/// `reprocess` runs inline on this task, so events arriving while it runs
/// wait in the channel and are debounced once it returns. Returns an error as
/// soon as the watcher reports one or `reprocess` fails. When the event
/// channel closes, pending deadlines are still served before returning.
pub async fn run_debounced<F>(
    mut events: mpsc::UnboundedReceiver<WatchEvent>,
    window: Duration,
    mut reprocess: F,
) -> Result<()>
where
    F: FnMut(&Path) -> Result<()>,
{
    let mut debouncer = Debouncer::new(window);
    let mut open = true;

    loop {
        let next_deadline = debouncer.next_deadline();
        if !open && next_deadline.is_none() {
            return Ok(());
        }

        tokio::select! {
            event = events.recv(), if open => match event {
                Some(WatchEvent::Written(path)) => {
                    if debouncer.arm(path.clone(), Instant::now()) {
                        debug!("Change to {:?} while pending, timer reset", path);
                    }
                }
                Some(WatchEvent::Failed(error)) => return Err(NotesError::Watch(error)),
                None => open = false,
            },
            _ = sleep_until(next_deadline.unwrap_or_else(Instant::now)), if next_deadline.is_some() => {
                for path in debouncer.take_expired(Instant::now()) {
                    info!("Files changed, re-converting");
                    debug!("Triggered by {:?}", path);
                    reprocess(&path)?;
                }
            }
        }
    }
}

/// Filesystem watcher forwarding write events for one directory
pub struct FileWatcher {
    /// Keeps the notification backend alive
    watcher: RecommendedWatcher,
    events: mpsc::UnboundedReceiver<WatchEvent>,
}

impl FileWatcher {
    /// Start watching `dir` recursively
    pub fn new(dir: &Path) -> Result<Self> {
        let (event_tx, events) = mpsc::unbounded_channel();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) if is_write(&event.kind) => {
                    for path in event.paths {
                        // Receiver gone means the loop has already stopped
                        let _ = event_tx.send(WatchEvent::Written(path));
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    let _ = event_tx.send(WatchEvent::Failed(error));
                }
            }
        })?;

        watcher.watch(dir, RecursiveMode::Recursive)?;
        info!("Watching for changes to {:?}", dir);

        Ok(Self { watcher, events })
    }

    /// Debounce this watcher's events until it fails or `reprocess` fails
    pub async fn run<F>(self, window: Duration, reprocess: F) -> Result<()>
    where
        F: FnMut(&Path) -> Result<()>,
    {
        let Self { watcher, events } = self;
        let result = run_debounced(events, window, reprocess).await;
        drop(watcher);
        result
    }
}

fn is_write(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_)) | EventKind::Modify(ModifyKind::Any)
    )
}
