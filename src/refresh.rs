//! Background rebuild of the library index

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::flatten::{DEFAULT_MAX_FOLDER_DEPTH, flatten_with_depth};
use crate::loader::PlaylistLoader;
use crate::model::LibraryIndex;
use crate::source::{LibrarySource, ProgressSink};

/// How many playlist fetches a cycle keeps in flight at once.
const CONCURRENT_LOADS: usize = 8;

/// Tuning for the refresh loop. Hosts can deserialize this from their own
/// config layer; defaults are a 5 second period and a 64-level ceiling.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshOptions {
    /// Seconds between the end of one cycle and the start of the next.
    pub period_secs: u64,
    /// Folder nesting ceiling applied while flattening the tree.
    pub max_folder_depth: usize,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            period_secs: 5,
            max_folder_depth: DEFAULT_MAX_FOLDER_DEPTH,
        }
    }
}

impl RefreshOptions {
    fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }
}

/// Outcome of one refresh cycle.
#[derive(Debug)]
pub struct CycleReport {
    /// Playlists installed into the new generation.
    pub loaded: usize,
    /// Playlists excluded from this generation because their fetch failed.
    pub failures: Vec<LoadFailure>,
}

/// One playlist that could not be loaded during a cycle.
#[derive(Debug)]
pub struct LoadFailure {
    pub link: String,
    pub error: anyhow::Error,
}

/// Run one full rebuild: fetch the folder tree, flatten it, load every
/// eligible playlist, and install the successes as a new index generation.
///
/// A single playlist failing to load excludes only that playlist; it is
/// recorded in the report and the cycle continues. A folder-tree fetch
/// failure aborts the whole cycle and leaves the previous generation in
/// place.
pub async fn refresh_once(
    source: &Arc<dyn LibrarySource>,
    index: &LibraryIndex,
    options: &RefreshOptions,
    progress: Option<&dyn ProgressSink>,
) -> Result<CycleReport> {
    let root = source
        .fetch_folder_tree()
        .await
        .context("fetching library folder tree")?;
    let links = flatten_with_depth(&root, options.max_folder_depth);
    let total = links.len();
    tracing::debug!(total, "rebuilding library index");

    let loader = PlaylistLoader::new(source.clone());
    let mut loads = futures::stream::iter(
        links
            .into_iter()
            .map(|link| {
                let loader = loader.clone();
                async move {
                    let result = loader.load(&link).await;
                    (link, result)
                }
            })
            .collect::<Vec<_>>(),
    )
    .buffer_unordered(CONCURRENT_LOADS);

    let mut playlists = Vec::with_capacity(total);
    let mut failures = Vec::new();
    let mut finished = 0usize;
    while let Some((link, result)) = loads.next().await {
        finished += 1;
        match result {
            Ok(playlist) => playlists.push(playlist),
            Err(error) => {
                tracing::warn!(link = %link, error = %error, "playlist load failed, excluded from this generation");
                failures.push(LoadFailure { link, error });
            }
        }
        if let Some(sink) = progress {
            sink.report_progress(percent(finished, total));
        }
    }
    if total == 0 {
        if let Some(sink) = progress {
            sink.report_progress(100);
        }
    }

    let loaded = playlists.len();
    index.replace(playlists).await;
    tracing::info!(loaded, failed = failures.len(), "library index rebuilt");
    Ok(CycleReport { loaded, failures })
}

fn percent(finished: usize, total: usize) -> u8 {
    ((finished * 100) / total.max(1)) as u8
}

/// Handle to the background refresh task.
///
/// The first cycle starts immediately and reports progress to `progress` if
/// one was given; later cycles run silently. Each cycle is scheduled a fixed
/// delay after the *end* of the previous one, so cycles never overlap and a
/// slow library simply refreshes less often.
pub struct RefreshScheduler {
    handle: JoinHandle<()>,
    shutdown: Arc<Notify>,
}

impl RefreshScheduler {
    pub fn start(
        source: Arc<dyn LibrarySource>,
        index: LibraryIndex,
        options: RefreshOptions,
        progress: Option<Arc<dyn ProgressSink>>,
    ) -> Self {
        let shutdown = Arc::new(Notify::new());
        let shutdown_signal = shutdown.clone();
        tracing::info!(period_secs = options.period_secs, "starting refresh scheduler");

        let handle = tokio::spawn(async move {
            let mut first_cycle = true;
            loop {
                let sink = if first_cycle { progress.as_deref() } else { None };
                match refresh_once(&source, &index, &options, sink).await {
                    Ok(report) => {
                        tracing::debug!(
                            loaded = report.loaded,
                            failed = report.failures.len(),
                            "refresh cycle finished"
                        );
                    }
                    Err(error) => {
                        // The previous generation stays in place; the next
                        // cycle retries from scratch.
                        tracing::warn!(error = %error, "refresh cycle aborted");
                    }
                }
                first_cycle = false;

                tokio::select! {
                    _ = tokio::time::sleep(options.period()) => {}
                    _ = shutdown_signal.notified() => break,
                }
            }
            tracing::debug!("refresh scheduler stopped");
        });

        Self { handle, shutdown }
    }

    /// Signal the loop to stop and wait for any in-flight cycle to finish.
    pub async fn stop(self) {
        self.shutdown.notify_one();
        let _ = self.handle.await;
    }
}
