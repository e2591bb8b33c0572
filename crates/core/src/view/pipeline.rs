//! The view pipeline.
//!
//! Derives the display list from the store's full record set. The pipeline
//! owns no data: every cycle re-fetches, filters, sorts and publishes, and a
//! newer cycle fully supersedes an older one. Search input is debounced;
//! category/sort changes and the periodic background refresh recompute
//! immediately.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use crate::config::ViewConfig;
use crate::metrics;
use crate::store::{Torrent, TorrentStore};

use super::debounce::Debouncer;
use super::filter::DisplayFilter;
use super::sort::{sort_torrents, SortMode};
use super::types::{DisplayEntry, DisplayList, ViewControls};

/// What caused a recompute cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Debounced search input change.
    Search,
    /// Immediate category or sort change.
    Controls,
    /// Periodic background reload.
    Refresh,
}

impl RefreshTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshTrigger::Search => "search",
            RefreshTrigger::Controls => "controls",
            RefreshTrigger::Refresh => "refresh",
        }
    }
}

struct Inner {
    store: Arc<TorrentStore>,
    config: ViewConfig,
    controls: RwLock<ViewControls>,
    display: RwLock<DisplayList>,
    debouncer: Debouncer,

    // Runtime state
    cycle_counter: AtomicU64,
    published_cycle: AtomicU64,
    running: AtomicBool,
    shutdown_tx: broadcast::Sender<()>,
}

/// Derives and holds the current display list.
///
/// Cheaply cloneable; clones share the same derived state.
#[derive(Clone)]
pub struct ViewPipeline {
    inner: Arc<Inner>,
}

impl ViewPipeline {
    pub fn new(store: Arc<TorrentStore>, config: ViewConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let debouncer = Debouncer::new(Duration::from_millis(config.search_debounce_ms));

        Self {
            inner: Arc::new(Inner {
                store,
                config,
                controls: RwLock::new(ViewControls::default()),
                display: RwLock::new(DisplayList::empty()),
                debouncer,
                cycle_counter: AtomicU64::new(0),
                published_cycle: AtomicU64::new(0),
                running: AtomicBool::new(false),
                shutdown_tx,
            }),
        }
    }

    /// Start the pipeline: derive once, then spawn the periodic refresh loop.
    pub async fn start(&self) {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            warn!("View pipeline already running");
            return;
        }

        info!(
            "Starting view pipeline (refresh every {}s, search debounce {}ms)",
            self.inner.config.refresh_interval_secs, self.inner.config.search_debounce_ms
        );

        self.recompute(RefreshTrigger::Refresh).await;
        self.spawn_refresh_loop();
    }

    /// Stop the pipeline: discard pending timers and end the refresh loop.
    pub async fn stop(&self) {
        if !self.inner.running.swap(false, Ordering::SeqCst) {
            warn!("View pipeline not running");
            return;
        }

        self.inner.debouncer.cancel();
        let _ = self.inner.shutdown_tx.send(());
        info!("View pipeline stopped");
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    fn spawn_refresh_loop(&self) {
        let pipeline = self.clone();
        let mut shutdown_rx = self.inner.shutdown_tx.subscribe();
        let period = Duration::from_secs(self.inner.config.refresh_interval_secs);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            // The first tick completes immediately; start() already derived.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        pipeline.recompute(RefreshTrigger::Refresh).await;
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("View refresh loop shutting down");
                        break;
                    }
                }
            }
        });
    }

    /// Update the search text. The recompute runs after the quiescence
    /// window; typing again restarts the timer.
    pub async fn set_search(&self, text: impl Into<String>) {
        {
            let mut controls = self.inner.controls.write().await;
            controls.search = text.into();
        }

        let pipeline = self.clone();
        self.inner.debouncer.call(async move {
            pipeline.recompute(RefreshTrigger::Search).await;
        });
    }

    /// Update the category selector. Recomputes immediately; an empty
    /// selection means "any".
    pub async fn set_category(&self, category: Option<String>) {
        {
            let mut controls = self.inner.controls.write().await;
            controls.category = category.filter(|c| !c.is_empty());
        }
        self.recompute(RefreshTrigger::Controls).await;
    }

    /// Update the sort mode. Recomputes immediately.
    pub async fn set_sort(&self, sort: SortMode) {
        {
            let mut controls = self.inner.controls.write().await;
            controls.sort = sort;
        }
        self.recompute(RefreshTrigger::Controls).await;
    }

    /// Current control values.
    pub async fn controls(&self) -> ViewControls {
        self.inner.controls.read().await.clone()
    }

    /// The last published display list.
    pub async fn display(&self) -> DisplayList {
        self.inner.display.read().await.clone()
    }

    /// Run one full cycle: fetch → filter → sort → publish.
    ///
    /// Cycles are numbered; publishing is skipped if a newer cycle already
    /// published, so a slow older derivation can never overwrite a newer one.
    pub async fn recompute(&self, trigger: RefreshTrigger) {
        let cycle = self.inner.cycle_counter.fetch_add(1, Ordering::SeqCst) + 1;
        metrics::VIEW_CYCLES
            .with_label_values(&[trigger.as_str()])
            .inc();

        let torrents = self.inner.store.list_all().await;
        let total = torrents.len();
        let controls = self.inner.controls.read().await.clone();

        let filter = DisplayFilter::from_controls(&controls);
        let mut kept: Vec<Torrent> = torrents.into_iter().filter(|t| filter.matches(t)).collect();
        sort_torrents(&mut kept, controls.sort);

        let entries: Vec<DisplayEntry> = kept.iter().map(DisplayEntry::from).collect();
        let list = DisplayList {
            filtered: entries.len(),
            entries,
            total,
            last_refreshed: Utc::now(),
        };

        let mut display = self.inner.display.write().await;
        let published = self.inner.published_cycle.fetch_max(cycle, Ordering::SeqCst);
        if published > cycle {
            metrics::VIEW_CYCLES_SUPERSEDED.inc();
            debug!("View cycle {} superseded by {}", cycle, published);
            return;
        }
        *display = list;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBackend, NewTorrent};

    async fn store_with(names: &[&str]) -> Arc<TorrentStore> {
        let store = Arc::new(TorrentStore::new(MemoryBackend::new()));
        for name in names {
            store
                .add(NewTorrent::new(
                    *name,
                    format!("magnet:?xt=urn:btih:{}", name),
                    "other",
                ))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_recompute_publishes_all_records() {
        let store = store_with(&["a", "b"]).await;
        let pipeline = ViewPipeline::new(store, ViewConfig::default());

        pipeline.recompute(RefreshTrigger::Refresh).await;

        let display = pipeline.display().await;
        assert_eq!(display.total, 2);
        assert_eq!(display.filtered, 2);
        assert_eq!(display.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_category_change_recomputes_immediately() {
        let store = store_with(&["a"]).await;
        let pipeline = ViewPipeline::new(store, ViewConfig::default());

        pipeline.set_category(Some("video".to_string())).await;

        let display = pipeline.display().await;
        assert_eq!(display.total, 1);
        assert_eq!(display.filtered, 0);
    }

    #[tokio::test]
    async fn test_empty_category_means_any() {
        let store = store_with(&["a"]).await;
        let pipeline = ViewPipeline::new(store, ViewConfig::default());

        pipeline.set_category(Some(String::new())).await;

        assert_eq!(pipeline.controls().await.category, None);
        assert_eq!(pipeline.display().await.filtered, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_is_debounced() {
        let store = store_with(&["alpha", "beta"]).await;
        let pipeline = ViewPipeline::new(store, ViewConfig::default());
        pipeline.recompute(RefreshTrigger::Refresh).await;

        pipeline.set_search("alp").await;
        // Before the quiescence window the old list is still published.
        assert_eq!(pipeline.display().await.filtered, 2);

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(pipeline.display().await.filtered, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_loop_picks_up_new_records() {
        let store = store_with(&["a"]).await;
        let pipeline = ViewPipeline::new(Arc::clone(&store), ViewConfig::default());
        pipeline.start().await;
        assert_eq!(pipeline.display().await.total, 1);

        store
            .add(NewTorrent::new("b", "magnet:?xt=urn:btih:b", "other"))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(pipeline.display().await.total, 2);

        pipeline.stop().await;
    }

    #[tokio::test]
    async fn test_start_twice_is_a_noop() {
        let store = store_with(&[]).await;
        let pipeline = ViewPipeline::new(store, ViewConfig::default());

        pipeline.start().await;
        pipeline.start().await;
        assert!(pipeline.is_running());

        pipeline.stop().await;
        assert!(!pipeline.is_running());
    }
}
