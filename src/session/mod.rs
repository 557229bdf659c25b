//! Map session: marker refresh scheduling
//!
//! Holds the caller-side state around the engine (all posts, filter
//! settings, latest viewport) and recomputes markers off the async runtime
//! whenever any of it changes.
//!
//! At most one computation runs at a time. A change arriving while one is in
//! flight marks the session pending; when the in-flight pass finishes, its
//! result is discarded and a fresh pass starts from the latest state. Only
//! results computed from the newest state are published.

use crate::cluster::ClusterEngine;
use crate::error::{Error, Result};
use crate::filter::{apply_filter, PostFilter};
use crate::geo::Viewport;
use crate::post::Post;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Published markers for one viewport
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerSnapshot {
    /// Increases with every published snapshot
    pub revision: u64,
    /// Viewport the markers belong to (None before the first pass)
    pub viewport: Option<Viewport>,
    pub markers: Vec<Post>,
}

/// Markers to add and remove when moving between two snapshots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerDiff {
    pub added: Vec<Post>,
    pub removed: Vec<Post>,
}

impl MarkerDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compare two marker lists by value
///
/// Markers present in both lists are left alone, so a renderer only
/// touches what changed.
pub fn diff_markers(old: &[Post], new: &[Post]) -> MarkerDiff {
    MarkerDiff {
        added: new.iter().filter(|m| !old.contains(m)).copied().collect(),
        removed: old.iter().filter(|m| !new.contains(m)).copied().collect(),
    }
}

struct SessionState {
    viewport: Option<Viewport>,
    posts: Vec<Post>,
    filter: PostFilter,
    /// Posts after filtering, shared with in-flight passes
    filtered: Arc<Vec<Post>>,
    computing: bool,
    pending: bool,
    revision: u64,
}

struct Inner {
    engine: ClusterEngine,
    runtime: Handle,
    state: Mutex<SessionState>,
    snapshots: watch::Sender<Arc<MarkerSnapshot>>,
}

/// Caller-side clustering session
#[derive(Clone)]
pub struct MapSession {
    inner: Arc<Inner>,
}

impl MapSession {
    /// Create a session on the current tokio runtime
    pub fn new(engine: ClusterEngine) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| Error::Session(format!("No tokio runtime available: {}", e)))?;
        let (snapshots, _) = watch::channel(Arc::new(MarkerSnapshot::default()));

        Ok(Self {
            inner: Arc::new(Inner {
                engine,
                runtime,
                state: Mutex::new(SessionState {
                    viewport: None,
                    posts: Vec::new(),
                    filter: PostFilter::default(),
                    filtered: Arc::new(Vec::new()),
                    computing: false,
                    pending: false,
                    revision: 0,
                }),
                snapshots,
            }),
        })
    }

    /// Receive every published marker snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<MarkerSnapshot>> {
        self.inner.snapshots.subscribe()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<MarkerSnapshot> {
        self.inner.snapshots.borrow().clone()
    }

    /// Current filter settings
    pub fn filter(&self) -> PostFilter {
        self.inner.lock_state().filter.clone()
    }

    /// The map moved or zoomed
    pub fn set_viewport(&self, viewport: Viewport) -> Result<()> {
        viewport.validate()?;
        self.inner.lock_state().viewport = Some(viewport);
        self.inner.request_refresh();
        Ok(())
    }

    /// Replace the full post list
    pub fn set_posts(&self, posts: Vec<Post>) {
        let changed = {
            let mut state = self.inner.lock_state();
            state.posts = posts;
            state.refilter()
        };
        if changed {
            self.inner.request_refresh();
        }
    }

    /// Append posts to the full post list
    pub fn add_posts(&self, posts: impl IntoIterator<Item = Post>) {
        let changed = {
            let mut state = self.inner.lock_state();
            state.posts.extend(posts);
            state.refilter()
        };
        if changed {
            self.inner.request_refresh();
        }
    }

    /// Replace the filter settings
    ///
    /// Returns the settings actually in effect: a topic the new settings no
    /// longer offer is deselected.
    pub fn set_filter(&self, filter: PostFilter) -> PostFilter {
        let (changed, effective) = {
            let mut state = self.inner.lock_state();
            state.filter = filter;
            let changed = state.refilter();
            (changed, state.filter.clone())
        };
        if changed {
            self.inner.request_refresh();
        }
        effective
    }
}

impl SessionState {
    /// Recompute the filtered posts; true when they changed
    fn refilter(&mut self) -> bool {
        let outcome = apply_filter(&self.posts, &self.filter);
        self.filter.topic = outcome.selected_topic;
        if *self.filtered == outcome.posts {
            return false;
        }
        self.filtered = Arc::new(outcome.posts);
        true
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start a pass, or mark one pending if a pass is already running
    fn request_refresh(self: &Arc<Self>) {
        let (viewport, posts) = {
            let mut state = self.lock_state();
            if state.pending {
                return;
            }
            if state.computing {
                state.pending = true;
                debug!("Refresh requested during a pass, marking pending");
                return;
            }
            let Some(viewport) = state.viewport else {
                return;
            };
            state.computing = true;
            (viewport, Arc::clone(&state.filtered))
        };

        let inner = Arc::clone(self);
        self.runtime.spawn(async move {
            let engine = inner.engine.clone();
            let result =
                tokio::task::spawn_blocking(move || engine.run(&viewport, &posts)).await;

            match result {
                Ok(markers) => inner.finish(viewport, markers),
                Err(e) => {
                    warn!("Clustering task failed: {}", e);
                    inner.finish(viewport, Err(Error::Session(e.to_string())));
                }
            }
        });
    }

    /// Publish a finished pass unless it was superseded
    fn finish(self: &Arc<Self>, viewport: Viewport, markers: Result<Vec<Post>>) {
        let published = {
            let mut state = self.lock_state();
            state.computing = false;
            if state.pending {
                state.pending = false;
                None
            } else {
                match markers {
                    Ok(markers) => {
                        state.revision += 1;
                        Some(MarkerSnapshot {
                            revision: state.revision,
                            viewport: Some(viewport),
                            markers,
                        })
                    }
                    Err(e) => {
                        warn!("Clustering pass failed: {}", e);
                        return;
                    }
                }
            }
        };

        match published {
            Some(snapshot) => {
                debug!(
                    "Publishing markers - revision={}, markers={}",
                    snapshot.revision,
                    snapshot.markers.len()
                );
                self.snapshots.send_replace(Arc::new(snapshot));
            }
            None => {
                debug!("Discarding superseded pass");
                self.request_refresh();
            }
        }
    }
}
