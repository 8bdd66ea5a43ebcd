//! # Resource Hook
//!
//! One generic fetch-state owner used by every read domain.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Resource State Machine                              │
//! │                                                                         │
//! │              mount() / refresh(params)                                  │
//! │   ┌──────────┐ ─────────────────────────► ┌──────────────────────────┐ │
//! │   │  Idle    │                            │ Loading                  │ │
//! │   │ (value)  │ ◄───────────┐              │ is_loading = true        │ │
//! │   └──────────┘             │              │ error = None             │ │
//! │        ▲                   │              │ value = previous/default │ │
//! │        │                   │              └────────────┬─────────────┘ │
//! │        │       ┌───────────┴──────┐      ok ┌──────────┴──────┐ err    │
//! │        │       │ Success          │ ◄───────┤                 ├──────► │
//! │        │       │ value = response │         └─────────────────┘   ┌──┐ │
//! │        │       └──────────────────┘   ┌──────────────────────────┐│  │ │
//! │        └───────────────────────────── │ Failure                  │◄──┘ │
//! │                                       │ error = message          │     │
//! │                                       │ value = DEFAULT          │     │
//! │                                       └──────────────────────────┘     │
//! │                                                                         │
//! │  GENERATION GUARD                                                       │
//! │  Every refresh takes generation N+1. A response whose generation is    │
//! │  no longer current is dropped. dispose() also bumps the generation,   │
//! │  so nothing issued before it can land afterwards.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mount Semantics
//! `mount()` fetches exactly once per view activation. Calling it again
//! before `dispose()` is a no-op. `dispose()` ends the mount so the next
//! navigation re-fetches.

use async_trait::async_trait;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use stockwise_core::CoreResult;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::transport::{Api, ApiRequest};

// =============================================================================
// Resource Identity
// =============================================================================

/// The four read domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceId {
    Catalog,
    SalesTrend,
    Metrics,
    Report,
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Catalog => write!(f, "catalog"),
            ResourceId::SalesTrend => write!(f, "sales_trend"),
            ResourceId::Metrics => write!(f, "metrics"),
            ResourceId::Report => write!(f, "report"),
        }
    }
}

// =============================================================================
// ResourceSpec Trait
// =============================================================================

/// Describes one read domain.
///
/// ## Implementing
/// ```text
/// Params ──request()──► ApiRequest ──Backend──► bytes ──normalize()──► Value
///                 │
///                 └── None: settle to Value::default() without a request
/// ```
pub trait ResourceSpec: Send + Sync + 'static {
    /// Which domain this is.
    const ID: ResourceId;

    /// The snapshot held by the resource.
    type Value: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Parameters of a fetch.
    type Params: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Maps parameters to a request.
    fn request(params: &Self::Params) -> Option<ApiRequest>;

    /// Turns a 2xx body into the snapshot.
    fn normalize(body: &[u8]) -> CoreResult<Self::Value>;

    /// Message stored in `error` when a fetch fails.
    fn failure_message() -> &'static str;
}

// =============================================================================
// Resource State
// =============================================================================

/// Observable state triple.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<V> {
    pub value: V,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<V: Default> Default for ResourceState<V> {
    fn default() -> Self {
        Self {
            value: V::default(),
            is_loading: false,
            error: None,
        }
    }
}

impl<V> ResourceState<V> {
    /// True once a fetch settled without error.
    pub fn is_ok(&self) -> bool {
        !self.is_loading && self.error.is_none()
    }
}

/// How a single refresh ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response was applied.
    Applied,
    /// A newer refresh was issued while this one was in flight.
    Superseded,
    /// The resource was disposed while this one was in flight.
    Disposed,
}

struct Control<P> {
    /// Parameters used by `refresh(None)`.
    last_params: P,
    /// Parameters used by `mount()`.
    defaults: P,
    generation: u64,
    /// Bumped by every dispose.
    epoch: u64,
    mounted: bool,
}

// =============================================================================
// Resource
// =============================================================================

/// Generic Resource Hook.
///
/// ## Usage
/// ```rust,ignore
/// let metrics = Resource::<MetricsSpec>::new(api.clone());
/// metrics.mount().await;
/// let snapshot = metrics.state();
/// ```
pub struct Resource<S: ResourceSpec> {
    api: Api,
    state: watch::Sender<ResourceState<S::Value>>,
    control: Mutex<Control<S::Params>>,
}

impl<S: ResourceSpec> Resource<S> {
    /// Creates a resource whose default parameters are `S::Params::default()`.
    pub fn new(api: Api) -> Self {
        Self::with_defaults(api, S::Params::default())
    }

    /// Creates a resource with explicit default parameters.
    pub fn with_defaults(api: Api, defaults: S::Params) -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            api,
            state,
            control: Mutex::new(Control {
                last_params: defaults.clone(),
                defaults,
                generation: 0,
                epoch: 0,
                mounted: false,
            }),
        }
    }

    pub fn id(&self) -> ResourceId {
        S::ID
    }

    /// Current snapshot.
    pub fn state(&self) -> ResourceState<S::Value> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<S::Value>> {
        self.state.subscribe()
    }

    /// Parameters the next `refresh(None)` will use.
    pub fn last_params(&self) -> S::Params {
        self.control().last_params.clone()
    }

    /// Replaces the parameters used by `mount()`.
    pub fn set_defaults(&self, defaults: S::Params) {
        self.control().defaults = defaults;
    }

    pub fn is_mounted(&self) -> bool {
        self.control().mounted
    }

    /// Starts a mount and performs its one automatic fetch.
    ///
    /// Returns `None` when already mounted (nothing fetched).
    pub async fn mount(&self) -> Option<RefreshOutcome> {
        let defaults = {
            let mut control = self.control();
            if control.mounted {
                return None;
            }
            control.mounted = true;
            control.defaults.clone()
        };

        debug!(resource = %S::ID, "Mounted");
        Some(self.refresh(Some(defaults)).await)
    }

    /// Ends the mount. In-flight responses are dropped and loading ends.
    pub fn dispose(&self) {
        {
            let mut control = self.control();
            control.mounted = false;
            control.epoch += 1;
            control.generation += 1;
        }
        self.state.send_if_modified(|s| {
            let was_loading = s.is_loading;
            s.is_loading = false;
            was_loading
        });
        debug!(resource = %S::ID, "Disposed");
    }

    /// Fetches and replaces the snapshot.
    ///
    /// `None` re-uses the last parameters.
    pub async fn refresh(&self, params: Option<S::Params>) -> RefreshOutcome {
        let (generation, epoch, params) = {
            let mut control = self.control();
            if let Some(p) = params {
                control.last_params = p;
            }
            control.generation += 1;
            (control.generation, control.epoch, control.last_params.clone())
        };

        let Some(request) = S::request(&params) else {
            debug!(resource = %S::ID, generation, "Nothing to fetch, settling to default");
            self.state.send_replace(ResourceState::default());
            return RefreshOutcome::Applied;
        };

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        debug!(resource = %S::ID, generation, path = %request.path, "Refreshing");
        let result = self.fetch(request).await;

        {
            let control = self.control();
            if control.epoch != epoch {
                debug!(resource = %S::ID, generation, "Dropping response after dispose");
                return RefreshOutcome::Disposed;
            }
            if control.generation != generation {
                debug!(
                    resource = %S::ID,
                    generation,
                    current = control.generation,
                    "Dropping superseded response"
                );
                return RefreshOutcome::Superseded;
            }
        }

        let next = match result {
            Ok(value) => ResourceState {
                value,
                is_loading: false,
                error: None,
            },
            Err(reason) => {
                warn!(resource = %S::ID, generation, %reason, "Refresh failed");
                ResourceState {
                    value: S::Value::default(),
                    is_loading: false,
                    error: Some(S::failure_message().to_string()),
                }
            }
        };
        self.state.send_replace(next);

        RefreshOutcome::Applied
    }

    async fn fetch(&self, request: ApiRequest) -> Result<S::Value, String> {
        let response = self
            .api
            .execute(&S::ID.to_string(), request)
            .await
            .map_err(|e| e.to_string())?;

        S::normalize(&response.body).map_err(|e| e.to_string())
    }

    fn control(&self) -> MutexGuard<'_, Control<S::Params>> {
        // Control is plain data, so a poisoned guard is still consistent.
        self.control
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: ResourceSpec> fmt::Debug for Resource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("id", &S::ID)
            .field("state", &*self.state.borrow())
            .finish()
    }
}

// =============================================================================
// Type-Erased Handle
// =============================================================================

/// What a mutation needs from a resource: refresh with the last params.
#[async_trait]
pub trait Refreshable: Send + Sync {
    fn resource_id(&self) -> ResourceId;

    async fn refresh_last(&self) -> RefreshOutcome;
}

#[async_trait]
impl<S: ResourceSpec> Refreshable for Resource<S> {
    fn resource_id(&self) -> ResourceId {
        S::ID
    }

    async fn refresh_last(&self) -> RefreshOutcome {
        self.refresh(None).await
    }
}
