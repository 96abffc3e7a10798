//! Fleet monitor — background task that drives reconciliation cycles.
//!
//! The `FleetMonitor` owns the health snapshot and the poll task. One
//! cycle lists the fleet, fans out domain probes, and publishes the
//! merged result; the loop ticks on a fixed interval and also serves
//! out-of-cadence requests arriving through a [`RefreshHandle`].

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use fleetdeck_core::MonitorConfig;
use fleetdeck_registry::{PROJECT_LIST_LIMIT, Registry};

use crate::probe::probe_all;
use crate::snapshot::{HealthSnapshot, PageView};

/// Requests an out-of-cadence reconciliation cycle.
///
/// Cloneable and cheap; handed to user-triggered actions (ping,
/// rollback) so the snapshot reflects their effects promptly. Requests
/// are lossy: while one is already queued, further requests coalesce
/// into it.
#[derive(Clone)]
pub struct RefreshHandle {
    tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    pub fn new(tx: mpsc::Sender<()>) -> Self {
        Self { tx }
    }

    /// Ask the poll loop for a fresh cycle. Does not reset or extend
    /// the timer cadence.
    pub fn request(&self) {
        let _ = self.tx.try_send(());
    }
}

struct PollTask {
    handle: JoinHandle<()>,
    shutdown_tx: watch::Sender<bool>,
}

/// Owner of the health snapshot and the reconciliation loop.
pub struct FleetMonitor {
    registry: Arc<dyn Registry>,
    config: MonitorConfig,
    snapshot: Arc<RwLock<HealthSnapshot>>,
    refresh: RefreshHandle,
    /// Receiver end of the refresh channel. Lives as long as the
    /// monitor so handles stay valid across stop/start; the active
    /// poll task holds the lock while it runs.
    refresh_rx: Arc<Mutex<mpsc::Receiver<()>>>,
    task: Option<PollTask>,
}

impl FleetMonitor {
    pub fn new(registry: Arc<dyn Registry>, config: MonitorConfig) -> Self {
        let (tx, rx) = mpsc::channel(1);
        Self {
            registry,
            config,
            snapshot: Arc::new(RwLock::new(HealthSnapshot::default())),
            refresh: RefreshHandle::new(tx),
            refresh_rx: Arc::new(Mutex::new(rx)),
            task: None,
        }
    }

    /// Start the poll loop. A monitor without registry credentials
    /// stays inactive; that is not an error state.
    pub fn start(&mut self) {
        if self.task.is_some() {
            return;
        }
        if !self.registry.is_configured() {
            debug!("registry token not configured, fleet monitor stays inactive");
            return;
        }

        let refresh_rx = Arc::clone(&self.refresh_rx);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let registry = Arc::clone(&self.registry);
        let config = self.config.clone();
        let snapshot = Arc::clone(&self.snapshot);
        let handle = tokio::spawn(async move {
            // Waits for a previous (aborted) task to release the
            // receiver before taking over.
            let mut refresh_rx = refresh_rx.lock().await;
            // Requests queued while the monitor was stopped are stale.
            while refresh_rx.try_recv().is_ok() {}
            run_poll_loop(registry, config, snapshot, &mut refresh_rx, shutdown_rx).await;
        });

        self.task = Some(PollTask { handle, shutdown_tx });
        info!(interval = ?self.config.poll_interval, "fleet monitor started");
    }

    /// Stop the poll loop. In-flight requests resolve into the aborted
    /// task and are discarded.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.shutdown_tx.send(true);
            task.handle.abort();
            info!("fleet monitor stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Handle for requesting out-of-cadence reconciliation. Handles
    /// stay valid for the monitor's whole lifetime, including across
    /// stop/start; requests made while the loop is stopped are
    /// discarded on the next start.
    pub fn refresh_handle(&self) -> RefreshHandle {
        self.refresh.clone()
    }

    /// Current snapshot, cloned out of the shared reference.
    pub async fn snapshot(&self) -> HealthSnapshot {
        self.snapshot.read().await.clone()
    }

    /// One page of the fleet view at the configured page size.
    pub async fn page(&self, page: usize) -> PageView {
        self.snapshot.read().await.page(page, self.config.page_size)
    }

    /// Run a single reconciliation cycle on the caller's task. Used on
    /// mount and by tests; the background loop calls the same path.
    pub async fn run_once(&self) {
        run_cycle(self.registry.as_ref(), &self.config, &self.snapshot).await;
    }
}

impl Drop for FleetMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_poll_loop(
    registry: Arc<dyn Registry>,
    config: MonitorConfig,
    snapshot: Arc<RwLock<HealthSnapshot>>,
    refresh_rx: &mut mpsc::Receiver<()>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(config.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately and drives the on-start cycle.
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                run_cycle(registry.as_ref(), &config, &snapshot).await;
            }
            Some(()) = refresh_rx.recv() => {
                debug!("out-of-cadence reconciliation requested");
                run_cycle(registry.as_ref(), &config, &snapshot).await;
            }
            _ = shutdown_rx.changed() => {
                debug!("poll loop shutting down");
                break;
            }
        }
    }
}

/// One reconciliation cycle: fetch, probe, publish.
///
/// The snapshot is replaced wholesale only after every probe has
/// settled; a failed listing leaves the previous snapshot and its
/// timestamp untouched and the next tick retries.
async fn run_cycle(
    registry: &dyn Registry,
    config: &MonitorConfig,
    snapshot: &RwLock<HealthSnapshot>,
) {
    match registry.list_projects(PROJECT_LIST_LIMIT).await {
        Ok(projects) => {
            let probed = probe_all(registry, &config.platform_suffix, projects).await;
            let mut snap = snapshot.write().await;
            snap.projects = probed;
            snap.checked_at = Some(epoch_secs());
            snap.loading = false;
            debug!(projects = snap.projects.len(), "reconciliation cycle complete");
        }
        Err(e) => {
            warn!(error = %e, "reconciliation cycle failed, keeping previous snapshot");
            snapshot.write().await.loading = false;
        }
    }
}

fn epoch_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
