// Refresh scheduling - one task per dashboard page drives every reload and re-render
use crate::application::chart_container::ChartContainer;
use crate::application::dashboard_service::DashboardService;
use crate::chart::theme::ChartTheme;
use crate::domain::chart::ChartSpec;
use crate::domain::dashboard::DashboardView;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// State behind one server's dashboard: the last fetched view and what was drawn from it.
#[derive(Debug)]
pub struct DashboardPage {
    pub view: DashboardView,
    pub container: ChartContainer,
    /// Message from the most recent failed refresh, cleared by the next success.
    pub last_error: Option<String>,
    /// Completed render passes, loads and resizes alike.
    pub renders: u64,
}

pub type SharedPage = Arc<RwLock<DashboardPage>>;

impl DashboardPage {
    pub fn new(server_id: &str, specs: &[ChartSpec], width: f64) -> Self {
        Self {
            view: DashboardView::new(server_id),
            container: ChartContainer::for_specs(specs, width),
            last_error: None,
            renders: 0,
        }
    }

    pub fn shared(self) -> SharedPage {
        Arc::new(RwLock::new(self))
    }

    fn render(&mut self, specs: &[ChartSpec], theme: &ChartTheme) {
        self.container.render_all(specs, &self.view, theme);
        self.renders += 1;
    }
}

#[derive(Debug, Clone)]
pub struct RefreshSettings {
    pub interval: Duration,
    /// When off, only the initial load and explicit triggers run.
    pub auto_refresh: bool,
    /// Ticks ask the backend for a fresh sample before reloading.
    pub collect_on_tick: bool,
    pub resize_debounce: Duration,
    pub trigger_capacity: usize,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            auto_refresh: true,
            collect_on_tick: true,
            resize_debounce: Duration::from_millis(250),
            trigger_capacity: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Cycle {
    Load,
    Collect,
    Resize(f64),
}

#[derive(Clone)]
pub struct RefreshScheduler {
    service: DashboardService,
    specs: Arc<[ChartSpec]>,
    theme: Arc<ChartTheme>,
    settings: RefreshSettings,
}

impl RefreshScheduler {
    pub fn new(
        service: DashboardService,
        specs: Arc<[ChartSpec]>,
        theme: Arc<ChartTheme>,
        settings: RefreshSettings,
    ) -> Self {
        Self {
            service,
            specs,
            theme,
            settings,
        }
    }

    /// Starts the refresh task for one server. The first cycle loads immediately.
    pub fn spawn(self, server_id: impl Into<String>, page: SharedPage) -> RefreshHandle {
        let server_id = server_id.into();
        let (manual_tx, manual_rx) = mpsc::channel(self.settings.trigger_capacity.max(1));
        let (width_tx, width_rx) = watch::channel(0.0);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let triggers = Triggers {
            manual: manual_rx,
            width: width_rx,
            shutdown: shutdown_rx,
        };
        let task = tokio::spawn(self.run(server_id.clone(), page.clone(), triggers));

        RefreshHandle {
            controller: RefreshController {
                server_id,
                page,
                manual: manual_tx,
                width: Arc::new(width_tx),
            },
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }

    async fn run(self, server_id: String, page: SharedPage, mut triggers: Triggers) {
        let period = self.settings.interval;
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let on_tick = if self.settings.collect_on_tick {
            Cycle::Collect
        } else {
            Cycle::Load
        };

        let resize_timer = tokio::time::sleep(Duration::ZERO);
        tokio::pin!(resize_timer);
        let mut pending_width: Option<f64> = None;
        let mut width_open = true;

        tracing::info!(server_id = %server_id, interval_secs = period.as_secs(), "Refresh task started");
        let mut next = Some(Cycle::Load);

        loop {
            if let Some(cycle) = next.take() {
                let started = Instant::now();
                self.run_cycle(&server_id, &page, cycle).await;

                // Ticks that elapsed during the cycle are dropped, not replayed.
                if started.elapsed() >= period {
                    ticker.reset();
                }
                while triggers.manual.try_recv().is_ok() {
                    tracing::debug!(server_id = %server_id, "Dropping manual refresh requested mid-cycle");
                }
            }

            next = tokio::select! {
                _ = &mut triggers.shutdown => break,
                _ = ticker.tick(), if self.settings.auto_refresh => Some(on_tick),
                received = triggers.manual.recv() => match received {
                    Some(()) => Some(Cycle::Collect),
                    None => break,
                },
                changed = triggers.width.changed(), if width_open => {
                    match changed {
                        Ok(()) => {
                            pending_width = Some(*triggers.width.borrow_and_update());
                            resize_timer.as_mut().reset(Instant::now() + self.settings.resize_debounce);
                        }
                        Err(_) => width_open = false,
                    }
                    None
                }
                _ = &mut resize_timer, if pending_width.is_some() => pending_width.take().map(Cycle::Resize),
            };
        }

        tracing::info!(server_id = %server_id, "Refresh task stopped");
    }

    async fn run_cycle(&self, server_id: &str, page: &SharedPage, cycle: Cycle) {
        let loaded = match cycle {
            Cycle::Load => self.service.load(server_id).await,
            Cycle::Collect => self.service.collect_and_load(server_id).await,
            Cycle::Resize(width) => {
                let mut page = page.write().await;
                page.container.resize(width);
                page.render(&self.specs, &self.theme);
                tracing::debug!(server_id, width, "Re-rendered after resize");
                return;
            }
        };

        let mut page = page.write().await;
        match loaded {
            Ok(view) => {
                page.view = view;
                page.last_error = None;
                page.render(&self.specs, &self.theme);
                tracing::debug!(server_id, ?cycle, samples = page.view.history.len(), "Dashboard refreshed");
            }
            Err(e) => {
                // Previously mounted charts stay as they are.
                let message = format!("{:#}", e);
                tracing::warn!(server_id, ?cycle, error = %message, "Dashboard refresh failed");
                page.last_error = Some(message);
            }
        }
    }
}

/// Receiving ends owned by the refresh task.
struct Triggers {
    manual: mpsc::Receiver<()>,
    /// Latest requested width; only the newest value is ever kept.
    width: watch::Receiver<f64>,
    shutdown: oneshot::Receiver<()>,
}

/// Cloneable front for a running refresh task: read the page, send triggers.
#[derive(Debug, Clone)]
pub struct RefreshController {
    server_id: String,
    page: SharedPage,
    manual: mpsc::Sender<()>,
    width: Arc<watch::Sender<f64>>,
}

impl RefreshController {
    pub fn server_id(&self) -> &str {
        &self.server_id
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    /// Requests a collect-then-reload cycle. Returns false when the request was
    /// not queued because the backlog is full or the task is gone.
    pub fn refresh_now(&self) -> bool {
        match self.manual.try_send(()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::debug!(server_id = %self.server_id, "Manual refresh backlog full, dropping");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    /// Requests a re-render at `width` once resizing settles. A newer width
    /// replaces any still pending. Returns false for an unusable width or
    /// when the task is gone.
    pub fn resize(&self, width: f64) -> bool {
        if !(width > 0.0) || !width.is_finite() {
            return false;
        }
        self.width.send_replace(width);
        !self.width.is_closed()
    }
}

/// Owner of a running refresh task. Dropping it aborts the task.
#[derive(Debug)]
pub struct RefreshHandle {
    controller: RefreshController,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    pub fn controller(&self) -> &RefreshController {
        &self.controller
    }

    /// Stops the task after any in-flight cycle completes.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!(server_id = %self.controller.server_id, error = %e, "Refresh task ended abnormally");
            }
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
