use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::api::rates::{RatePoint, RateSource};
use crate::models::{ChartHandle, ChartSpec};
use crate::utils::url_template;
use crate::utils::{parse_token, ChartError};

/// Element id of the drawing surface
pub const SURFACE_ID: &str = "graph";

/// Logical size of a freshly created drawing surface
pub const DEFAULT_SURFACE_SIZE: (u32, u32) = (400, 200);

/// Where and how large a chart should be painted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceTarget {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Draws a chart spec onto a surface
pub trait Painter: Send + Sync {
    fn paint(&self, spec: &ChartSpec, target: &SurfaceTarget) -> Result<(), ChartError>;
}

/// The drawing surface and the single chart bound to it
#[derive(Debug)]
pub struct ChartSurface {
    target: SurfaceTarget,
    generation: u64,
    handle: Option<ChartHandle>,
}

impl ChartSurface {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            target: SurfaceTarget {
                path: path.into(),
                width,
                height,
            },
            generation: 0,
            handle: None,
        }
    }

    /// Throw away the current surface and start an empty one
    ///
    /// Deletes the rendered file, drops the live handle and bumps the generation.
    pub fn recreate(&mut self) -> Result<u64, ChartError> {
        match std::fs::remove_file(&self.target.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(ChartError::Io(e)),
        }
        self.handle = None;
        self.generation += 1;
        debug!("Recreated surface '{}' (generation {})", SURFACE_ID, self.generation);
        Ok(self.generation)
    }

    /// Bind a new chart, replacing any previous one
    fn attach(&mut self, handle: ChartHandle) {
        if let Some(old) = self.handle.replace(handle) {
            debug!("Replaced chart from ticket {}", old.ticket);
        }
    }

    pub fn handle(&self) -> Option<&ChartHandle> {
        self.handle.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn target(&self) -> &SurfaceTarget {
        &self.target
    }

    pub fn path(&self) -> &Path {
        &self.target.path
    }
}

/// Result of a redraw that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The chart was drawn and is now live on the surface
    Drawn { ticket: u64, generation: u64, points: usize },
    /// A newer redraw was issued before this one finished
    Superseded { ticket: u64, latest: u64 },
}

/// Fetches rates and (re)draws the single-series chart
///
/// Every redraw carries a ticket issued in trigger order. Only the newest
/// ticket may touch the surface, so the last request wins by issue order.
pub struct ChartRenderer {
    source: Arc<dyn RateSource>,
    painter: Arc<dyn Painter>,
    surface: Mutex<ChartSurface>,
    latest_ticket: AtomicU64,
}

impl ChartRenderer {
    pub fn new(source: Arc<dyn RateSource>, painter: Arc<dyn Painter>, surface: ChartSurface) -> Self {
        Self {
            source,
            painter,
            surface: Mutex::new(surface),
            latest_ticket: AtomicU64::new(0),
        }
    }

    /// Issue the next ticket. Issuing invalidates every older one.
    pub fn issue_ticket(&self) -> u64 {
        self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest_ticket.load(Ordering::SeqCst) == ticket
    }

    pub async fn recreate_surface(&self) -> Result<u64, ChartError> {
        self.surface.lock().await.recreate()
    }

    /// Snapshot of the chart currently bound to the surface
    pub async fn live_chart(&self) -> Option<ChartHandle> {
        self.surface.lock().await.handle().cloned()
    }

    pub async fn surface_path(&self) -> PathBuf {
        self.surface.lock().await.path().to_path_buf()
    }

    /// Issue a ticket and redraw in one step
    pub async fn render(
        &self,
        start_token: &str,
        end_token: &str,
        template: &str,
    ) -> Result<RenderOutcome, ChartError> {
        let ticket = self.issue_ticket();
        self.render_with_ticket(ticket, start_token, end_token, template).await
    }

    /// Fetch the substituted URL and draw it if `ticket` is still the newest
    pub async fn render_with_ticket(
        &self,
        ticket: u64,
        start_token: &str,
        end_token: &str,
        template: &str,
    ) -> Result<RenderOutcome, ChartError> {
        let url = url_template::substitute(template, start_token, end_token);
        info!("📈 Fetching rates (ticket {}): {}", ticket, url);

        let points = self.source.fetch_rates(&url).await?;

        if !self.is_current(ticket) {
            return Ok(self.superseded(ticket));
        }

        let window = parse_token(start_token).zip(parse_token(end_token));
        let spec = build_chart_spec(&points, window);
        debug!("Labels: {:?}", spec.labels);
        debug!("Rates: {:?}", spec.dataset.data);

        // Paint into a staging file without holding the surface lock
        let target = self.surface.lock().await.target().clone();
        let staging = SurfaceTarget {
            path: staging_path(&target.path, ticket),
            ..target
        };
        let painter = Arc::clone(&self.painter);
        let paint_target = staging.clone();
        let (painted, spec) = tokio::task::spawn_blocking(move || {
            let painted = painter.paint(&spec, &paint_target);
            (painted, spec)
        })
        .await
        .map_err(|e| ChartError::Render(format!("Painter task failed: {}", e)))?;

        if let Err(e) = painted {
            let _ = std::fs::remove_file(&staging.path);
            return Err(e);
        }

        let mut surface = self.surface.lock().await;
        // A newer trigger may have landed while we were painting
        if !self.is_current(ticket) {
            let _ = std::fs::remove_file(&staging.path);
            return Ok(self.superseded(ticket));
        }

        std::fs::rename(&staging.path, surface.path())?;

        let generation = surface.generation();
        surface.attach(ChartHandle {
            generation,
            ticket,
            url,
            spec,
        });

        info!("🎨 Drew {} points (ticket {}, generation {})", points.len(), ticket, generation);
        Ok(RenderOutcome::Drawn {
            ticket,
            generation,
            points: points.len(),
        })
    }

    fn superseded(&self, ticket: u64) -> RenderOutcome {
        let latest = self.latest_ticket.load(Ordering::SeqCst);
        debug!("Discarding response for ticket {} (latest is {})", ticket, latest);
        RenderOutcome::Superseded { ticket, latest }
    }
}

/// Sibling of the surface file that a render paints into before it is installed
///
/// Keeps the extension so the bitmap backend still picks the right encoder.
fn staging_path(path: &Path, ticket: u64) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| SURFACE_ID.to_string());
    let name = match path.extension() {
        Some(ext) => format!("{}.ticket-{}.{}", stem, ticket, ext.to_string_lossy()),
        None => format!("{}.ticket-{}", stem, ticket),
    };
    path.with_file_name(name)
}

/// Split rate points into index-aligned label and rate sequences
pub fn build_chart_spec(points: &[RatePoint], window: Option<(NaiveDate, NaiveDate)>) -> ChartSpec {
    let (labels, data): (Vec<String>, Vec<f64>) = points
        .iter()
        .map(|p| (p.date.clone(), p.rate))
        .unzip();

    ChartSpec::line(labels, data, window)
}
