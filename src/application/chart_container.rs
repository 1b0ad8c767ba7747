// Chart container - named surfaces that hold the latest drawing for each chart
use crate::chart::bar::BarChartRenderer;
use crate::chart::gauge::RadialGaugeRenderer;
use crate::chart::line::LineChartRenderer;
use crate::chart::scene::Drawing;
use crate::chart::theme::ChartTheme;
use crate::domain::chart::ChartSpec;
use crate::domain::dashboard::DashboardView;

#[derive(Debug, Clone)]
pub struct Surface {
    pub id: String,
    pub width: f64,
    /// Height of whatever is currently mounted, zero before the first render.
    pub height: f64,
    mounted: Option<Drawing>,
}

impl Surface {
    fn new(id: String, width: f64) -> Self {
        Self {
            id,
            width,
            height: 0.0,
            mounted: None,
        }
    }

    pub fn mounted(&self) -> Option<&Drawing> {
        self.mounted.as_ref()
    }

    fn mount(&mut self, drawing: Drawing) {
        self.height = match &drawing {
            Drawing::Scene(scene) => scene.height,
            Drawing::Placeholder { min_height, .. } => *min_height,
        };
        self.mounted = Some(drawing);
    }
}

/// Owns the surfaces of one dashboard page. Holds no chart state beyond the
/// last drawing per surface; every render replaces it.
#[derive(Debug, Clone, Default)]
pub struct ChartContainer {
    surfaces: Vec<Surface>,
}

impl ChartContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// One surface per spec, all at `width`.
    pub fn for_specs(specs: &[ChartSpec], width: f64) -> Self {
        let mut container = Self::new();
        for spec in specs {
            container.register(spec.surface(), width);
        }
        container
    }

    /// Adds a surface, or updates its width when already registered.
    pub fn register(&mut self, id: &str, width: f64) {
        match self.surface_mut(id) {
            Some(surface) => surface.width = width,
            None => self.surfaces.push(Surface::new(id.to_string(), width)),
        }
    }

    pub fn resize(&mut self, width: f64) {
        for surface in &mut self.surfaces {
            surface.width = width;
        }
    }

    /// Re-renders every spec onto its surface. Returns how many were mounted.
    pub fn render_all(&mut self, specs: &[ChartSpec], view: &DashboardView, theme: &ChartTheme) -> usize {
        let mut rendered = 0;
        for spec in specs {
            let Some(surface) = self.surface_mut(spec.surface()) else {
                tracing::debug!(surface = spec.surface(), "No surface registered, skipping chart");
                continue;
            };
            let drawing = match spec {
                ChartSpec::Line(config) => {
                    let config = config.clone().with_width(surface.width);
                    LineChartRenderer::render(&view.history, &config, theme)
                }
                ChartSpec::Bar(config) => {
                    let config = config.clone().with_width(surface.width);
                    BarChartRenderer::render(&view.history, &config, theme)
                }
                ChartSpec::Gauge(config) => RadialGaugeRenderer::render(view.latest.as_ref(), config, theme),
            };
            surface.mount(drawing);
            rendered += 1;
        }
        rendered
    }

    pub fn surface(&self, id: &str) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.id == id)
    }

    fn surface_mut(&mut self, id: &str) -> Option<&mut Surface> {
        self.surfaces.iter_mut().find(|s| s.id == id)
    }

    pub fn mounted(&self, id: &str) -> Option<&Drawing> {
        self.surface(id).and_then(Surface::mounted)
    }

    /// Surfaces in registration order.
    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter()
    }
}
