use crate::config::OverlayConfig;
use crate::input::{Button, InputState, Tool, UiState};
use crate::nav::Navigator;
use crate::render::{self, StrokeStyle, Surface};
use crate::session::{PageSessionStore, Stroke, StrokeTool};
use crate::transform::{Point, ViewTransform};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The surface content changed and must be redrawn.
    RenderNeeded,
    /// The surface must be reallocated at a new pixel size.
    SurfaceResized { width: u32, height: u32 },
    /// The surface moved; the host translates it to `(x, y)` in screen pixels.
    OffsetChanged { x: f64, y: f64 },
    /// The current page changed.
    PageChanged { page: u32 },
    /// The host should ask its document collaborator to render `page` at `scale`.
    PageRenderRequested { page: u32, scale: f64 },
    /// A stroke was appended to `page`'s log.
    StrokeCommitted { page: u32, tool: StrokeTool, points: Vec<Point> },
}

/// Core engine state: every rule that does not touch the raster surface.
///
/// Separated from `Engine` so gesture and navigation logic can be tested
/// without allocating pixels.
pub struct EngineCore {
    pub sessions: PageSessionStore,
    pub nav: Navigator,
    pub transform: ViewTransform,
    pub ui: UiState,
    pub input: InputState,
    config: OverlayConfig,
}

impl EngineCore {
    /// Create an engine for a document of `page_count` pages, showing page 1.
    ///
    /// Returns `None` for an empty document; the host shows its load-error
    /// state instead of an overlay.
    #[must_use]
    pub fn new(page_count: u32, config: OverlayConfig) -> Option<Self> {
        let config = config.sanitized();
        let nav = Navigator::new(page_count)?;
        let mut sessions = PageSessionStore::new(page_count);
        sessions.get_or_create(nav.current_page());
        Some(Self {
            sessions,
            nav,
            transform: ViewTransform::with_limits(&config),
            ui: UiState::default(),
            input: InputState::default(),
            config,
        })
    }

    // --- Tool / page actions ---

    /// Set the tool used by the next pointer-down. An active gesture keeps
    /// the tool it started with.
    pub fn set_tool(&mut self, tool: Tool) {
        tracing::debug!(?tool, "tool selected");
        self.ui.tool = tool;
    }

    /// Remove every committed stroke from the current page.
    pub fn clear_page(&mut self) -> Vec<Action> {
        self.sessions.clear_page(self.nav.current_page());
        vec![Action::RenderNeeded]
    }

    // --- Zoom ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        if self.transform.zoom_in_by(self.config.zoom_step) {
            self.scale_changed()
        } else {
            Vec::new()
        }
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        if self.transform.zoom_out_by(self.config.zoom_step) {
            self.scale_changed()
        } else {
            Vec::new()
        }
    }

    fn scale_changed(&self) -> Vec<Action> {
        let (width, height) = self.surface_size();
        tracing::debug!(scale = self.transform.scale(), width, height, "scale changed");
        vec![
            Action::SurfaceResized { width, height },
            Action::PageRenderRequested { page: self.nav.current_page(), scale: self.transform.scale() },
            Action::RenderNeeded,
        ]
    }

    // --- Navigation ---

    /// Jump to page `n`, clamped to the document.
    ///
    /// A draw gesture in progress is committed to the page it was drawn on
    /// before the page changes.
    pub fn go_to_page(&mut self, n: i64) -> Vec<Action> {
        let mut actions = self.end_gesture();
        if self.nav.go_to_page(n) {
            actions.extend(self.page_changed());
        }
        actions
    }

    pub fn next_page(&mut self) -> Vec<Action> {
        self.go_to_page(i64::from(self.nav.current_page()) + 1)
    }

    pub fn prev_page(&mut self) -> Vec<Action> {
        self.go_to_page(i64::from(self.nav.current_page()) - 1)
    }

    fn page_changed(&mut self) -> Vec<Action> {
        let page = self.nav.current_page();
        self.sessions.get_or_create(page);
        vec![
            Action::PageChanged { page },
            Action::PageRenderRequested { page, scale: self.transform.scale() },
            Action::RenderNeeded,
        ]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if !screen_pt.is_finite() {
            tracing::debug!(x = screen_pt.x, y = screen_pt.y, "ignoring non-finite pointer down");
            return Vec::new();
        }
        if !self.input.is_idle() {
            tracing::debug!("pointer down during active gesture ignored");
            return Vec::new();
        }

        match self.ui.tool.stroke_tool() {
            None => {
                if button == Button::Primary {
                    self.input = InputState::Panning { last_screen: screen_pt };
                }
                Vec::new()
            }
            Some(tool) => {
                let start = self.transform.to_surface_space(screen_pt);
                tracing::debug!(?tool, x = start.x, y = start.y, "stroke started");
                self.input = InputState::Drawing { stroke: Stroke::begin(tool, start, self.transform.scale()) };
                vec![Action::RenderNeeded]
            }
        }
    }

    #[allow(clippy::float_cmp)]
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if !screen_pt.is_finite() {
            tracing::debug!(x = screen_pt.x, y = screen_pt.y, "ignoring non-finite pointer move");
            return Vec::new();
        }
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen } => {
                let dx = screen_pt.x - last_screen.x;
                let dy = screen_pt.y - last_screen.y;
                *last_screen = screen_pt;
                if dx == 0.0 && dy == 0.0 {
                    return Vec::new();
                }
                self.transform.pan(dx, dy);
                let offset = self.transform.offset();
                vec![Action::OffsetChanged { x: offset.x, y: offset.y }]
            }
            InputState::Drawing { stroke } => {
                let p = self.transform.to_surface_space(screen_pt);
                // Keep every point in the stroke's recording scale even if the
                // view was zoomed mid-gesture.
                let k = stroke.scale() / self.transform.scale();
                stroke.push(Point::new(p.x * k, p.y * k));
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    /// The pointer left the surface; treated exactly like pointer-up.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Panning { .. } => {
                tracing::debug!("pan finished");
                Vec::new()
            }
            InputState::Drawing { stroke } => {
                let page = self.nav.current_page();
                let tool = stroke.tool();
                let points = stroke.points().to_vec();
                if self.sessions.commit_stroke(page, stroke) {
                    vec![Action::StrokeCommitted { page, tool, points }, Action::RenderNeeded]
                } else {
                    vec![Action::RenderNeeded]
                }
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.nav.current_page()
    }

    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.nav.page_count()
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.nav.can_go_next()
    }

    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.nav.can_go_prev()
    }

    /// The current view transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    #[must_use]
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Surface pixel size for the current scale.
    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        self.transform.surface_size(self.config.base_width, self.config.base_height)
    }

    /// Committed strokes of `page`.
    #[must_use]
    pub fn strokes(&self, page: u32) -> &[Stroke] {
        self.sessions.strokes(page)
    }

    /// The stroke being drawn right now, if any.
    #[must_use]
    pub fn in_progress(&self) -> Option<&Stroke> {
        self.input.active_stroke()
    }
}

/// What the committed layer was last drawn for.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LayerKey {
    page: u32,
    scale: f64,
    revision: u64,
    size: (u32, u32),
}

/// The full overlay engine. Wraps `EngineCore` and owns the raster surface,
/// which is redrawn whenever an operation reports [`Action::RenderNeeded`].
///
/// Committed strokes of the current page are cached in a separate layer that
/// is only rebuilt when the page, scale, or a stroke log changes. Pointer
/// moves composite that layer with the in-progress stroke.
pub struct Engine {
    surface: Surface,
    committed: Surface,
    layer_key: Option<LayerKey>,
    style: StrokeStyle,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine and its surface. Returns `None` for an empty document
    /// or a surface that cannot be allocated.
    #[must_use]
    pub fn new(page_count: u32, config: OverlayConfig) -> Option<Self> {
        let core = EngineCore::new(page_count, config)?;
        let (width, height) = core.surface_size();
        let surface = Surface::new(width, height)?;
        let committed = Surface::new(width, height)?;
        let style = StrokeStyle::from_config(core.config());
        Some(Self { surface, committed, layer_key: None, style, core })
    }

    // --- Delegated actions ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.core.set_tool(tool);
    }

    pub fn clear_page(&mut self) -> Vec<Action> {
        let actions = self.core.clear_page();
        self.apply(actions)
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        let actions = self.core.zoom_in();
        self.apply(actions)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        let actions = self.core.zoom_out();
        self.apply(actions)
    }

    pub fn go_to_page(&mut self, n: i64) -> Vec<Action> {
        let actions = self.core.go_to_page(n);
        self.apply(actions)
    }

    pub fn next_page(&mut self) -> Vec<Action> {
        let actions = self.core.next_page();
        self.apply(actions)
    }

    pub fn prev_page(&mut self) -> Vec<Action> {
        let actions = self.core.prev_page();
        self.apply(actions)
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        let actions = self.core.on_pointer_down(screen_pt, button);
        self.apply(actions)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_move(screen_pt);
        self.apply(actions)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_up();
        self.apply(actions)
    }

    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let actions = self.core.on_pointer_leave();
        self.apply(actions)
    }

    fn apply(&mut self, actions: Vec<Action>) -> Vec<Action> {
        if actions.iter().any(|a| matches!(a, Action::RenderNeeded | Action::SurfaceResized { .. })) {
            self.render();
        }
        actions
    }

    // --- Render ---

    /// Resize the surface to the current scale and redraw the current page.
    pub fn render(&mut self) {
        let (width, height) = self.core.surface_size();
        self.committed.resize(width, height);
        let page = self.core.current_page();
        let scale = self.core.transform.scale();
        let key = LayerKey { page, scale, revision: self.core.sessions.revision(), size: self.committed.size() };
        if self.layer_key != Some(key) {
            tracing::trace!(page, scale, "rebuilding committed layer");
            render::draw(&mut self.committed, self.core.strokes(page), None, scale, &self.style);
            self.layer_key = Some(key);
        }
        render::compose(&mut self.surface, &self.committed, self.core.in_progress(), scale, &self.style);
    }

    /// Draw an arbitrary page's committed strokes onto a fresh surface at the
    /// current scale, without touching the active surface.
    #[must_use]
    pub fn render_page(&self, page: u32) -> Option<Surface> {
        let (width, height) = self.core.surface_size();
        let mut surface = Surface::new(width, height)?;
        render::draw(&mut surface, self.core.strokes(page), None, self.core.transform.scale(), &self.style);
        Some(surface)
    }

    // --- Queries ---

    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The cached raster of the current page's committed strokes.
    #[must_use]
    pub fn committed_layer(&self) -> &Surface {
        &self.committed
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.core.current_page()
    }

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.core.transform()
    }
}
