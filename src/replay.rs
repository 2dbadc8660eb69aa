//! Drives an [`Engine`] from a [`Script`] and writes the annotated pages out.
//!
//! The host side of the collaborator contract lives here: it gates the
//! document's file type, refuses empty documents, forwards every script event
//! to the engine, and composites each visited page's overlay (translated by
//! the pan offset) over the collaborator's page raster.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use overlay::config::OverlayConfig;
use overlay::document::{DocumentError, DocumentSource, check_file_type};
use overlay::engine::{Action, Engine};
use overlay::transform::Point;
use tiny_skia::{PixmapPaint, Transform};

use crate::blank::BlankDocument;
use crate::script::{Event, Script};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("i/o error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to encode page {page}: {message}")]
    Encode { page: u32, message: String },
    #[error("overlay surface could not be allocated")]
    Surface,
}

/// Read an [`OverlayConfig`] from `path`, or use the defaults.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] if the file cannot be read and
/// [`ReplayError::Json`] if it does not parse.
pub fn load_config(path: Option<&Path>) -> Result<OverlayConfig, ReplayError> {
    let Some(path) = path else {
        return Ok(OverlayConfig::default());
    };
    let json = read_file(path)?;
    Ok(OverlayConfig::from_json(&json)?)
}

/// Read and parse a gesture script.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] or [`ReplayError::Json`].
pub fn load_script(path: &Path) -> Result<Script, ReplayError> {
    let json = read_file(path)?;
    Ok(Script::from_json(&json)?)
}

fn read_file(path: &Path) -> Result<String, ReplayError> {
    fs::read_to_string(path).map_err(|source| ReplayError::Io { path: path.to_path_buf(), source })
}

/// Open the collaborator for `script`.
///
/// # Errors
///
/// Returns [`DocumentError::UnsupportedFileType`] for a non-PDF document and
/// [`DocumentError::EmptyDocument`] when the script declares zero pages.
pub fn open_document(script: &Script, config: &OverlayConfig) -> Result<BlankDocument, ReplayError> {
    if let Some(path) = &script.document {
        check_file_type(path)?;
    }
    if script.pages == 0 {
        return Err(DocumentError::EmptyDocument.into());
    }
    Ok(BlankDocument::new(script.pages, config.base_width, config.base_height))
}

/// Build an engine for `doc` and feed it every event in `script`.
///
/// # Errors
///
/// Returns [`ReplayError::Surface`] if the overlay cannot be created.
pub fn replay(script: &Script, doc: &impl DocumentSource, config: OverlayConfig) -> Result<Engine, ReplayError> {
    let mut engine = Engine::new(doc.page_count(), config).ok_or(ReplayError::Surface)?;
    tracing::info!(pages = doc.page_count(), events = script.events.len(), "replaying script");

    for event in &script.events {
        let actions = apply_event(&mut engine, event);
        for action in &actions {
            log_action(action);
        }
    }
    Ok(engine)
}

fn apply_event(engine: &mut Engine, event: &Event) -> Vec<Action> {
    match *event {
        Event::PointerDown { x, y, button } => engine.on_pointer_down(Point::new(x, y), button.into()),
        Event::PointerMove { x, y } => engine.on_pointer_move(Point::new(x, y)),
        Event::PointerUp => engine.on_pointer_up(),
        Event::PointerLeave => engine.on_pointer_leave(),
        Event::SetTool { tool } => {
            engine.set_tool(tool.into());
            Vec::new()
        }
        Event::ZoomIn => engine.zoom_in(),
        Event::ZoomOut => engine.zoom_out(),
        Event::ClearPage => engine.clear_page(),
        Event::GoToPage { page } => engine.go_to_page(page),
        Event::NextPage => engine.next_page(),
        Event::PrevPage => engine.prev_page(),
    }
}

fn log_action(action: &Action) {
    match action {
        Action::StrokeCommitted { page, tool, points } => {
            tracing::info!(page, ?tool, points = points.len(), "stroke committed");
        }
        Action::PageChanged { page } => tracing::info!(page, "page changed"),
        Action::PageRenderRequested { page, scale } => tracing::debug!(page, scale, "page render requested"),
        Action::SurfaceResized { width, height } => tracing::debug!(width, height, "surface resized"),
        Action::OffsetChanged { x, y } => tracing::trace!(x, y, "offset changed"),
        Action::RenderNeeded => {}
    }
}

/// Write `page-<n>.png` into `out_dir` for every visited page: the document
/// page with its overlay composited at the current pan offset.
///
/// # Errors
///
/// Returns an error if a page cannot be rendered, encoded, or written.
#[allow(clippy::cast_possible_truncation)]
pub fn write_pages(engine: &Engine, doc: &impl DocumentSource, out_dir: &Path) -> Result<Vec<PathBuf>, ReplayError> {
    fs::create_dir_all(out_dir).map_err(|source| ReplayError::Io { path: out_dir.to_path_buf(), source })?;

    let transform = engine.transform();
    let offset = transform.offset();
    let mut written = Vec::new();

    for page in engine.core.sessions.visited_pages() {
        let mut raster = doc.render_page(page, transform.scale())?;
        let overlay = engine.render_page(page).ok_or(ReplayError::Surface)?;
        raster.draw_pixmap(
            offset.x.round() as i32,
            offset.y.round() as i32,
            overlay.pixmap().as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        let bytes = raster.encode_png().map_err(|e| ReplayError::Encode { page, message: e.to_string() })?;
        let path = out_dir.join(format!("page-{page}.png"));
        fs::write(&path, bytes).map_err(|source| ReplayError::Io { path: path.clone(), source })?;
        tracing::info!(page, path = %path.display(), "page written");
        written.push(path);
    }
    Ok(written)
}
