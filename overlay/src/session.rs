//! Page sessions: the per-page stroke logs behind the overlay.
//!
//! This module defines the stroke data recorded by the input engine
//! (`Stroke`, `StrokeTool`), the accumulated annotation state for one page
//! (`PageSession`), and the store that owns every visited page's session for
//! the lifetime of the viewer (`PageSessionStore`).
//!
//! Strokes flow into this layer from the engine on pointer-up. The renderer
//! reads the active page's log via `strokes` and replays it onto the surface.
//! Sessions are never evicted.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;

use uuid::Uuid;

use crate::transform::Point;

/// Unique identifier for a page session.
pub type SessionId = Uuid;

/// Which tool produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeTool {
    /// Continuous line through every point.
    Pen,
    /// Clears a disc around every point.
    Eraser,
}

/// A freehand path in surface-local pixels.
///
/// A stroke always has at least one point. Points can only be appended while
/// the stroke is in progress; once committed it is immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    tool: StrokeTool,
    points: Vec<Point>,
    scale: f64,
    committed: bool,
}

impl Stroke {
    /// Open an in-progress stroke at `start`, recorded at view scale `scale`.
    #[must_use]
    pub fn begin(tool: StrokeTool, start: Point, scale: f64) -> Self {
        Self { tool, points: vec![start], scale, committed: false }
    }

    /// Append a point. Returns `false` (and does nothing) once committed.
    pub fn push(&mut self, point: Point) -> bool {
        if self.committed {
            return false;
        }
        self.points.push(point);
        true
    }

    /// Freeze the stroke.
    pub fn commit(&mut self) {
        self.committed = true;
    }

    #[must_use]
    pub fn tool(&self) -> StrokeTool {
        self.tool
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// View scale in effect when the stroke was started.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.committed
    }
}

/// Annotation state for one page index.
#[derive(Debug)]
pub struct PageSession {
    id: SessionId,
    page: u32,
    strokes: Vec<Stroke>,
}

impl PageSession {
    fn new(page: u32) -> Self {
        Self { id: Uuid::new_v4(), page, strokes: Vec::new() }
    }

    /// Identity of this session; stable for the lifetime of the store.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The 1-based page index this session belongs to.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Committed strokes in the order they were drawn.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }
}

/// Owns every visited page's session.
pub struct PageSessionStore {
    sessions: HashMap<u32, PageSession>,
    page_count: u32,
    revision: u64,
}

impl PageSessionStore {
    /// Create an empty store for a document of `page_count` pages.
    #[must_use]
    pub fn new(page_count: u32) -> Self {
        Self { sessions: HashMap::new(), page_count, revision: 0 }
    }

    /// Number of pages commits are accepted for.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Bumped on every change to any stroke log. Equal revisions mean the
    /// committed strokes of every page are unchanged.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Return the session for `page`, creating an empty one on first visit.
    pub fn get_or_create(&mut self, page: u32) -> &mut PageSession {
        self.sessions.entry(page).or_insert_with(|| {
            tracing::debug!(page, "creating page session");
            PageSession::new(page)
        })
    }

    /// Look up a session without creating it.
    #[must_use]
    pub fn get(&self, page: u32) -> Option<&PageSession> {
        self.sessions.get(&page)
    }

    /// Committed strokes for `page`; empty for pages never visited.
    #[must_use]
    pub fn strokes(&self, page: u32) -> &[Stroke] {
        self.sessions.get(&page).map(PageSession::strokes).unwrap_or_default()
    }

    /// Append a stroke to `page`'s log, marking it committed.
    ///
    /// Returns `false` and leaves the store untouched if `page` is outside
    /// `[1, page_count]`.
    pub fn commit_stroke(&mut self, page: u32, mut stroke: Stroke) -> bool {
        if !self.in_range(page) {
            tracing::warn!(page, page_count = self.page_count, "dropping stroke for out-of-range page");
            return false;
        }
        stroke.commit();
        self.revision += 1;
        let session = self.get_or_create(page);
        session.strokes.push(stroke);
        tracing::debug!(page, strokes = session.strokes.len(), "stroke committed");
        true
    }

    /// Remove every stroke from `page`. Other pages are untouched.
    pub fn clear_page(&mut self, page: u32) {
        if let Some(session) = self.sessions.get_mut(&page) {
            tracing::debug!(page, cleared = session.strokes.len(), "clearing page");
            session.strokes.clear();
            self.revision += 1;
        }
    }

    /// Pages that have a session, in ascending order.
    #[must_use]
    pub fn visited_pages(&self) -> Vec<u32> {
        let mut pages: Vec<u32> = self.sessions.keys().copied().collect();
        pages.sort_unstable();
        pages
    }

    fn in_range(&self, page: u32) -> bool {
        (1..=self.page_count).contains(&page)
    }
}
