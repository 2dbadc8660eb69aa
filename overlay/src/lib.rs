//! Annotation overlay and view-transform engine for the page viewer.
//!
//! This crate keeps a drawable surface aligned with a zoomable, paginated,
//! pannable document view. It owns the full lifecycle of the overlay:
//! translating raw pointer events into pan gestures or pen/eraser strokes,
//! keeping a per-page stroke log, and rebuilding the surface pixels from that
//! log whenever the page, the zoom, or the in-progress stroke changes. The host
//! is responsible only for wiring input events to the engine, asking its
//! document collaborator to render pages, and compositing the surface on top.
//!
//! Everything here is synchronous and single-threaded. No operation returns an
//! error; invalid input is clamped or ignored.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::Engine`] and testable [`engine::EngineCore`] |
//! | [`transform`] | Zoom/pan view transform and coordinate conversions |
//! | [`session`] | Per-page stroke logs ([`session::PageSessionStore`]) |
//! | [`input`] | Tools, buttons, and the gesture state machine |
//! | [`nav`] | Current page and page clamping |
//! | [`render`] | Raster surface and stroke replay |
//! | [`document`] | Document collaborator seam and file-type gate |
//! | [`config`] | Tunables ([`config::OverlayConfig`]) |
//! | [`consts`] | Default values for the tunables |

pub mod config;
pub mod consts;
pub mod document;
pub mod engine;
pub mod input;
pub mod nav;
pub mod render;
pub mod session;
pub mod transform;
