//! A document collaborator with plain white pages, for running the overlay
//! without a real renderer behind it.

#[cfg(test)]
#[path = "blank_test.rs"]
mod blank_test;

use overlay::document::{DocumentError, DocumentSource};
use overlay::transform::scaled_size;
use tiny_skia::{Color, Pixmap};

pub struct BlankDocument {
    page_count: u32,
    base_width: f64,
    base_height: f64,
}

impl BlankDocument {
    #[must_use]
    pub fn new(page_count: u32, base_width: f64, base_height: f64) -> Self {
        Self { page_count, base_width, base_height }
    }
}

impl DocumentSource for BlankDocument {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn render_page(&self, page: u32, scale: f64) -> Result<Pixmap, DocumentError> {
        if !(1..=self.page_count).contains(&page) {
            return Err(DocumentError::InvalidPageIndex { page, page_count: self.page_count });
        }
        let (width, height) = scaled_size(self.base_width, self.base_height, scale);
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| DocumentError::LoadFailed(format!("cannot allocate {width}x{height} page")))?;
        pixmap.fill(Color::WHITE);
        Ok(pixmap)
    }
}
