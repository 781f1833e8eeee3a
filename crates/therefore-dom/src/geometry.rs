//! Geometry values supplied by the host.
//!
//! The document has no layout engine; bounding rectangles and the viewport
//! size are whatever the embedding environment last reported.

/// A client rectangle in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
	pub top: f64,
	pub left: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
		Self {
			top,
			left,
			width,
			height,
		}
	}

	pub fn bottom(&self) -> f64 {
		self.top + self.height
	}

	pub fn right(&self) -> f64 {
		self.left + self.width
	}
}

/// Viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

impl Default for Size {
	fn default() -> Self {
		Self::new(1024.0, 768.0)
	}
}
