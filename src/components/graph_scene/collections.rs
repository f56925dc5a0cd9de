//! GPU-oriented record collections.
//!
//! Points and lines are fixed-capacity arrays sized exactly to the loaded
//! graph; text is an unbounded glyph array that is cleared and rebuilt
//! every frame. Records are addressed by the stable integer handle handed
//! out by `add`, never by iteration position. A handle is only meaningful
//! for the collection that produced it; resolving a stale handle yields
//! nothing rather than a crash.

/// A point record: one rendered node.
#[derive(Clone, Debug, PartialEq)]
pub struct PointRecord {
	/// World position.
	pub position: [f32; 3],
	/// Size multiplier.
	pub size: f32,
	/// Packed 0xRRGGBBAA color.
	pub color: u32,
}

/// A line record: one rendered link.
#[derive(Clone, Debug, PartialEq)]
pub struct LineRecord {
	/// World position of the line start.
	pub from: [f32; 3],
	/// World position of the line end.
	pub to: [f32; 3],
	/// Packed 0xRRGGBBAA color.
	pub color: u32,
}

/// A glyph record: one piece of text anchored in world space.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRecord {
	/// World x of the text anchor.
	pub x: f32,
	/// World y of the text anchor.
	pub y: f32,
	/// Text content.
	pub text: String,
	/// Font size in world units.
	pub font_size: f32,
	/// Packed 0xRRGGBBAA color.
	pub color: u32,
}

/// Stable index of a point record within its collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointHandle(usize);

/// Stable index of a line record within its collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineHandle(usize);

/// Fixed-capacity array of point records.
#[derive(Debug, Default)]
pub struct PointCollection {
	records: Vec<PointRecord>,
	capacity: usize,
}

impl PointCollection {
	/// An empty collection holding at most `capacity` records.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			records: Vec::with_capacity(capacity),
			capacity,
		}
	}

	/// Append a record, returning its stable handle.
	pub fn add(&mut self, record: PointRecord) -> PointHandle {
		assert!(
			self.records.len() < self.capacity,
			"point collection is at capacity"
		);
		let handle = PointHandle(self.records.len());
		self.records.push(record);
		handle
	}

	/// Overwrite the record at `handle`; stale handles are ignored.
	pub fn update(&mut self, handle: PointHandle, record: &PointRecord) {
		if let Some(slot) = self.records.get_mut(handle.0) {
			*slot = record.clone();
		}
	}

	/// Read the record at `handle`, if it resolves in this collection.
	pub fn get(&self, handle: PointHandle) -> Option<&PointRecord> {
		self.records.get(handle.0)
	}

	/// Number of records added so far.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Whether no records have been added.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Fixed capacity this collection was built with.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Iterate records in handle order.
	pub fn iter(&self) -> impl Iterator<Item = &PointRecord> {
		self.records.iter()
	}
}

/// Fixed-capacity array of line records.
#[derive(Debug, Default)]
pub struct LineCollection {
	records: Vec<LineRecord>,
	capacity: usize,
}

impl LineCollection {
	/// An empty collection holding at most `capacity` records.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			records: Vec::with_capacity(capacity),
			capacity,
		}
	}

	/// Append a record, returning its stable handle.
	pub fn add(&mut self, record: LineRecord) -> LineHandle {
		assert!(
			self.records.len() < self.capacity,
			"line collection is at capacity"
		);
		let handle = LineHandle(self.records.len());
		self.records.push(record);
		handle
	}

	/// Overwrite the record at `handle`; stale handles are ignored.
	pub fn update(&mut self, handle: LineHandle, record: &LineRecord) {
		if let Some(slot) = self.records.get_mut(handle.0) {
			*slot = record.clone();
		}
	}

	/// Read the record at `handle`, if it resolves in this collection.
	pub fn get(&self, handle: LineHandle) -> Option<&LineRecord> {
		self.records.get(handle.0)
	}

	/// Number of records added so far.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Whether no records have been added.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Fixed capacity this collection was built with.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Iterate records in handle order.
	pub fn iter(&self) -> impl Iterator<Item = &LineRecord> {
		self.records.iter()
	}
}

/// Unbounded glyph array, rebuilt every frame.
#[derive(Debug, Default)]
pub struct TextCollection {
	records: Vec<TextRecord>,
}

impl TextCollection {
	/// An empty glyph array.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a glyph record.
	pub fn add_text(&mut self, record: TextRecord) {
		self.records.push(record);
	}

	/// Drop all glyph records.
	pub fn clear(&mut self) {
		self.records.clear();
	}

	/// Number of glyph records.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Whether no glyphs are present.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Iterate glyphs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &TextRecord> {
		self.records.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn point(x: f32) -> PointRecord {
		PointRecord {
			position: [x, 0.0, 0.0],
			size: 1.0,
			color: 0xffffffff,
		}
	}

	#[test]
	fn handles_stay_stable_across_updates() {
		let mut points = PointCollection::with_capacity(2);
		let first = points.add(point(1.0));
		let second = points.add(point(2.0));

		points.update(first, &point(9.0));
		assert_eq!(points.get(first).unwrap().position[0], 9.0);
		assert_eq!(points.get(second).unwrap().position[0], 2.0);
	}

	#[test]
	fn stale_handle_resolves_to_nothing() {
		let mut old = PointCollection::with_capacity(2);
		old.add(point(1.0));
		let stale = old.add(point(2.0));

		let mut fresh = PointCollection::with_capacity(1);
		fresh.add(point(3.0));
		assert_eq!(fresh.get(stale), None);
		// An update through a stale handle is dropped, not applied.
		fresh.update(stale, &point(9.0));
		assert_eq!(fresh.len(), 1);
	}

	#[test]
	#[should_panic(expected = "at capacity")]
	fn adding_past_capacity_panics() {
		let mut points = PointCollection::with_capacity(1);
		points.add(point(1.0));
		points.add(point(2.0));
	}

	#[test]
	fn zero_capacity_collections_are_fine() {
		let points = PointCollection::with_capacity(0);
		let lines = LineCollection::with_capacity(0);
		assert!(points.is_empty());
		assert!(lines.is_empty());
	}

	#[test]
	fn text_clears_completely() {
		let mut text = TextCollection::new();
		text.add_text(TextRecord {
			x: 0.0,
			y: 0.0,
			text: "a".into(),
			font_size: 1.0,
			color: 0xffffffff,
		});
		assert_eq!(text.len(), 1);
		text.clear();
		assert!(text.is_empty());
	}
}
