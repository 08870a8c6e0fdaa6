//! Cursors over caller-owned buffers. The coders read from an 'InputCursor'
//! and write into an 'OutputCursor', advancing the positions as they go.
//! Neither cursor owns its buffer.

/// A read position over a borrowed input slice.
#[derive(Debug)]
pub struct InputCursor<'a, T> {
    data: &'a [T],
    position: usize,
}

impl<'a, T: Copy> InputCursor<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor to 'position', which must not exceed the length.
    pub fn set_position(&mut self, position: usize) {
        assert!(position <= self.data.len(), "Position out of bounds");
        self.position = position;
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn has_remaining(&self) -> bool {
        self.position < self.data.len()
    }

    /// Returns the units that were not consumed yet.
    pub fn remaining_slice(&self) -> &'a [T] {
        &self.data[self.position..]
    }

    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(n <= self.remaining());
        self.position += n;
    }
}

/// A write position over a borrowed output slice. The capacity of the cursor
/// is the length of the slice.
#[derive(Debug)]
pub struct OutputCursor<'a, T> {
    data: &'a mut [T],
    position: usize,
}

impl<'a, T: Copy> OutputCursor<'a, T> {
    pub fn new(data: &'a mut [T]) -> Self {
        Self { data, position: 0 }
    }

    /// Creates a cursor that starts writing at 'position'.
    pub fn with_position(data: &'a mut [T], position: usize) -> Self {
        let mut cursor = Self::new(data);
        cursor.set_position(position);
        cursor
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) {
        assert!(position <= self.data.len(), "Position out of bounds");
        self.position = position;
    }

    /// Forget everything that was written.
    pub fn clear(&mut self) {
        self.position = 0;
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Returns the units written so far.
    pub fn written(&self) -> &[T] {
        &self.data[..self.position]
    }

    /// Copy 'units' to the cursor. The caller checks that they fit.
    pub(crate) fn put_slice(&mut self, units: &[T]) {
        let end = self.position + units.len();
        self.data[self.position..end].copy_from_slice(units);
        self.position = end;
    }
}

#[test]
fn test_cursors() {
    let input = [1u8, 2, 3, 4];
    let mut src = InputCursor::new(&input);
    assert_eq!(src.remaining(), 4);
    src.advance(3);
    assert_eq!(src.remaining_slice(), &[4]);
    src.advance(1);
    assert!(!src.has_remaining());
    src.rewind();
    assert_eq!(src.position(), 0);

    let mut storage = [0u16; 3];
    let mut dst = OutputCursor::new(&mut storage);
    dst.put_slice(&[7, 8]);
    assert_eq!(dst.written(), &[7, 8]);
    assert_eq!(dst.remaining(), 1);
    dst.clear();
    assert_eq!(dst.written(), &[] as &[u16]);
}
