//! Append only storage, growing by fixed size chunks

/// Rows allocated per growth step
pub(crate) const CHUNK_ROWS: usize = 1024;

/// [ChunkedBuffer] stores rows of `width` items in a flat vector.
/// Capacity grows by [CHUNK_ROWS] rows at once, and the buffer is trimmed
/// to its exact length when converted into the final array.
#[derive(Debug, Clone)]
pub(crate) struct ChunkedBuffer<T> {
    inner: Vec<T>,
    width: usize,
}

impl<T: Clone> ChunkedBuffer<T> {
    /// Buffer of single item rows
    pub fn new() -> Self {
        Self::with_width(1)
    }
    /// Buffer of `width` items per row
    pub fn with_width(width: usize) -> Self {
        let width = width.max(1);
        Self {
            inner: Vec::with_capacity(CHUNK_ROWS * width),
            width,
        }
    }
    fn reserve(&mut self, items: usize) {
        if self.inner.len() + items > self.inner.capacity() {
            let chunk = CHUNK_ROWS * self.width;
            let chunks = ((items + chunk - 1) / chunk).max(1);
            self.inner.reserve_exact(chunks * chunk);
        }
    }
    pub fn push(&mut self, item: T) {
        self.reserve(1);
        self.inner.push(item);
    }
    /// Appends a complete row
    pub fn push_row(&mut self, row: &[T]) {
        self.reserve(row.len());
        self.inner.extend_from_slice(row);
    }
    /// Number of complete rows
    pub fn rows(&self) -> usize {
        self.inner.len() / self.width
    }
    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }
    /// Returns row `index`
    pub fn row(&self, index: usize) -> &[T] {
        &self.inner[index * self.width..(index + 1) * self.width]
    }
    #[cfg(test)]
    pub fn as_slice(&self) -> &[T] {
        &self.inner
    }
    /// Converts into the final array, dropping the extra space
    pub fn into_vec(mut self) -> Vec<T> {
        self.inner.shrink_to_fit();
        self.inner
    }
}
