use std::cell::OnceCell;

/// A lazily computed value, recomputed on first access after invalidation
#[derive(Debug, Clone)]
pub(crate) struct Cached<T> {
    cell: OnceCell<T>,
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Cached {
            cell: OnceCell::new(),
        }
    }
}

impl<T> Cached<T> {
    /// The cached value, computed with `f` if needed
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.cell.get_or_init(f)
    }

    /// Whether a value is cached
    pub fn is_valid(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Drop the cached value
    pub fn invalidate(&mut self) {
        self.cell.take();
    }

    /// Replace the cached value
    pub fn set(&mut self, value: T) {
        self.cell = OnceCell::from(value);
    }
}
