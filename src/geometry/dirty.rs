/// A cached value paired with a staleness flag.
///
/// Starts dirty. [`Dirty::set`] stores a fresh value and clears the flag;
/// [`Dirty::invalidate`] marks it stale without discarding the old value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dirty<T> {
    value: T,
    dirty: bool,
}

impl<T: Default> Default for Dirty<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Dirty<T> {
    /// Creates a dirty cache holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            dirty: true,
        }
    }

    /// Returns `true` if the cached value is stale.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the cached value stale.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Stores a fresh value.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.dirty = false;
    }

    /// Returns the last stored value, stale or not.
    #[must_use]
    pub fn cached(&self) -> &T {
        &self.value
    }
}
