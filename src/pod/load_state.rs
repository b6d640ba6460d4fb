use core::mem;

/// Lifecycle of a deserialize view inside its pod.
///
/// The view starts [`Empty`], is populated by the archive exactly once,
/// and is consumed by construction exactly once. Every access checks the
/// state; violations panic because they indicate defective calling code.
///
/// [`Empty`]: LoadState::Empty
#[derive(Debug)]
pub enum LoadState<V> {
    /// No data has been read yet.
    Empty,
    /// The archive has populated the view; construction may consume it.
    Populated(V),
    /// The view has been moved into a constructor.
    Consumed,
}

impl<V> LoadState<V> {
    /// Stores the populated view.
    ///
    /// # Panics
    ///
    /// Panics unless the state is [`Empty`](LoadState::Empty).
    pub fn populate(&mut self, view: V) {
        match self {
            Self::Empty => *self = Self::Populated(view),
            Self::Populated(_) => panic!("the deserialize view has already been populated"),
            Self::Consumed => panic!("the deserialize view has already been consumed"),
        }
    }

    /// Takes the view out, leaving [`Consumed`](LoadState::Consumed) behind.
    ///
    /// # Panics
    ///
    /// Panics when the view has already been moved or never existed.
    pub fn take(&mut self) -> V {
        match mem::replace(self, Self::Consumed) {
            Self::Populated(view) => view,
            Self::Empty => panic!("the deserialize view has never been populated"),
            Self::Consumed => {
                panic!("the deserialize view has already been moved or never existed")
            }
        }
    }

    /// Whether the slot currently holds a view.
    #[inline]
    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated(_))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::LoadState;

    #[test]
    fn populate_then_take() {
        let mut slot = LoadState::Empty;
        assert!(!slot.is_populated());
        slot.populate(7);
        assert!(slot.is_populated());
        assert_eq!(slot.take(), 7);
        assert!(!slot.is_populated());
    }

    #[test]
    #[should_panic(expected = "already been populated")]
    fn double_populate() {
        let mut slot = LoadState::Empty;
        slot.populate(1);
        slot.populate(2);
    }

    #[test]
    #[should_panic(expected = "never been populated")]
    fn take_empty() {
        LoadState::<u32>::Empty.take();
    }

    #[test]
    #[should_panic(expected = "already been moved or never existed")]
    fn double_take() {
        let mut slot = LoadState::Empty;
        slot.populate(1);
        slot.take();
        slot.take();
    }
}
