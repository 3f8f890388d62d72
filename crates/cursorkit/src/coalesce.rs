use crate::host::Subscription;

/// Last-writer-wins slot with at most one outstanding request.
///
/// Each [`submit`](Self::submit) overwrites the pending value and swaps the
/// outstanding request for a fresh one, cancelling the old request instead of
/// queueing behind it.
#[derive(Debug)]
pub struct Coalescer<T> {
    latest: Option<T>,
    request: Option<Subscription>,
}

impl<T> Default for Coalescer<T> {
    fn default() -> Self {
        Self {
            latest: None,
            request: None,
        }
    }
}

impl<T> Coalescer<T> {
    pub fn submit(&mut self, value: T, schedule: impl FnOnce() -> Subscription) {
        self.latest = Some(value);
        if let Some(mut stale) = self.request.take() {
            stale.cancel();
        }
        self.request = Some(schedule());
    }

    /// Takes the pending value, if any, and retires the outstanding request.
    pub fn take(&mut self) -> Option<T> {
        self.request = None;
        self.latest.take()
    }

    pub fn cancel(&mut self) {
        self.request = None;
        self.latest = None;
    }

    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counted(live: &Rc<Cell<usize>>) -> Subscription {
        live.set(live.get() + 1);
        let live = live.clone();
        Subscription::new(move || live.set(live.get() - 1))
    }

    #[test]
    fn test_submit_replaces_pending_request() {
        let live = Rc::new(Cell::new(0));
        let mut slot = Coalescer::default();

        for i in 0..10 {
            slot.submit(i, || counted(&live));
            assert_eq!(live.get(), 1);
        }

        assert!(slot.is_pending());
        assert_eq!(slot.take(), Some(9));
        assert_eq!(live.get(), 0);
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_cancel_drops_value_and_request() {
        let live = Rc::new(Cell::new(0));
        let mut slot = Coalescer::default();
        slot.submit("a", || counted(&live));

        slot.cancel();
        assert!(!slot.is_pending());
        assert_eq!(live.get(), 0);
        assert_eq!(slot.take(), None);
    }
}
