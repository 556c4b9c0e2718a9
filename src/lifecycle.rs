use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub trait Cancel {
    fn cancel(&self);
}

/// Cancellation switch for a self-rescheduling loop. `T` is the loop's next
/// pending unit of work (a timer or frame handle that cancels itself on drop),
/// so replacing or clearing the slot is what stops it.
pub struct LoopHandle<T> {
    cancelled: Rc<Cell<bool>>,
    pending: Rc<RefCell<Option<T>>>,
}

impl<T> Clone for LoopHandle<T> {
    fn clone(&self) -> Self {
        Self {
            cancelled: Rc::clone(&self.cancelled),
            pending: Rc::clone(&self.pending),
        }
    }
}

impl<T> Default for LoopHandle<T> {
    fn default() -> Self {
        Self {
            cancelled: Rc::new(Cell::new(false)),
            pending: Rc::new(RefCell::new(None)),
        }
    }
}

impl<T> LoopHandle<T> {
    pub fn hold(&self, next: T) {
        if self.cancelled.get() {
            return;
        }
        let previous = self.pending.borrow_mut().replace(next);
        drop(previous);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

impl<T> Cancel for LoopHandle<T> {
    fn cancel(&self) {
        self.cancelled.set(true);
        let pending = self.pending.borrow_mut().take();
        drop(pending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scheduled {
        dropped: Rc<Cell<u32>>,
    }

    impl Drop for Scheduled {
        fn drop(&mut self) {
            self.dropped.set(self.dropped.get() + 1);
        }
    }

    fn scheduled(dropped: &Rc<Cell<u32>>) -> Scheduled {
        Scheduled {
            dropped: Rc::clone(dropped),
        }
    }

    #[test]
    fn rescheduling_releases_the_previous_tick() {
        let dropped = Rc::new(Cell::new(0));
        let handle = LoopHandle::default();

        handle.hold(scheduled(&dropped));
        handle.hold(scheduled(&dropped));

        assert_eq!(dropped.get(), 1);
        assert!(!handle.is_cancelled());
    }

    #[test]
    fn cancel_drops_pending_work_and_refuses_more() {
        let dropped = Rc::new(Cell::new(0));
        let handle = LoopHandle::default();
        let registered = handle.clone();
        handle.hold(scheduled(&dropped));

        let registry: Vec<Box<dyn Cancel>> = vec![Box::new(registered)];
        for entry in &registry {
            entry.cancel();
        }

        assert_eq!(dropped.get(), 1);
        assert!(handle.is_cancelled());

        handle.hold(scheduled(&dropped));
        assert_eq!(dropped.get(), 2);
    }
}
