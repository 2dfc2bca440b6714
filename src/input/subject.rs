//! Observer registration: a subject type with explicit subscription
//! handles and deterministic, registration-ordered delivery.

/// Identifies one subscription on a [`Subject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

/// Outcome a handler reports after each delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Keep the subscription.
    Continue,
    /// Remove the subscription; the handler is dropped and never
    /// invoked again.
    Detach,
}

struct Entry<T> {
    handle: SubscriptionHandle,
    handler: Box<dyn FnMut(&T) -> Delivery>,
}

/// An observable event stream.
///
/// Handlers are invoked in registration order on every
/// [`emit`](Self::emit). A handler may detach itself by returning
/// [`Delivery::Detach`]; detached handlers are pruned during the
/// delivery that observes them.
pub struct Subject<T> {
    entries: Vec<Entry<T>>,
    next_handle: u64,
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Subject<T> {
    /// Create an empty subject.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 0,
        }
    }

    /// Register a handler that stays subscribed until explicitly
    /// unsubscribed or the subject is cleared.
    pub fn subscribe(
        &mut self,
        mut handler: impl FnMut(&T) + 'static,
    ) -> SubscriptionHandle {
        self.subscribe_with(move |value| {
            handler(value);
            Delivery::Continue
        })
    }

    /// Register a handler that decides per delivery whether to stay
    /// subscribed.
    pub fn subscribe_with(
        &mut self,
        handler: impl FnMut(&T) -> Delivery + 'static,
    ) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            handler: Box::new(handler),
        });
        handle
    }

    /// Remove the subscription for `handle`. Returns `false` when the
    /// handle is not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    /// Deliver `value` to every handler in registration order.
    pub fn emit(&mut self, value: &T) {
        let mut index = 0;
        while index < self.entries.len() {
            match (self.entries[index].handler)(value) {
                Delivery::Continue => index += 1,
                Delivery::Detach => {
                    let _ = self.entries.remove(index);
                }
            }
        }
    }

    /// Drop every subscription.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no subscriptions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn delivers_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subject = Subject::new();
        for tag in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            let _ = subject.subscribe(move |_: &u32| {
                seen.borrow_mut().push(tag);
            });
        }
        subject.emit(&7);
        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribed_handler_never_fires_again() {
        let count = Rc::new(RefCell::new(0));
        let mut subject = Subject::new();
        let handle = {
            let count = Rc::clone(&count);
            subject.subscribe(move |_: &u32| *count.borrow_mut() += 1)
        };
        subject.emit(&1);
        assert!(subject.unsubscribe(handle));
        subject.emit(&2);
        assert_eq!(*count.borrow(), 1);
        // Handle is gone; a second unsubscribe is a no-op.
        assert!(!subject.unsubscribe(handle));
    }

    #[test]
    fn detaching_handler_is_pruned_mid_delivery() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subject = Subject::new();
        {
            let seen = Rc::clone(&seen);
            let _ = subject.subscribe_with(move |_: &u32| {
                seen.borrow_mut().push("detaching");
                Delivery::Detach
            });
        }
        {
            let seen = Rc::clone(&seen);
            let _ = subject.subscribe(move |_: &u32| {
                seen.borrow_mut().push("stable");
            });
        }
        subject.emit(&1);
        subject.emit(&2);
        assert_eq!(*seen.borrow(), vec!["detaching", "stable", "stable"]);
        assert_eq!(subject.len(), 1);
    }

    #[test]
    fn clear_removes_everything() {
        let mut subject: Subject<u32> = Subject::new();
        let _ = subject.subscribe(|_| {});
        let _ = subject.subscribe(|_| {});
        subject.clear();
        assert!(subject.is_empty());
    }
}
