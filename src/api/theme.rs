use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::warn;

use crate::core::OptionsTree;

type Listener = Rc<RefCell<dyn FnMut(&OptionsTree)>>;

#[derive(Clone)]
struct Subscriber {
    listener: Listener,
    active: Rc<Cell<bool>>,
}

#[derive(Default)]
struct ThemeState {
    overrides: OptionsTree,
    next_id: u64,
    listeners: IndexMap<u64, Subscriber>,
}

impl ThemeState {
    /// Removes subscribers whose guard was dropped while the state was borrowed.
    fn prune(&mut self) {
        self.listeners.retain(|_, subscriber| subscriber.active.get());
    }
}

/// Source of theme option overrides.
///
/// Clones share one state. New subscribers receive the current overrides
/// immediately; later emissions are delivered only when the value changes.
#[derive(Clone, Default)]
pub struct ThemeService {
    state: Rc<RefCell<ThemeState>>,
}

impl fmt::Debug for ThemeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeService")
            .field("overrides", &self.state.borrow().overrides)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl ThemeService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_overrides(overrides: OptionsTree) -> Self {
        let service = Self::default();
        service.state.borrow_mut().overrides = overrides;
        service
    }

    #[must_use]
    pub fn overrides(&self) -> OptionsTree {
        self.state.borrow().overrides.clone()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|subscriber| subscriber.active.get())
            .count()
    }

    /// Publishes new overrides. Returns how many subscribers were notified.
    pub fn set_overrides(&self, overrides: OptionsTree) -> usize {
        let subscribers: Vec<Subscriber> = {
            let mut state = self.state.borrow_mut();
            if state.overrides == overrides {
                return 0;
            }
            state.overrides = overrides.clone();
            state.prune();
            state.listeners.values().cloned().collect()
        };

        let mut notified = 0;
        for subscriber in subscribers {
            if !subscriber.active.get() {
                continue;
            }
            match subscriber.listener.try_borrow_mut() {
                Ok(mut listener) => {
                    (&mut *listener)(&overrides);
                    notified += 1;
                }
                Err(_) => warn!("skipping re-entrant theme notification"),
            }
        }
        notified
    }

    /// Registers `listener` and replays the current overrides to it.
    ///
    /// The listener stays registered until the returned guard is dropped.
    pub fn subscribe(&self, listener: impl FnMut(&OptionsTree) + 'static) -> ThemeSubscription {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let active = Rc::new(Cell::new(true));
        let (id, current) = {
            let mut state = self.state.borrow_mut();
            state.prune();
            let id = state.next_id;
            state.next_id += 1;
            let subscriber = Subscriber {
                listener: Rc::clone(&listener),
                active: Rc::clone(&active),
            };
            state.listeners.insert(id, subscriber);
            (id, state.overrides.clone())
        };
        (&mut *listener.borrow_mut())(&current);
        ThemeSubscription {
            state: Rc::downgrade(&self.state),
            id,
            active,
        }
    }
}

/// Unsubscribes from a `ThemeService` when dropped.
///
/// The listener stops receiving emissions at once. If the service state is
/// borrowed at that moment, the entry is removed on the next emission or
/// subscription instead.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct ThemeSubscription {
    state: Weak<RefCell<ThemeState>>,
    id: u64,
    active: Rc<Cell<bool>>,
}

impl fmt::Debug for ThemeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        self.active.set(false);
        if let Some(state) = self.state.upgrade() {
            if let Ok(mut state) = state.try_borrow_mut() {
                state.listeners.shift_remove(&self.id);
            }
        }
    }
}
