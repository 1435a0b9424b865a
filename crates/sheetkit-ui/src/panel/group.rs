//! Event dispatch for a group of panels that share a screen.
//!
//! A group is created by the host and handed to each panel it owns. Panels
//! report open/close and resize transitions to the group; anything that needs
//! to react to another panel (backdrops, map padding, layout of sibling
//! chrome) subscribes here instead of reaching into the panels.

use indexmap::IndexMap;
use sheetkit_core::Scheduler;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub u32);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Transition reported by a panel. `top` is in viewport coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelEvent<D> {
    Opened {
        panel: PanelId,
        height: f32,
        top: f32,
        app_data: D,
    },
    Closed {
        panel: PanelId,
        height: f32,
        top: f32,
        app_data: D,
    },
    /// Live drag update.
    Resizing { panel: PanelId, top: f32, app_data: D },
    /// A resize settled and was accepted.
    Resized {
        panel: PanelId,
        height: f32,
        top: f32,
        app_data: D,
    },
}

impl<D> PanelEvent<D> {
    pub fn panel(&self) -> PanelId {
        match self {
            PanelEvent::Opened { panel, .. }
            | PanelEvent::Closed { panel, .. }
            | PanelEvent::Resizing { panel, .. }
            | PanelEvent::Resized { panel, .. } => *panel,
        }
    }

    pub fn app_data(&self) -> &D {
        match self {
            PanelEvent::Opened { app_data, .. }
            | PanelEvent::Closed { app_data, .. }
            | PanelEvent::Resizing { app_data, .. }
            | PanelEvent::Resized { app_data, .. } => app_data,
        }
    }

    pub fn top(&self) -> f32 {
        match self {
            PanelEvent::Opened { top, .. }
            | PanelEvent::Closed { top, .. }
            | PanelEvent::Resizing { top, .. }
            | PanelEvent::Resized { top, .. } => *top,
        }
    }
}

type Listener<D> = Rc<dyn Fn(&PanelEvent<D>)>;

struct GroupInner<D> {
    scheduler: Scheduler,
    // Insertion-ordered so listeners run in subscription order.
    listeners: RefCell<IndexMap<u64, Listener<D>>>,
    next_listener: Cell<u64>,
    next_panel: Cell<u32>,
}

/// Shared dispatcher for one group of panels.
///
/// Delivery is synchronous and in emission order. The listener list is
/// snapshotted before each dispatch, so a listener may subscribe,
/// unsubscribe or emit while being called.
pub struct PanelGroup<D = ()> {
    inner: Rc<GroupInner<D>>,
}

impl<D> Clone for PanelGroup<D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<D: 'static> PanelGroup<D> {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            inner: Rc::new(GroupInner {
                scheduler,
                listeners: RefCell::new(IndexMap::new()),
                next_listener: Cell::new(1),
                next_panel: Cell::new(1),
            }),
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.inner.scheduler
    }

    /// Registers `listener`. It stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self, listener: impl Fn(&PanelEvent<D>) + 'static) -> Subscription {
        let key = self.inner.next_listener.get();
        self.inner.next_listener.set(key + 1);
        self.inner
            .listeners
            .borrow_mut()
            .insert(key, Rc::new(listener));

        let weak: Weak<GroupInner<D>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let removed = inner.listeners.borrow_mut().shift_remove(&key);
                    drop(removed);
                }
            })),
        }
    }

    pub fn emit(&self, event: PanelEvent<D>) {
        let listeners: SmallVec<[Listener<D>; 4]> =
            self.inner.listeners.borrow().values().cloned().collect();
        log::trace!(
            "{} event for {} listener(s)",
            event.panel(),
            listeners.len()
        );
        for listener in listeners {
            listener(&event);
        }
    }

    pub fn allocate_panel_id(&self) -> PanelId {
        let id = self.inner.next_panel.get();
        self.inner.next_panel.set(id + 1);
        PanelId(id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl<D> fmt::Debug for PanelGroup<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelGroup")
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

/// Keeps a group listener registered.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keeps the listener registered for the lifetime of the group.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
