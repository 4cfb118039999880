//! Operating-system color-scheme signal.
//!
//! The browser exposes the signal through `matchMedia`; see
//! `app::platform::MediaQueryScheme`. [`ManualColorScheme`] is driven by hand
//! and stands in wherever no platform facility exists.

use std::cell::RefCell;
use std::rc::Rc;

/// Listener invoked with the new "prefers dark" value.
pub type SchemeListener = Box<dyn FnMut(bool)>;

/// Source of the "OS prefers dark rendering" signal.
pub trait ColorSchemeSource {
    /// Current value, or `None` when the platform has no such facility.
    fn prefers_dark(&self) -> Option<bool>;

    /// Register a listener for changes. Dropping the returned
    /// [`Subscription`] removes it.
    fn subscribe(&self, listener: SchemeListener) -> Subscription;
}

/// RAII guard for a registered listener.
#[must_use = "dropping a Subscription removes the listener"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Subscription with nothing to release.
    pub fn noop() -> Self {
        Self { teardown: None }
    }

    /// Remove the listener now.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}

#[derive(Default)]
struct ManualState {
    dark: Option<bool>,
    next_id: u64,
    listeners: Vec<(u64, SchemeListener)>,
    cancelled: Vec<u64>,
}

/// Hand-driven color-scheme source. Clones share state.
#[derive(Clone, Default)]
pub struct ManualColorScheme {
    state: Rc<RefCell<ManualState>>,
}

impl ManualColorScheme {
    pub fn new(dark: bool) -> Self {
        let scheme = Self::default();
        scheme.state.borrow_mut().dark = Some(dark);
        scheme
    }

    /// Source for a platform without a color-scheme facility.
    pub fn unsupported() -> Self {
        Self::default()
    }

    /// Change the signal and notify every listener.
    pub fn set_dark(&self, dark: bool) {
        let mut running = {
            let mut state = self.state.borrow_mut();
            state.dark = Some(dark);
            state.cancelled.clear();
            // Taken out while running so listeners may subscribe or cancel.
            std::mem::take(&mut state.listeners)
        };
        for (_, listener) in running.iter_mut() {
            listener(dark);
        }

        let mut state = self.state.borrow_mut();
        let cancelled = std::mem::take(&mut state.cancelled);
        running.retain(|(id, _)| !cancelled.contains(id));
        running.append(&mut state.listeners);
        state.listeners = running;
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }
}

impl ColorSchemeSource for ManualColorScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.state.borrow().dark
    }

    fn subscribe(&self, listener: SchemeListener) -> Subscription {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.push((id, listener));
            id
        };

        let state = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.listeners.retain(|(lid, _)| *lid != id);
                    state.cancelled.push(id);
                }
            }
        })
    }
}
