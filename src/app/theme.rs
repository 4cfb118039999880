//! Theme context for the Dioxus app.
//!
//! Wraps a [`ThemeController`] in a context so every component reads the same
//! preference and effective theme. In the browser the controller is mounted
//! after the first render against localStorage, the cookie mirror and
//! `matchMedia`; during server rendering it only carries the cookie hint.

use dioxus::prelude::*;

use crate::theme::{
    EffectiveTheme, SharedThemeController, ThemeController, ThemePreference, ThemeSnapshot,
    ThemeStore, ThemeSurface, ToggleOption,
};

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

/// Global theme state shared via context
#[derive(Clone)]
pub struct ThemeContext {
    preference: Signal<ThemePreference>,
    /// `None` until the controller has resolved (or the hint pins a theme).
    effective: Signal<Option<EffectiveTheme>>,
    controller: SharedThemeController,
}

impl ThemeContext {
    pub fn preference(&self) -> ThemePreference {
        (self.preference)()
    }

    pub fn effective(&self) -> Option<EffectiveTheme> {
        (self.effective)()
    }

    /// Rendering state of one toggle control
    pub fn option(&self, option: ThemePreference) -> ToggleOption {
        ToggleOption::new(option, self.preference(), self.effective())
    }

    /// Set, persist and apply a preference. Never fails from the caller's
    /// point of view; persistence problems are logged by the controller.
    pub fn set_preference(&self, pref: ThemePreference) {
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => {
                controller.set_preference(pref);
            }
            Err(_) => tracing::warn!("Theme controller busy, ignoring choice {}", pref),
        }
    }
}

/// Mirrors every resolved state into the context signals, then hands it to
/// the document surface.
struct SignalSurface {
    preference: Signal<ThemePreference>,
    effective: Signal<Option<EffectiveTheme>>,
    document: Box<dyn ThemeSurface>,
}

impl ThemeSurface for SignalSurface {
    fn apply(&mut self, snapshot: ThemeSnapshot) {
        self.document.apply(snapshot);

        // peek() keeps the mounting effect from subscribing to its own output
        if *self.preference.peek() != snapshot.preference {
            self.preference.set(snapshot.preference);
        }
        if *self.effective.peek() != Some(snapshot.effective) {
            self.effective.set(Some(snapshot.effective));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn platform_parts() -> (ThemeStore, Box<dyn ThemeSurface>) {
    use super::platform::{browser_store, DocumentRoot};
    (browser_store(), Box::new(DocumentRoot))
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_parts() -> (ThemeStore, Box<dyn ThemeSurface>) {
    (ThemeStore::in_memory(), Box::new(crate::theme::NullSurface))
}

/// Preference to render before the controller mounts.
pub fn initial_hint() -> Option<ThemePreference> {
    #[cfg(target_arch = "wasm32")]
    {
        super::platform::cookie_hint()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Initialize theme context provider - call once at app root.
///
/// `hint` is the preference the server rendered with; it only affects the
/// unresolved window before mount.
pub fn use_theme_provider(hint: Option<ThemePreference>) -> ThemeContext {
    let preference = use_signal(|| hint.unwrap_or_default());
    let effective = use_signal(|| hint.and_then(ThemePreference::explicit));

    let controller = use_hook(move || {
        let (store, document) = platform_parts();
        let surface = SignalSurface {
            preference,
            effective,
            document,
        };
        ThemeController::new(store, surface).into_shared()
    });

    let ctx = use_context_provider(|| ThemeContext {
        preference,
        effective,
        controller,
    });

    // Client-side only: resolve, apply and watch the system scheme
    #[cfg(target_arch = "wasm32")]
    {
        let guard: Rc<RefCell<Option<crate::theme::Subscription>>> =
            use_hook(|| Rc::new(RefCell::new(None)));

        let guard_clone = guard.clone();
        let controller = ctx.controller.clone();
        use_effect(move || {
            if guard_clone.borrow().is_some() {
                return;
            }
            let scheme = super::platform::MediaQueryScheme::new();
            let subscription = crate::theme::mount(&controller, &scheme);
            *guard_clone.borrow_mut() = Some(subscription);
        });

        use_drop(move || {
            if guard.borrow_mut().take().is_some() {
                tracing::debug!("Theme provider unmounted, released system scheme listener");
            }
        });
    }

    ctx
}

/// Get theme context - use in any component
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>()
}
