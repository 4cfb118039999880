//! Page-lifetime theme state machine.
//!
//! [`ThemeController`] owns the stored preference, the latest system signal
//! and the resolved theme. It starts uninitialized (no effective theme), is
//! resolved once on mount, and afterwards reacts to explicit choices and to
//! system color-scheme changes. Every recomputation is pushed through a
//! single [`ThemeSurface`], which is the only place the document is touched.

use std::cell::RefCell;
use std::rc::Rc;

use super::scheme::{ColorSchemeSource, Subscription};
use super::store::ThemeStore;
use super::{resolve, EffectiveTheme, ThemePreference};

/// Resolved state handed to the surface after every recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeSnapshot {
    pub preference: ThemePreference,
    pub effective: EffectiveTheme,
}

/// How one of the three toggle controls should render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ToggleOption {
    /// The user's stated preference is this option.
    pub selected: bool,
    /// "System" is selected and currently resolves to this option.
    pub implied: bool,
}

impl ToggleOption {
    pub fn new(
        option: ThemePreference,
        preference: ThemePreference,
        effective: Option<EffectiveTheme>,
    ) -> Self {
        let implied = preference.follows_system()
            && effective.map(EffectiveTheme::as_preference) == Some(option);
        Self {
            selected: option == preference,
            implied,
        }
    }

    pub fn class(&self) -> &'static str {
        match (self.selected, self.implied) {
            (true, _) => "theme-option active",
            (false, true) => "theme-option implied",
            (false, false) => "theme-option",
        }
    }
}

/// Receives every resolved state. Implementations apply it to the document
/// root and to any reactive state mirrored for the UI.
pub trait ThemeSurface {
    fn apply(&mut self, snapshot: ThemeSnapshot);
}

/// Surface that renders nowhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl ThemeSurface for NullSurface {
    fn apply(&mut self, _snapshot: ThemeSnapshot) {}
}

pub type SharedThemeController = Rc<RefCell<ThemeController>>;

pub struct ThemeController {
    store: ThemeStore,
    surface: Box<dyn ThemeSurface>,
    /// In-memory preference; `None` until the user chooses or storage has one.
    stored: Option<ThemePreference>,
    system_is_dark: bool,
    /// `None` while uninitialized.
    effective: Option<EffectiveTheme>,
    persistent: bool,
}

impl ThemeController {
    pub fn new(store: ThemeStore, surface: impl ThemeSurface + 'static) -> Self {
        Self {
            store,
            surface: Box::new(surface),
            stored: None,
            system_is_dark: false,
            effective: None,
            persistent: true,
        }
    }

    pub fn into_shared(self) -> SharedThemeController {
        Rc::new(RefCell::new(self))
    }

    /// Resolve for the first time: read the store, resolve against the
    /// current system signal and apply. Calling it again only refreshes the
    /// system signal; the in-memory preference is kept.
    pub fn mount(&mut self, system_is_dark: bool) -> ThemeSnapshot {
        self.system_is_dark = system_is_dark;
        if self.effective.is_none() {
            self.stored = self.store.read();
            tracing::debug!(
                "Theme mounted: stored={:?}, system_dark={}",
                self.stored,
                system_is_dark
            );
        }
        self.refresh()
    }

    /// Apply an explicit user choice. Preference and effective theme are
    /// updated before this returns, whether or not persistence succeeds.
    pub fn set_preference(&mut self, pref: ThemePreference) -> ThemeSnapshot {
        self.stored = Some(pref);

        match self.store.write(pref) {
            Ok(()) => self.persistent = true,
            Err(e) => {
                if self.persistent {
                    tracing::warn!("Theme preference kept for this session only: {}", e);
                } else {
                    tracing::debug!("Theme preference still not persisted: {}", e);
                }
                self.persistent = false;
            }
        }

        self.refresh()
    }

    /// Record a new system signal. Returns the re-applied snapshot, or `None`
    /// when the preference is explicit or the controller is not mounted yet.
    pub fn system_changed(&mut self, is_dark: bool) -> Option<ThemeSnapshot> {
        self.system_is_dark = is_dark;
        if self.effective.is_none() || !self.preference().follows_system() {
            return None;
        }
        Some(self.refresh())
    }

    /// Stated preference; absence reads as [`ThemePreference::System`].
    pub fn preference(&self) -> ThemePreference {
        self.stored.unwrap_or_default()
    }

    pub fn stored_preference(&self) -> Option<ThemePreference> {
        self.stored
    }

    pub fn effective(&self) -> Option<EffectiveTheme> {
        self.effective
    }

    pub fn is_resolved(&self) -> bool {
        self.effective.is_some()
    }

    /// False once a write has failed and the preference lives in memory only.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn snapshot(&self) -> Option<ThemeSnapshot> {
        self.effective.map(|effective| ThemeSnapshot {
            preference: self.preference(),
            effective,
        })
    }

    pub fn option_state(&self, option: ThemePreference) -> ToggleOption {
        ToggleOption::new(option, self.preference(), self.effective)
    }

    fn refresh(&mut self) -> ThemeSnapshot {
        let effective = resolve(self.stored, self.system_is_dark);
        self.effective = Some(effective);
        let snapshot = ThemeSnapshot {
            preference: self.preference(),
            effective,
        };
        self.surface.apply(snapshot);
        snapshot
    }
}

/// Mount `controller` against a color-scheme source and keep it in sync.
///
/// The returned subscription must live as long as the controller is mounted;
/// dropping it removes the system listener.
pub fn mount(controller: &SharedThemeController, source: &dyn ColorSchemeSource) -> Subscription {
    let system_is_dark = source.prefers_dark().unwrap_or_else(|| {
        tracing::debug!("No color-scheme facility, assuming light");
        false
    });
    controller.borrow_mut().mount(system_is_dark);

    let weak = Rc::downgrade(controller);
    source.subscribe(Box::new(move |is_dark| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let Ok(mut controller) = shared.try_borrow_mut() else {
            tracing::warn!("Theme controller busy, dropped system scheme change");
            return;
        };
        if let Some(snapshot) = controller.system_changed(is_dark) {
            tracing::debug!("System scheme changed, now {}", snapshot.effective);
        }
    }))
}
