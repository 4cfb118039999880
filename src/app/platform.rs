//! Browser bindings for the theme subsystem (WASM only).
//!
//! localStorage and `document.cookie` back the [`ThemeStore`] channels,
//! `matchMedia` provides the system signal, and [`DocumentRoot`] writes the
//! resolved theme onto `<html>`.

use wasm_bindgen::prelude::*;
use web_sys::{HtmlDocument, HtmlElement, MediaQueryList, MediaQueryListEvent};

use crate::theme::store::{cookie_value, theme_cookie};
use crate::theme::{
    ColorSchemeSource, StorageChannel, StoreError, Subscription, ThemePreference, ThemeSnapshot,
    ThemeStore, ThemeSurface, DARK_CLASS, DARK_SCHEME_QUERY, THEME_ATTRIBUTE, THEME_STORAGE_KEY,
};

fn js_reason(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Store over localStorage with the cookie mirror.
pub fn browser_store() -> ThemeStore {
    ThemeStore::new(LocalStorageChannel, CookieChannel)
}

/// Preference as the server saw it, for the first (pre-mount) render.
pub fn cookie_hint() -> Option<ThemePreference> {
    CookieChannel
        .get(THEME_STORAGE_KEY)
        .ok()
        .flatten()
        .and_then(|v| ThemePreference::parse(&v))
}

/// Site name the server rendered into `<meta name="application-name">`.
pub fn site_title_hint() -> Option<String> {
    web_sys::window()?
        .document()?
        .query_selector(r#"meta[name="application-name"]"#)
        .ok()
        .flatten()?
        .get_attribute("content")
}

/// `window.localStorage`.
pub struct LocalStorageChannel;

impl LocalStorageChannel {
    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable {
                channel: self.name(),
            })
    }
}

impl StorageChannel for LocalStorageChannel {
    fn name(&self) -> &'static str {
        "localStorage"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Read {
                channel: self.name(),
                reason: js_reason(e),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Write {
                channel: self.name(),
                reason: js_reason(e),
            })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Write {
                channel: self.name(),
                reason: js_reason(e),
            })
    }
}

/// `document.cookie` mirror.
pub struct CookieChannel;

impl CookieChannel {
    fn document(&self) -> Result<HtmlDocument, StoreError> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok())
            .ok_or(StoreError::Unavailable {
                channel: self.name(),
            })
    }

    fn assign(&self, cookie: &str) -> Result<(), StoreError> {
        self.document()?
            .set_cookie(cookie)
            .map_err(|e| StoreError::Write {
                channel: self.name(),
                reason: js_reason(e),
            })
    }
}

impl StorageChannel for CookieChannel {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let header = self.document()?.cookie().map_err(|e| StoreError::Read {
            channel: self.name(),
            reason: js_reason(e),
        })?;
        Ok(cookie_value(&header, key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.assign(&theme_cookie(key, value))?;

        // Blocked cookies are dropped silently; read back to notice.
        if self.get(key)?.as_deref() != Some(value) {
            return Err(StoreError::Write {
                channel: self.name(),
                reason: "cookie was not stored".into(),
            });
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.assign(&format!("{}=; Path=/; Max-Age=0; SameSite=Lax", key))
    }
}

/// `matchMedia("(prefers-color-scheme: dark)")`.
pub struct MediaQueryScheme {
    query: Option<MediaQueryList>,
}

impl MediaQueryScheme {
    pub fn new() -> Self {
        let query = web_sys::window().and_then(|w| w.match_media(DARK_SCHEME_QUERY).ok().flatten());
        if query.is_none() {
            tracing::debug!("matchMedia unavailable, system scheme fixed to light");
        }
        Self { query }
    }
}

impl Default for MediaQueryScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSchemeSource for MediaQueryScheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.query.as_ref().map(MediaQueryList::matches)
    }

    fn subscribe(&self, mut listener: Box<dyn FnMut(bool)>) -> Subscription {
        let Some(query) = self.query.clone() else {
            return Subscription::noop();
        };

        let onchange = Closure::wrap(Box::new(move |e: MediaQueryListEvent| {
            listener(e.matches());
        }) as Box<dyn FnMut(_)>);

        if let Err(e) =
            query.add_event_listener_with_callback("change", onchange.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to watch system color scheme: {}", js_reason(e));
            return Subscription::noop();
        }

        // The closure is owned by the teardown so it lives exactly as long as
        // the registration.
        Subscription::new(move || {
            let _ = query
                .remove_event_listener_with_callback("change", onchange.as_ref().unchecked_ref());
            drop(onchange);
        })
    }
}

/// `<html>`: class marker, attribute and `color-scheme`.
pub struct DocumentRoot;

impl ThemeSurface for DocumentRoot {
    fn apply(&mut self, snapshot: ThemeSnapshot) {
        let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };

        let theme = snapshot.effective;
        let _ = root.class_list().toggle_with_force(DARK_CLASS, theme.is_dark());
        let _ = root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
        if let Some(el) = root.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property("color-scheme", theme.as_str());
        }
    }
}
