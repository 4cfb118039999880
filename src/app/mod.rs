//! Dioxus application.
//!
//! The same page components are rendered on the server (see `ui`) and by
//! the client app launched from `main` with the `web` feature.

use dioxus::prelude::*;

pub mod components;
pub mod pages;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod theme;

use pages::{Docs, Home};
use crate::theme::ThemePreference;
use theme::{initial_hint, use_theme_provider};

/// Root app component with routing
#[component]
pub fn App() -> Element {
    use_context_provider(initial_brand);
    // Initialize theme context at app root (storage + cookie + system scheme)
    use_theme_provider(initial_hint());

    rsx! {
        Router::<Route> {}
    }
}

/// Application routes
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/docs")]
    Docs {},
}

/// Site name shown in the header and footer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteBrand(pub String);

impl Default for SiteBrand {
    fn default() -> Self {
        Self("Docs".to_string())
    }
}

fn initial_brand() -> SiteBrand {
    #[cfg(target_arch = "wasm32")]
    {
        platform::site_title_hint().map(SiteBrand).unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        SiteBrand::default()
    }
}

/// Server-rendered pages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SitePage {
    Home,
    Docs,
}

impl SitePage {
    pub const ALL: [SitePage; 2] = [SitePage::Home, SitePage::Docs];

    pub fn path(&self) -> &'static str {
        match self {
            SitePage::Home => "/",
            SitePage::Docs => "/docs",
        }
    }

    /// Client route rendering the same page.
    pub fn route(&self) -> Route {
        match self {
            SitePage::Home => Route::Home {},
            SitePage::Docs => Route::Docs {},
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SitePage::Home => "Overview",
            SitePage::Docs => "Documentation",
        }
    }
}

impl From<&Route> for SitePage {
    fn from(route: &Route) -> Self {
        match route {
            Route::Home {} => SitePage::Home,
            Route::Docs {} => SitePage::Docs,
        }
    }
}

/// Page wrapped in a theme provider seeded with the request's cookie hint.
#[component]
pub fn PageShell(
    #[props(!optional)] hint: Option<ThemePreference>,
    page: SitePage,
    brand: String,
) -> Element {
    use_context_provider(|| SiteBrand(brand.clone()));
    use_theme_provider(hint);

    match page {
        SitePage::Home => rsx! { Home {} },
        SitePage::Docs => rsx! { Docs {} },
    }
}
