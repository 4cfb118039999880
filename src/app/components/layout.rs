//! Layout component wrapping all pages.

use dioxus::prelude::*;

use super::nav::Nav;
use super::theme::ThemeToggle;
use crate::app::SiteBrand;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Active navigation item ID
    pub nav_active: String,
    /// Page content
    pub children: Element,
}

/// Main layout: header with compact toggle, content, footer with full toggle.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let version = env!("DOCSITE_VERSION");
    let brand = try_use_context::<SiteBrand>().unwrap_or_default().0;

    rsx! {
        header { class: "site-header",
            Nav { active: props.nav_active.clone(), brand: brand.clone() }
            ThemeToggle { compact: true }
        }
        main { class: "site-main",
            {props.children}
        }
        footer { class: "site-footer",
            small { class: "text-muted", "{brand} v{version}" }
            ThemeToggle {}
        }
    }
}
