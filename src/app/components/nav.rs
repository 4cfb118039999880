//! Navigation component for the site header.

use dioxus::prelude::*;

/// (id, href, label) for each top-level page
const NAV_ITEMS: &[(&str, &str, &str)] = &[("home", "/", "Overview"), ("docs", "/docs", "Docs")];

#[derive(Props, Clone, PartialEq)]
pub struct NavProps {
    /// The currently active page ID (e.g., "home", "docs")
    pub active: String,
    /// Brand text on the left
    pub brand: String,
}

/// Header navigation bar.
#[component]
pub fn Nav(props: NavProps) -> Element {
    rsx! {
        nav { class: "site-nav",
            a { class: "brand", href: "/", strong { "{props.brand}" } }
            ul {
                for (id, href, label) in NAV_ITEMS.iter().copied() {
                    li { key: "{id}",
                        if props.active == id {
                            a { href, "aria-current": "page", strong { "{label}" } }
                        } else {
                            a { href, "{label}" }
                        }
                    }
                }
            }
        }
    }
}
