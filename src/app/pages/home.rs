//! Landing page.

use dioxus::prelude::*;

use crate::app::components::Layout;
use crate::app::theme::use_theme;

const INSTALL_SNIPPET: &str = "cargo install docsite-cli\ndocsite init\ndocsite check --drift";

/// Landing page with hero and install snippet.
#[component]
pub fn Home() -> Element {
    rsx! {
        Layout { nav_active: "home".to_string(),
            section { class: "hero",
                h1 { "Ship reproducible builds" }
                p { class: "lead",
                    "Content hashing, bundling and drift detection for your toolchain."
                }
                a { class: "btn btn-primary", href: "/docs", "Read the docs" }
            }
            CodeSample { source: INSTALL_SNIPPET }
        }
    }
}

/// Code block whose palette follows the effective theme.
#[component]
fn CodeSample(source: &'static str) -> Element {
    let theme = use_theme();
    let palette = match theme.effective() {
        Some(t) if t.is_dark() => "code code-dark",
        Some(_) => "code code-light",
        None => "code",
    };

    rsx! {
        pre { class: "{palette}",
            code { "{source}" }
        }
    }
}
