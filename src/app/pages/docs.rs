//! Documentation page.

use dioxus::prelude::*;

use crate::app::components::Layout;

const SECTIONS: &[(&str, &str)] = &[
    ("install", "Installation"),
    ("hashing", "Content hashing"),
    ("drift", "Drift detection"),
    ("appearance", "Appearance"),
];

#[component]
pub fn Docs() -> Element {
    rsx! {
        Layout { nav_active: "docs".to_string(),
            div { class: "docs",
                aside { class: "docs-sidebar",
                    ul {
                        for (id, title) in SECTIONS.iter().copied() {
                            li { key: "{id}", a { href: "#{id}", "{title}" } }
                        }
                    }
                }
                article { class: "docs-body",
                    section { id: "install",
                        h2 { "Installation" }
                        p { "Install the CLI with cargo and run it from your project root." }
                    }
                    section { id: "hashing",
                        h2 { "Content hashing" }
                        p { "Every input file is hashed so unchanged artifacts are never rebuilt." }
                    }
                    section { id: "drift",
                        h2 { "Drift detection" }
                        p { "Recorded hashes are compared against the working tree to report drift." }
                    }
                    section { id: "appearance",
                        h2 { "Appearance" }
                        p {
                            "Pick Light, Dark or System from the toggle in the header or footer. "
                            "System follows your operating system and updates live. "
                            "The choice is remembered in this browser."
                        }
                    }
                }
            }
        }
    }
}
