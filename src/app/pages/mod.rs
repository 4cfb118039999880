//! Page components for the site.

mod docs;
mod home;

pub use docs::Docs;
pub use home::Home;
