//! Server-rendered pages.
//!
//! Pages are the Dioxus components from `app::pages`, rendered with
//! `dioxus::ssr` inside a theme provider seeded from the request's cookie
//! mirror. An explicit light/dark choice is asserted on `<html>` directly;
//! for "system" (or no choice) the inline boot script decides before first
//! paint, so the page never flashes the wrong theme.

use axum::{
    extract::State,
    http::{header::COOKIE, HeaderMap},
    response::Html,
    routing::get,
    Router,
};
use dioxus::prelude::*;

use crate::api::AppState;
use crate::app::components::{theme_boot_script, theme_toggle_script};
use crate::app::{PageShell, SitePage};
use crate::config::SiteConfig;
use crate::theme::store::preference_from_cookie_header;
use crate::theme::{ThemePreference, DARK_CLASS, THEME_ATTRIBUTE};

/// Site stylesheet (embedded so the binary is self-contained)
const SITE_CSS: &str = include_str!("../../public/site.css");

/// Stored theme preference carried by the request cookies, if any.
pub fn request_preference(headers: &HeaderMap) -> Option<ThemePreference> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(preference_from_cookie_header)
}

/// Attributes for `<html>` that pin an explicit theme. Empty for "system"
/// and for no choice, which the boot script resolves on the client.
pub fn root_attributes(pref: Option<ThemePreference>) -> String {
    let Some(theme) = pref.and_then(ThemePreference::explicit) else {
        return String::new();
    };
    let class = if theme.is_dark() {
        format!(r#" class="{}""#, DARK_CLASS)
    } else {
        String::new()
    };
    format!(
        r#"{class} {attr}="{theme}" style="color-scheme: {theme}""#,
        class = class,
        attr = THEME_ATTRIBUTE,
        theme = theme.as_str()
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// HTML document wrapper
fn html_doc(site: &SiteConfig, pref: Option<ThemePreference>, title: &str, body: &str) -> String {
    let root = root_attributes(pref);
    let site_title = escape_html(&site.title);
    let description = site
        .tagline
        .as_deref()
        .map(|t| format!("\n    <meta name=\"description\" content=\"{}\">", escape_html(t)))
        .unwrap_or_default();
    // The client bundle owns the toggle when configured; otherwise the inline
    // script does.
    let client = match site.client_script.as_deref() {
        Some(src) => format!("\n    <script type=\"module\" src=\"{}\"></script>", escape_html(src)),
        None => format!("\n    <script>{}</script>", theme_toggle_script()),
    };
    let boot = theme_boot_script();

    format!(
        r#"<!DOCTYPE html>
<html lang="en"{root}>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="color-scheme" content="light dark">
    <meta name="application-name" content="{site_title}">{description}
    <title>{title} - {site_title}</title>
    <script>{boot}</script>
    <style>{SITE_CSS}</style>
</head>
<body>
    <div id="main">{body}</div>{client}
</body>
</html>"#
    )
}

/// Render a full page for a request whose cookie carried `pref`.
pub fn render_page(site: &SiteConfig, pref: Option<ThemePreference>, page: SitePage) -> String {
    let body = dioxus::ssr::render_element(rsx! {
        PageShell { hint: pref, page, brand: site.title.clone() }
    });
    html_doc(site, pref, page.title(), &body)
}

/// One GET route per server-rendered page.
pub fn page_routes() -> Router<AppState> {
    SitePage::ALL.into_iter().fold(Router::new(), |router, page| {
        router.route(
            page.path(),
            get(
                move |State(state): State<AppState>, headers: HeaderMap| async move {
                    let pref = request_preference(&headers);
                    Html(render_page(&state.site, pref, page))
                },
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    /// The `<button ...>` tag for one toggle option, per toggle instance.
    fn option_buttons<'a>(html: &'a str, option: &str) -> Vec<&'a str> {
        let marker = format!(r#"data-theme-option="{}""#, option);
        html.split("<button")
            .skip(1)
            .map(|rest| rest.split('>').next().unwrap_or(""))
            .filter(|tag| tag.contains(&marker))
            .collect()
    }

    #[test]
    fn test_request_preference_reads_theme_cookie() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_preference(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("sid=1; theme=dark"));
        assert_eq!(request_preference(&headers), Some(ThemePreference::Dark));
    }

    #[test]
    fn test_request_preference_ignores_malformed_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=neon"));
        assert_eq!(request_preference(&headers), None);
    }

    #[test]
    fn test_root_attributes() {
        assert_eq!(
            root_attributes(Some(ThemePreference::Dark)),
            r#" class="dark" data-theme="dark" style="color-scheme: dark""#
        );
        assert_eq!(
            root_attributes(Some(ThemePreference::Light)),
            r#" data-theme="light" style="color-scheme: light""#
        );
        assert_eq!(root_attributes(Some(ThemePreference::System)), "");
        assert_eq!(root_attributes(None), "");
    }

    #[test]
    fn test_dark_cookie_prerenders_dark_root_and_selection() {
        let html = render_page(
            &SiteConfig::default(),
            Some(ThemePreference::Dark),
            SitePage::Home,
        );

        assert!(html.contains(r#"<html lang="en" class="dark" data-theme="dark""#));
        let dark = option_buttons(&html, "dark");
        assert_eq!(dark.len(), 2, "compact and full toggles");
        for tag in dark {
            assert!(tag.contains(r#"aria-checked="true""#), "{tag}");
        }
        for tag in option_buttons(&html, "light") {
            assert!(tag.contains(r#"aria-checked="false""#), "{tag}");
        }
    }

    #[test]
    fn test_no_cookie_leaves_root_to_boot_script() {
        let html = render_page(&SiteConfig::default(), None, SitePage::Docs);

        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("prefers-color-scheme: dark"));
        for tag in option_buttons(&html, "system") {
            assert!(tag.contains(r#"aria-checked="true""#), "{tag}");
        }
        assert!(html.contains("<title>Documentation - Docs</title>"));
    }

    #[test]
    fn test_default_page_ships_toggle_wiring() {
        let html = render_page(&SiteConfig::default(), None, SitePage::Home);

        assert!(html.contains(&theme_toggle_script()));
        assert!(html.contains(r#"document.addEventListener("click""#));
        assert!(html.contains(r#"mq.addEventListener("change", onChange)"#));
        assert!(!html.contains(r#"<script type="module""#));
        // Boot script in <head>, toggle wiring after the rendered buttons
        let buttons = html.find("data-theme-option").expect("toggle rendered");
        let wiring = html.find("closest(\"[data-theme-option]\")").expect("wiring");
        assert!(wiring > buttons);
    }

    #[test]
    fn test_client_bundle_replaces_inline_toggle_wiring() {
        let site = SiteConfig {
            client_script: Some("/assets/docsite.js".to_string()),
            ..SiteConfig::default()
        };
        let html = render_page(&site, None, SitePage::Docs);

        assert!(html.contains(r#"<script type="module" src="/assets/docsite.js"></script>"#));
        assert!(!html.contains(r#"document.addEventListener("click""#));
    }

    #[test]
    fn test_site_title_reaches_header() {
        let site = SiteConfig {
            title: "Acme CLI".to_string(),
            ..SiteConfig::default()
        };
        let html = render_page(&site, None, SitePage::Home);

        assert!(html.contains(r#"<meta name="application-name" content="Acme CLI">"#));
        let header = html
            .split("<header")
            .nth(1)
            .and_then(|rest| rest.split("</header>").next())
            .expect("header rendered");
        assert!(header.contains("<strong>Acme CLI</strong>"), "{header}");
    }

    #[test]
    fn test_site_config_is_escaped_and_client_script_included() {
        let site = SiteConfig {
            title: "A <b>CLI</b>".to_string(),
            tagline: Some("Hash & ship".to_string()),
            client_dir: None,
            client_script: Some("/assets/docsite.js".to_string()),
        };
        let html = render_page(&site, None, SitePage::Home);

        assert!(html.contains("Overview - A &lt;b&gt;CLI&lt;/b&gt;"));
        assert!(html.contains(r#"content="Hash &amp; ship""#));
        assert!(html.contains(r#"<script type="module" src="/assets/docsite.js"></script>"#));
        assert!(html.contains(r#"<div id="main">"#));
    }
}
