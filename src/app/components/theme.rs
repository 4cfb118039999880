//! Light / system / dark theme toggle.

use dioxus::prelude::*;

use crate::app::theme::use_theme;
use crate::theme::store::cookie_attributes;
use crate::theme::{
    ThemePreference, ToggleOption, DARK_CLASS, DARK_SCHEME_QUERY, THEME_ATTRIBUTE,
    THEME_STORAGE_KEY,
};

/// Three mutually exclusive theme buttons rendered as a radio group.
///
/// `compact` swaps labels for icons; behavior is identical.
#[component]
pub fn ThemeToggle(#[props(default = false)] compact: bool) -> Element {
    let theme = use_theme();
    let group_class = if compact {
        "theme-toggle theme-toggle-compact"
    } else {
        "theme-toggle"
    };
    let effective = theme.effective().map(|t| t.as_str()).unwrap_or("");

    rsx! {
        div {
            class: "{group_class}",
            role: "radiogroup",
            "aria-label": "Color theme",
            "data-effective": "{effective}",
            for option in ThemePreference::ALL {
                ThemeOptionButton {
                    key: "{option}",
                    option,
                    compact,
                }
            }
        }
    }
}

#[component]
fn ThemeOptionButton(option: ThemePreference, compact: bool) -> Element {
    let theme = use_theme();
    let state = theme.option(option);

    rsx! {
        button {
            r#type: "button",
            role: "radio",
            class: state.class(),
            "aria-checked": if state.selected { "true" } else { "false" },
            "data-theme-option": option.as_str(),
            title: option.label(),
            onclick: move |_| theme.set_preference(option),
            if compact {
                span { "aria-hidden": "true", {option.icon()} }
                span { class: "sr-only", {option.label()} }
            } else {
                {option.label()}
            }
        }
    }
}

/// Inline script for `<head>`: resolves the stored preference (localStorage,
/// then the cookie mirror, then `matchMedia`) and marks `<html>` before first
/// paint. Built from the same constants as the Rust side so the two agree.
pub fn theme_boot_script() -> String {
    format!(
        r#"(function(){{
    var k = "{key}", p = null;
    try {{ p = localStorage.getItem(k); }} catch (e) {{}}
    if (p !== "light" && p !== "dark" && p !== "system") {{
        try {{
            var m = document.cookie.match(new RegExp("(?:^|;\\s*)" + k + "=([^;]*)"));
            p = m ? decodeURIComponent(m[1]) : null;
        }} catch (e) {{ p = null; }}
    }}
    var d = p === "dark" || (p !== "light" && !!(window.matchMedia && window.matchMedia("{query}").matches));
    var r = document.documentElement;
    r.classList.toggle("{class}", d);
    r.setAttribute("{attr}", d ? "dark" : "light");
    r.style.colorScheme = d ? "dark" : "light";
}})();"#,
        key = THEME_STORAGE_KEY,
        query = DARK_SCHEME_QUERY,
        class = DARK_CLASS,
        attr = THEME_ATTRIBUTE,
    )
}

/// Inline script for pages served without the client bundle: wires the
/// server-rendered toggle buttons, persists choices to both channels (rolling
/// localStorage back when the cookie is refused) and follows `matchMedia`
/// while "system" is selected.
pub fn theme_toggle_script() -> String {
    let active = ToggleOption {
        selected: true,
        implied: false,
    };
    let implied = ToggleOption {
        selected: false,
        implied: true,
    };

    format!(
        r#"(function(){{
    var k = "{key}", r = document.documentElement;
    var mq = window.matchMedia ? window.matchMedia("{query}") : null;
    function valid(p) {{ return p === "light" || p === "dark" || p === "system"; }}
    function cookie() {{
        try {{
            var m = document.cookie.match(new RegExp("(?:^|;\\s*)" + k + "=([^;]*)"));
            return m ? decodeURIComponent(m[1]) : null;
        }} catch (e) {{ return null; }}
    }}
    function stored() {{
        var p = null;
        try {{ p = localStorage.getItem(k); }} catch (e) {{}}
        if (!valid(p)) p = cookie();
        return valid(p) ? p : "system";
    }}
    function save(p) {{
        var prev = null;
        try {{ prev = localStorage.getItem(k); localStorage.setItem(k, p); }} catch (e) {{ return; }}
        try {{ document.cookie = k + "=" + encodeURIComponent(p) + "{cookie}"; }} catch (e) {{}}
        if (cookie() !== p) {{
            try {{
                if (prev === null) localStorage.removeItem(k); else localStorage.setItem(k, prev);
            }} catch (e) {{}}
        }}
    }}
    var pref = stored();
    function apply() {{
        var d = pref === "dark" || (pref !== "light" && !!(mq && mq.matches));
        var eff = d ? "dark" : "light";
        r.classList.toggle("{class}", d);
        r.setAttribute("{attr}", eff);
        r.style.colorScheme = eff;
        var groups = document.querySelectorAll("[role=radiogroup][data-effective]");
        for (var i = 0; i < groups.length; i++) groups[i].setAttribute("data-effective", eff);
        var buttons = document.querySelectorAll("[data-theme-option]");
        for (var j = 0; j < buttons.length; j++) {{
            var b = buttons[j], o = b.getAttribute("data-theme-option");
            var sel = o === pref, imp = !sel && pref === "system" && o === eff;
            b.setAttribute("aria-checked", sel ? "true" : "false");
            b.className = sel ? "{active}" : imp ? "{implied}" : "{plain}";
        }}
    }}
    document.addEventListener("click", function (e) {{
        var b = e.target && e.target.closest ? e.target.closest("[data-theme-option]") : null;
        var p = b ? b.getAttribute("data-theme-option") : null;
        if (!valid(p)) return;
        pref = p;
        save(p);
        apply();
    }});
    if (mq) {{
        var onChange = function () {{ if (pref === "system") apply(); }};
        if (mq.addEventListener) mq.addEventListener("change", onChange);
        else if (mq.addListener) mq.addListener(onChange);
    }}
    apply();
}})();"#,
        key = THEME_STORAGE_KEY,
        query = DARK_SCHEME_QUERY,
        cookie = cookie_attributes(),
        class = DARK_CLASS,
        attr = THEME_ATTRIBUTE,
        active = active.class(),
        implied = implied.class(),
        plain = ToggleOption::default().class(),
    )
}
