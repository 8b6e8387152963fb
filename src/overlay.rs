use crate::constants::*;
use crate::dom;
use crate::style::{css_rgba, glow_shadow};
use scrollscape_core::IntroOverlay;
use web_sys as web;

/// Write the phase caption and its color. Called once per phase change.
pub fn show_phase(document: &web::Document, overlay: &IntroOverlay, last_phase: bool) {
    if let Some(el) = document.get_element_by_id(INTRO_TEXT_ID) {
        el.set_text_content(Some(overlay.text));
    }
    dom::set_style(document, INTRO_TEXT_ID, "color", &css_rgba(overlay.color));
    let shadow = if last_phase {
        glow_shadow(overlay.color, INTRO_GLOW_PX)
    } else {
        None
    };
    dom::set_style(
        document,
        INTRO_TEXT_ID,
        "text-shadow",
        shadow.as_deref().unwrap_or("none"),
    );
}

#[inline]
pub fn set_text_opacity(document: &web::Document, opacity: f32) {
    dom::set_style(document, INTRO_TEXT_ID, "opacity", &format!("{opacity:.3}"));
}

/// Intro finished: drop the caption, unlock scrolling and show the page copy.
pub fn reveal_content(document: &web::Document) {
    dom::set_class(document, INTRO_OVERLAY_ID, HIDDEN_CLASS, true);
    dom::set_class(document, CONTENT_ID, HIDDEN_CLASS, false);
    dom::set_scroll_locked(document, false);
}

/// Back to the boot state: caption visible, copy hidden, scrolling locked.
pub fn conceal_content(document: &web::Document) {
    dom::set_class(document, INTRO_OVERLAY_ID, HIDDEN_CLASS, false);
    dom::set_class(document, CONTENT_ID, HIDDEN_CLASS, true);
    dom::set_scroll_locked(document, true);
}
