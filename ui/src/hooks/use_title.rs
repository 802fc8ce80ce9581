use yew::prelude::*;

const SITE_NAME: &str = "Staybook";

/// Sets the document title to `"{title} · Staybook"`, or just the site name
/// when `title` is the site name itself.
#[hook]
pub fn use_title(title: &str) {
    let title = if title == SITE_NAME {
        SITE_NAME.to_string()
    } else {
        format!("{title} · {SITE_NAME}")
    };
    use_effect_with(title, |title| {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            doc.set_title(title);
        }
    });
}
