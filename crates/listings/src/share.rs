//! Share links for a listing.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped the way browsers' `encodeURIComponent` escapes them.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Public page of a listing: `{base}/item/{id}`.
pub fn share_url(base: &str, item_id: &str) -> String {
    format!("{}/item/{}", base.trim_end_matches('/'), item_id)
}

fn share_text(title: &str) -> String {
    format!("Check out this item on ReUniteMe: {title}")
}

/// WhatsApp link carrying the title and page URL.
pub fn whatsapp_link(base: &str, item_id: &str, title: &str) -> String {
    let message = format!("{}\n{}", share_text(title), share_url(base, item_id));
    format!("https://wa.me/?text={}", encode(&message))
}

/// Telegram link carrying the page URL and the title.
pub fn telegram_link(base: &str, item_id: &str, title: &str) -> String {
    format!(
        "https://t.me/share/url?url={}&text={}",
        encode(&share_url(base, item_id)),
        encode(&share_text(title))
    )
}
