const WHATSAPP_SHARE_BASE: &str = "https://wa.me/";

/// `wa.me` link that opens WhatsApp with `text` prefilled.
pub fn whatsapp_share_link(text: &str) -> String {
    format!("{WHATSAPP_SHARE_BASE}?text={}", urlencoding::encode(text))
}

/// Direct chat link for a phone number; non-digits are dropped.
pub fn whatsapp_chat_link(number: &str, message: Option<&str>) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    match message {
        Some(text) => format!(
            "{WHATSAPP_SHARE_BASE}{digits}?text={}",
            urlencoding::encode(text)
        ),
        None => format!("{WHATSAPP_SHARE_BASE}{digits}"),
    }
}
