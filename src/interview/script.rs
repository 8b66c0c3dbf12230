//! Bot lines of the interview, verbatim.

pub const GREETING: &str = "Hi! 👋 Welcome to OFTN: AgentOS. What's your name?";
pub const ASK_ROLE: &str =
    "Great! 👍 What's your role? (e.g., student photographer, real estate agent)";
pub const ASK_CITY: &str = "Nice! 📍 Where are you based?";
pub const ASK_AVAILABILITY: &str = "Cool! 🕒 When are you available? (e.g., evenings, 9 AM–5 PM)";
pub const ASK_WHATSAPP: &str = "Got it! 📱 What's your WhatsApp number?";
pub const ASK_BIO: &str =
    "Perfect! 📝 Tell me about yourself (2–3 sentences about your services).";
pub const ASK_SERVICES: &str =
    "Almost there! 💼 List three skills or services (separated by commas).";
pub const ASK_PHOTOS: &str = "Excellent! 📷 Optional: Upload up to 3 photos for your gallery, or type \"skip\" to continue.";
pub const UPLOAD_PLACEHOLDER: &str = "Great! For demo purposes, I'll create your card now. In the real app, you'd upload photos here. 📸";
pub const CARD_READY: &str = "Thanks! Here's your professional card: 🎉";

/// Keyword that ends the interview without photos.
pub const SKIP_KEYWORD: &str = "skip";

pub fn suggest_bio(bio: &str) -> String {
    format!("How about: \"{bio}\" OK? 👍")
}

pub fn instructions(microsite_address: &str) -> String {
    format!(
        "📱 **Instructions:**\n• Save this card (screenshot)\n• Share in WhatsApp groups\n• Visit your microsite: {microsite_address}"
    )
}
