use crate::profiles::ProfileDraft;

/// Multi-line card meant to be pasted into WhatsApp as-is.
pub fn render_card(draft: &ProfileDraft) -> String {
    format!(
        "🌟 **OFTN: AgentOS Card** 🌟
**{name}**
**Role**: {role}
📍 **{city}**
🕒 **Availability**: {availability}
📞 **WhatsApp**: {whatsapp}
📝 {bio}
💼 **Services**: {services}
✅ Visit {address} (Gallery!)",
        name = draft.name,
        role = draft.role,
        city = draft.city,
        availability = draft.availability,
        whatsapp = draft.whatsapp,
        bio = draft.bio,
        services = draft.services_line(),
        address = draft.microsite_address(),
    )
}

/// Single-line summary for bios with tight length limits.
pub fn render_condensed_bio(draft: &ProfileDraft) -> String {
    format!(
        "{name}, {role} 📍 {city} 🕒 {availability} 📞 {whatsapp} | {services} 🔗 See gallery at {address} #AgentOSCard",
        name = draft.name,
        role = draft.role,
        city = draft.city,
        availability = draft.availability,
        whatsapp = draft.whatsapp,
        services = draft.services_line(),
        address = draft.microsite_address(),
    )
}
