//! HTML renderer for microsite pages.

use crate::generation::whatsapp_chat_link;

use super::MicrositeView;

/// Builds a standalone HTML document for the microsite.
pub fn render_microsite_html(view: &MicrositeView) -> String {
    let address = view.address();
    let contact_message = format!(
        "Hi {}, I saw your profile on AgentOS and I'm interested in your services.",
        view.first_name()
    );
    let services = if view.services.is_empty() {
        "<li>No services listed yet.</li>".into()
    } else {
        view.services
            .iter()
            .map(|service| format!("<li>{}</li>", html_escape(service)))
            .collect::<Vec<String>>()
            .join("\n        ")
    };
    let gallery = if view.photos.is_empty() {
        "<p class=\"empty\">No photos yet.</p>".into()
    } else {
        view.photos
            .iter()
            .enumerate()
            .map(|(index, src)| {
                format!(
                    "<img src=\"{}\" alt=\"Portfolio {}\">",
                    html_escape(src),
                    index + 1
                )
            })
            .collect::<Vec<String>>()
            .join("\n        ")
    };
    let stats = match &view.stats {
        Some(stats) => format!(
            r#"<section class="stats">
      <h2>Quick Stats</h2>
      <dl>
        <dt>Rating</dt><dd>{rating:.1}/5.0</dd>
        <dt>Projects Completed</dt><dd>{projects}</dd>
        <dt>Response Time</dt><dd>{response}</dd>
      </dl>
    </section>"#,
            rating = stats.rating,
            projects = stats.completed_projects,
            response = html_escape(&stats.response_time),
        ),
        None => String::new(),
    };
    let condensed_bio = match &view.condensed_bio {
        Some(bio) => format!("<p class=\"condensed\">{}</p>", html_escape(bio)),
        None => String::new(),
    };

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
      body {{ font-family: Arial, sans-serif; margin: 1.5rem; }}
      header {{ display: flex; justify-content: space-between; align-items: center; }}
      .avatar {{ width: 5rem; height: 5rem; border-radius: 50%; background: #2dd4bf; color: #fff; display: flex; align-items: center; justify-content: center; font-size: 1.5rem; font-weight: bold; }}
      .meta {{ color: #555; }}
      .gallery img {{ width: 100%; max-width: 20rem; object-fit: cover; margin: 0.25rem; }}
      .cta {{ margin-top: 2rem; padding: 1.5rem; background: #14b8a6; color: #fff; text-align: center; }}
      .cta a {{ color: #fff; font-weight: bold; }}
    </style>
  </head>
  <body>
    <header>
      <div>
        <h1>{address}</h1>
        <div class="meta">Professional Microsite</div>
      </div>
      <div class="meta">Powered by OFTN</div>
    </header>
    <section class="hero">
      <div class="avatar">{initials}</div>
      <h1>{name}</h1>
      <p class="role">{role}</p>
      <p class="meta">📍 {city} · 🕒 {availability}</p>
      <p>
        <a href="{whatsapp_link}">WhatsApp</a>
        <a href="tel:{whatsapp}">Call</a>
      </p>
      <p class="bio">{bio}</p>
      {condensed_bio}
    </section>
    <section class="services">
      <h2>Services</h2>
      <ul>
        {services}
      </ul>
    </section>
    {stats}
    <section class="gallery">
      <h2>Portfolio Gallery</h2>
      <div class="meta">{photo_count} photos</div>
      <div>
        {gallery}
      </div>
    </section>
    <section class="cta">
      <h2>Ready to Work Together?</h2>
      <p>Contact {name} directly via WhatsApp for inquiries and bookings</p>
      <a href="{contact_link}">Send WhatsApp Message</a>
    </section>
  </body>
</html>
"#,
        title = html_escape(&format!("{} | {}", view.name, address)),
        address = html_escape(&address),
        initials = html_escape(&view.initials()),
        name = html_escape(&view.name),
        role = html_escape(&view.role),
        city = html_escape(&view.city),
        availability = html_escape(&view.availability),
        whatsapp_link = html_escape(&whatsapp_chat_link(&view.whatsapp, None)),
        whatsapp = html_escape(&view.whatsapp),
        bio = html_escape(&view.bio),
        condensed_bio = condensed_bio,
        services = services,
        stats = stats,
        photo_count = view.photos.len(),
        gallery = gallery,
        contact_link = html_escape(&whatsapp_chat_link(&view.whatsapp, Some(&contact_message))),
    )
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
