//! Per-user microsite page.
//!
//! The renderer only displays what it is given: a stored profile with its
//! gallery, or the built-in demo profile.

mod render;

pub use render::render_microsite_html;

use serde::Serialize;

use crate::profiles::MICROSITE_DOMAIN;
use crate::storage::{Card, GalleryPhoto, Profile};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MicrositeStats {
    pub rating: f32,
    pub completed_projects: u32,
    pub response_time: String,
}

/// Everything the page shows, already resolved to display strings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MicrositeView {
    pub username: String,
    pub name: String,
    pub role: String,
    pub city: String,
    pub availability: String,
    pub whatsapp: String,
    pub bio: String,
    pub services: Vec<String>,
    /// Image sources in display order.
    pub photos: Vec<String>,
    pub stats: Option<MicrositeStats>,
    pub condensed_bio: Option<String>,
}

impl MicrositeView {
    pub fn from_records(profile: &Profile, gallery: &[GalleryPhoto], card: Option<&Card>) -> Self {
        let mut ordered: Vec<&GalleryPhoto> = gallery.iter().collect();
        ordered.sort_by_key(|photo| photo.display_order);
        Self {
            username: profile.username.clone(),
            name: profile.name.clone(),
            role: profile.role.clone(),
            city: profile.city.clone(),
            availability: profile.availability.clone(),
            whatsapp: profile.whatsapp.clone(),
            bio: profile.bio.clone(),
            services: profile.services.clone(),
            photos: ordered
                .into_iter()
                .map(|photo| photo.photo_path.to_string_lossy().into_owned())
                .collect(),
            stats: None,
            condensed_bio: card.map(|card| card.condensed_bio.clone()),
        }
    }

    /// Sample profile shown when no stored profile backs the username.
    pub fn demo(username: &str) -> Self {
        Self {
            username: username.to_string(),
            name: "Siti Nur Ahmad".into(),
            role: "Student Photographer".into(),
            city: "Penang".into(),
            availability: "Evenings & weekends".into(),
            whatsapp: "+60-XXX-XXX-XXXX".into(),
            bio: "Creative student photographer capturing vibrant events in Penang. Specializing in memorable moments with artistic flair.".into(),
            services: vec![
                "Event Photography".into(),
                "Portrait Sessions".into(),
                "Photo Editing".into(),
            ],
            photos: vec![
                "https://images.pexels.com/photos/1105666/pexels-photo-1105666.jpeg?auto=compress&cs=tinysrgb&w=600".into(),
                "https://images.pexels.com/photos/1024993/pexels-photo-1024993.jpeg?auto=compress&cs=tinysrgb&w=600".into(),
                "https://images.pexels.com/photos/1174775/pexels-photo-1174775.jpeg?auto=compress&cs=tinysrgb&w=600".into(),
            ],
            stats: Some(MicrositeStats {
                rating: 4.9,
                completed_projects: 47,
                response_time: "< 2 hours".into(),
            }),
            condensed_bio: None,
        }
    }

    pub fn address(&self) -> String {
        format!("{}.{}", self.username, MICROSITE_DOMAIN)
    }

    /// First letter of each word of the name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }

    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or_default()
    }
}
