use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};

/// Every field a collector must fill before a card can be generated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Role,
    City,
    Availability,
    Whatsapp,
    Bio,
    Services,
}

impl ProfileField {
    pub const ALL: &'static [ProfileField] = &[
        ProfileField::Name,
        ProfileField::Role,
        ProfileField::City,
        ProfileField::Availability,
        ProfileField::Whatsapp,
        ProfileField::Bio,
        ProfileField::Services,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Role => "role",
            ProfileField::City => "city",
            ProfileField::Availability => "availability",
            ProfileField::Whatsapp => "whatsapp",
            ProfileField::Bio => "bio",
            ProfileField::Services => "services",
        }
    }

    /// Form label, as shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            ProfileField::Name => "Full Name",
            ProfileField::Role => "Role/Profession",
            ProfileField::City => "City/Area",
            ProfileField::Availability => "Availability",
            ProfileField::Whatsapp => "WhatsApp Number",
            ProfileField::Bio => "Bio/Description",
            ProfileField::Services => "Services/Skills",
        }
    }
}

impl FromStr for ProfileField {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        ProfileField::ALL
            .iter()
            .copied()
            .find(|field| field.key() == normalized)
            .ok_or_else(|| anyhow!("Unknown profile field '{value}'"))
    }
}

/// Fields still missing when a collector tried to finalize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    missing: Vec<ProfileField>,
}

impl ValidationReport {
    pub fn new(missing: Vec<ProfileField>) -> Self {
        Self { missing }
    }

    pub fn missing(&self) -> &[ProfileField] {
        &self.missing
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.missing.iter().map(|field| field.label()).collect();
        write!(f, "missing required fields: {}", labels.join(", "))
    }
}
