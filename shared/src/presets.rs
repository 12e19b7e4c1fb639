//! Fasting presets
//!
//! Six built-in schedules ship with the app; users can add their own.
//! Each preset carries a named colour that maps to the background and text
//! class names the front-end renders it with.

use crate::validation::{validate_preset_hours, validate_preset_name, ValidationError};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Colour palette available to presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PresetColor {
    #[default]
    Gray,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Purple,
    Pink,
}

impl PresetColor {
    pub const ALL: [PresetColor; 9] = [
        PresetColor::Gray,
        PresetColor::Red,
        PresetColor::Orange,
        PresetColor::Yellow,
        PresetColor::Green,
        PresetColor::Blue,
        PresetColor::Indigo,
        PresetColor::Purple,
        PresetColor::Pink,
    ];

    /// Look up a colour by name; unknown names fall back to gray
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            PresetColor::Gray => "gray",
            PresetColor::Red => "red",
            PresetColor::Orange => "orange",
            PresetColor::Yellow => "yellow",
            PresetColor::Green => "green",
            PresetColor::Blue => "blue",
            PresetColor::Indigo => "indigo",
            PresetColor::Purple => "purple",
            PresetColor::Pink => "pink",
        }
    }

    pub fn bg_class(&self) -> String {
        format!("bg-{}-500", self.name())
    }

    pub fn text_class(&self) -> &'static str {
        "text-white"
    }
}

/// A named fasting schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastingPreset {
    pub id: String,
    pub name: String,
    pub hours: f64,
    pub description: String,
    pub color: PresetColor,
    pub is_custom: bool,
}

static DEFAULT_PRESETS: Lazy<Vec<FastingPreset>> = Lazy::new(|| {
    [
        (
            "circadian-rhythm",
            "Circadian Rhythm TRF",
            13.0,
            "Natural eating window",
            PresetColor::Purple,
        ),
        ("lean-gains", "16:8", 16.0, "Most popular method", PresetColor::Pink),
        ("warrior", "18:6", 18.0, "Extended fasting", PresetColor::Green),
        ("omad-prep", "20:4", 20.0, "OMAD preparation", PresetColor::Orange),
        ("extended", "24 Hour Fast", 24.0, "Full day fast", PresetColor::Blue),
        ("monk-fast", "36 Hour Fast", 36.0, "Extended benefits", PresetColor::Indigo),
    ]
    .into_iter()
    .map(|(id, name, hours, description, color)| FastingPreset {
        id: id.to_string(),
        name: name.to_string(),
        hours,
        description: description.to_string(),
        color,
        is_custom: false,
    })
    .collect()
});

/// The built-in presets, shortest first
pub fn default_presets() -> &'static [FastingPreset] {
    &DEFAULT_PRESETS
}

/// Find a preset by id, checking built-ins before the user's own
pub fn find_preset<'a>(id: &str, custom: &'a [FastingPreset]) -> Option<&'a FastingPreset> {
    default_presets()
        .iter()
        .chain(custom.iter())
        .find(|p| p.id == id)
}

/// Build a validated custom preset
pub fn custom_preset(
    id: impl Into<String>,
    name: &str,
    hours: f64,
    description: Option<&str>,
    color: &str,
) -> Result<FastingPreset, ValidationError> {
    validate_preset_name(name).map_err(|msg| ValidationError::new("name", &msg))?;
    validate_preset_hours(hours).map_err(|msg| ValidationError::new("hours", &msg))?;

    Ok(FastingPreset {
        id: id.into(),
        name: name.trim().to_string(),
        hours,
        description: description.unwrap_or_default().to_string(),
        color: PresetColor::from_name(color),
        is_custom: true,
    })
}
