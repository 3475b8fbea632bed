use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categorical mood tag on an entry. Stored as its lowercase name; anything
/// unrecognized on the way back out decodes as `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Calm,
    Excited,
    Tired,
    #[default]
    Neutral,
}

impl Mood {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Calm => "calm",
            Self::Excited => "excited",
            Self::Tired => "tired",
            Self::Neutral => "neutral",
        }
    }

    pub fn parse_lenient(raw: &str) -> Self {
        match raw {
            "happy" => Self::Happy,
            "sad" => Self::Sad,
            "angry" => Self::Angry,
            "calm" => Self::Calm,
            "excited" => Self::Excited,
            "tired" => Self::Tired,
            _ => Self::Neutral,
        }
    }

    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Calm,
        Mood::Excited,
        Mood::Tired,
        Mood::Neutral,
    ];
}

/// Card background palette offered by the editor. The store treats the hex
/// tag as opaque; this list only feeds defaults and pickers.
pub const CARD_COLORS: [&str; 12] = [
    "#FFD580", "#AFDFE4", "#FF6B6B", "#A5D6A7", "#FFC0CB", "#D8BFD8", "#E0E0E0", "#F5F5DC",
    "#B0E0E6", "#FFE4E1", "#E6E6FA", "#F0FFF0",
];

/// One diary record. `date` is the diary-relevant day the user picked and may
/// differ from `created_at`; `updated_at` advances on every edit and breaks
/// ties when several entries land on the same calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: String,
    pub content: String,
    pub mood: Mood,
    pub color_hex: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Daily reminder preference, persisted in the settings table. Delivery of
/// the actual notification belongs to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    pub enabled: bool,
    pub hour: u32,
    pub minute: u32,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            hour: 21,
            minute: 0,
        }
    }
}
