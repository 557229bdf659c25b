//! Topic and mood catalog
//!
//! Sixteen fixed topics, each belonging to exactly one of four moods.

use serde::{Deserialize, Serialize};

/// Coarse emotional category of a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Positive,
    Negative,
    HighEnergy,
    LowEnergy,
}

impl Mood {
    pub const ALL: [Mood; 4] = [
        Mood::Positive,
        Mood::Negative,
        Mood::HighEnergy,
        Mood::LowEnergy,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Positive => "😃",
            Self::Negative => "🙁",
            Self::HighEnergy => "😜",
            Self::LowEnergy => "😴",
        }
    }

    /// Localized display title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Positive => "Хорошее настроение",
            Self::Negative => "Плохое настроение",
            Self::HighEnergy => "Высокая энергия",
            Self::LowEnergy => "Низкая энергия",
        }
    }

    /// Topics that map to this mood, in catalog order
    pub fn topics(&self) -> Vec<Topic> {
        Topic::ALL
            .iter()
            .copied()
            .filter(|t| t.mood() == *self)
            .collect()
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::HighEnergy => write!(f, "high_energy"),
            Self::LowEnergy => write!(f, "low_energy"),
        }
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "high_energy" | "high-energy" | "highenergy" => Ok(Self::HighEnergy),
            "low_energy" | "low-energy" | "lowenergy" => Ok(Self::LowEnergy),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}

/// Post topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Music,
    Films,
    Autumn,
    Work,
    Quarantine,
    It,
    Car,
    Humor,
    Photo,
    Art,
    Food,
    Scared,
    Sad,
    Angry,
    Inspiration,
    Inlove,
}

impl Topic {
    pub const ALL: [Topic; 16] = [
        Topic::Music,
        Topic::Films,
        Topic::Autumn,
        Topic::Work,
        Topic::Quarantine,
        Topic::It,
        Topic::Car,
        Topic::Humor,
        Topic::Photo,
        Topic::Art,
        Topic::Food,
        Topic::Scared,
        Topic::Sad,
        Topic::Angry,
        Topic::Inspiration,
        Topic::Inlove,
    ];

    pub fn mood(&self) -> Mood {
        match self {
            Self::Music | Self::Films | Self::Humor | Self::Photo | Self::Art | Self::Inspiration => {
                Mood::HighEnergy
            }
            Self::Autumn | Self::Work => Mood::LowEnergy,
            Self::Quarantine | Self::Scared | Self::Sad | Self::Angry => Mood::Negative,
            Self::Car | Self::It | Self::Food | Self::Inlove => Mood::Positive,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Music => "🎧",
            Self::Films => "🎬",
            Self::Autumn => "🍂",
            Self::Work => "👔",
            Self::Quarantine => "🦠",
            Self::It => "💻",
            Self::Car => "🚗",
            Self::Humor => "🎭",
            Self::Photo => "📷",
            Self::Art => "🎨",
            Self::Food => "🍿",
            Self::Scared => "😱",
            Self::Sad => "😢",
            Self::Angry => "😡",
            Self::Inspiration => "🤩",
            Self::Inlove => "😍",
        }
    }

    /// Localized display title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Music => "Музыка",
            Self::Films => "Кино",
            Self::Autumn => "Осень",
            Self::Work => "Работа",
            Self::Quarantine => "Карантин",
            Self::It => "IT",
            Self::Car => "Авто",
            Self::Humor => "Комедия",
            Self::Photo => "Фото",
            Self::Art => "Искусство",
            Self::Food => "Еда",
            Self::Scared => "Испуг",
            Self::Sad => "Грусть",
            Self::Angry => "Злость",
            Self::Inspiration => "Вдохновение",
            Self::Inlove => "Влюбленность",
        }
    }

    /// Case-insensitive match against the localized title or the topic name
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title().to_lowercase().contains(&query) || self.to_string().contains(&query)
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Music => "music",
            Self::Films => "films",
            Self::Autumn => "autumn",
            Self::Work => "work",
            Self::Quarantine => "quarantine",
            Self::It => "it",
            Self::Car => "car",
            Self::Humor => "humor",
            Self::Photo => "photo",
            Self::Art => "art",
            Self::Food => "food",
            Self::Scared => "scared",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Inspiration => "inspiration",
            Self::Inlove => "inlove",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.to_lowercase().replace(['-', '_'], "");
        Topic::ALL
            .iter()
            .copied()
            .find(|t| t.to_string() == needle)
            .ok_or_else(|| format!("Unknown topic: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_every_topic_has_one_mood() {
        let total: usize = Mood::ALL.iter().map(|m| m.topics().len()).sum();
        assert_eq!(total, Topic::ALL.len());
    }

    #[test]
    fn test_mood_mapping() {
        assert_eq!(Topic::Music.mood(), Mood::HighEnergy);
        assert_eq!(Topic::Work.mood(), Mood::LowEnergy);
        assert_eq!(Topic::Sad.mood(), Mood::Negative);
        assert_eq!(Topic::Food.mood(), Mood::Positive);
        assert_eq!(Mood::LowEnergy.topics(), vec![Topic::Autumn, Topic::Work]);
    }

    #[test]
    fn test_topic_from_str() {
        assert_eq!(Topic::from_str("music"), Ok(Topic::Music));
        assert_eq!(Topic::from_str("IT"), Ok(Topic::It));
        assert_eq!(Topic::from_str("in-love"), Ok(Topic::Inlove));
        assert!(Topic::from_str("jazz").is_err());
    }

    #[test]
    fn test_topic_display_roundtrip() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_str(&topic.to_string()), Ok(topic));
        }
    }

    #[test]
    fn test_mood_from_str() {
        assert_eq!(Mood::from_str("high-energy"), Ok(Mood::HighEnergy));
        assert_eq!(Mood::from_str("Low_Energy"), Ok(Mood::LowEnergy));
        assert!(Mood::from_str("meh").is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Mood::HighEnergy).unwrap(), "\"high_energy\"");
        assert_eq!(serde_json::to_string(&Topic::Inlove).unwrap(), "\"inlove\"");
    }

    #[test]
    fn test_matches_search() {
        assert!(Topic::Music.matches_search("муз"));
        assert!(Topic::Music.matches_search("МУЗ"));
        assert!(Topic::Music.matches_search("mus"));
        assert!(!Topic::Music.matches_search("еда"));
        assert!(Topic::It.matches_search("it"));
    }
}
