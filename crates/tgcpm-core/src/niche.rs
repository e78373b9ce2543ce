//! Channel niche taxonomy and keyword classification.

use serde::{Deserialize, Serialize};

/// Advertising niche of a channel. Drives the CPM niche multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Niche {
    Crypto,
    Finance,
    Tech,
    Business,
    Gaming,
    Education,
    News,
    Entertainment,
    Lifestyle,
    General,
}

impl std::fmt::Display for Niche {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Niche::Crypto => "crypto",
            Niche::Finance => "finance",
            Niche::Tech => "tech",
            Niche::Business => "business",
            Niche::Gaming => "gaming",
            Niche::Education => "education",
            Niche::News => "news",
            Niche::Entertainment => "entertainment",
            Niche::Lifestyle => "lifestyle",
            Niche::General => "general",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for Niche {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "crypto" => Ok(Niche::Crypto),
            "finance" => Ok(Niche::Finance),
            "tech" => Ok(Niche::Tech),
            "business" => Ok(Niche::Business),
            "gaming" => Ok(Niche::Gaming),
            "education" => Ok(Niche::Education),
            "news" => Ok(Niche::News),
            "entertainment" => Ok(Niche::Entertainment),
            "lifestyle" => Ok(Niche::Lifestyle),
            "general" => Ok(Niche::General),
            other => Err(format!("unknown niche: {other}")),
        }
    }
}

/// Lowercase keywords checked against `title + description`, first match wins.
///
/// Ordered roughly by advertiser value so a crypto/finance channel is not
/// misfiled under news just because it posts daily updates.
const KEYWORDS: &[(Niche, &[&str])] = &[
    (
        Niche::Crypto,
        &[
            "crypto",
            "bitcoin",
            "blockchain",
            "defi",
            "nft",
            "altcoin",
            "btc",
            "eth",
            "ton",
        ],
    ),
    (
        Niche::Finance,
        &["finance", "investment", "stock", "forex", "money", "trading"],
    ),
    (
        Niche::Tech,
        &["tech", "technology", "programming", "ai", "software", "developer"],
    ),
    (
        Niche::Business,
        &["business", "entrepreneur", "startup", "marketing", "sales"],
    ),
    (Niche::Gaming, &["gaming", "game", "esports", "gamer"]),
    (
        Niche::Education,
        &["education", "learning", "course", "tutorial"],
    ),
    (Niche::News, &["news", "breaking", "daily", "update"]),
    (
        Niche::Entertainment,
        &["entertainment", "fun", "meme", "funny"],
    ),
    (Niche::Lifestyle, &["lifestyle", "travel", "fitness", "food"]),
];

impl Niche {
    /// Classify a channel from its title and description.
    ///
    /// Matches whole lowercase words against the keyword table; returns
    /// [`Niche::General`] when nothing matches or both inputs are unknown.
    #[must_use]
    pub fn classify(title: Option<&str>, description: Option<&str>) -> Self {
        let text = format!(
            "{} {}",
            title.unwrap_or_default(),
            description.unwrap_or_default()
        )
        .to_lowercase();

        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        for &(niche, keywords) in KEYWORDS {
            if words.iter().any(|w| keywords.contains(w)) {
                return niche;
            }
        }
        Niche::General
    }
}
