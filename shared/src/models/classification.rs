//! Waste Photo Classification Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Material labels offered to households and to the model prompt
pub const WASTE_TYPES: &[&str] = &[
    "Plastik PET",
    "HDPE",
    "PP",
    "Logam",
    "Kertas",
    "Kaca",
    "Tekstil",
    "Minyak Jelantah",
    "Organik",
];

/// Contamination level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contamination {
    #[serde(rename = "Clean")]
    Clean,
    #[serde(rename = "Slightly contaminated")]
    SlightlyContaminated,
    #[serde(rename = "Contaminated")]
    Contaminated,
    /// The classifier could not judge contamination
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Contamination {
    pub const ASSESSED: [Contamination; 3] = [
        Contamination::Clean,
        Contamination::SlightlyContaminated,
        Contamination::Contaminated,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "Clean",
            Self::SlightlyContaminated => "Slightly contaminated",
            Self::Contaminated => "Contaminated",
            Self::Unknown => "Unknown",
        }
    }

    /// Lenient parse of free text returned by a model
    pub fn parse_loose(text: &str) -> Self {
        let t = text.trim().to_ascii_lowercase();
        if t.starts_with("slightly") {
            Self::SlightlyContaminated
        } else if t.starts_with("contaminated") {
            Self::Contaminated
        } else if t.starts_with("clean") {
            Self::Clean
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for Contamination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Free-form material label (not validated against [`WASTE_TYPES`])
    pub label: String,
    pub contamination: Contamination,
    /// 0..=100
    pub recyclability_score: i32,
    pub advice: String,
    /// Which classifier produced the result
    pub source: String,
}

/// Classify request body
///
/// `photo_ref` names a file in the upload directory; `image_base64` carries
/// the image inline. With neither, the random classifier answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub photo_ref: Option<String>,
    #[serde(default)]
    pub image_base64: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contamination_serde_labels() {
        let json = serde_json::to_string(&Contamination::SlightlyContaminated).unwrap();
        assert_eq!(json, "\"Slightly contaminated\"");
        let c: Contamination = serde_json::from_str("\"Clean\"").unwrap();
        assert_eq!(c, Contamination::Clean);
    }

    #[test]
    fn test_parse_loose() {
        assert_eq!(Contamination::parse_loose(" Clean"), Contamination::Clean);
        assert_eq!(
            Contamination::parse_loose("slightly contaminated."),
            Contamination::SlightlyContaminated
        );
        assert_eq!(
            Contamination::parse_loose("Contaminated"),
            Contamination::Contaminated
        );
        assert_eq!(Contamination::parse_loose("n/a"), Contamination::Unknown);
    }
}
