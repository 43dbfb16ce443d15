use serde::{Deserialize, Serialize};

/// Question categories the suggestion pipeline knows how to answer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Benefits,
    Audience,
    Competitors,
    Objections,
    Keywords,
}

/// All question types, in wizard presentation order.
pub const ALL_QUESTION_TYPES: [QuestionType; 5] = [
    QuestionType::Benefits,
    QuestionType::Audience,
    QuestionType::Competitors,
    QuestionType::Objections,
    QuestionType::Keywords,
];

impl QuestionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Benefits => "benefits",
            Self::Audience => "audience",
            Self::Competitors => "competitors",
            Self::Objections => "objections",
            Self::Keywords => "keywords",
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "benefits" => Ok(Self::Benefits),
            "audience" => Ok(Self::Audience),
            "competitors" => Ok(Self::Competitors),
            "objections" => Ok(Self::Objections),
            "keywords" => Ok(Self::Keywords),
            _ => Err(format!("invalid question type: {s}")),
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    #[test]
    fn parse_round_trips_every_variant() {
        for qt in ALL_QUESTION_TYPES {
            assert_eq!(QuestionType::from_str(qt.as_str()).unwrap(), qt);
        }
    }

    #[test]
    fn parse_rejects_unknown_value() {
        assert!(QuestionType::from_str("pricing").is_err());
        assert!(QuestionType::from_str("").is_err());
    }
}
