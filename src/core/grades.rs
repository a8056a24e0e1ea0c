use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// KCSE 等第，由高到低
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "E")]
    E,
}

impl Grade {
    pub const ALL: [Grade; 12] = [
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::DPlus,
        Grade::D,
        Grade::DMinus,
        Grade::E,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::E => "E",
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Grade::A => 12,
            Grade::AMinus => 11,
            Grade::BPlus => 10,
            Grade::B => 9,
            Grade::BMinus => 8,
            Grade::CPlus => 7,
            Grade::C => 6,
            Grade::CMinus => 5,
            Grade::DPlus => 4,
            Grade::D => 3,
            Grade::DMinus => 2,
            Grade::E => 1,
        }
    }

    pub fn from_label(label: &str) -> Option<Grade> {
        Grade::ALL.into_iter().find(|g| g.label() == label)
    }
}

/// Points for a grade label; unrecognised labels are worth 0.
pub fn points_for_label(label: &str) -> u32 {
    Grade::from_label(label).map(Grade::points).unwrap_or(0)
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown grade '{0}', expected one of A, A-, B+, B, B-, C+, C, C-, D+, D, D-, E")]
pub struct UnknownGrade(pub String);

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        Grade::from_label(trimmed)
            .or_else(|| Grade::from_label(&trimmed.to_ascii_uppercase()))
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_point_values() {
        let expected = [
            ("A", 12),
            ("A-", 11),
            ("B+", 10),
            ("B", 9),
            ("B-", 8),
            ("C+", 7),
            ("C", 6),
            ("C-", 5),
            ("D+", 4),
            ("D", 3),
            ("D-", 2),
            ("E", 1),
        ];
        for (label, points) in expected {
            assert_eq!(points_for_label(label), points, "grade {}", label);
        }
    }

    #[test]
    fn test_unknown_label_is_worth_zero() {
        assert_eq!(points_for_label("F"), 0);
        assert_eq!(points_for_label(""), 0);
        assert_eq!(points_for_label("a"), 0);
        assert_eq!(points_for_label("A+"), 0);
    }

    #[test]
    fn test_points_strictly_decrease() {
        for pair in Grade::ALL.windows(2) {
            assert!(pair[0].points() > pair[1].points());
        }
    }

    #[test]
    fn test_from_str_accepts_lowercase() {
        assert_eq!("b+".parse::<Grade>().unwrap(), Grade::BPlus);
        assert_eq!(" A- ".parse::<Grade>().unwrap(), Grade::AMinus);
        assert!("Z".parse::<Grade>().is_err());
    }

    #[test]
    fn test_serde_uses_label() {
        assert_eq!(serde_json::to_string(&Grade::CMinus).unwrap(), "\"C-\"");
        let grade: Grade = serde_json::from_str("\"D+\"").unwrap();
        assert_eq!(grade, Grade::DPlus);
    }
}
