use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trained model the prediction service should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelChoice {
    #[default]
    RandomForest,
    GradientBoosting,
    LogReg,
    KNearestNeighbor,
}

impl ModelChoice {
    pub const ALL: &'static [ModelChoice] = &[
        ModelChoice::RandomForest,
        ModelChoice::GradientBoosting,
        ModelChoice::LogReg,
        ModelChoice::KNearestNeighbor,
    ];

    /// Identifier sent in the `choice` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::RandomForest => "random_forest",
            ModelChoice::GradientBoosting => "gradient_boosting",
            ModelChoice::LogReg => "log_reg",
            ModelChoice::KNearestNeighbor => "k_nearest_neighbor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelChoice::RandomForest => "Random Forest",
            ModelChoice::GradientBoosting => "Gradient Boosting",
            ModelChoice::LogReg => "Logistic Regression",
            ModelChoice::KNearestNeighbor => "K Nearest Neighbor",
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ModelChoice::ALL
            .iter()
            .copied()
            .find(|choice| choice.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "Invalid model choice '{}'. Choose from 'random_forest', 'gradient_boosting', 'log_reg' or 'k_nearest_neighbor'.",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_random_forest() {
        assert_eq!(ModelChoice::default(), ModelChoice::RandomForest);
    }

    #[test]
    fn test_parse_round_trip() {
        for choice in ModelChoice::ALL {
            assert_eq!(choice.as_str().parse::<ModelChoice>().unwrap(), *choice);
        }
    }

    #[test]
    fn test_parse_invalid() {
        let err = "svm".parse::<ModelChoice>().unwrap_err();
        assert!(err.contains("svm"));
    }

    #[test]
    fn test_serde_uses_form_identifiers() {
        let json = serde_json::to_string(&ModelChoice::KNearestNeighbor).unwrap();
        assert_eq!(json, "\"k_nearest_neighbor\"");
    }
}
