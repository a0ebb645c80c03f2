//! Standard deviation interpretation - empirical-rule bands and sizing verdict
//!
//! The 68/95/99.7% bands are computed regardless of whether the normality
//! tests passed; they are a reading aid, not a claim about the distribution.

use serde::{Deserialize, Serialize};

/// Default upper bound (exclusive) of "low variability", in mm
pub const LOW_VARIABILITY_MM: f64 = 3.0;

/// Default upper bound (inclusive) of "moderate variability", in mm
pub const HIGH_VARIABILITY_MM: f64 = 7.0;

/// A symmetric interval around the mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Multiple of the standard deviation (1, 2 or 3)
    pub sigmas: u8,
    /// Nominal coverage under normality, in percent
    pub coverage: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Sizing verdict derived from the standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariabilityVerdict {
    /// std < low threshold
    Low,
    /// low ≤ std ≤ high
    Moderate,
    /// std > high threshold
    High,
    /// std is undefined
    Undefined,
}

impl VariabilityVerdict {
    /// Guidance attached to the verdict
    pub fn guidance(&self) -> &'static str {
        match self {
            VariabilityVerdict::Low => "low variability, standard sizing feasible",
            VariabilityVerdict::Moderate => "moderate variability, consider size options",
            VariabilityVerdict::High => "high variability, consider custom sizing per subgroup",
            VariabilityVerdict::Undefined => "not enough data to judge variability",
        }
    }
}

impl std::fmt::Display for VariabilityVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariabilityVerdict::Low => write!(f, "low"),
            VariabilityVerdict::Moderate => write!(f, "moderate"),
            VariabilityVerdict::High => write!(f, "high"),
            VariabilityVerdict::Undefined => write!(f, "undefined"),
        }
    }
}

/// Empirical-rule bands plus the sizing verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariabilityAssessment {
    pub mean: f64,
    pub std_dev: f64,
    /// 68%, 95% and 99.7% bands, in that order
    pub bands: [Band; 3],
    pub verdict: VariabilityVerdict,
    pub guidance: String,
}

/// Interpret a standard deviation with the default 3 mm / 7 mm thresholds
pub fn interpret_std_dev(mean: f64, std_dev: f64) -> VariabilityAssessment {
    interpret_std_dev_with(mean, std_dev, LOW_VARIABILITY_MM, HIGH_VARIABILITY_MM)
}

/// Interpret a standard deviation with explicit thresholds
pub fn interpret_std_dev_with(
    mean: f64,
    std_dev: f64,
    low: f64,
    high: f64,
) -> VariabilityAssessment {
    let band = |sigmas: u8, coverage: f64| Band {
        sigmas,
        coverage,
        lower: mean - f64::from(sigmas) * std_dev,
        upper: mean + f64::from(sigmas) * std_dev,
    };

    let verdict = if std_dev.is_nan() {
        VariabilityVerdict::Undefined
    } else if std_dev < low {
        VariabilityVerdict::Low
    } else if std_dev <= high {
        VariabilityVerdict::Moderate
    } else {
        VariabilityVerdict::High
    };

    VariabilityAssessment {
        mean,
        std_dev,
        bands: [band(1, 68.0), band(2, 95.0), band(3, 99.7)],
        verdict,
        guidance: verdict.guidance().to_string(),
    }
}
