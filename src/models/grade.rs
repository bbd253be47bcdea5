//! Ordinal grade scale shared by all metrics

use serde::{Deserialize, Serialize};
use std::fmt;

/// Five-point ordinal quality grade, 1 is best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    Excellent = 1,
    Good = 2,
    Okay = 3,
    NotGood = 4,
    Horrible = 5,
}

impl Grade {
    pub const ALL: [Grade; 5] = [
        Grade::Excellent,
        Grade::Good,
        Grade::Okay,
        Grade::NotGood,
        Grade::Horrible,
    ];

    /// Numeric value, 1 to 5
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::Good => "Good",
            Grade::Okay => "Okay",
            Grade::NotGood => "Not good",
            Grade::Horrible => "Horrible",
        }
    }

    /// Grade nearest to a fractional grade value
    ///
    /// Values are rounded half away from zero and clamped to the scale;
    /// non-finite values map to the worst grade.
    pub fn from_value(value: f64) -> Grade {
        if !value.is_finite() {
            return Grade::Horrible;
        }
        match value.round() {
            v if v <= 1.0 => Grade::Excellent,
            v if v <= 2.0 => Grade::Good,
            v if v <= 3.0 => Grade::Okay,
            v if v <= 4.0 => Grade::NotGood,
            _ => Grade::Horrible,
        }
    }

    /// Grades that put a module on the problem list
    pub fn is_problem(self) -> bool {
        matches!(self, Grade::NotGood | Grade::Horrible)
    }

    fn from_index(index: usize) -> Grade {
        Grade::ALL[index.min(4)]
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (={})", self.label(), self.value())
    }
}

/// Wording of a fractional grade, e.g. `2.5` reads as "Okay (=3)"
pub fn describe_value(value: f64) -> String {
    Grade::from_value(value).to_string()
}

/// Direction in which raw scores improve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    LowerIsBetter,
    HigherIsBetter,
}

/// Upper edge of one grade band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub limit: f64,
    pub inclusive: bool,
}

impl Boundary {
    pub const fn at_most(limit: f64) -> Self {
        Self { limit, inclusive: true }
    }

    pub const fn below(limit: f64) -> Self {
        Self { limit, inclusive: false }
    }

    fn admits(&self, score: f64) -> bool {
        if self.inclusive {
            score <= self.limit
        } else {
            score < self.limit
        }
    }
}

/// Threshold function turning a raw score into a [`Grade`]
///
/// Four ascending boundaries split the real line into five bands. With
/// [`Orientation::LowerIsBetter`] the lowest band is `Excellent`; with
/// [`Orientation::HigherIsBetter`] it is `Horrible`. Interpretation is total:
/// NaN maps to `Horrible`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeScale {
    boundaries: [Boundary; 4],
    orientation: Orientation,
}

impl GradeScale {
    pub const fn new(boundaries: [Boundary; 4], orientation: Orientation) -> Self {
        Self {
            boundaries,
            orientation,
        }
    }

    pub const fn lower_is_better(boundaries: [Boundary; 4]) -> Self {
        Self::new(boundaries, Orientation::LowerIsBetter)
    }

    pub const fn higher_is_better(boundaries: [Boundary; 4]) -> Self {
        Self::new(boundaries, Orientation::HigherIsBetter)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn boundaries(&self) -> &[Boundary; 4] {
        &self.boundaries
    }

    /// Same scale with new limits, keeping inclusivity and orientation
    ///
    /// Returns `None` unless exactly four limits are given.
    pub fn with_limits(&self, limits: &[f64]) -> Option<GradeScale> {
        if limits.len() != 4 {
            return None;
        }
        let mut boundaries = self.boundaries;
        for (boundary, limit) in boundaries.iter_mut().zip(limits) {
            boundary.limit = *limit;
        }
        Some(GradeScale::new(boundaries, self.orientation))
    }

    /// Apply an optional override
    pub fn overridden(&self, limits: Option<&Vec<f64>>) -> GradeScale {
        limits
            .and_then(|limits| self.with_limits(limits))
            .unwrap_or(*self)
    }

    pub fn interpret(&self, score: f64) -> Grade {
        if score.is_nan() {
            return Grade::Horrible;
        }
        let band = self
            .boundaries
            .iter()
            .position(|boundary| boundary.admits(score))
            .unwrap_or(4);
        match self.orientation {
            Orientation::LowerIsBetter => Grade::from_index(band),
            Orientation::HigherIsBetter => Grade::from_index(4 - band),
        }
    }

    /// Human readable score range of every grade, best grade first
    pub fn legend(&self) -> Vec<(String, Grade)> {
        let ranges: Vec<String> = (0..5).map(|band| self.band_range(band)).collect();
        let mut legend: Vec<(String, Grade)> = ranges
            .into_iter()
            .enumerate()
            .map(|(band, range)| {
                let grade = match self.orientation {
                    Orientation::LowerIsBetter => Grade::from_index(band),
                    Orientation::HigherIsBetter => Grade::from_index(4 - band),
                };
                (range, grade)
            })
            .collect();
        legend.sort_by_key(|(_, grade)| *grade);
        legend
    }

    fn band_range(&self, band: usize) -> String {
        let upper = |b: &Boundary| {
            if b.inclusive {
                format!("<= {}", b.limit)
            } else {
                format!("< {}", b.limit)
            }
        };
        let lower = |b: &Boundary| {
            if b.inclusive {
                format!("> {}", b.limit)
            } else {
                format!(">= {}", b.limit)
            }
        };
        match band {
            0 => upper(&self.boundaries[0]),
            4 => lower(&self.boundaries[3]),
            _ => format!(
                "{} and {}",
                lower(&self.boundaries[band - 1]),
                upper(&self.boundaries[band])
            ),
        }
    }
}
