use std::fmt;

use crate::error::{ModelKind, PipelineError};

/// A fixed, ordered set of labels a classifier can output.
///
/// Index `i` of the network's probability vector corresponds to `ALL[i]`.
pub trait Vocabulary: Copy + fmt::Debug + fmt::Display + Send + Sync + 'static {
    const ALL: &'static [Self];
    const MODEL: ModelKind;

    fn label(&self) -> &'static str;

    /// Picks the label with the highest probability; ties go to the lowest index.
    fn from_probabilities(probabilities: &[f32]) -> Result<Self, PipelineError> {
        if probabilities.len() != Self::ALL.len() {
            return Err(PipelineError::ModelOutputShape {
                model: Self::MODEL,
                expected: format!("[1, {}]", Self::ALL.len()),
                actual: vec![probabilities.len()],
            });
        }
        let index = argmax(probabilities).ok_or_else(|| {
            PipelineError::inference(Self::MODEL, "probability vector has no comparable values")
        })?;
        Ok(Self::ALL[index])
    }
}

/// Index of the first maximum, skipping NaN. `None` when nothing is comparable.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Vocabulary for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female];
    const MODEL: ModelKind = ModelKind::Gender;

    fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Eight non-overlapping age bins, youngest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Age {
    From0To2,
    From4To6,
    From8To12,
    From15To20,
    From25To32,
    From38To43,
    From48To53,
    From60To100,
}

impl Age {
    /// Inclusive year bounds of the bin.
    pub fn range(&self) -> (u8, u8) {
        match self {
            Age::From0To2 => (0, 2),
            Age::From4To6 => (4, 6),
            Age::From8To12 => (8, 12),
            Age::From15To20 => (15, 20),
            Age::From25To32 => (25, 32),
            Age::From38To43 => (38, 43),
            Age::From48To53 => (48, 53),
            Age::From60To100 => (60, 100),
        }
    }
}

impl Vocabulary for Age {
    const ALL: &'static [Self] = &[
        Age::From0To2,
        Age::From4To6,
        Age::From8To12,
        Age::From15To20,
        Age::From25To32,
        Age::From38To43,
        Age::From48To53,
        Age::From60To100,
    ];
    const MODEL: ModelKind = ModelKind::Age;

    fn label(&self) -> &'static str {
        match self {
            Age::From0To2 => "(0-2)",
            Age::From4To6 => "(4-6)",
            Age::From8To12 => "(8-12)",
            Age::From15To20 => "(15-20)",
            Age::From25To32 => "(25-32)",
            Age::From38To43 => "(38-43)",
            Age::From48To53 => "(48-53)",
            Age::From60To100 => "(60-100)",
        }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
