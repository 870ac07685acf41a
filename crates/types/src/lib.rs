//! Validated primitives shared across the Casebook crates.
//!
//! Content is loaded from YAML, so every value here validates itself during deserialisation.
//! A value that exists is a value that passed its checks.

/// Errors that can occur when creating validated types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    EmptyText,
    /// The score fell outside the inclusive `0..=10` range
    #[error("score {0} is outside the range {min}..={max}", min = Score::MIN, max = Score::MAX)]
    ScoreOutOfRange(i64),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err(TypesError::EmptyText)` if the input is empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypesError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypesError::EmptyText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A rating on the inclusive `0..=10` scale.
///
/// Used for goal priorities and challenge complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 10;

    /// Creates a new `Score`.
    ///
    /// # Errors
    ///
    /// Returns `Err(TypesError::ScoreOutOfRange)` if `value` is outside `0..=10`.
    pub fn new(value: i64) -> Result<Self, TypesError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(TypesError::ScoreOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The score as a fraction of the maximum, always within `[0.0, 1.0]`.
    pub fn fraction(self) -> f64 {
        f64::from(self.0) / f64::from(Self::MAX)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for Score {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Score {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Score::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Overview \n").expect("should accept padded text");
        assert_eq!(text.as_str(), "Overview");
    }

    #[test]
    fn test_non_empty_text_rejects_whitespace_only() {
        let err = NonEmptyText::new(" \t ").expect_err("should reject whitespace");
        assert_eq!(err, TypesError::EmptyText);
    }

    #[test]
    fn test_score_accepts_bounds() {
        assert_eq!(Score::new(0).map(Score::get), Ok(0));
        assert_eq!(Score::new(10).map(Score::get), Ok(10));
    }

    #[test]
    fn test_score_rejects_out_of_range() {
        assert_eq!(Score::new(11), Err(TypesError::ScoreOutOfRange(11)));
        assert_eq!(Score::new(-1), Err(TypesError::ScoreOutOfRange(-1)));
    }

    #[test]
    fn test_score_fraction_is_proportional() {
        let score = Score::new(8).expect("valid score");
        assert!((score.fraction() - 0.8).abs() < f64::EPSILON);
        assert!((Score::new(10).expect("valid score").fraction() - 1.0).abs() < f64::EPSILON);
        assert_eq!(Score::new(0).expect("valid score").fraction(), 0.0);
    }

    #[test]
    fn test_score_deserialise_rejects_out_of_range() {
        let err = serde_yaml::from_str::<Score>("12").expect_err("should reject 12");
        assert!(err.to_string().contains("outside the range"));
    }

    #[test]
    fn test_non_empty_text_serialises_as_plain_string() {
        let text = NonEmptyText::new("Results").expect("valid text");
        assert_eq!(serde_json::to_string(&text).expect("serialise"), "\"Results\"");
    }
}
