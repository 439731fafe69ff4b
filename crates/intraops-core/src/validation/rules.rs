//! Sub-validators applied to a single field value

use std::fmt::Display;

/// A single check against a field value
///
/// Returns the violation message, or `None` when the value passes.
pub trait Rule<V: ?Sized>: Send + Sync {
    fn check(&self, value: &V) -> Option<String>;
}

/// Rejects empty and whitespace-only strings
#[derive(Debug, Clone, Copy)]
pub struct NotBlank;

impl Rule<str> for NotBlank {
    fn check(&self, value: &str) -> Option<String> {
        value
            .trim()
            .is_empty()
            .then(|| "must not be blank".to_string())
    }
}

/// Upper bound on the number of characters
#[derive(Debug, Clone, Copy)]
pub struct MaxLength(pub usize);

impl Rule<str> for MaxLength {
    fn check(&self, value: &str) -> Option<String> {
        (value.chars().count() > self.0).then(|| format!("must be at most {} characters", self.0))
    }
}

/// Lower bound on the number of characters
#[derive(Debug, Clone, Copy)]
pub struct MinLength(pub usize);

impl Rule<str> for MinLength {
    fn check(&self, value: &str) -> Option<String> {
        (value.chars().count() < self.0).then(|| format!("must be at least {} characters", self.0))
    }
}

/// Every character must be an ASCII digit
#[derive(Debug, Clone, Copy)]
pub struct Digits;

impl Rule<str> for Digits {
    fn check(&self, value: &str) -> Option<String> {
        (!value.chars().all(|c| c.is_ascii_digit())).then(|| "must contain only digits".to_string())
    }
}

/// Inclusive range
#[derive(Debug, Clone, Copy)]
pub struct Range<N> {
    pub min: N,
    pub max: N,
}

impl<N> Range<N> {
    pub fn new(min: N, max: N) -> Self {
        Self { min, max }
    }
}

impl<N> Rule<N> for Range<N>
where
    N: PartialOrd + Display + Send + Sync,
{
    fn check(&self, value: &N) -> Option<String> {
        (*value < self.min || *value > self.max)
            .then(|| format!("must be between {} and {}", self.min, self.max))
    }
}

/// Arbitrary predicate with a fixed message
pub struct Matches<F> {
    predicate: F,
    message: &'static str,
}

impl<F> Matches<F> {
    pub fn new(predicate: F, message: &'static str) -> Self {
        Self { predicate, message }
    }
}

impl<V, F> Rule<V> for Matches<F>
where
    V: ?Sized,
    F: Fn(&V) -> bool + Send + Sync,
{
    fn check(&self, value: &V) -> Option<String> {
        (!(self.predicate)(value)).then(|| self.message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_not_blank() {
        assert!(NotBlank.check("x").is_none());
        assert!(NotBlank.check("").is_some());
        assert!(NotBlank.check(" \t\n").is_some());
    }

    #[test]
    fn test_max_length_counts_chars_not_bytes() {
        assert!(MaxLength(3).check("äöü").is_none());
        assert_eq!(
            MaxLength(2).check("äöü").as_deref(),
            Some("must be at most 2 characters")
        );
    }

    #[test]
    fn test_digits() {
        assert!(Digits.check("0420").is_none());
        assert!(Digits.check("4a").is_some());
        assert!(Digits.check("").is_none());
    }

    #[test]
    fn test_range_inclusive_bounds() {
        let range = Range::new(0u32, 365);
        assert!(range.check(&0).is_none());
        assert!(range.check(&365).is_none());
        assert_eq!(
            range.check(&366).as_deref(),
            Some("must be between 0 and 365")
        );
    }

    #[test]
    fn test_matches_predicate() {
        let rule = Matches::new(|v: &str| v.starts_with('A'), "must start with A");
        assert!(rule.check("Alpha").is_none());
        assert_eq!(rule.check("beta").as_deref(), Some("must start with A"));
    }

    proptest! {
        #[test]
        fn prop_max_length_agrees_with_char_count(s in ".{0,40}", limit in 0usize..40) {
            let violated = MaxLength(limit).check(s.as_str()).is_some();
            prop_assert_eq!(violated, s.chars().count() > limit);
        }

        #[test]
        fn prop_range_accepts_exactly_values_inside(v in any::<i64>(), a in any::<i64>(), b in any::<i64>()) {
            let (min, max) = if a <= b { (a, b) } else { (b, a) };
            let accepted = Range::new(min, max).check(&v).is_none();
            prop_assert_eq!(accepted, min <= v && v <= max);
        }
    }
}
