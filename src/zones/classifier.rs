//! First-match zone classification.
//!
//! Each zone is compiled into a [`RangeTest`] once, at construction, and
//! values are tested against the zones in configuration order.

use zonewatch_types::ZoneSpec;

/// Result of classifying a value against a path's zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Index of the first matching zone.
    Zone(usize),
    /// No zone admits the value.
    NoMatch,
}

impl Classification {
    /// The zone index, if the value matched a zone.
    pub fn zone_index(&self) -> Option<usize> {
        match self {
            Classification::Zone(index) => Some(*index),
            Classification::NoMatch => None,
        }
    }
}

/// Bound test for a single zone.
///
/// The lower edge is inclusive when both bounds are set and exclusive when
/// only the lower bound is set.
#[derive(Debug, Clone, Copy, PartialEq)]
enum RangeTest {
    Between { lower: f64, upper: f64 },
    Below { upper: f64 },
    Above { lower: f64 },
    Any,
}

impl RangeTest {
    fn from_zone(zone: &ZoneSpec) -> Self {
        match (zone.lower, zone.upper) {
            (Some(lower), Some(upper)) => RangeTest::Between { lower, upper },
            (None, Some(upper)) => RangeTest::Below { upper },
            (Some(lower), None) => RangeTest::Above { lower },
            (None, None) => RangeTest::Any,
        }
    }

    fn admits(&self, value: f64) -> bool {
        match *self {
            RangeTest::Between { lower, upper } => value >= lower && value < upper,
            RangeTest::Below { upper } => value < upper,
            RangeTest::Above { lower } => value > lower,
            RangeTest::Any => true,
        }
    }
}

/// Maps a measurement to the first zone that admits it.
///
/// # Example
///
/// ```
/// use zonewatch::{Classification, ZoneClassifier};
/// use zonewatch_types::{ZoneSpec, ZoneState};
///
/// let classifier = ZoneClassifier::new(&[
///     ZoneSpec::new(ZoneState::Alarm).upper(2.0),
///     ZoneSpec::new(ZoneState::Warn).lower(2.0).upper(5.0),
/// ]);
///
/// assert_eq!(classifier.classify(1.0), Classification::Zone(0));
/// assert_eq!(classifier.classify(2.0), Classification::Zone(1));
/// assert_eq!(classifier.classify(5.0), Classification::NoMatch);
/// ```
#[derive(Debug, Clone)]
pub struct ZoneClassifier {
    tests: Vec<RangeTest>,
}

impl ZoneClassifier {
    /// Build a classifier from an ordered zone list.
    pub fn new(zones: &[ZoneSpec]) -> Self {
        Self {
            tests: zones.iter().map(RangeTest::from_zone).collect(),
        }
    }

    /// Classify a value. NaN fails every bounded test.
    pub fn classify(&self, value: f64) -> Classification {
        self.tests
            .iter()
            .position(|test| test.admits(value))
            .map_or(Classification::NoMatch, Classification::Zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use zonewatch_types::ZoneState;

    fn two_zones() -> ZoneClassifier {
        ZoneClassifier::new(&[
            ZoneSpec::new(ZoneState::Normal).lower(0.0).upper(10.0),
            ZoneSpec::new(ZoneState::Warn).lower(10.0).upper(20.0),
        ])
    }

    #[test]
    fn dual_bound_lower_inclusive_upper_exclusive() {
        let classifier = two_zones();
        assert_eq!(classifier.classify(0.0), Classification::Zone(0));
        assert_eq!(classifier.classify(9.999), Classification::Zone(0));
        assert_eq!(classifier.classify(10.0), Classification::Zone(1));
        assert_eq!(classifier.classify(20.0), Classification::NoMatch);
        assert_eq!(classifier.classify(-5.0), Classification::NoMatch);
    }

    #[test]
    fn upper_only_is_exclusive() {
        let classifier = ZoneClassifier::new(&[ZoneSpec::new(ZoneState::Alarm).upper(3.0)]);
        assert_eq!(classifier.classify(2.9), Classification::Zone(0));
        assert_eq!(classifier.classify(f64::NEG_INFINITY), Classification::Zone(0));
        assert_eq!(classifier.classify(3.0), Classification::NoMatch);
    }

    #[test]
    fn lower_only_is_exclusive() {
        let classifier = ZoneClassifier::new(&[ZoneSpec::new(ZoneState::Alarm).lower(100.0)]);
        assert_eq!(classifier.classify(100.0), Classification::NoMatch);
        assert_eq!(classifier.classify(100.0 + f64::EPSILON * 128.0), Classification::Zone(0));
        assert_eq!(classifier.classify(f64::INFINITY), Classification::Zone(0));
    }

    #[test]
    fn unbounded_zone_matches_everything_but_keeps_order() {
        let classifier = ZoneClassifier::new(&[
            ZoneSpec::new(ZoneState::Alarm).upper(0.0),
            ZoneSpec::new(ZoneState::Nominal),
        ]);
        assert_eq!(classifier.classify(-1.0), Classification::Zone(0));
        assert_eq!(classifier.classify(42.0), Classification::Zone(1));
        assert_eq!(classifier.classify(f64::NAN), Classification::Zone(1));
    }

    #[test]
    fn overlapping_zones_first_wins() {
        let classifier = ZoneClassifier::new(&[
            ZoneSpec::new(ZoneState::Warn).lower(0.0).upper(50.0),
            ZoneSpec::new(ZoneState::Alarm).lower(25.0).upper(75.0),
        ]);
        assert_eq!(classifier.classify(30.0), Classification::Zone(0));
        assert_eq!(classifier.classify(60.0), Classification::Zone(1));
    }

    #[test]
    fn nan_and_infinities_fall_through_bounded_zones() {
        let classifier = two_zones();
        assert_eq!(classifier.classify(f64::NAN), Classification::NoMatch);
        assert_eq!(classifier.classify(f64::INFINITY), Classification::NoMatch);
        assert_eq!(classifier.classify(f64::NEG_INFINITY), Classification::NoMatch);
    }

    #[test]
    fn empty_classifier_never_matches() {
        let classifier = ZoneClassifier::new(&[]);
        assert_eq!(classifier.classify(1.0), Classification::NoMatch);
    }

    fn zone_strategy() -> impl Strategy<Value = ZoneSpec> {
        (
            proptest::option::of(-100.0f64..100.0),
            proptest::option::of(-100.0f64..100.0),
        )
            .prop_map(|(lower, upper)| ZoneSpec {
                lower,
                upper,
                ..ZoneSpec::new(ZoneState::Warn)
            })
    }

    proptest! {
        #[test]
        fn classify_returns_first_admitting_zone(
            zones in proptest::collection::vec(zone_strategy(), 0..6),
            value in -150.0f64..150.0,
        ) {
            let classifier = ZoneClassifier::new(&zones);
            let expected = zones.iter().position(|z| match (z.lower, z.upper) {
                (Some(l), Some(u)) => l <= value && value < u,
                (None, Some(u)) => value < u,
                (Some(l), None) => value > l,
                (None, None) => true,
            });

            prop_assert_eq!(classifier.classify(value).zone_index(), expected);
        }
    }
}
