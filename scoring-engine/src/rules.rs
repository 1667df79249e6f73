//! Rule tables and score aggregation shared by both scorers
//!
//! Weights are stored in basis points (1/10_000) so the tables stay plain
//! constant data and sums are exact decimals: 0.10 + 0.15 + 0.08 is 0.33,
//! not 0.33000000000000007.

use crate::FactorContribution;
use rust_decimal::{Decimal, RoundingStrategy};

/// Lowest score either scorer can return
pub const SCORE_FLOOR_BP: i64 = 0;

/// Highest score either scorer can return. Deliberately below 1.0.
pub const SCORE_CEILING_BP: i64 = 9500;

/// Decimal places kept in a returned score
pub const SCORE_DECIMALS: u32 = 4;

/// Convert basis points to a decimal weight
pub fn bp(basis_points: i64) -> Decimal {
    Decimal::new(basis_points, 4)
}

/// Condition a numeric attribute is tested against
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// value < threshold
    Below(f64),
    /// value > threshold
    Above(f64),
}

impl Bound {
    /// Whether `value` satisfies the bound
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Bound::Below(threshold) => value < threshold,
            Bound::Above(threshold) => value > threshold,
        }
    }
}

/// One bucket of a banded factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Condition selecting this bucket
    pub bound: Bound,
    /// Signed weight in basis points
    pub weight_bp: i64,
}

/// Numeric factor split into ordered, mutually exclusive buckets.
/// The first matching band wins; no match contributes nothing.
#[derive(Debug, Clone, Copy)]
pub struct BandTable {
    /// Factor name reported in the breakdown
    pub factor: &'static str,
    /// Buckets in priority order
    pub bands: &'static [Band],
}

impl BandTable {
    /// Weight contributed by `value`
    pub fn weight(&self, value: f64) -> Decimal {
        self.bands
            .iter()
            .find(|band| band.bound.matches(value))
            .map(|band| bp(band.weight_bp))
            .unwrap_or(Decimal::ZERO)
    }
}

/// Keyed factor: exact match on a key, otherwise a default weight
#[derive(Debug, Clone, Copy)]
pub struct LookupTable<K: 'static> {
    /// Factor name reported in the breakdown
    pub factor: &'static str,
    /// Key/weight pairs in basis points
    pub entries: &'static [(K, i64)],
    /// Weight when no key matches
    pub default_bp: i64,
}

impl<K> LookupTable<K> {
    /// Weight contributed by `key`
    pub fn weight<Q>(&self, key: &Q) -> Decimal
    where
        K: PartialEq<Q>,
        Q: ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, w)| bp(*w))
            .unwrap_or_else(|| bp(self.default_bp))
    }
}

/// Running sum of factor weights
#[derive(Debug, Default)]
pub(crate) struct Tally {
    total: Decimal,
    factors: Vec<FactorContribution>,
}

impl Tally {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, factor: &str, weight: Decimal) {
        if weight.is_zero() {
            return;
        }
        self.total += weight;
        self.factors.push(FactorContribution {
            name: factor.to_string(),
            weight,
        });
    }

    /// Clamped, rounded score and the contributing factors
    pub(crate) fn finish(self) -> (Decimal, Vec<FactorContribution>) {
        (finalize_score(self.total), self.factors)
    }
}

/// Clamp a raw sum to [floor, ceiling] and round it to the returned precision
pub fn finalize_score(raw: Decimal) -> Decimal {
    raw.max(bp(SCORE_FLOOR_BP))
        .min(bp(SCORE_CEILING_BP))
        .round_dp_with_strategy(SCORE_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const AGE: BandTable = BandTable {
        factor: "age",
        bands: &[
            Band { bound: Bound::Below(25.0), weight_bp: 1500 },
            Band { bound: Bound::Below(35.0), weight_bp: 1000 },
            Band { bound: Bound::Above(65.0), weight_bp: 500 },
        ],
    };

    #[test]
    fn test_first_matching_band_wins() {
        assert_eq!(AGE.weight(20.0), dec!(0.15));
        assert_eq!(AGE.weight(25.0), dec!(0.10));
        assert_eq!(AGE.weight(50.0), Decimal::ZERO);
        assert_eq!(AGE.weight(66.0), dec!(0.05));
    }

    #[test]
    fn test_lookup_falls_back_to_default() {
        const REGION: LookupTable<&str> = LookupTable {
            factor: "region",
            entries: &[("East Asia", 500)],
            default_bp: 1000,
        };

        assert_eq!(REGION.weight(&"East Asia"), dec!(0.05));
        assert_eq!(REGION.weight(&"east asia"), dec!(0.10));
        assert_eq!(REGION.weight(&"Atlantis"), dec!(0.10));
    }

    #[test]
    fn test_finalize_clamps_both_ends() {
        assert_eq!(finalize_score(dec!(1.05)), dec!(0.95));
        assert_eq!(finalize_score(dec!(-0.15)), Decimal::ZERO);
        assert_eq!(finalize_score(dec!(0.123456)), dec!(0.1235));
    }

    #[test]
    fn test_tally_skips_zero_weights() {
        let mut tally = Tally::new();
        tally.add("age", dec!(0.10));
        tally.add("income", Decimal::ZERO);
        tally.add("history", dec!(-0.10));

        let (score, factors) = tally.finish();
        assert_eq!(score, Decimal::ZERO);
        assert_eq!(factors.len(), 2);
        assert_eq!(factors[1].name, "history");
    }
}
