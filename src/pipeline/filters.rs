//! Universe screens

use crate::data::Observation;
use rust_decimal::Decimal;
use std::ops::BitAnd;

/// A boolean screen over the daily universe.
///
/// `Filter::Tradable & factor.not_null()` mirrors how the screen is
/// composed at pipeline construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// The standard liquidity/tradability screen
    Tradable,
    /// The pipeline's factor value is defined for the asset
    FactorDefined,
    /// Both sub-screens pass
    And(Box<Filter>, Box<Filter>),
}

impl Filter {
    /// Evaluate against one asset's observation and its factor value for
    /// the session.
    pub fn passes(&self, observation: &Observation, factor_value: Option<Decimal>) -> bool {
        match self {
            Filter::Tradable => observation.tradable,
            Filter::FactorDefined => factor_value.is_some(),
            Filter::And(left, right) => {
                left.passes(observation, factor_value) && right.passes(observation, factor_value)
            }
        }
    }

    /// Whether the screen includes the tradability component.
    pub fn requires_tradable(&self) -> bool {
        match self {
            Filter::Tradable => true,
            Filter::FactorDefined => false,
            Filter::And(left, right) => left.requires_tradable() || right.requires_tradable(),
        }
    }

    /// Whether the screen includes the factor-defined component.
    pub fn requires_factor_defined(&self) -> bool {
        match self {
            Filter::Tradable => false,
            Filter::FactorDefined => true,
            Filter::And(left, right) => {
                left.requires_factor_defined() || right.requires_factor_defined()
            }
        }
    }
}

impl BitAnd for Filter {
    type Output = Filter;

    fn bitand(self, rhs: Filter) -> Filter {
        Filter::And(Box::new(self), Box::new(rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::observation;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tradable_screen() {
        let tradable = observation("AAPL", Some(dec!(0.1)), true, None);
        let halted = observation("XYZ", Some(dec!(0.1)), false, None);
        assert!(Filter::Tradable.passes(&tradable, None));
        assert!(!Filter::Tradable.passes(&halted, None));
    }

    #[test]
    fn test_factor_defined_screen() {
        let obs = observation("AAPL", Some(dec!(0.1)), true, None);
        assert!(Filter::FactorDefined.passes(&obs, Some(dec!(0.3))));
        assert!(!Filter::FactorDefined.passes(&obs, None));
    }

    #[test]
    fn test_intersection_requires_both() {
        let screen = Filter::Tradable & Filter::FactorDefined;

        let tradable = observation("AAPL", Some(dec!(0.1)), true, None);
        let halted = observation("XYZ", Some(dec!(0.1)), false, None);

        assert!(screen.passes(&tradable, Some(dec!(0.3))));
        assert!(!screen.passes(&tradable, None));
        assert!(!screen.passes(&halted, Some(dec!(0.3))));
        assert!(screen.requires_tradable());
        assert!(screen.requires_factor_defined());
    }
}
