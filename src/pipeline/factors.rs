//! Factor definitions

use super::Filter;
use crate::data::MarketData;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Raw daily inputs a factor can read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentInput {
    /// Bullish-minus-bearish social sentiment reading
    BullMinusBear,
}

/// A declarative factor over the daily universe
#[derive(Debug, Clone, PartialEq)]
pub enum Factor {
    /// Simple moving average of an input over a trailing session window
    SimpleMovingAverage {
        input: SentimentInput,
        window: usize,
    },
}

impl Factor {
    pub fn simple_moving_average(input: SentimentInput, window: usize) -> Self {
        Factor::SimpleMovingAverage { input, window }
    }

    /// Filter selecting assets for which this factor is defined
    pub fn not_null(&self) -> Filter {
        Filter::FactorDefined
    }

    /// Evaluate for one symbol on one session. Returns `None` when the
    /// factor is undefined (not enough trailing readings to fill the
    /// window).
    pub fn evaluate(&self, data: &MarketData, symbol: &str, date: NaiveDate) -> Option<Decimal> {
        match self {
            Factor::SimpleMovingAverage { input, window } => {
                let SentimentInput::BullMinusBear = input;
                let readings = data.sentiment_window(symbol, date, *window);
                if readings.len() < *window {
                    return None;
                }
                let sum: Decimal = readings.iter().copied().sum();
                Some(sum / Decimal::from(*window as u64))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::observation;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn three_days(values: [Decimal; 3]) -> MarketData {
        let mut data = MarketData::new();
        for (offset, value) in values.into_iter().enumerate() {
            let day = date("2024-01-02") + chrono::Days::new(offset as u64);
            data.insert(day, observation("AAPL", Some(value), true, None));
        }
        data
    }

    #[test]
    fn test_sma_averages_window() {
        let data = three_days([dec!(0.1), dec!(0.2), dec!(0.6)]);
        let sma = Factor::simple_moving_average(SentimentInput::BullMinusBear, 3);
        assert_eq!(
            sma.evaluate(&data, "AAPL", date("2024-01-04")),
            Some(dec!(0.3))
        );
    }

    #[test]
    fn test_sma_undefined_with_short_history() {
        let data = three_days([dec!(0.1), dec!(0.2), dec!(0.6)]);
        let sma = Factor::simple_moving_average(SentimentInput::BullMinusBear, 3);
        // Only two sessions available up to 01-03.
        assert_eq!(sma.evaluate(&data, "AAPL", date("2024-01-03")), None);
    }

    #[test]
    fn test_sma_undefined_for_unknown_symbol() {
        let data = three_days([dec!(0.1), dec!(0.2), dec!(0.6)]);
        let sma = Factor::simple_moving_average(SentimentInput::BullMinusBear, 3);
        assert_eq!(sma.evaluate(&data, "MSFT", date("2024-01-04")), None);
    }

    #[test]
    fn test_sma_undefined_when_reading_missing_in_window() {
        let mut data = three_days([dec!(0.1), dec!(0.2), dec!(0.6)]);
        data.insert(date("2024-01-03"), observation("AAPL", None, true, None));
        let sma = Factor::simple_moving_average(SentimentInput::BullMinusBear, 3);
        assert_eq!(sma.evaluate(&data, "AAPL", date("2024-01-04")), None);
    }
}
