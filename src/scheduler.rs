//! Scheduling rules and the weekday trading calendar
//!
//! The host driver consults registered rules each session to decide which
//! callbacks fire. The calendar is a plain weekday calendar; holidays are
//! not modeled.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// When during the calendar a rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRule {
    /// Every trading session
    EveryDay,
    /// First trading session of each week
    WeekStart,
}

impl DateRule {
    pub fn matches(&self, date: NaiveDate) -> bool {
        if !is_trading_day(date) {
            return false;
        }
        match self {
            DateRule::EveryDay => true,
            DateRule::WeekStart => date.weekday() == Weekday::Mon,
        }
    }
}

/// When during the session a rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRule {
    /// At market open
    MarketOpen,
}

/// A registered schedule entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRule {
    pub date_rule: DateRule,
    pub time_rule: TimeRule,
}

/// Registered rules consulted by the session driver
#[derive(Debug, Default)]
pub struct Scheduler {
    rules: Vec<ScheduleRule>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule at initialization time.
    pub fn schedule(&mut self, date_rule: DateRule, time_rule: TimeRule) {
        self.rules.push(ScheduleRule {
            date_rule,
            time_rule,
        });
    }

    pub fn rules(&self) -> &[ScheduleRule] {
        &self.rules
    }

    /// Whether any registered rule fires at market open on the given date.
    pub fn due_at_open(&self, date: NaiveDate) -> bool {
        self.rules.iter().any(|rule| {
            rule.time_rule == TimeRule::MarketOpen && rule.date_rule.matches(date)
        })
    }
}

/// Weekday trading calendar
pub fn is_trading_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Trading sessions between two dates, inclusive, in calendar order.
pub fn sessions_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut sessions = Vec::new();
    let mut day = start;
    while day <= end {
        if is_trading_day(day) {
            sessions.push(day);
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    sessions
}
