//! Prometheus metrics

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Rebalance submissions to the optimizer
    Rebalances,
    /// Weekly cycles skipped because the sentiment table was empty
    SkippedCycles,
    /// Sessions driven through the engine
    Sessions,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Assets passing the pipeline screen today
    UniverseSize,
    /// Gross target weight of the latest recorded plan
    GrossTarget,
    /// Turnover of the latest recorded plan
    PlanTurnover,
}

impl CounterMetric {
    fn name(&self) -> &'static str {
        match self {
            CounterMetric::Rebalances => "sentibal_rebalances_total",
            CounterMetric::SkippedCycles => "sentibal_skipped_cycles_total",
            CounterMetric::Sessions => "sentibal_sessions_total",
        }
    }
}

impl GaugeMetric {
    fn name(&self) -> &'static str {
        match self {
            GaugeMetric::UniverseSize => "sentibal_universe_size",
            GaugeMetric::GrossTarget => "sentibal_gross_target",
            GaugeMetric::PlanTurnover => "sentibal_plan_turnover",
        }
    }
}

/// Increment a counter
pub fn inc_counter(metric: CounterMetric) {
    metrics::counter!(metric.name()).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    metrics::gauge!(metric.name()).set(value);
}
