//! Descriptive statistics over one phase's samples.

use average::{Estimate, Max, Min, Variance};

/// Mean, spread and range of one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); 0 for fewer than two
    /// values.
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
}

pub fn moments(xs: &[f64]) -> Moments {
    let mut var = Variance::new();
    let mut min = Min::new();
    let mut max = Max::new();
    for &x in xs {
        var.add(x);
        min.add(x);
        max.add(x);
    }

    Moments {
        mean: if xs.is_empty() { 0.0 } else { var.mean() },
        stdev: if xs.len() < 2 { 0.0 } else { var.sample_variance().sqrt() },
        min: min.min(),
        max: max.max(),
    }
}

/// Throughput per watt; power is given in milliwatts.
pub fn efficiency_mbps_per_w(avg_throughput_mbps: f64, avg_power_mw: f64) -> f64 {
    if avg_power_mw > 0.0 {
        avg_throughput_mbps / (avg_power_mw / 1000.0)
    } else {
        0.0
    }
}
