//! Trend signal engine.
//!
//! For every row whose trailing window is complete, the signal is `1` when the
//! close sits strictly above its rolling mean and `0` otherwise. Rows before the
//! window fills (or whose window holds a missing close) carry no signal and are
//! left out of the aggregate rate.

use std::num::ParseFloatError;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::PriceSeries;
use crate::indicators::Sma;

/// Failures raised while turning a price series into a signal rate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    #[error("rolling window must be at least 1")]
    ZeroWindow,

    #[error("could not convert close {value:?} at row {row} to float: {source}")]
    InvalidClose {
        row: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("window {window} exceeds available rows {rows}; no rolling mean is defined")]
    WindowExceedsRows { window: usize, rows: usize },

    #[error("no position has a defined rolling mean")]
    NoDefinedMean,
}

/// Per-row binary signal aligned by index with the input series.
///
/// `None` marks rows where the rolling mean is undefined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingSignal {
    values: Vec<Option<u8>>,
}

impl RollingSignal {
    /// Compare each close against its rolling mean.
    pub fn from_mean(closes: &[f64], mean: &[f64]) -> Self {
        let values = closes
            .iter()
            .zip(mean)
            .map(|(&close, &avg)| {
                if avg.is_nan() {
                    None
                } else {
                    Some(u8::from(close > avg))
                }
            })
            .collect();
        Self { values }
    }

    pub fn values(&self) -> &[Option<u8>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rows that carry a signal.
    pub fn defined(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Rows whose signal is `1`.
    pub fn on_count(&self) -> usize {
        self.values.iter().filter(|v| **v == Some(1)).count()
    }

    /// Mean of the defined signals, or `None` when no row carries one.
    pub fn rate(&self) -> Option<f64> {
        match self.defined() {
            0 => None,
            defined => Some(self.on_count() as f64 / defined as f64),
        }
    }
}

/// Aggregate produced by a signal computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalSummary {
    /// Fraction of defined rows where close > rolling mean, in `[0, 1]`.
    pub signal_rate: f64,
    /// Every input row, including the warm-up rows without a signal.
    pub rows_processed: usize,
    pub defined_positions: usize,
    pub signals_on: usize,
}

/// Rolling-mean trend signal over a fixed window.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    sma: Sma,
}

impl SignalEngine {
    pub fn new(window: usize) -> Result<Self, SignalError> {
        if window == 0 {
            return Err(SignalError::ZeroWindow);
        }
        Ok(Self {
            sma: Sma::new(window),
        })
    }

    pub fn window(&self) -> usize {
        self.sma.period()
    }

    pub fn compute(&self, series: &PriceSeries) -> Result<SignalSummary, SignalError> {
        let closes = parse_closes(series)?;
        let window = self.window();
        if window > closes.len() {
            return Err(SignalError::WindowExceedsRows {
                window,
                rows: closes.len(),
            });
        }

        let mean = self.sma.compute(&closes);
        info!("Rolling mean calculated with window={window}");

        let signal = RollingSignal::from_mean(&closes, &mean);
        info!("Signals generated");
        debug!(
            defined = signal.defined(),
            on = signal.on_count(),
            "signal coverage"
        );

        let signal_rate = signal.rate().ok_or(SignalError::NoDefinedMean)?;
        Ok(SignalSummary {
            signal_rate,
            rows_processed: closes.len(),
            defined_positions: signal.defined(),
            signals_on: signal.on_count(),
        })
    }
}

/// Compute the signal rate of `series` over a trailing `window`.
pub fn compute(series: &PriceSeries, window: usize) -> Result<SignalSummary, SignalError> {
    SignalEngine::new(window)?.compute(series)
}

/// Cell texts read as a missing observation rather than a number.
pub const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse the raw close cells. Blank cells and [`MISSING_TOKENS`] are missing
/// observations (NaN).
pub fn parse_closes(series: &PriceSeries) -> Result<Vec<f64>, SignalError> {
    series
        .close_cells()
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let trimmed = cell.trim();
            if MISSING_TOKENS.contains(&trimmed) {
                return Ok(f64::NAN);
            }
            trimmed
                .parse::<f64>()
                .map_err(|source| SignalError::InvalidClose {
                    row: i + 1,
                    value: cell.clone(),
                    source,
                })
        })
        .collect()
}
