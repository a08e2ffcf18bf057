//! TrendPulse Core — price series, rolling-mean indicator, trend signal engine.
//!
//! This crate holds everything that does not touch the filesystem:
//! - `PriceSeries`, the validated input table (close column only)
//! - `Sma`, a NaN-aware simple moving average
//! - `SignalEngine`, close-above-mean signal and its aggregate rate
//! - `SeedScope`, the run's explicit randomness source

pub mod domain;
pub mod indicators;
pub mod rng;
pub mod signal;

pub use domain::{PriceSeries, CLOSE_COLUMN};
pub use indicators::Sma;
pub use rng::SeedScope;
pub use signal::{
    compute, RollingSignal, SignalEngine, SignalError, SignalSummary, MISSING_TOKENS,
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types can cross thread boundaries.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<PriceSeries>();
        require_sync::<PriceSeries>();
        require_send::<RollingSignal>();
        require_sync::<RollingSignal>();
        require_send::<SignalSummary>();
        require_sync::<SignalSummary>();
        require_send::<SignalEngine>();
        require_sync::<SignalEngine>();
        require_send::<SignalError>();
        require_sync::<SignalError>();
        require_send::<SeedScope>();
        require_sync::<SeedScope>();
    }
}
