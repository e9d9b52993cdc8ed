//! Projects future monthly and cumulative savings from a historical series.

use finz_domain::{
    CumulativeMode, ForecastMethod, ForecastPoint, ForecastSettings, HistoricalSavingsPoint,
    HoltWintersSettings, LinearTrendSettings,
};
use tracing::debug;

use crate::CoreError;

const EPSILON: f64 = 1e-9;

/// A monthly-savings projection strategy.
pub trait Forecaster: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fewest historical values the strategy needs; below it nothing is projected.
    fn min_points(&self) -> usize;

    /// Predicted monthly savings for steps `1..=periods`.
    /// Callers guarantee `values.len() >= self.min_points()`.
    fn project(&self, values: &[f64], periods: usize) -> Vec<f64>;
}

/// Mean and slope of a trailing window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendEstimate {
    pub mean: f64,
    pub slope: f64,
}

/// Centered linear-trend extrapolation over the trailing window.
#[derive(Debug, Clone)]
pub struct LinearTrendForecaster {
    settings: LinearTrendSettings,
}

impl LinearTrendForecaster {
    pub fn new(settings: LinearTrendSettings) -> Result<Self, CoreError> {
        if settings.window < 2 {
            return Err(CoreError::InvalidSettings(format!(
                "linear trend window must be at least 2 (got {})",
                settings.window
            )));
        }
        if !settings.floor.is_finite() {
            return Err(CoreError::InvalidSettings(
                "linear trend floor must be finite".into(),
            ));
        }
        Ok(Self { settings })
    }

    /// `slope = Σ (v_i - mean)(i - c) / (n·c)` with `c = (n - 1) / 2`.
    /// Returns `None` for fewer than two values.
    pub fn estimate(values: &[f64]) -> Option<TrendEstimate> {
        let n = values.len();
        if n < 2 {
            return None;
        }
        let mean = values.iter().sum::<f64>() / n as f64;
        let center = (n as f64 - 1.0) / 2.0;
        let moment: f64 = values
            .iter()
            .enumerate()
            .map(|(idx, value)| (value - mean) * (idx as f64 - center))
            .sum();
        Some(TrendEstimate {
            mean,
            slope: moment / (n as f64 * center),
        })
    }
}

impl Forecaster for LinearTrendForecaster {
    fn name(&self) -> &'static str {
        "linear-trend"
    }

    fn min_points(&self) -> usize {
        self.settings.window
    }

    fn project(&self, values: &[f64], periods: usize) -> Vec<f64> {
        let start = values.len().saturating_sub(self.settings.window);
        let Some(estimate) = Self::estimate(&values[start..]) else {
            return Vec::new();
        };
        debug!(mean = estimate.mean, slope = estimate.slope, "linear trend estimate");
        (1..=periods)
            .map(|step| (estimate.mean + estimate.slope * step as f64).max(self.settings.floor))
            .collect()
    }
}

/// Holt-Winters style level/trend/seasonal smoothing, single pass.
#[derive(Debug, Clone)]
pub struct HoltWintersForecaster {
    settings: HoltWintersSettings,
}

impl HoltWintersForecaster {
    pub fn new(settings: HoltWintersSettings) -> Result<Self, CoreError> {
        for (name, value) in [
            ("alpha", settings.alpha),
            ("beta", settings.beta),
            ("gamma", settings.gamma),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidSettings(format!(
                    "{name} must be between 0 and 1 (got {value})"
                )));
            }
        }
        if settings.season_length == 0 {
            return Err(CoreError::InvalidSettings(
                "season length must be at least 1".into(),
            ));
        }
        if settings.min_points < 2 {
            return Err(CoreError::InvalidSettings(format!(
                "holt-winters needs at least 2 points to seed a trend (got {})",
                settings.min_points
            )));
        }
        if !settings.floor.is_finite() {
            return Err(CoreError::InvalidSettings(
                "holt-winters floor must be finite".into(),
            ));
        }
        Ok(Self { settings })
    }
}

impl Forecaster for HoltWintersForecaster {
    fn name(&self) -> &'static str {
        "holt-winters"
    }

    fn min_points(&self) -> usize {
        self.settings.min_points
    }

    fn project(&self, values: &[f64], periods: usize) -> Vec<f64> {
        let HoltWintersSettings {
            alpha,
            beta,
            gamma,
            season_length,
            floor,
            ..
        } = self.settings;
        let n = values.len();
        if n < 2 {
            return Vec::new();
        }

        let mut level = values[0];
        let mut trend = values[1] - values[0];
        // Slots the history never reaches keep a neutral factor.
        let mut seasonal = vec![1.0; season_length];
        for (slot, value) in values.iter().take(season_length).enumerate() {
            seasonal[slot] = safe_ratio(*value, level, 1.0);
        }

        for (idx, value) in values.iter().enumerate().skip(1) {
            let slot = idx % season_length;
            let factor = seasonal[slot];
            let new_level =
                alpha * safe_ratio(*value, factor, *value) + (1.0 - alpha) * (level + trend);
            let new_trend = beta * (new_level - level) + (1.0 - beta) * trend;
            seasonal[slot] = gamma * safe_ratio(*value, new_level, 1.0) + (1.0 - gamma) * factor;
            level = new_level;
            trend = new_trend;
        }
        debug!(level, trend, ?seasonal, "holt-winters state after smoothing");

        (1..=periods)
            .map(|step| {
                let factor = seasonal[(n + step - 1) % season_length];
                ((level + step as f64 * trend) * factor).max(floor)
            })
            .collect()
    }
}

fn safe_ratio(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator.abs() < EPSILON {
        fallback
    } else {
        numerator / denominator
    }
}

pub struct ForecastService;

impl ForecastService {
    /// Builds the strategy selected by `settings.method`.
    pub fn forecaster(settings: &ForecastSettings) -> Result<Box<dyn Forecaster>, CoreError> {
        Self::check_periods(settings.periods, settings)?;
        Ok(match settings.method {
            ForecastMethod::LinearTrend => {
                Box::new(LinearTrendForecaster::new(settings.linear.clone())?)
            }
            ForecastMethod::HoltWinters => {
                Box::new(HoltWintersForecaster::new(settings.holt_winters.clone())?)
            }
        })
    }

    /// Projects `periods` months past the end of `historical`.
    ///
    /// Too little history yields an empty list, not an error. Errors are
    /// reserved for invalid settings.
    pub fn forecast(
        historical: &[HistoricalSavingsPoint],
        periods: usize,
        settings: &ForecastSettings,
    ) -> Result<Vec<ForecastPoint>, CoreError> {
        Self::check_periods(periods, settings)?;
        let forecaster = Self::forecaster(settings)?;
        Ok(Self::forecast_with(
            forecaster.as_ref(),
            historical,
            periods,
            settings.cumulative,
        ))
    }

    /// Rejects horizons longer than `settings.max_periods`.
    pub fn check_periods(periods: usize, settings: &ForecastSettings) -> Result<(), CoreError> {
        if periods > settings.max_periods {
            return Err(CoreError::InvalidSettings(format!(
                "forecast periods must be at most {} (got {periods})",
                settings.max_periods
            )));
        }
        Ok(())
    }

    /// Runs a specific strategy. The first point is the connection point.
    pub fn forecast_with(
        forecaster: &dyn Forecaster,
        historical: &[HistoricalSavingsPoint],
        periods: usize,
        mode: CumulativeMode,
    ) -> Vec<ForecastPoint> {
        let Some(last) = historical.last() else {
            debug!("no savings history; skipping forecast");
            return Vec::new();
        };
        if periods == 0 || historical.len() < forecaster.min_points() {
            debug!(
                method = forecaster.name(),
                available = historical.len(),
                required = forecaster.min_points(),
                "not enough history to forecast"
            );
            return Vec::new();
        }

        let values: Vec<f64> = historical.iter().map(|p| p.monthly_savings).collect();
        let predictions = forecaster.project(&values, periods);

        let mut points = Vec::with_capacity(predictions.len() + 1);
        points.push(ForecastPoint::connection(last));
        let mut running = last.cumulative_savings;
        for (idx, predicted) in predictions.into_iter().enumerate() {
            let step = idx + 1;
            let cumulative = match mode {
                CumulativeMode::Running => {
                    running += predicted;
                    running
                }
                CumulativeMode::StepScaled => last.cumulative_savings + predicted * step as f64,
            };
            points.push(ForecastPoint::projected(
                last.month.add_months(step as i32),
                predicted,
                cumulative,
            ));
        }
        points
    }
}
