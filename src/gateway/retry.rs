//! Reconnect backoff for the control channel.
//!
//! The supervisor owns the loop: it bumps the attempt counter on every
//! failure, asks [`RetryOptions::next_delay`] for the next delay, runs it
//! through [`RetryOptions::jitter`] and sleeps. A successful connect resets
//! the counter.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::{
    common::errors::RetryError,
    configs::RetryConfig,
    gateway::constants::DEFAULT_JITTER_FACTOR,
};

/// Attempt counter plus the fixed delay bounds of one logical connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryContext {
    first_backoff: Duration,
    max_backoff_interval: Duration,
    attempts: u32,
}

impl RetryContext {
    pub fn first_backoff(&self) -> Duration {
        self.first_backoff
    }

    pub fn max_backoff_interval(&self) -> Duration {
        self.max_backoff_interval
    }

    /// Failures since the last successful connect.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn record_failure(&mut self) -> u32 {
        self.attempts = self.attempts.saturating_add(1);
        self.attempts
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

/// Bounds and recommendation for the next reconnect wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffDelay {
    pub min: Duration,
    pub max: Duration,
    /// Recommended delay before jitter, always within `min..=max`.
    pub delay: Duration,
}

/// Perturbation applied to [`BackoffDelay::delay`] before sleeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Jitter {
    None,
    /// Uniform within `delay ± delay * factor`, kept inside `min..=max`.
    Random { factor: f64 },
}

impl Jitter {
    pub fn random() -> Self {
        Self::Random {
            factor: DEFAULT_JITTER_FACTOR,
        }
    }

    pub fn apply(&self, backoff: &BackoffDelay) -> Duration {
        self.apply_with(&mut rand::thread_rng(), backoff)
    }

    pub fn apply_with<R: Rng>(&self, rng: &mut R, backoff: &BackoffDelay) -> Duration {
        let factor = match *self {
            Self::None => return backoff.delay,
            Self::Random { factor } => factor.clamp(0.0, 1.0),
        };

        let delay = backoff.delay.as_nanos();
        let min = backoff.min.as_nanos();
        let max = backoff.max.as_nanos();

        let offset = (delay as f64 * factor) as u128;
        let low = delay.saturating_sub(offset).max(min);
        let high = delay.saturating_add(offset).min(max);

        let jittered = if low >= high {
            low
        } else {
            rng.gen_range(low..=high)
        };

        duration_from_nanos(jittered).clamp(backoff.min, backoff.max.max(backoff.min))
    }
}

/// `Duration::from_nanos` only takes a `u64`, which tops out near 584 years.
fn duration_from_nanos(nanos: u128) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    match u64::try_from(nanos / NANOS_PER_SEC) {
        Ok(secs) => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
        Err(_) => Duration::MAX,
    }
}

/// Reconnect policy configuration: exponential growth from `first_backoff`,
/// clamped at `max_backoff_interval`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryOptions {
    retry_context: RetryContext,
    jitter: Jitter,
}

impl RetryOptions {
    pub fn new(
        first_backoff: Duration,
        max_backoff_interval: Duration,
    ) -> Result<Self, RetryError> {
        if first_backoff.is_zero() {
            return Err(RetryError::InvalidRetryOptions(
                "first backoff must be greater than zero",
            ));
        }
        if max_backoff_interval < first_backoff {
            return Err(RetryError::InvalidRetryOptions(
                "max backoff interval must not be below the first backoff",
            ));
        }

        Ok(Self {
            retry_context: RetryContext {
                first_backoff,
                max_backoff_interval,
                attempts: 0,
            },
            jitter: Jitter::random(),
        })
    }

    pub fn from_config(config: &RetryConfig) -> Result<Self, RetryError> {
        if !(0.0..=1.0).contains(&config.jitter_factor) {
            return Err(RetryError::InvalidRetryOptions(
                "jitter factor must be within 0.0..=1.0",
            ));
        }

        let mut options = Self::new(config.first_backoff(), config.max_backoff())?;
        options.jitter = Jitter::Random {
            factor: config.jitter_factor,
        };
        Ok(options)
    }

    pub fn retry_context(&self) -> &RetryContext {
        &self.retry_context
    }

    pub fn retry_context_mut(&mut self) -> &mut RetryContext {
        &mut self.retry_context
    }

    /// `first_backoff * 2^(attempts - 1)`, or the max interval once that
    /// exceeds it or overflows. An `attempts` of zero is treated as one.
    pub fn next_delay(&self, context: &RetryContext) -> BackoffDelay {
        let exponent = context.attempts.saturating_sub(1);

        let delay = match 2u32
            .checked_pow(exponent)
            .and_then(|factor| context.first_backoff.checked_mul(factor))
        {
            Some(next) => next.min(context.max_backoff_interval),
            None => context.max_backoff_interval,
        };

        debug!(
            "Backoff for attempt {}: {:?} (max {:?})",
            context.attempts, delay, context.max_backoff_interval
        );

        BackoffDelay {
            min: context.first_backoff,
            max: context.max_backoff_interval,
            delay,
        }
    }

    pub fn jitter(&self) -> Jitter {
        self.jitter
    }
}
