use crate::core::{BodyId, FrameExchange, FrameSnapshot, PublishedFrames, SimulationConfig};
use crate::math::{lerp, saturate, Vector2};

use std::sync::Arc;
use std::time::{Duration, Instant};

/// Blend factor between the previous and current snapshot: the share of the predicted tick
/// duration that has elapsed, clamped to `[0, 1]`
pub fn interpolation_factor(elapsed: Duration, predicted: Duration) -> f32 {
    if predicted.is_zero() {
        return 1.0;
    }
    saturate(elapsed.as_secs_f32() / predicted.as_secs_f32())
}

/// Exponentially smoothed estimate of the real spacing between ticks.
///
/// Starts at the nominal interval and only adapts once `warmup` spacings have been observed, so
/// start-up jitter does not skew it.
#[derive(Debug, Clone)]
pub struct TickPredictor {
    predicted: f32,
    smoothing: f32,
    warmup: u32,
    samples: u32,
    last: Option<(u64, Instant)>,
}

impl TickPredictor {
    /// `smoothing` is the weight kept on the running prediction for every new sample
    pub fn new(nominal: Duration, smoothing: f32, warmup: u32) -> Self {
        Self {
            predicted: nominal.as_secs_f32(),
            smoothing,
            warmup,
            samples: 0,
            last: None,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.tick_interval,
            config.prediction_smoothing,
            config.prediction_warmup_ticks,
        )
    }

    /// Feeds the start time of tick `tick`. Skipped ticks are averaged over.
    pub fn observe(&mut self, tick: u64, tick_start: Instant) {
        if let Some((last_tick, last_start)) = self.last {
            if tick <= last_tick {
                return;
            }
            let ticks = (tick - last_tick) as f32;
            let spacing = tick_start.saturating_duration_since(last_start).as_secs_f32() / ticks;

            self.samples = self.samples.saturating_add(1);
            if self.samples >= self.warmup {
                self.predicted = lerp(spacing, self.predicted, self.smoothing);
            }
        }
        self.last = Some((tick, tick_start));
    }

    pub fn predicted(&self) -> Duration {
        Duration::from_secs_f32(self.predicted.max(0.0))
    }
}

/// What a consumer should draw for one frame
#[derive(Debug, Clone)]
pub struct FrameSample {
    pub previous: Arc<FrameSnapshot>,
    pub current: Arc<FrameSnapshot>,
    /// 0 draws `previous`, 1 draws `current`
    pub alpha: f32,
    /// False when the pair straddles a discontinuity and `alpha` is pinned to 1
    pub interpolate: bool,
    pub tick: u64,
}

impl FrameSample {
    /// Blends two positions by `alpha`
    pub fn blend(&self, previous: Vector2, current: Vector2) -> Vector2 {
        previous.lerp(&current, self.alpha)
    }

    /// Interpolated position of a dynamic body, if it exists in both snapshots
    pub fn dynamic_position(&self, id: BodyId) -> Option<Vector2> {
        let previous = self.previous.dynamics.get(&id)?;
        let current = self.current.dynamics.get(&id)?;
        Some(self.blend(previous.position, current.position))
    }
}

/// Consumer side of a [`FrameExchange`]: picks up new snapshot pairs and computes how far between
/// them a frame falls.
///
/// Each reader keeps its own tick-duration prediction; clone one per consumer thread.
#[derive(Debug, Clone)]
pub struct FrameReader {
    exchange: FrameExchange,
    predictor: TickPredictor,
    frames: PublishedFrames,
}

impl FrameReader {
    pub fn new(exchange: FrameExchange, predictor: TickPredictor) -> Self {
        let frames = exchange.latest();
        Self { exchange, predictor, frames }
    }

    /// Samples at the current time
    pub fn sample(&mut self) -> FrameSample {
        self.sample_at(Instant::now())
    }

    /// Samples as if the frame were drawn at `now`
    pub fn sample_at(&mut self, now: Instant) -> FrameSample {
        if self.exchange.latest_tick() != self.frames.tick {
            self.frames = self.exchange.latest();
            self.predictor.observe(self.frames.tick, self.frames.tick_start);
        }

        let alpha = if self.frames.interpolate {
            interpolation_factor(
                now.saturating_duration_since(self.frames.tick_start),
                self.predictor.predicted(),
            )
        } else {
            1.0
        };

        FrameSample {
            previous: Arc::clone(&self.frames.previous),
            current: Arc::clone(&self.frames.current),
            alpha,
            interpolate: self.frames.interpolate,
            tick: self.frames.tick,
        }
    }

    /// Current estimate of the real tick duration
    pub fn predicted_tick(&self) -> Duration {
        self.predictor.predicted()
    }
}
