use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::grid::TGrid;
use crate::playback::{PlaybackState, tick};
use crate::source::FrameSource;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);

/// Shortest period `play` will tick at.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Receives one decoded grid per displaying or holding tick.
pub trait Renderer {
    fn render(&mut self, index: usize, grid: &TGrid);
}

/// Fixed-cadence gate for callers that own their own frame loop.
pub struct Ticker {
    interval: Duration,
    last: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// True at most once per interval; the first call is always due.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Time until the next tick is due.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self.interval.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

/// Ticks `state` every `period` until `stop` turns true or its sender is dropped.
///
/// A period below [`MIN_INTERVAL`] is raised to it.
///
/// Rendering happens inside the tick, so a slow renderer delays the next
/// tick instead of overlapping it.
pub async fn play<S, R>(
    mut state: PlaybackState,
    source: &mut S,
    renderer: &mut R,
    period: Duration,
    mut stop: watch::Receiver<bool>,
) -> PlaybackState
where
    S: FrameSource + ?Sized,
    R: Renderer + ?Sized,
{
    let period = period.max(MIN_INTERVAL);
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(period_ms = period.as_millis() as u64, "playback started");

    while !*stop.borrow() {
        tokio::select! {
            biased;
            changed = stop.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = interval.tick() => {
                let (next, outcome) = tick(state, source);
                state = next;
                if let Some((index, grid)) = outcome.grid() {
                    renderer.render(index, grid);
                }
            }
        }
    }

    state.stop();
    info!(frames = state.frames().len(), "playback stopped");
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::playback::Phase;

    struct Lines(Vec<String>);

    impl FrameSource for Lines {
        fn read_frames(&mut self) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<usize>);

    impl Renderer for Recorder {
        fn render(&mut self, index: usize, _grid: &TGrid) {
            self.0.push(index);
        }
    }

    #[test]
    fn ticker_gates_by_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(200));
        assert_eq!(ticker.remaining(start), Duration::ZERO);
        assert!(ticker.due(start));
        assert!(!ticker.due(start + Duration::from_millis(199)));
        assert_eq!(
            ticker.remaining(start + Duration::from_millis(150)),
            Duration::from_millis(50)
        );
        assert!(ticker.due(start + Duration::from_millis(200)));
        assert!(!ticker.due(start + Duration::from_millis(300)));
    }

    #[tokio::test(start_paused = true)]
    async fn play_ticks_until_stopped() {
        let (tx, rx) = watch::channel(false);
        let mut source = Lines(vec!["1".into(), "2".into(), "3".into()]);
        let mut renderer = Recorder::default();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1050)).await;
            let _ = tx.send(true);
        });

        let state = play(
            PlaybackState::new(),
            &mut source,
            &mut renderer,
            DEFAULT_INTERVAL,
            rx,
        )
        .await;

        // ticks at 0, 200, 400, 600, 800 and 1000 ms
        assert_eq!(renderer.0, [0, 1, 2, 2, 2, 2]);
        assert_eq!(state.phase(), Phase::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_is_raised_to_minimum() {
        let (tx, rx) = watch::channel(false);
        let mut source = Lines(vec!["1".into(), "2".into()]);
        let mut renderer = Recorder::default();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5) + Duration::from_micros(500)).await;
            let _ = tx.send(true);
        });

        let state = play(PlaybackState::new(), &mut source, &mut renderer, Duration::ZERO, rx).await;

        // ticks at 0..=5 ms
        assert_eq!(renderer.0, [0, 1, 1, 1, 1, 1]);
        assert_eq!(state.phase(), Phase::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn already_stopped_never_ticks() {
        let (_tx, rx) = watch::channel(true);
        let mut source = Lines(vec!["1".into()]);
        let mut renderer = Recorder::default();
        let state = play(PlaybackState::new(), &mut source, &mut renderer, DEFAULT_INTERVAL, rx).await;
        assert!(renderer.0.is_empty());
        assert_eq!(state.phase(), Phase::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_sender_stops_playback() {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        let mut source = Lines(vec![]);
        let mut renderer = Recorder::default();
        let state = play(PlaybackState::new(), &mut source, &mut renderer, DEFAULT_INTERVAL, rx).await;
        assert_eq!(state.phase(), Phase::Stopped);
    }
}
