//! Replays a growing list of frames one per tick.
//!
//! Each tick first reloads the source (the list is only replaced when the
//! source has strictly more frames than before, the file being append-only),
//! then shows the next unseen frame. Once every frame has been shown the
//! final one is shown again on every tick until more arrive.
//!
//! Read failures are expected while the simulator is still creating or
//! writing its output and only mean "nothing new this tick".

use tracing::{debug, warn};

use crate::codec;
use crate::error::CodecError;
use crate::grid::TGrid;
use crate::source::FrameSource;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    frames: Vec<String>,
    next_index: usize,
    stopped: bool,
}

/// Where playback stands between ticks.
///
/// Loading has no variant: it is the source reload at the start of every
/// [`tick`] and never outlives the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No frames loaded yet.
    Idle,
    /// There are frames not shown yet.
    Displaying,
    /// Everything has been shown, the last frame is held.
    Holding,
    Stopped,
}

/// What one tick produced for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    Waiting,
    Display { index: usize, grid: TGrid },
    Hold { index: usize, grid: TGrid },
    Rejected { index: usize, error: CodecError },
    Stopped,
}

impl Tick {
    /// The grid to draw, if this tick has one.
    pub fn grid(&self) -> Option<(usize, &TGrid)> {
        match self {
            Tick::Display { index, grid } | Tick::Hold { index, grid } => Some((*index, grid)),
            _ => None,
        }
    }
}

impl PlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn phase(&self) -> Phase {
        if self.stopped {
            Phase::Stopped
        } else if self.frames.is_empty() {
            Phase::Idle
        } else if self.next_index < self.frames.len() {
            Phase::Displaying
        } else {
            Phase::Holding
        }
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    fn load<S: FrameSource + ?Sized>(&mut self, source: &mut S) {
        match source.read_frames() {
            Ok(frames) if frames.len() > self.frames.len() => {
                debug!(old = self.frames.len(), new = frames.len(), "frames loaded");
                self.frames = frames;
            }
            Ok(_) => {}
            Err(error) => debug!(%error, "no new frames this tick"),
        }
    }
}

/// Runs one load-then-show cycle.
pub fn tick<S: FrameSource + ?Sized>(mut state: PlaybackState, source: &mut S) -> (PlaybackState, Tick) {
    if state.stopped {
        return (state, Tick::Stopped);
    }

    state.load(source);

    let format = source.format();
    let decode = |index: usize, frame: &str| {
        codec::decode_with(frame, format).map_err(|error| {
            warn!(index, %error, "frame rejected");
            Tick::Rejected { index, error }
        })
    };

    let outcome = if let Some(frame) = state.frames.get(state.next_index) {
        let index = state.next_index;
        state.next_index += 1;
        match decode(index, frame) {
            Ok(grid) => Tick::Display { index, grid },
            Err(rejected) => rejected,
        }
    } else if let Some(last) = state.frames.last() {
        let index = state.frames.len() - 1;
        match decode(index, last) {
            Ok(grid) => Tick::Hold { index, grid },
            Err(rejected) => rejected,
        }
    } else {
        Tick::Waiting
    };

    (state, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::grid::EMPTY_GRID;

    /// Yields `counts[i]` frames on call `i`, repeating the last count afterwards.
    struct Scripted {
        counts: Vec<usize>,
        calls: usize,
        fail_on: Vec<usize>,
    }

    impl Scripted {
        fn new(counts: &[usize]) -> Self {
            Self {
                counts: counts.to_vec(),
                calls: 0,
                fail_on: vec![],
            }
        }
    }

    fn frame(i: usize) -> String {
        format!("{:X}", i + 1)
    }

    impl FrameSource for Scripted {
        fn read_frames(&mut self) -> Result<Vec<String>> {
            let call = self.calls;
            self.calls += 1;
            if self.fail_on.contains(&call) {
                return Err(Error::SourceUnavailable {
                    path: "sim_output.txt".into(),
                    source: std::io::ErrorKind::NotFound.into(),
                });
            }
            let n = self.counts[call.min(self.counts.len() - 1)];
            Ok((0..n).map(frame).collect())
        }
    }

    fn shown(t: &Tick) -> String {
        match t {
            Tick::Waiting => "W".into(),
            Tick::Display { index, grid } => {
                assert_eq!(*grid, codec::decode(&frame(*index)).unwrap());
                format!("D{index}")
            }
            Tick::Hold { index, .. } => format!("H{index}"),
            Tick::Rejected { index, .. } => format!("R{index}"),
            Tick::Stopped => "S".into(),
        }
    }

    fn run(source: &mut Scripted, ticks: usize) -> (PlaybackState, Vec<String>) {
        let mut state = PlaybackState::new();
        let mut out = vec![];
        for _ in 0..ticks {
            let (next, t) = tick(state, source);
            state = next;
            out.push(shown(&t));
        }
        (state, out)
    }

    #[test]
    fn frames_play_in_order_and_hold() {
        let mut source = Scripted::new(&[0, 0, 3, 3, 3, 3, 5, 5, 5, 5]);
        let (state, out) = run(&mut source, 12);
        assert_eq!(
            out,
            ["W", "W", "D0", "D1", "D2", "H2", "D3", "D4", "H4", "H4", "H4", "H4"]
        );
        assert_eq!(state.phase(), Phase::Holding);
        assert_eq!(state.next_index(), 5);
    }

    #[test]
    fn growth_mid_playback_does_not_skip() {
        let mut source = Scripted::new(&[0, 0, 3, 3, 5]);
        let (_, out) = run(&mut source, 8);
        assert_eq!(out, ["W", "W", "D0", "D1", "D2", "D3", "D4", "H4"]);
    }

    #[test]
    fn empty_source_only_waits() {
        let mut source = Scripted::new(&[0]);
        let (state, out) = run(&mut source, 5);
        assert!(out.iter().all(|t| t == "W"));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn read_failures_keep_previous_frames() {
        let mut source = Scripted::new(&[2]);
        source.fail_on = vec![1, 2, 3];
        let (_, out) = run(&mut source, 5);
        assert_eq!(out, ["D0", "D1", "H1", "H1", "H1"]);
    }

    #[test]
    fn shrinking_source_is_ignored() {
        let mut source = Scripted::new(&[3, 1, 1]);
        let (state, out) = run(&mut source, 4);
        assert_eq!(out, ["D0", "D1", "D2", "H2"]);
        assert_eq!(state.frames().len(), 3);
    }

    #[test]
    fn stopped_state_does_not_read() {
        let mut source = Scripted::new(&[3]);
        let mut state = PlaybackState::new();
        state.stop();
        let (state, t) = tick(state, &mut source);
        assert_eq!(t, Tick::Stopped);
        assert_eq!(state.phase(), Phase::Stopped);
        assert_eq!(source.calls, 0);
    }

    struct Fixed(Vec<&'static str>);

    impl FrameSource for Fixed {
        fn read_frames(&mut self) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    #[test]
    fn malformed_frame_is_rejected_and_skipped() {
        let mut source = Fixed(vec!["0", "XYZ", "1"]);
        let mut state = PlaybackState::new();
        let mut out = vec![];
        for _ in 0..4 {
            let (next, t) = tick(state, &mut source);
            state = next;
            out.push(t);
        }
        assert_eq!(out[0], Tick::Display { index: 0, grid: EMPTY_GRID });
        assert_eq!(
            out[1],
            Tick::Rejected {
                index: 1,
                error: CodecError::InvalidEncoding { position: 0, found: 'X' }
            }
        );
        assert!(matches!(out[2], Tick::Display { index: 2, .. }));
        assert!(matches!(out[3], Tick::Hold { index: 2, .. }));
    }

    #[test]
    fn phases_follow_progress() {
        let mut source = Fixed(vec!["1", "2"]);
        let state = PlaybackState::new();
        assert_eq!(state.phase(), Phase::Idle);
        let (state, _) = tick(state, &mut source);
        assert_eq!(state.phase(), Phase::Displaying);
        let (state, t) = tick(state, &mut source);
        assert_eq!(t.grid().map(|(i, _)| i), Some(1));
        assert_eq!(state.phase(), Phase::Holding);
    }
}
