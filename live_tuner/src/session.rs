// THEORY:
// The tuner's main loop is a three-state machine:
//
//   Running --(quit key)--> Stopped --(windows released)--> Terminated
//
// A Running iteration snapshots the trackbars, captures and processes a frame,
// renders the debug views and then blocks in the key poll for a fixed interval.
// That poll doubles as frame pacing. The quit key is the only way out; every
// other key, and a poll timeout, keeps the loop Running.

use std::time::Instant;

/// The key that ends the session.
pub const QUIT_KEY: u8 = b'q';

/// Frames between throughput reports.
pub const THROUGHPUT_WINDOW: u64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

impl KeyAction {
    /// Interprets a `wait_key` result. `-1` means no key was pressed.
    pub fn from_key_code(code: i32) -> Self {
        if code >= 0 && (code & 0xFF) as u8 == QUIT_KEY {
            KeyAction::Quit
        } else {
            KeyAction::Continue
        }
    }
}

impl LoopState {
    /// Transition after a key poll.
    pub fn on_key(self, action: KeyAction) -> LoopState {
        match (self, action) {
            (LoopState::Running, KeyAction::Quit) => LoopState::Stopped,
            (state, _) => state,
        }
    }

    /// Transition once display surfaces have been released.
    pub fn on_cleanup(self) -> LoopState {
        match self {
            LoopState::Stopped => LoopState::Terminated,
            state => state,
        }
    }

    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }
}

/// Counts processed frames and reports the measured rate every `window` frames.
pub struct ThroughputMeter {
    window: u64,
    frames: u64,
    started: Instant,
}

impl ThroughputMeter {
    pub fn new(window: u64) -> Self {
        Self {
            window: window.max(1),
            frames: 0,
            started: Instant::now(),
        }
    }

    /// Records one frame. Returns frames per second when a window completes.
    pub fn tick(&mut self) -> Option<f64> {
        self.frames += 1;
        if self.frames < self.window {
            return None;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        let rate = self.frames as f64 / elapsed.max(f64::EPSILON);
        self.frames = 0;
        self.started = Instant::now();
        Some(rate)
    }
}

/// Tracks runs of consecutive empty captures so each run is reported once.
#[derive(Debug, Default)]
pub struct EmptyFrameStreak {
    length: u64,
}

impl EmptyFrameStreak {
    /// Records an empty capture. Returns true for the first one of a run.
    pub fn record_empty(&mut self) -> bool {
        self.length += 1;
        self.length == 1
    }

    /// Records a usable frame. Returns the length of the run it ended, if any.
    pub fn record_frame(&mut self) -> Option<u64> {
        let ended = std::mem::take(&mut self.length);
        (ended > 0).then_some(ended)
    }

    pub fn run_length(&self) -> u64 {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_q_quits() {
        assert_eq!(KeyAction::from_key_code(b'q' as i32), KeyAction::Quit);
        assert_eq!(KeyAction::from_key_code(-1), KeyAction::Continue);
        for code in 0..=255 {
            if code == b'q' as i32 {
                continue;
            }
            assert_eq!(KeyAction::from_key_code(code), KeyAction::Continue, "key {code}");
        }
    }

    #[test]
    fn uppercase_q_and_escape_keep_running() {
        assert_eq!(KeyAction::from_key_code(b'Q' as i32), KeyAction::Continue);
        assert_eq!(KeyAction::from_key_code(27), KeyAction::Continue);
    }

    #[test]
    fn state_machine_runs_to_termination() {
        let mut state = LoopState::Running;
        for code in [-1, b'a' as i32, 27, b' ' as i32] {
            state = state.on_key(KeyAction::from_key_code(code));
            assert!(state.is_running());
        }
        assert_eq!(state.on_cleanup(), LoopState::Running);

        state = state.on_key(KeyAction::from_key_code(b'q' as i32));
        assert_eq!(state, LoopState::Stopped);
        assert_eq!(state.on_key(KeyAction::Continue), LoopState::Stopped);

        state = state.on_cleanup();
        assert_eq!(state, LoopState::Terminated);
        assert_eq!(state.on_key(KeyAction::Quit), LoopState::Terminated);
    }

    #[test]
    fn throughput_reports_once_per_window() {
        let mut meter = ThroughputMeter::new(3);
        assert_eq!(meter.tick(), None);
        assert_eq!(meter.tick(), None);
        let rate = meter.tick().unwrap();
        assert!(rate > 0.0);
        assert_eq!(meter.tick(), None);
    }

    #[test]
    fn empty_frames_warn_once_per_run() {
        let mut streak = EmptyFrameStreak::default();
        assert_eq!(streak.record_frame(), None);

        assert!(streak.record_empty());
        assert!(!streak.record_empty());
        assert!(!streak.record_empty());
        assert_eq!(streak.run_length(), 3);

        assert_eq!(streak.record_frame(), Some(3));
        assert_eq!(streak.run_length(), 0);
        assert_eq!(streak.record_frame(), None);

        // a new run warns again
        assert!(streak.record_empty());
        assert_eq!(streak.record_frame(), Some(1));
    }
}
