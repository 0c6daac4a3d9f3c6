use crate::constants::FRAME_INTERVAL_S;

/// Frame cursor for a fixed-length, non-repeating animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Playback {
    frame: usize,
    frame_count: usize,
    accumulator_s: f32,
    paused: bool,
}

impl Playback {
    pub(crate) fn new(frame_count: usize) -> Self {
        Self {
            frame: 0,
            frame_count: frame_count.max(1),
            accumulator_s: 0.0,
            paused: false,
        }
    }

    pub(crate) fn frame(&self) -> usize {
        self.frame
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.frame + 1 >= self.frame_count
    }

    pub(crate) fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub(crate) fn restart(&mut self) {
        *self = Self::new(self.frame_count);
    }

    /// Moves forward one frame per elapsed `FRAME_INTERVAL_S`, stopping on the last frame.
    pub(crate) fn advance(&mut self, frame_dt: f32) {
        if self.paused || self.is_finished() {
            return;
        }
        self.accumulator_s += frame_dt.max(0.0);
        while self.accumulator_s >= FRAME_INTERVAL_S && !self.is_finished() {
            self.accumulator_s -= FRAME_INTERVAL_S;
            self.frame += 1;
        }
        if self.is_finished() {
            self.accumulator_s = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Playback;
    use crate::constants::FRAME_INTERVAL_S;

    #[test]
    fn advances_one_frame_per_interval() {
        let mut playback = Playback::new(10);
        playback.advance(FRAME_INTERVAL_S * 0.5);
        assert_eq!(playback.frame(), 0);
        playback.advance(FRAME_INTERVAL_S * 0.6);
        assert_eq!(playback.frame(), 1);
        playback.advance(FRAME_INTERVAL_S * 3.0);
        assert_eq!(playback.frame(), 4);
    }

    #[test]
    fn stops_on_last_frame() {
        let mut playback = Playback::new(5);
        playback.advance(10.0);
        assert_eq!(playback.frame(), 4);
        assert!(playback.is_finished());
        playback.advance(1.0);
        assert_eq!(playback.frame(), 4);
    }

    #[test]
    fn pause_freezes_and_restart_rewinds() {
        let mut playback = Playback::new(5);
        playback.advance(FRAME_INTERVAL_S * 2.5);
        playback.toggle_pause();
        playback.advance(1.0);
        assert_eq!(playback.frame(), 2);
        assert!(playback.is_paused());

        playback.restart();
        assert_eq!(playback.frame(), 0);
        assert!(!playback.is_paused());
    }
}
