/// The simulation advances once per rendered frame at this assumed rate.
pub const FRAMES_PER_SECOND: u64 = 60;

/// Frame-count based level timer. There is no wall clock involved: the level
/// ends when the frame counter reaches `max_frames`.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    pub max_frames: u64,
    frame: u64,
}

impl FrameTimer {
    pub fn new(max_frames: u64) -> Self {
        Self {
            max_frames,
            frame: 0,
        }
    }

    pub fn advance(&mut self) {
        self.frame += 1;
        if self.frame == self.max_frames {
            log::info!("Frame limit of {} reached", self.max_frames);
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_expired(&self) -> bool {
        self.frame >= self.max_frames
    }

    pub fn seconds_left(&self) -> u64 {
        self.max_frames.saturating_sub(self.frame) / FRAMES_PER_SECOND
    }
}

/// Convert whole seconds to a frame count at [`FRAMES_PER_SECOND`].
pub const fn seconds_to_frames(seconds: u64) -> u64 {
    seconds * FRAMES_PER_SECOND
}
