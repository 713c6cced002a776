/// Frame metadata - frame number, seconds since start, seconds since last frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Synthetic frames at a steady rate, for headless runs and tests
#[derive(Debug, Clone)]
pub struct FixedFrames {
    frame_number: u64,
    delta: f32,
}

impl FixedFrames {
    pub fn new(hz: f32) -> Self {
        Self {
            frame_number: 0,
            delta: 1.0 / hz,
        }
    }
}

impl Iterator for FixedFrames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let info = FrameInfo::new(
            self.frame_number,
            self.frame_number as f32 * self.delta,
            self.delta,
        );
        self.frame_number += 1;
        Some(info)
    }
}
