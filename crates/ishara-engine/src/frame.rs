use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Opaque handle to a camera frame. Carries no pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFrame {
    pub sequence: u64,
    pub width: u32,
    pub height: u32,
}

/// Supplier of live frames. `None` means the camera is not ready yet.
pub trait FrameSource: Send + Sync {
    fn current_frame(&self) -> Option<VideoFrame>;
}

/// A camera that hands out numbered frames of a fixed size.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    ready: AtomicBool,
    sequence: AtomicU64,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ready: AtomicBool::new(true),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Relaxed);
    }

    pub fn frames_served(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

impl FrameSource for SyntheticCamera {
    fn current_frame(&self) -> Option<VideoFrame> {
        if !self.ready.load(Ordering::Relaxed) {
            return None;
        }
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        Some(VideoFrame {
            sequence,
            width: self.width,
            height: self.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_numbers_frames() {
        let camera = SyntheticCamera::new(320, 240);
        let a = camera.current_frame().unwrap();
        let b = camera.current_frame().unwrap();
        assert_eq!(a.sequence, 1);
        assert_eq!(b.sequence, 2);
        assert_eq!((b.width, b.height), (320, 240));
        assert_eq!(camera.frames_served(), 2);
    }

    #[test]
    fn test_camera_not_ready_yields_nothing() {
        let camera = SyntheticCamera::default();
        camera.set_ready(false);
        assert!(camera.current_frame().is_none());
        assert_eq!(camera.frames_served(), 0);
        camera.set_ready(true);
        assert!(camera.current_frame().is_some());
    }
}
