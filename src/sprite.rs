//! Sprite sheets: one texture, frames laid out left to right.

use crate::texture::Texture;

pub struct SpriteSheet {
    pub texture: Texture,
    pub frame_w: u32,
    pub frame_h: u32,
    pub frames: u32,
}

impl SpriteSheet {
    pub fn new(texture: Texture, frame_w: u32, frame_h: u32, frames: u32) -> Self {
        debug_assert!(texture.width() >= frame_w * frames);
        Self {
            texture,
            frame_w,
            frame_h,
            frames,
        }
    }

    /// Source rect for frame k: (k * frame_w, 0, frame_w, frame_h)
    #[inline]
    pub fn src_rect(&self, frame: u32) -> (u32, u32, u32, u32) {
        let frame = frame % self.frames;
        (frame * self.frame_w, 0, self.frame_w, self.frame_h)
    }

    /// Frame index from local time: floor(t / frame_period) mod frames
    #[inline]
    pub fn frame_at(&self, local_t: f32, frame_period: f32) -> u32 {
        if frame_period <= 0.0 {
            return 0;
        }
        ((local_t / frame_period).floor() as i64).rem_euclid(self.frames as i64) as u32
    }

    /// Ping-pong frame walk for 4-frame flap cycles: 0 1 2 3 2 1 0 1 ...
    #[inline]
    pub fn pingpong_at(&self, local_t: f32, frame_period: f32) -> u32 {
        if frame_period <= 0.0 || self.frames < 2 {
            return 0;
        }
        let cycle = 2 * (self.frames - 1);
        let step = ((local_t / frame_period).floor() as i64).rem_euclid(cycle as i64) as u32;
        if step < self.frames {
            step
        } else {
            cycle - step
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(frames: u32) -> SpriteSheet {
        SpriteSheet::new(Texture::new(frames * 8, 8), 8, 8, frames)
    }

    #[test]
    fn test_src_rect_layout() {
        let s = sheet(4);
        assert_eq!(s.src_rect(0), (0, 0, 8, 8));
        assert_eq!(s.src_rect(3), (24, 0, 8, 8));
        assert_eq!(s.src_rect(4), (0, 0, 8, 8));
    }

    #[test]
    fn test_frame_at_wraps() {
        let s = sheet(3);
        assert_eq!(s.frame_at(0.0, 0.1), 0);
        assert_eq!(s.frame_at(0.15, 0.1), 1);
        assert_eq!(s.frame_at(0.35, 0.1), 0);
    }

    #[test]
    fn test_pingpong_walk() {
        let s = sheet(4);
        // Expected sequence over successive periods: 0 1 2 3 2 1 0 1 ...
        let expect = [0, 1, 2, 3, 2, 1, 0, 1];
        for (i, &e) in expect.iter().enumerate() {
            assert_eq!(s.pingpong_at(i as f32 * 0.1 + 0.01, 0.1), e, "step {}", i);
        }
    }
}
