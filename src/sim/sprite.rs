//! Time-driven sprite animation over a frame sheet
//!
//! Frames are laid out row-major: frame `n` sits at column `n % columns`,
//! row `n / columns`.

use glam::Vec2;

use crate::Rect;
use crate::assets::{Bitmap, SpriteSheet};
use crate::consts::FRAME_RATE_MS;

/// The visible part of a sheet for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubImage {
    pub sheet: Bitmap,
    /// Source rectangle in sheet pixels
    pub region: Rect,
}

#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    sheet: Bitmap,
    /// Top-left corner in screen space
    pub pos: Vec2,
    frame: u32,
    first_frame: u32,
    last_frame: u32,
    frame_width: u32,
    frame_height: u32,
    columns: u32,
    /// Game time of the last frame change (ms)
    last_time: u64,
    image: SubImage,
    /// Opacity applied when drawn
    pub alpha: u8,
}

impl AnimatedSprite {
    /// Slice `sheet` into `frame_width` x `frame_height` frames
    pub fn load(sheet: Bitmap, frame_width: u32, frame_height: u32, columns: u32) -> Self {
        let frame_width = frame_width.max(1);
        let frame_height = frame_height.max(1);
        let count = (sheet.width / frame_width) * (sheet.height / frame_height);
        let mut sprite = Self {
            sheet,
            pos: Vec2::ZERO,
            frame: 0,
            first_frame: 0,
            last_frame: count.saturating_sub(1),
            frame_width,
            frame_height,
            columns: columns.max(1),
            last_time: 0,
            image: SubImage {
                sheet,
                region: Rect::default(),
            },
            alpha: 255,
        };
        sprite.image = sprite.slice(0);
        sprite
    }

    pub fn from_sheet(sheet: &SpriteSheet) -> Self {
        Self::load(sheet.image, sheet.frame_width, sheet.frame_height, sheet.columns)
    }

    /// Advance one frame if more than `rate` ms passed since the last change
    pub fn update(&mut self, current_time: u64, rate: u64) {
        if current_time > self.last_time + rate {
            let next = if self.frame >= self.last_frame {
                self.first_frame
            } else {
                self.frame + 1
            };
            self.last_time = current_time;
            self.set_frame(next);
        }
    }

    /// Advance at the default animation rate
    pub fn animate(&mut self, current_time: u64) {
        self.update(current_time, FRAME_RATE_MS);
    }

    /// Restrict the animation loop to start at `first` (clamped to the sheet)
    pub fn set_first_frame(&mut self, first: u32) {
        self.first_frame = first.min(self.last_frame);
        if self.frame < self.first_frame {
            self.set_frame(self.first_frame);
        }
    }

    /// Jump straight to a frame (clamped to the loop bounds)
    pub fn set_frame(&mut self, frame: u32) {
        let frame = frame.clamp(self.first_frame, self.last_frame);
        if frame != self.frame {
            self.frame = frame;
            self.image = self.slice(frame);
        }
    }

    fn slice(&self, frame: u32) -> SubImage {
        let x = (frame % self.columns) * self.frame_width;
        let y = (frame / self.columns) * self.frame_height;
        SubImage {
            sheet: self.sheet,
            region: Rect::new(
                x as f32,
                y as f32,
                self.frame_width as f32,
                self.frame_height as f32,
            ),
        }
    }

    #[inline]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    #[inline]
    pub fn first_frame(&self) -> u32 {
        self.first_frame
    }

    #[inline]
    pub fn last_frame(&self) -> u32 {
        self.last_frame
    }

    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    #[inline]
    pub fn frame_width(&self) -> f32 {
        self.frame_width as f32
    }

    #[inline]
    pub fn frame_height(&self) -> f32 {
        self.frame_height as f32
    }

    #[inline]
    pub fn image(&self) -> &SubImage {
        &self.image
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    pub fn set_x(&mut self, x: f32) {
        self.pos.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.pos.y = y;
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
    }

    /// Screen rectangle covered by the current frame
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.frame_width(), self.frame_height())
    }

    /// Center of the current frame rectangle
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.frame_width(), self.frame_height()) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sheet(w: u32, h: u32) -> Bitmap {
        Bitmap {
            id: 1,
            width: w,
            height: h,
        }
    }

    #[test]
    fn test_frame_count_from_sheet() {
        let sprite = AnimatedSprite::load(sheet(400, 200), 100, 100, 4);
        assert_eq!(sprite.last_frame(), 7);
        // Partial frames are dropped
        let sprite = AnimatedSprite::load(sheet(250, 90), 100, 40, 2);
        assert_eq!(sprite.last_frame(), 3);
        // Sheet smaller than one frame still has frame 0
        let sprite = AnimatedSprite::load(sheet(10, 10), 100, 100, 1);
        assert_eq!(sprite.last_frame(), 0);
    }

    #[test]
    fn test_update_gated_by_rate() {
        let mut sprite = AnimatedSprite::load(sheet(400, 100), 100, 100, 4);
        sprite.update(30, 30);
        assert_eq!(sprite.frame(), 0);
        sprite.update(31, 30);
        assert_eq!(sprite.frame(), 1);
        // Same time again: no change
        sprite.update(31, 30);
        sprite.update(61, 30);
        assert_eq!(sprite.frame(), 1);
        sprite.update(62, 30);
        assert_eq!(sprite.frame(), 2);
    }

    #[test]
    fn test_wraps_to_first_frame() {
        let mut sprite = AnimatedSprite::load(sheet(300, 100), 100, 100, 3);
        let mut t = 0;
        for _ in 0..2 {
            t += 31;
            sprite.animate(t);
        }
        assert_eq!(sprite.frame(), 2);
        t += 31;
        sprite.animate(t);
        assert_eq!(sprite.frame(), 0);
    }

    #[test]
    fn test_sub_image_follows_row_major_layout() {
        let mut sprite = AnimatedSprite::load(sheet(400, 200), 100, 100, 4);
        sprite.set_frame(5);
        assert_eq!(sprite.image().region, Rect::new(100.0, 100.0, 100.0, 100.0));
        let before = *sprite.image();
        // Not enough time passed: identical sub-image
        sprite.update(10, 30);
        assert_eq!(*sprite.image(), before);
    }

    #[test]
    fn test_single_frame_sheet_stays_put() {
        let mut sprite = AnimatedSprite::load(sheet(40, 16), 40, 16, 1);
        sprite.animate(100);
        sprite.animate(200);
        assert_eq!(sprite.frame(), 0);
    }

    proptest! {
        #[test]
        fn prop_frame_stays_in_bounds(
            cols in 1u32..6,
            rows in 1u32..4,
            first in 0u32..4,
            steps in proptest::collection::vec(0u64..80, 1..200),
        ) {
            let mut sprite = AnimatedSprite::load(sheet(cols * 32, rows * 32), 32, 32, cols);
            sprite.set_first_frame(first);
            let mut t = 0;
            for step in steps {
                t += step;
                sprite.animate(t);
                prop_assert!(sprite.frame() >= sprite.first_frame());
                prop_assert!(sprite.frame() <= sprite.last_frame());
            }
        }
    }
}
