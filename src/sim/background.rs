//! Endless horizontally scrolling backdrop

use glam::Vec2;

use crate::assets::Bitmap;

/// Two copies of one image leapfrogging each other
#[derive(Debug, Clone)]
pub struct ScrollingBackground {
    pub image: Bitmap,
    /// Left edge of each tile
    pub tiles: [f32; 2],
}

impl ScrollingBackground {
    pub fn new(image: Bitmap) -> Self {
        let width = image.width as f32;
        Self {
            image,
            tiles: [0.0, width],
        }
    }

    /// Scroll left by `speed`; a tile fully off-screen jumps ahead
    pub fn scroll(&mut self, speed: f32) {
        let width = self.image.width as f32;
        for x in &mut self.tiles {
            *x -= speed;
            if *x <= -width {
                *x += width * 2.0;
            }
        }
    }

    /// Top-left positions to draw at
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.tiles.iter().map(|&x| Vec2::new(x, 0.0))
    }
}
