//! Rendering module
//!
//! The backend only has to blit bitmaps and rasterize text; screen layout
//! lives in `screens`.

pub mod screens;

pub use screens::render;

use glam::Vec2;

use crate::Rect;
use crate::assets::Bitmap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const HINT: Color = Color::rgb(200, 200, 200);
}

/// Font sizes used by the HUD and screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSize {
    /// 24 px body text
    Small,
    /// 48 px titles
    Large,
}

impl FontSize {
    pub fn pixels(self) -> u32 {
        match self {
            FontSize::Small => 24,
            FontSize::Large => 48,
        }
    }
}

/// Drawing target
pub trait Surface {
    /// Clear to a solid color
    fn fill(&mut self, color: Color);
    /// Blit `region` of `bitmap` (whole bitmap if `None`) with its top-left at `top_left`
    fn draw(&mut self, bitmap: &Bitmap, region: Option<Rect>, top_left: Vec2, alpha: u8);
    /// Show the finished frame
    fn present(&mut self) {}
}

/// Text rasterizer
pub trait Fonts {
    /// Render `text`; the returned bitmap's size is its bounding box
    fn render(&mut self, text: &str, color: Color, size: FontSize) -> Bitmap;
}
