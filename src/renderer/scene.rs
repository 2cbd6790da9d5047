//! Frame description built from the game state
//!
//! Pure data: the GPU pipeline draws the rectangles and the browser shell
//! places the text line, so a frame can be checked without a surface.

use super::vertex::colors;
use crate::consts::{MESSAGE_FONT_PX, MESSAGE_MARGIN_BOTTOM, MESSAGE_MARGIN_X};
use crate::sim::{GameState, Rect};

/// A filled rectangle in logical coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillRect {
    pub rect: Rect,
    pub color: [f32; 4],
}

/// One line of text; `(x, y)` is the left end of the baseline
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_px: f32,
    pub color: [f32; 4],
}

/// Everything drawn in one frame, back to front
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Logical size the coordinates refer to
    pub width: f32,
    pub height: f32,
    pub clear: [f32; 4],
    pub rects: Vec<FillRect>,
    pub text: Option<TextLine>,
}

/// Fish, then hook, then the catch message if it is still showing
pub fn build(state: &GameState) -> Scene {
    let fish = FillRect {
        rect: state.fish.rect(),
        color: state.fish.species.def().color,
    };
    let hook = FillRect {
        rect: state.hook.rect(),
        color: colors::HOOK,
    };

    let text = state.active_message().map(|msg| TextLine {
        text: msg.to_string(),
        x: MESSAGE_MARGIN_X,
        y: state.viewport.css_height - MESSAGE_MARGIN_BOTTOM,
        font_px: MESSAGE_FONT_PX,
        color: colors::TEXT,
    });

    Scene {
        width: state.viewport.css_width,
        height: state.viewport.css_height,
        clear: colors::BACKGROUND,
        rects: vec![fish, hook],
        text,
    }
}
