//! Common types shared by the render surface implementations.

use serde::{Deserialize, Serialize};

/// Colors used by the register screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Color {
    White,
    Black,
    Red,
    /// Row separators.
    DarkGrey,
}

/// Font roles; the surface maps each to a concrete typeface and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    /// Caption, item rows and the thank-you message.
    Body,
    /// Total amount.
    Summary,
    /// CLEAR button label.
    Button,
}

/// Axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    /// Shrink by `inset` on every side, never below 1x1.
    pub fn inset(&self, inset: i32) -> Self {
        Self {
            x: self.x + inset,
            y: self.y + inset,
            w: (self.w - inset * 2).max(1),
            h: (self.h - inset * 2).max(1),
        }
    }
}
