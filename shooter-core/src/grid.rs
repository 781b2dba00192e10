use crate::constants::{BUBBLE_RADIUS, GRID_COLS, ROW_HEIGHT, SEEDED_ROWS};
use crate::rng::SeededRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BubbleColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl BubbleColor {
    pub const ALL: [BubbleColor; 6] = [
        BubbleColor::Red,
        BubbleColor::Blue,
        BubbleColor::Green,
        BubbleColor::Yellow,
        BubbleColor::Purple,
        BubbleColor::Orange,
    ];

    pub fn rgb(self) -> [u8; 3] {
        match self {
            BubbleColor::Red => [0xef, 0x53, 0x50],
            BubbleColor::Blue => [0x42, 0xa5, 0xf5],
            BubbleColor::Green => [0x66, 0xbb, 0x6a],
            BubbleColor::Yellow => [0xff, 0xee, 0x58],
            BubbleColor::Purple => [0xab, 0x47, 0xbc],
            BubbleColor::Orange => [0xff, 0xa7, 0x26],
        }
    }

    pub fn points(self) -> u32 {
        match self {
            BubbleColor::Red => 100,
            BubbleColor::Blue => 150,
            BubbleColor::Green => 200,
            BubbleColor::Yellow => 250,
            BubbleColor::Purple => 300,
            BubbleColor::Orange => 500,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BubbleColor::Red => "Red",
            BubbleColor::Blue => "Blue",
            BubbleColor::Green => "Green",
            BubbleColor::Yellow => "Yellow",
            BubbleColor::Purple => "Purple",
            BubbleColor::Orange => "Orange",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Bubble {
    pub row: u32,
    pub col: u32,
    pub x: f32,
    pub y: f32,
    pub color: BubbleColor,
    pub active: bool,
}

/// Hex-offset layout: odd rows are shifted right by one radius.
pub fn bubble_position(row: u32, col: u32, world_width: f32) -> (f32, f32) {
    let x_offset = (world_width - GRID_COLS as f32 * BUBBLE_RADIUS * 2.0) / 2.0 + BUBBLE_RADIUS;
    let odd = row % 2 != 0;
    let x = x_offset + col as f32 * BUBBLE_RADIUS * 2.0 + if odd { BUBBLE_RADIUS } else { 0.0 };
    let y = BUBBLE_RADIUS + row as f32 * ROW_HEIGHT;
    (x, y)
}

pub fn seed_grid(world_width: f32, rng: &mut SeededRng) -> Vec<Bubble> {
    let mut bubbles = Vec::with_capacity((SEEDED_ROWS * GRID_COLS) as usize);
    for row in 0..SEEDED_ROWS {
        for col in 0..GRID_COLS {
            let (x, y) = bubble_position(row, col, world_width);
            bubbles.push(Bubble {
                row,
                col,
                x,
                y,
                color: BubbleColor::ALL[rng.next_index(BubbleColor::ALL.len())],
                active: true,
            });
        }
    }
    bubbles
}
