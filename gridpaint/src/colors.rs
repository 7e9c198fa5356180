//! Tile color palette for the terminal renderer.

use crossterm::style::Color;
use gridpaint_core::Tile;

/// Background color a tile is painted with.
pub const fn tile_color(tile: Tile) -> Color {
    match tile {
        Tile::Empty => Color::Rgb {
            r: 255,
            g: 255,
            b: 255,
        },
        Tile::Wall => Color::Rgb { r: 0, g: 0, b: 0 },
        Tile::Start => Color::Rgb { r: 0, g: 0, b: 255 },
        Tile::Destination => Color::Rgb {
            r: 128,
            g: 0,
            b: 128,
        },
        Tile::FrontierNew => Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
        Tile::FrontierOld => Color::Rgb {
            r: 255,
            g: 255,
            b: 0,
        },
        Tile::Path => Color::Rgb { r: 0, g: 128, b: 0 },
    }
}
