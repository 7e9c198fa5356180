//! Painting helpers: pointer-to-cell mapping and drag interpolation.
//!
//! A fast mouse drag reports positions several cells apart; the gap is
//! filled along the line between the last two recorded cells so painted
//! strokes stay continuous.

use crate::geom::Point;

/// Map a pixel position to the grid cell containing it.
#[inline]
pub fn cell_at_pixel(px: i32, py: i32, cell_size: i32) -> Point {
    Point::new(px.div_euclid(cell_size), py.div_euclid(cell_size))
}

/// Cells lying strictly between `prev` and `curr` on the drag line.
///
/// For a gap wider than one cell on the x axis, each skipped column gets
/// a cell at the rounded line height; symmetrically for the y axis. The
/// two sweeps may produce the same cell, which is de-duplicated. The
/// endpoints themselves are not included.
pub fn interpolate_drag(prev: Point, curr: Point) -> Vec<Point> {
    let dx = (prev.x - curr.x).abs();
    let dy = (prev.y - curr.y).abs();
    let slope = f64::from(curr.y - prev.y) / f64::from(curr.x - prev.x);
    let line_y = |x: i32| slope * f64::from(x) - slope * f64::from(prev.x) + f64::from(prev.y);
    let line_x = |y: i32| f64::from(y - prev.y) / slope + f64::from(prev.x);

    let mut cells: Vec<Point> = Vec::new();
    if dx > 1 {
        let x0 = prev.x.min(curr.x);
        for i in 1..dx {
            let p = Point::new(x0 + i, line_y(x0 + i).round() as i32);
            if !cells.contains(&p) {
                cells.push(p);
            }
        }
    }
    if dy > 1 {
        let y0 = prev.y.min(curr.y);
        for i in 1..dy {
            let p = Point::new(line_x(y0 + i).round() as i32, y0 + i);
            if !cells.contains(&p) {
                cells.push(p);
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_mapping_floors() {
        assert_eq!(cell_at_pixel(0, 0, 12), Point::new(0, 0));
        assert_eq!(cell_at_pixel(11, 12, 12), Point::new(0, 1));
        assert_eq!(cell_at_pixel(25, 37, 12), Point::new(2, 3));
    }

    #[test]
    fn adjacent_cells_need_no_interpolation() {
        assert!(interpolate_drag(Point::new(2, 2), Point::new(3, 2)).is_empty());
        assert!(interpolate_drag(Point::new(2, 2), Point::new(3, 3)).is_empty());
    }

    #[test]
    fn horizontal_gap_is_filled() {
        let cells = interpolate_drag(Point::new(0, 5), Point::new(4, 5));
        assert_eq!(
            cells,
            vec![Point::new(1, 5), Point::new(2, 5), Point::new(3, 5)]
        );
    }

    #[test]
    fn vertical_gap_is_filled() {
        let cells = interpolate_drag(Point::new(3, 0), Point::new(3, 3));
        assert_eq!(cells, vec![Point::new(3, 1), Point::new(3, 2)]);
    }

    #[test]
    fn sloped_gap_follows_the_line() {
        let cells = interpolate_drag(Point::new(0, 0), Point::new(4, 2));
        assert_eq!(
            cells,
            vec![Point::new(1, 1), Point::new(2, 1), Point::new(3, 2)]
        );
    }

    #[test]
    fn reverse_drag_fills_the_same_columns() {
        let cells = interpolate_drag(Point::new(4, 0), Point::new(0, 0));
        assert_eq!(
            cells,
            vec![Point::new(1, 0), Point::new(2, 0), Point::new(3, 0)]
        );
    }
}
