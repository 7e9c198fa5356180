//! Random obstacle scattering.

use gridpaint_core::{GridStore, Point, Result, Tile};
use rand::{Rng, RngExt};

/// Turn each `Empty` cell into a wall with probability `density`.
///
/// Walls go through the normal write path, so the 2x2 brush applies and
/// the effective coverage is higher than `density` away from the
/// top/left edges.
pub fn scatter_walls<R: Rng>(grid: &mut GridStore, rng: &mut R, density: f64) -> Result<()> {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            if grid.get(p)? == Tile::Empty && rng.random::<f64>() < density {
                grid.set(p, Tile::Wall)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zero_density_scatters_nothing() {
        let mut grid = GridStore::new(10, 10);
        let mut rng = StdRng::seed_from_u64(7);
        scatter_walls(&mut grid, &mut rng, 0.0).unwrap();
        assert_eq!(grid.count(Tile::Wall), 0);
    }

    #[test]
    fn full_density_fills_the_grid() {
        let mut grid = GridStore::new(6, 6);
        let mut rng = StdRng::seed_from_u64(7);
        scatter_walls(&mut grid, &mut rng, 1.1).unwrap();
        assert_eq!(grid.count(Tile::Wall), 36);
    }

    #[test]
    fn only_empty_cells_are_seeded() {
        let mut grid = GridStore::new(8, 8);
        grid.set(Point::new(7, 7), Tile::Destination).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        scatter_walls(&mut grid, &mut rng, 0.3).unwrap();
        // (7,7) has no down-right neighbor, so no brush can reach it.
        assert_eq!(grid.get(Point::new(7, 7)).unwrap(), Tile::Destination);
        assert!(grid.count(Tile::Wall) > 0);
    }
}
