//! Cost and heuristic policy: which moves exist, what they cost, and how
//! remaining distance is estimated.
//!
//! A policy is chosen once per run and held immutable for its duration.
//! Move set and heuristic are independent; any combination is valid
//! (though only some are admissible, see [`Heuristic`]).

use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;

use gridpaint_core::{Error, Point};

// ---------------------------------------------------------------------------
// Step / Neighborhood
// ---------------------------------------------------------------------------

/// One candidate move relative to the node being expanded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub dx: i32,
    pub dy: i32,
    pub diagonal: bool,
}

impl Step {
    const fn new(dx: i32, dy: i32, diagonal: bool) -> Self {
        Self { dx, dy, diagonal }
    }

    /// Incremental cost of taking this step.
    #[inline]
    pub fn cost(self) -> f64 {
        if self.diagonal { SQRT_2 } else { 1.0 }
    }
}

// Successor generation order is fixed: up, left, down, right, then
// up-left, up-right, down-right, down-left. Tie-broken searches depend
// on this order being stable.
const STEPS_8: [Step; 8] = [
    Step::new(0, -1, false),
    Step::new(-1, 0, false),
    Step::new(0, 1, false),
    Step::new(1, 0, false),
    Step::new(-1, -1, true),
    Step::new(1, -1, true),
    Step::new(1, 1, true),
    Step::new(-1, 1, true),
];

/// Which neighbors a node offers: the four cardinal ones, or all eight.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Neighborhood {
    #[default]
    Four,
    Eight,
}

impl Neighborhood {
    /// Candidate steps in generation order.
    #[inline]
    pub fn steps(self) -> &'static [Step] {
        match self {
            Neighborhood::Four => &STEPS_8[..4],
            Neighborhood::Eight => &STEPS_8,
        }
    }

    /// The other move set.
    pub fn toggled(self) -> Self {
        match self {
            Neighborhood::Four => Neighborhood::Eight,
            Neighborhood::Eight => Neighborhood::Four,
        }
    }

    /// Canonical lowercase name, the inverse of [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Neighborhood::Four => "four",
            Neighborhood::Eight => "eight",
        }
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Neighborhood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "four" | "4" | "cardinal" => Ok(Neighborhood::Four),
            "eight" | "8" | "diagonal" => Ok(Neighborhood::Eight),
            _ => Err(Error::UnknownOption {
                name: "neighborhood",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Heuristic
// ---------------------------------------------------------------------------

/// Estimate of remaining cost from a position to the destination.
///
/// `None` degrades the search to uniform-cost (Dijkstra). `Manhattan` is
/// admissible under [`Neighborhood::Four`], `Euclidean` under both.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    #[default]
    None,
    Manhattan,
    Euclidean,
}

impl Heuristic {
    /// Estimated remaining cost from `p` to `goal`.
    #[inline]
    pub fn estimate(self, p: Point, goal: Point) -> f64 {
        let dx = f64::from((goal.x - p.x).abs());
        let dy = f64::from((goal.y - p.y).abs());
        match self {
            Heuristic::None => 0.0,
            Heuristic::Manhattan => dx + dy,
            Heuristic::Euclidean => (dx * dx + dy * dy).sqrt(),
        }
    }

    /// The next heuristic in the catalogue, wrapping around.
    pub fn cycled(self) -> Self {
        match self {
            Heuristic::None => Heuristic::Manhattan,
            Heuristic::Manhattan => Heuristic::Euclidean,
            Heuristic::Euclidean => Heuristic::None,
        }
    }

    /// Canonical lowercase name, the inverse of [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Heuristic::None => "none",
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Heuristic::None),
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            _ => Err(Error::UnknownOption {
                name: "heuristic",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_order_is_fixed() {
        let four: Vec<_> = Neighborhood::Four
            .steps()
            .iter()
            .map(|s| (s.dx, s.dy))
            .collect();
        assert_eq!(four, vec![(0, -1), (-1, 0), (0, 1), (1, 0)]);
        let eight: Vec<_> = Neighborhood::Eight
            .steps()
            .iter()
            .map(|s| (s.dx, s.dy))
            .collect();
        assert_eq!(
            &eight[4..],
            &[(-1, -1), (1, -1), (1, 1), (-1, 1)],
            "diagonals follow the cardinals"
        );
    }

    #[test]
    fn step_costs() {
        assert_eq!(Neighborhood::Four.steps()[0].cost(), 1.0);
        let diag = Neighborhood::Eight.steps()[4];
        assert!(diag.diagonal);
        assert!((diag.cost() - SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn heuristic_estimates() {
        let p = Point::new(1, 2);
        let goal = Point::new(4, 6);
        assert_eq!(Heuristic::None.estimate(p, goal), 0.0);
        assert_eq!(Heuristic::Manhattan.estimate(p, goal), 7.0);
        assert!((Heuristic::Euclidean.estimate(p, goal) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn estimate_is_zero_at_the_goal() {
        let goal = Point::new(3, 3);
        for h in [Heuristic::None, Heuristic::Manhattan, Heuristic::Euclidean] {
            assert_eq!(h.estimate(goal, goal), 0.0);
        }
    }

    #[test]
    fn parse_and_cycle() {
        assert_eq!("MANHATTAN".parse::<Heuristic>().unwrap(), Heuristic::Manhattan);
        assert_eq!("8".parse::<Neighborhood>().unwrap(), Neighborhood::Eight);
        assert!("taxicab".parse::<Heuristic>().is_err());
        assert_eq!(Heuristic::Euclidean.cycled(), Heuristic::None);
        assert_eq!(Neighborhood::Four.toggled(), Neighborhood::Eight);
    }
}
