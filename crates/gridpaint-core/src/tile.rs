//! The [`Tile`] type — the state of one grid cell.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The state of a single grid cell.
///
/// `Start` and `Destination` are unique markers: the grid store guarantees
/// at most one cell holds each at any time. `FrontierNew`, `FrontierOld`
/// and `Path` are written by the search engine as observable side effects
/// of the algorithm.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Start,
    Destination,
    /// Discovered but not yet expanded (in the open list).
    FrontierNew,
    /// Already expanded (in the closed set).
    FrontierOld,
    /// On the reconstructed shortest path.
    Path,
}

impl Tile {
    /// Whether at most one cell may hold this tile at a time.
    #[inline]
    pub const fn is_unique(self) -> bool {
        matches!(self, Tile::Start | Tile::Destination)
    }

    /// Whether the search may step onto this tile.
    #[inline]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Tile::Empty | Tile::Destination)
    }

    /// Canonical lowercase name, the inverse of [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Tile::Empty => "empty",
            Tile::Wall => "wall",
            Tile::Start => "start",
            Tile::Destination => "destination",
            Tile::FrontierNew => "frontier-new",
            Tile::FrontierOld => "frontier-old",
            Tile::Path => "path",
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_ascii_lowercase().as_str() {
            "empty" => Ok(Tile::Empty),
            "wall" => Ok(Tile::Wall),
            "start" => Ok(Tile::Start),
            "destination" => Ok(Tile::Destination),
            "frontier-new" => Ok(Tile::FrontierNew),
            "frontier-old" => Ok(Tile::FrontierOld),
            "path" => Ok(Tile::Path),
            _ => Err(Error::UnknownOption {
                name: "tile",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_markers() {
        assert!(Tile::Start.is_unique());
        assert!(Tile::Destination.is_unique());
        assert!(!Tile::Wall.is_unique());
        assert!(!Tile::Path.is_unique());
    }

    #[test]
    fn walkability() {
        assert!(Tile::Empty.is_walkable());
        assert!(Tile::Destination.is_walkable());
        assert!(!Tile::Wall.is_walkable());
        assert!(!Tile::FrontierNew.is_walkable());
        assert!(!Tile::Start.is_walkable());
    }

    #[test]
    fn parse_round_trip() {
        for t in [
            Tile::Empty,
            Tile::Wall,
            Tile::Start,
            Tile::Destination,
            Tile::FrontierNew,
            Tile::FrontierOld,
            Tile::Path,
        ] {
            assert_eq!(t.name().parse::<Tile>().unwrap(), t);
        }
        assert_eq!("WALL".parse::<Tile>().unwrap(), Tile::Wall);
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "lava".parse::<Tile>().unwrap_err();
        assert_eq!(
            err,
            Error::UnknownOption {
                name: "tile",
                value: "lava".to_string()
            }
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn tile_round_trip() {
        let json = serde_json::to_string(&Tile::FrontierNew).unwrap();
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Tile::FrontierNew);
    }
}
