use std::{fs, path::Path, str::FromStr};

use super::{Cell, Terrain};
use crate::{Error, Result};

/// An immutable 2-D grid of terrain with bounds-checked lookup
///
/// The text format is a header line `"<width> <height>"` followed by `height` rows of
/// exactly `width` terrain symbols each.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    cells: Vec<Terrain>,
    height: usize,
    width: usize,
}

impl GridMap {
    /// Build a map from rows of terrain
    ///
    /// **Returns** an error if the rows are empty or ragged
    pub fn from_rows(rows: Vec<Vec<Terrain>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(Error::map(1, "map must have at least one row and column"));
        }
        if let Some(i) = rows.iter().position(|r| r.len() != width) {
            return Err(Error::map(
                i + 2,
                format!("expected {width} symbols, found {}", rows[i].len()),
            ));
        }

        Ok(Self {
            cells: rows.into_iter().flatten().collect(),
            height,
            width,
        })
    }

    /// Read and parse a map file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    /// **Returns** `(height, width)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn contains(&self, (row, col): Cell) -> bool {
        row < self.height && col < self.width
    }

    pub fn terrain_at(&self, cell: Cell) -> Result<Terrain> {
        if !self.contains(cell) {
            return Err(Error::OutOfBounds {
                row: cell.0,
                col: cell.1,
                height: self.height,
                width: self.width,
            });
        }
        Ok(self.cells[cell.0 * self.width + cell.1])
    }

    /// Iterate over every cell in row-major order with its terrain
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Terrain)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &t)| ((i / width, i % width), t))
    }
}

impl FromStr for GridMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s.lines().map(str::trim);

        let header = lines
            .next()
            .ok_or_else(|| Error::map(1, "missing `<width> <height>` header"))?;
        let dims = header
            .split_whitespace()
            .map(str::parse::<usize>)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::map(1, format!("invalid header `{header}`: {e}")))?;
        let [width, height] = dims[..] else {
            return Err(Error::map(
                1,
                format!("expected `<width> <height>`, found `{header}`"),
            ));
        };

        let mut body: Vec<&str> = lines.collect();
        while body.last().is_some_and(|l| l.is_empty()) {
            body.pop();
        }
        if body.len() != height {
            return Err(Error::map(
                body.len() + 1,
                format!("header declares {height} rows, found {}", body.len()),
            ));
        }

        let rows = body
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let row = line
                    .chars()
                    .map(Terrain::try_from)
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|c| Error::map(i + 2, format!("unrecognized terrain symbol `{c}`")))?;
                if row.len() != width {
                    return Err(Error::map(
                        i + 2,
                        format!("expected {width} symbols, found {}", row.len()),
                    ));
                }
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dimensions_and_terrain() {
        let map: GridMap = "4 2\n.;+x\n@O..\n".parse().unwrap();
        assert_eq!(map.dimensions(), (2, 4));
        assert_eq!(map.terrain_at((0, 1)).unwrap(), Terrain::TallGrass);
        assert_eq!(map.terrain_at((0, 3)).unwrap(), Terrain::Fire);
        assert_eq!(map.terrain_at((1, 0)).unwrap(), Terrain::Wall);
        assert_eq!(map.terrain_at((1, 1)).unwrap(), Terrain::Goal);
    }

    #[test]
    fn tolerates_crlf_and_trailing_blank_lines() {
        let map: GridMap = "2 1\r\n.O\r\n\r\n\n".parse().unwrap();
        assert_eq!(map.dimensions(), (1, 2));
    }

    #[test]
    fn ignores_whitespace_around_rows() {
        let map: GridMap = "3 2\n..O  \n\t.x. \n".parse().unwrap();
        assert_eq!(map.dimensions(), (2, 3));
        assert_eq!(map.terrain_at((0, 2)).unwrap(), Terrain::Goal);
        assert_eq!(map.terrain_at((1, 1)).unwrap(), Terrain::Fire);
        assert!("3 1\n. .O\n".parse::<GridMap>().is_err());
    }

    #[test]
    fn out_of_bounds_lookup_fails() {
        let map: GridMap = "2 2\n..\n..".parse().unwrap();
        assert!(matches!(
            map.terrain_at((2, 0)),
            Err(Error::OutOfBounds { row: 2, col: 0, height: 2, width: 2 })
        ));
        assert!(map.terrain_at((0, 2)).is_err());
        assert!(map.terrain_at((1, 1)).is_ok());
    }

    #[test]
    fn rejects_malformed_maps() {
        let cases = [
            ("", "missing header"),
            ("3\n...", "single header value"),
            ("a b\n..", "non-numeric header"),
            ("3 2\n...", "too few rows"),
            ("3 1\n...\n...", "too many rows"),
            ("3 2\n...\n..", "short row"),
            ("3 1\n.#.", "unknown symbol"),
            ("0 0\n", "empty map"),
        ];
        for (text, case) in cases {
            assert!(
                matches!(text.parse::<GridMap>(), Err(Error::MalformedMapFile { .. })),
                "{case}"
            );
        }
    }

    #[test]
    fn reports_offending_line() {
        let err = "3 2\n...\n.Z.".parse::<GridMap>().unwrap_err();
        match err {
            Error::MalformedMapFile { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains('Z'));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn iter_is_row_major() {
        let map: GridMap = "2 2\n.x\nO@".parse().unwrap();
        let cells: Vec<_> = map.iter().collect();
        assert_eq!(
            cells,
            [
                ((0, 0), Terrain::Grass),
                ((0, 1), Terrain::Fire),
                ((1, 0), Terrain::Goal),
                ((1, 1), Terrain::Wall),
            ]
        );
    }
}
