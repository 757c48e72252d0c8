//! Conversion between cell indices and the labels players type.
//!
//! Ranks (rows) are labelled with the 1-based row number in uppercase
//! base 16, so an 8x8 board uses `1`..`8` and a 15x15 board `1`..`F`.
//! Files (columns) are letters starting at `A`. A cell label is the rank
//! followed by the file, e.g. `4E` or `CL`.
//!
//! ```
//! use gridplay::{format_coord, parse_coord, Coord};
//! assert_eq!(parse_coord("cl", 15), Ok(Coord { row: 11, col: 11 }));
//! assert_eq!(format_coord(Coord { row: 3, col: 4 }), "4E");
//! ```

use crate::InputFormatError;

/// Zero-based cell coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_coord(*self))
    }
}

pub fn format_rank(row: i8) -> String {
    format!("{:X}", row as u32 + 1)
}

pub fn format_file(col: i8) -> char {
    char::from(b'A' + col as u8)
}

pub fn format_coord(coord: Coord) -> String {
    format!("{}{}", format_rank(coord.row), format_file(coord.col))
}

/// Parses a rank label into a zero-based row on a board of the given size.
pub fn parse_rank(label: &str, size: i8) -> Result<i8, InputFormatError> {
    let bad_rank = || InputFormatError::BadRank {
        label: String::from(label),
    };
    // A leading zero would give a second spelling for the same row
    if label.is_empty()
        || label.len() > 2
        || label.starts_with('0')
        || !label.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(bad_rank());
    }
    let number = u32::from_str_radix(label, 16).map_err(|_| bad_rank())?;
    if number > size as u32 {
        return Err(InputFormatError::RankOutOfRange {
            label: String::from(label),
        });
    }
    Ok(number as i8 - 1)
}

/// Parses a file letter (case-insensitive) into a zero-based column.
pub fn parse_file(label: char, size: i8) -> Result<i8, InputFormatError> {
    if !label.is_ascii_alphabetic() {
        return Err(InputFormatError::BadFile { label });
    }
    let col = label.to_ascii_uppercase() as u8 - b'A';
    if col >= size as u8 {
        return Err(InputFormatError::FileOutOfRange { label });
    }
    Ok(col as i8)
}

/// Parses a cell label such as `3a` or `FO`.
///
/// The last character is the file; everything before it is the rank.
pub fn parse_coord(text: &str, size: i8) -> Result<Coord, InputFormatError> {
    let text = text.trim();
    let mut chars = text.chars();
    let file = chars.next_back().ok_or(InputFormatError::Empty)?;
    let rank = chars.as_str();
    if rank.is_empty() {
        return Err(InputFormatError::TooShort {
            input: String::from(text),
        });
    }
    let row = parse_rank(rank, size)?;
    let col = parse_file(file, size)?;
    Ok(Coord { row, col })
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::BoardCoord;

    quickcheck! {
        fn coord_labels_roundtrip(input: BoardCoord) -> bool {
            let BoardCoord { size, coord } = input;
            parse_coord(&format_coord(coord), size) == Ok(coord)
                && parse_coord(&format_coord(coord).to_lowercase(), size) == Ok(coord)
        }
    }

    #[test]
    fn every_index_roundtrips() {
        for size in [8, 15] {
            for i in 0..size {
                assert_eq!(parse_rank(&format_rank(i), size), Ok(i));
                assert_eq!(parse_file(format_file(i), size), Ok(i));
            }
        }
    }

    #[test]
    fn gomoku_ranks_are_hex() {
        assert_eq!(format_rank(9), "A");
        assert_eq!(format_rank(14), "F");
        assert_eq!(parse_coord("FO", 15), Ok(Coord::new(14, 14)));
        assert_eq!(parse_coord("aA", 15), Ok(Coord::new(9, 0)));
    }

    #[test]
    fn rejects_out_of_range_labels() {
        assert_eq!(
            parse_coord("9a", 8),
            Err(InputFormatError::RankOutOfRange {
                label: String::from("9")
            })
        );
        assert_eq!(
            parse_coord("1i", 8),
            Err(InputFormatError::FileOutOfRange { label: 'i' })
        );
        assert_eq!(
            parse_coord("10a", 15),
            Err(InputFormatError::RankOutOfRange {
                label: String::from("10")
            })
        );
        assert!(parse_coord("1P", 15).is_err());
    }

    #[test]
    fn rejects_malformed_labels() {
        assert_eq!(parse_coord("", 8), Err(InputFormatError::Empty));
        assert_eq!(
            parse_coord("a", 8),
            Err(InputFormatError::TooShort {
                input: String::from("a")
            })
        );
        assert!(matches!(
            parse_coord("0a", 8),
            Err(InputFormatError::BadRank { .. })
        ));
        assert!(matches!(
            parse_coord("x1a", 8),
            Err(InputFormatError::BadRank { .. })
        ));
        assert_eq!(
            parse_coord("12", 8),
            Err(InputFormatError::BadFile { label: '2' })
        );
        assert!(matches!(
            parse_coord("-1a", 8),
            Err(InputFormatError::BadRank { .. })
        ));
    }
}
