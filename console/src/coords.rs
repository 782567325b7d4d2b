use minesweeper_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseCoordsError {
    #[error("Cell's coordinates must contain at least 2 symbols, ex: a3")]
    TooShort,
    #[error("Cell's column must be a letter from a to {last}, ex: a3")]
    InvalidColumn { last: char },
    #[error("Cell's row must be a number from 1 to {last}, ex: a3")]
    InvalidRow { last: u16 },
}

/// Reads chess-style coordinates: a column letter and a 1-based row number, in either order (`a3`, `3a`, `J10`).
pub fn parse_coords(input: &str, (size_x, size_y): Coord2) -> Result<Coord2, ParseCoordsError> {
    let input = input.trim();
    if input.chars().count() < 2 {
        return Err(ParseCoordsError::TooShort);
    }

    let last_column = column_letter(size_x.saturating_sub(1));
    let bad_column = ParseCoordsError::InvalidColumn { last: last_column };
    let bad_row = ParseCoordsError::InvalidRow {
        last: size_y.into(),
    };

    let mut chars = input.chars();
    let (letter, number) = match (chars.next(), chars.next_back()) {
        (Some(first), _) if first.is_ascii_alphabetic() => (first, &input[1..]),
        (_, Some(last)) if last.is_ascii_alphabetic() => (last, &input[..input.len() - 1]),
        _ => return Err(bad_column),
    };

    let x = (letter.to_ascii_lowercase() as u8).wrapping_sub(b'a');
    if x >= size_x {
        return Err(bad_column);
    }

    if !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad_row);
    }
    let row: u16 = number.parse().map_err(|_| bad_row)?;
    if row == 0 || row > size_y.into() {
        return Err(bad_row);
    }

    Ok((x, (row - 1) as Coord))
}

pub fn format_coords((x, y): Coord2) -> String {
    format!("{}{}", column_letter(x), u16::from(y) + 1)
}

pub fn column_letter(x: Coord) -> char {
    char::from(b'a'.saturating_add(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Coord2 = (10, 10);

    #[test]
    fn parses_both_orders_and_cases() {
        assert_eq!(parse_coords("a3", SIZE), Ok((0, 2)));
        assert_eq!(parse_coords("A3", SIZE), Ok((0, 2)));
        assert_eq!(parse_coords("3a", SIZE), Ok((0, 2)));
        assert_eq!(parse_coords(" j10 ", SIZE), Ok((9, 9)));
        assert_eq!(parse_coords("e1", SIZE), Ok((4, 0)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_coords("", SIZE), Err(ParseCoordsError::TooShort));
        assert_eq!(parse_coords("a", SIZE), Err(ParseCoordsError::TooShort));
        assert_eq!(
            parse_coords("??", SIZE),
            Err(ParseCoordsError::InvalidColumn { last: 'j' })
        );
        assert_eq!(
            parse_coords("k1", SIZE),
            Err(ParseCoordsError::InvalidColumn { last: 'j' })
        );
        assert_eq!(
            parse_coords("a0", SIZE),
            Err(ParseCoordsError::InvalidRow { last: 10 })
        );
        assert_eq!(
            parse_coords("a11", SIZE),
            Err(ParseCoordsError::InvalidRow { last: 10 })
        );
        assert_eq!(
            parse_coords("a+3", SIZE),
            Err(ParseCoordsError::InvalidRow { last: 10 })
        );
        assert_eq!(
            parse_coords("ab", SIZE),
            Err(ParseCoordsError::InvalidRow { last: 10 })
        );
    }

    #[test]
    fn formats_back_to_chess_style() {
        assert_eq!(format_coords((0, 2)), "a3");
        assert_eq!(format_coords((9, 9)), "j10");
    }

    #[test]
    fn error_messages_name_the_valid_range() {
        assert_eq!(
            ParseCoordsError::InvalidColumn { last: 'j' }.to_string(),
            "Cell's column must be a letter from a to j, ex: a3"
        );
    }
}
