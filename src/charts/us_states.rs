//! US state lookup for the choropleth: postal codes and tile-grid positions.

/// A state (or DC) placed on an 11 × 8 tile grid roughly following geography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTile {
    pub name: &'static str,
    pub code: &'static str,
    pub col: u8,
    pub row: u8,
}

const fn tile(name: &'static str, code: &'static str, col: u8, row: u8) -> StateTile {
    StateTile {
        name,
        code,
        col,
        row,
    }
}

pub const GRID_COLUMNS: u8 = 11;
pub const GRID_ROWS: u8 = 8;

pub const STATES: [StateTile; 51] = [
    tile("Alaska", "AK", 0, 0),
    tile("Maine", "ME", 10, 0),
    tile("Wisconsin", "WI", 5, 1),
    tile("Vermont", "VT", 9, 1),
    tile("New Hampshire", "NH", 10, 1),
    tile("Washington", "WA", 0, 2),
    tile("Idaho", "ID", 1, 2),
    tile("Montana", "MT", 2, 2),
    tile("North Dakota", "ND", 3, 2),
    tile("Minnesota", "MN", 4, 2),
    tile("Illinois", "IL", 5, 2),
    tile("Michigan", "MI", 6, 2),
    tile("New York", "NY", 8, 2),
    tile("Massachusetts", "MA", 9, 2),
    tile("Oregon", "OR", 0, 3),
    tile("Nevada", "NV", 1, 3),
    tile("Wyoming", "WY", 2, 3),
    tile("South Dakota", "SD", 3, 3),
    tile("Iowa", "IA", 4, 3),
    tile("Indiana", "IN", 5, 3),
    tile("Ohio", "OH", 6, 3),
    tile("Pennsylvania", "PA", 7, 3),
    tile("New Jersey", "NJ", 8, 3),
    tile("Connecticut", "CT", 9, 3),
    tile("Rhode Island", "RI", 10, 3),
    tile("California", "CA", 0, 4),
    tile("Utah", "UT", 1, 4),
    tile("Colorado", "CO", 2, 4),
    tile("Nebraska", "NE", 3, 4),
    tile("Missouri", "MO", 4, 4),
    tile("Kentucky", "KY", 5, 4),
    tile("West Virginia", "WV", 6, 4),
    tile("Virginia", "VA", 7, 4),
    tile("Maryland", "MD", 8, 4),
    tile("Delaware", "DE", 9, 4),
    tile("Arizona", "AZ", 1, 5),
    tile("New Mexico", "NM", 2, 5),
    tile("Kansas", "KS", 3, 5),
    tile("Arkansas", "AR", 4, 5),
    tile("Tennessee", "TN", 5, 5),
    tile("North Carolina", "NC", 6, 5),
    tile("South Carolina", "SC", 7, 5),
    tile("District of Columbia", "DC", 8, 5),
    tile("Oklahoma", "OK", 3, 6),
    tile("Louisiana", "LA", 4, 6),
    tile("Mississippi", "MS", 5, 6),
    tile("Alabama", "AL", 6, 6),
    tile("Georgia", "GA", 7, 6),
    tile("Hawaii", "HI", 0, 7),
    tile("Texas", "TX", 3, 7),
    tile("Florida", "FL", 8, 7),
];

/// Find a state by full name or postal code, case-insensitively.
pub fn lookup(state: &str) -> Option<&'static StateTile> {
    let state = state.trim();
    STATES.iter().find(|tile| {
        tile.code.eq_ignore_ascii_case(state) || tile.name.eq_ignore_ascii_case(state)
    })
}

/// Postal code for a state name or code.
pub fn state_code(state: &str) -> Option<&'static str> {
    lookup(state).map(|tile| tile.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_and_codes_resolve() {
        assert_eq!(state_code("California"), Some("CA"));
        assert_eq!(state_code("new york"), Some("NY"));
        assert_eq!(state_code("TX"), Some("TX"));
        assert_eq!(state_code("District of Columbia"), Some("DC"));
        assert_eq!(state_code("Ontario"), None);
    }

    #[test]
    fn tiles_are_unique_and_on_the_grid() {
        let codes: HashSet<&str> = STATES.iter().map(|t| t.code).collect();
        assert_eq!(codes.len(), STATES.len());

        let cells: HashSet<(u8, u8)> = STATES.iter().map(|t| (t.col, t.row)).collect();
        assert_eq!(cells.len(), STATES.len());
        assert!(STATES.iter().all(|t| t.col < GRID_COLUMNS && t.row < GRID_ROWS));
    }
}
