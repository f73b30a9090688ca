//! Cabin layout and seat generation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::SeatLayoutConfig;

/// A seat with its static features and current occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub seat_nr: String,
    pub row: u32,
    pub column: String,
    pub is_window: bool,
    pub has_extra_legroom: bool,
    pub is_near_exit: bool,
    pub is_occupied: bool,
    pub is_first_class: bool,
}

/// Rows, columns and the rows/columns that carry special features.
#[derive(Debug, Clone)]
pub struct SeatLayout {
    total_rows: u32,
    columns: Vec<String>,
    exit_rows: Vec<u32>,
    extra_legroom_rows: Vec<u32>,
    window_columns: Vec<String>,
    first_class_rows: Vec<u32>,
}

impl SeatLayout {
    pub fn from_config(config: &SeatLayoutConfig) -> Self {
        Self {
            total_rows: config.total_rows,
            columns: config.columns.clone(),
            exit_rows: config.exit_rows.clone(),
            extra_legroom_rows: config.extra_legroom_rows.clone(),
            window_columns: config.window_columns.clone(),
            first_class_rows: config.first_class_rows.clone(),
        }
    }

    pub fn total_rows(&self) -> u32 {
        self.total_rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column across the cabin, used for adjacency.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Every seat number in row-major order.
    pub fn seat_numbers(&self) -> Vec<String> {
        (1..=self.total_rows)
            .flat_map(|row| self.columns.iter().map(move |col| format!("{row}{col}")))
            .collect()
    }

    /// Split `12C` into row 12 and column `C`, if it belongs to this layout.
    ///
    /// Only the canonical spelling is accepted, so `012C` is not a seat.
    pub fn parse_seat_nr<'a>(&self, seat_nr: &'a str) -> Option<(u32, &'a str)> {
        let split = seat_nr.find(|c: char| !c.is_ascii_digit())?;
        let (digits, column) = seat_nr.split_at(split);
        let row: u32 = digits.parse().ok()?;
        if digits != row.to_string() {
            return None;
        }
        let valid = (1..=self.total_rows).contains(&row) && self.column_index(column).is_some();
        valid.then_some((row, column))
    }

    /// Whether a seat is first class; `None` if the seat is not in the layout.
    pub fn is_first_class(&self, seat_nr: &str) -> Option<bool> {
        let (row, _) = self.parse_seat_nr(seat_nr)?;
        Some(self.first_class_rows.contains(&row))
    }

    fn seat(&self, row: u32, column: &str, occupied: &HashSet<String>) -> Seat {
        let seat_nr = format!("{row}{column}");
        Seat {
            is_occupied: occupied.contains(&seat_nr),
            seat_nr,
            row,
            column: column.to_string(),
            is_window: self.window_columns.iter().any(|c| c == column),
            has_extra_legroom: self.extra_legroom_rows.contains(&row),
            is_near_exit: self.exit_rows.contains(&row),
            is_first_class: self.first_class_rows.contains(&row),
        }
    }

    /// Every seat, ordered by row then column, with occupancy applied.
    pub fn generate(&self, occupied: &HashSet<String>) -> Vec<Seat> {
        (1..=self.total_rows)
            .flat_map(|row| self.columns.iter().map(move |col| (row, col)))
            .map(|(row, col)| self.seat(row, col, occupied))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SeatLayout {
        SeatLayout::from_config(&SeatLayoutConfig::default())
    }

    #[test]
    fn test_generate_layout() {
        let occupied: HashSet<String> = ["12C".to_string()].into();
        let seats = layout().generate(&occupied);
        assert_eq!(seats.len(), 150);
        assert_eq!(seats[0].seat_nr, "1A");
        assert_eq!(seats[149].seat_nr, "25F");

        let first = &seats[0];
        assert!(first.is_window && first.is_near_exit && first.is_first_class);
        assert!(!first.has_extra_legroom);

        let twelve_c = seats.iter().find(|s| s.seat_nr == "12C").unwrap();
        assert!(twelve_c.is_occupied);
        assert!(twelve_c.has_extra_legroom && twelve_c.is_near_exit);
        assert!(!twelve_c.is_window && !twelve_c.is_first_class);
    }

    #[test]
    fn test_is_first_class() {
        let layout = layout();
        assert_eq!(layout.is_first_class("1A"), Some(true));
        assert_eq!(layout.is_first_class("2F"), Some(true));
        assert_eq!(layout.is_first_class("3A"), Some(false));
        assert_eq!(layout.is_first_class("26A"), None);
        assert_eq!(layout.is_first_class("0A"), None);
        assert_eq!(layout.is_first_class("4G"), None);
        assert_eq!(layout.is_first_class("A4"), None);
        assert_eq!(layout.is_first_class("12"), None);
    }

    #[test]
    fn test_parse_seat_nr_is_canonical() {
        let layout = layout();
        assert_eq!(layout.parse_seat_nr("12A"), Some((12, "A")));
        assert_eq!(layout.parse_seat_nr("012A"), None);
        assert_eq!(layout.parse_seat_nr("0012A"), None);
        assert_eq!(layout.parse_seat_nr("+12A"), None);
        assert_eq!(layout.parse_seat_nr("12a"), None);
    }
}
