//! Seat recommendation.
//!
//! Candidates are the free seats that satisfy every requested preference.
//! Rows are scanned in ascending order and the first run of adjacent
//! candidates long enough for the whole party wins. A single traveller
//! always gets the first candidate.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::seats::layout::{Seat, SeatLayout};

/// Optional seat preferences; unset means "don't care".
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatPreferences {
    pub prefer_window: Option<bool>,
    pub prefer_extra_legroom: Option<bool>,
    pub prefer_near_exit: Option<bool>,
}

impl SeatPreferences {
    fn accepts(&self, seat: &Seat) -> bool {
        (!self.prefer_window.unwrap_or(false) || seat.is_window)
            && (!self.prefer_extra_legroom.unwrap_or(false) || seat.has_extra_legroom)
            && (!self.prefer_near_exit.unwrap_or(false) || seat.is_near_exit)
    }
}

/// Pick seats for `passengers` travellers sitting together.
///
/// Returns an empty list when no suitable block exists.
pub fn recommend<'a>(
    layout: &SeatLayout,
    seats: &'a [Seat],
    passengers: usize,
    prefs: &SeatPreferences,
) -> Vec<&'a Seat> {
    let passengers = passengers.max(1);
    let candidates: Vec<&Seat> = seats
        .iter()
        .filter(|s| !s.is_occupied && prefs.accepts(s))
        .collect();

    let Some(first) = candidates.first() else {
        return Vec::new();
    };

    let mut by_row: BTreeMap<u32, Vec<&Seat>> = BTreeMap::new();
    for seat in &candidates {
        by_row.entry(seat.row).or_default().push(*seat);
    }

    for row_seats in by_row.values_mut() {
        row_seats.sort_by_key(|s| layout.column_index(&s.column));
        if let Some(block) = row_seats
            .windows(passengers)
            .find(|block| are_adjacent(layout, block))
        {
            return block.to_vec();
        }
    }

    if passengers == 1 {
        vec![*first]
    } else {
        Vec::new()
    }
}

fn are_adjacent(layout: &SeatLayout, block: &[&Seat]) -> bool {
    block.windows(2).all(|pair| {
        match (
            layout.column_index(&pair[0].column),
            layout.column_index(&pair[1].column),
        ) {
            (Some(a), Some(b)) => b == a + 1,
            _ => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeatLayoutConfig;
    use std::collections::HashSet;

    fn layout() -> SeatLayout {
        SeatLayout::from_config(&SeatLayoutConfig::default())
    }

    fn occupied(seats: &[&str]) -> HashSet<String> {
        seats.iter().map(|s| s.to_string()).collect()
    }

    fn numbers(seats: Vec<&Seat>) -> Vec<String> {
        seats.into_iter().map(|s| s.seat_nr.clone()).collect()
    }

    #[test]
    fn test_single_passenger_on_empty_plane() {
        let layout = layout();
        let seats = layout.generate(&HashSet::new());
        let picked = recommend(&layout, &seats, 1, &SeatPreferences::default());
        assert_eq!(numbers(picked), vec!["1A"]);
    }

    #[test]
    fn test_zero_passengers_treated_as_one() {
        let layout = layout();
        let seats = layout.generate(&HashSet::new());
        assert_eq!(recommend(&layout, &seats, 0, &SeatPreferences::default()).len(), 1);
    }

    #[test]
    fn test_group_skips_broken_rows() {
        let layout = layout();
        // row 1 has no three adjacent free seats, row 2 starts at B
        let seats = layout.generate(&occupied(&["1C", "1D", "2A"]));
        let picked = recommend(&layout, &seats, 3, &SeatPreferences::default());
        assert_eq!(numbers(picked), vec!["2B", "2C", "2D"]);
    }

    #[test]
    fn test_window_preference() {
        let layout = layout();
        let seats = layout.generate(&occupied(&["1A", "1F"]));
        let prefs = SeatPreferences {
            prefer_window: Some(true),
            ..SeatPreferences::default()
        };
        let picked = recommend(&layout, &seats, 1, &prefs);
        assert_eq!(numbers(picked), vec!["2A"]);

        // window seats are never adjacent to each other
        assert!(recommend(&layout, &seats, 2, &prefs).is_empty());
    }

    #[test]
    fn test_combined_preferences() {
        let layout = layout();
        let seats = layout.generate(&HashSet::new());
        let prefs = SeatPreferences {
            prefer_extra_legroom: Some(true),
            prefer_near_exit: Some(true),
            prefer_window: None,
        };
        let picked = recommend(&layout, &seats, 2, &prefs);
        assert_eq!(numbers(picked), vec!["12A", "12B"]);
    }

    #[test]
    fn test_full_plane() {
        let layout = layout();
        let all: HashSet<String> = layout.seat_numbers().into_iter().collect();
        let seats = layout.generate(&all);
        assert!(recommend(&layout, &seats, 1, &SeatPreferences::default()).is_empty());
    }
}
