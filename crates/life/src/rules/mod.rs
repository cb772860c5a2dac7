//! Conway's B3/S23 transition rule.

#[cfg(test)]
mod pattern_test;

use crate::cell::Cell;

/// Next state of a cell given how many of its eight neighbors are alive.
///
/// An alive cell survives with 2 or 3 neighbors. A dead cell is born with exactly 3.
#[must_use]
pub fn next_state(cell: Cell, alive_neighbors: u8) -> Cell {
    match (cell, alive_neighbors) {
        (Cell::Alive, 2 | 3) | (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn alive_cell_survives_only_with_two_or_three() {
        for n in 0..=8u8 {
            let expected = if n == 2 || n == 3 { Cell::Alive } else { Cell::Dead };
            assert_eq!(next_state(Cell::Alive, n), expected, "alive with {n} neighbors");
        }
    }

    #[test]
    fn dead_cell_is_born_only_with_three() {
        for n in 0..=8u8 {
            let expected = if n == 3 { Cell::Alive } else { Cell::Dead };
            assert_eq!(next_state(Cell::Dead, n), expected, "dead with {n} neighbors");
        }
    }

    proptest! {
        #[test]
        fn prop_three_neighbors_always_alive(alive in any::<bool>()) {
            prop_assert_eq!(next_state(Cell::from(alive), 3), Cell::Alive);
        }

        #[test]
        fn prop_two_neighbors_keeps_state(alive in any::<bool>()) {
            let cell = Cell::from(alive);
            prop_assert_eq!(next_state(cell, 2), cell);
        }
    }
}
