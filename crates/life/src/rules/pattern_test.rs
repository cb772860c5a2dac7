//! Regression tests: well-known still lifes, oscillators and spaceships.

#[cfg(test)]
mod tests {
    use crate::{Grid, GridEngine};

    fn engine_with(width: i32, height: i32, wrap: bool, alive: &[(i32, i32)]) -> GridEngine {
        let mut engine = GridEngine::new(width, height, wrap).unwrap();
        for &(x, y) in alive {
            engine.toggle(x, y).unwrap();
        }
        engine
    }

    fn alive(grid: &Grid) -> Vec<(i32, i32)> {
        let mut cells: Vec<(i32, i32)> = grid.alive_cells().collect();
        cells.sort_unstable();
        cells
    }

    fn sorted(cells: &[(i32, i32)]) -> Vec<(i32, i32)> {
        let mut cells = cells.to_vec();
        cells.sort_unstable();
        cells
    }

    #[test]
    fn block_is_still_life() {
        let block = [(1, 1), (1, 2), (2, 1), (2, 2)];
        let mut engine = engine_with(4, 4, false, &block);

        let (grid, population) = engine.advance_generation();

        assert_eq!(alive(&grid), sorted(&block));
        assert_eq!(population, 4);
    }

    #[test]
    fn blinker_has_period_two() {
        let horizontal = [(1, 2), (2, 2), (3, 2)];
        let vertical = [(2, 1), (2, 2), (2, 3)];
        let mut engine = engine_with(5, 5, false, &horizontal);

        let (first, _) = engine.advance_generation();
        eprintln!("{first}");
        assert_eq!(alive(&first), sorted(&vertical));

        let (second, population) = engine.advance_generation();
        assert_eq!(alive(&second), sorted(&horizontal));
        assert_eq!(population, 3);
    }

    #[test]
    fn blinker_across_wrapped_edge_oscillates() {
        // Horizontal blinker split over the left/right seam.
        let mut engine = engine_with(6, 6, true, &[(5, 3), (0, 3), (1, 3)]);

        let (first, _) = engine.advance_generation();
        assert_eq!(alive(&first), sorted(&[(0, 2), (0, 3), (0, 4)]));

        let (second, _) = engine.advance_generation();
        assert_eq!(alive(&second), sorted(&[(5, 3), (0, 3), (1, 3)]));
    }

    #[test]
    fn glider_translates_on_torus() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut engine = engine_with(8, 8, true, &glider);

        // One full lap: the glider moves (1, 1) every four generations.
        for _ in 0..32 {
            engine.advance_generation();
        }

        assert_eq!(alive(&engine.grid()), sorted(&glider));
        assert_eq!(engine.population(), 5);
    }

    #[test]
    fn glider_after_four_generations_is_shifted() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let shifted: Vec<(i32, i32)> = glider.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        let mut engine = engine_with(10, 10, false, &glider);

        for _ in 0..4 {
            engine.advance_generation();
        }

        assert_eq!(alive(&engine.grid()), sorted(&shifted));
    }

    #[test]
    fn glider_settles_into_block_at_bounded_corner() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut engine = engine_with(6, 6, false, &glider);

        for _ in 0..40 {
            engine.advance_generation();
        }

        eprintln!("{}", engine.grid());
        assert_eq!(alive(&engine.grid()), vec![(4, 4), (4, 5), (5, 4), (5, 5)]);
    }

    #[test]
    fn lone_cell_and_pair_die() {
        let mut engine = engine_with(5, 5, true, &[(2, 2)]);
        assert_eq!(engine.advance_generation().1, 0);

        let mut engine = engine_with(5, 5, false, &[(1, 1), (2, 1)]);
        assert_eq!(engine.advance_generation().1, 0);
    }
}
