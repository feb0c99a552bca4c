#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;

    use unordered_pair::UnorderedPair;

    use crate::cell::{display_of, Hue, PairID};
    use crate::{Board, ConnectOutcome, EngineError, Generator, InvariantViolation, Location};

    fn board(width: usize, height: usize) -> Board {
        Board::with_dims((NonZero::new(width).unwrap(), NonZero::new(height).unwrap()))
    }

    fn chain(board: &mut Board, locations: &[Location]) {
        for pair in locations.windows(2) {
            assert_eq!(board.connect(pair[0], pair[1]), Ok(ConnectOutcome::Connected));
        }
    }

    fn number(board: &mut Board, a: Location, b: Location, id: usize) {
        let id = PairID::new(id).unwrap();
        board[a].number = Some(id);
        board[a].hue = Some(Hue(id));
        board[a].pair = Some(b);
        board[b].number = Some(id);
        board[b].hue = Some(Hue(id));
        board[b].pair = Some(a);
        board.pairs.push(UnorderedPair(a, b));
    }

    fn solution_edges(board: &Board) -> HashSet<(Location, Location)> {
        board.cells()
            .flat_map(|cell| cell.solution().iter()
                .filter(move |other| cell.location() < **other)
                .map(move |other| (cell.location(), *other)))
            .collect()
    }

    fn live_edges(board: &Board) -> HashSet<(Location, Location)> {
        board.edges().into_iter().map(|UnorderedPair(a, b)| (a, b)).collect()
    }

    #[test]
    fn construct_empty_board() {
        let board = board(4, 3);

        assert_eq!(format!("{}", board), "....
....
....
");
        assert_eq!(board[Location(2, 1)].idx(), 6);
        assert_eq!(board[Location(2, 1)].identifier(), 6);
        assert_eq!(board[Location(2, 1)].max_connections(), 2);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn lookup_outside_board() {
        let board = board(3, 3);

        assert!(board.cell(Location(3, 0)).is_none());
        assert!(board.cell(Location(0, 3)).is_none());
        assert!(board.cell(Location(2, 2)).is_some());
    }

    #[test]
    fn connect_shares_identifier() {
        let mut board = board(3, 3);
        chain(&mut board, &[Location(0, 0), Location(1, 0), Location(1, 1)]);

        let identifier = board[Location(0, 0)].identifier();
        assert_eq!(board[Location(1, 0)].identifier(), identifier);
        assert_eq!(board[Location(1, 1)].identifier(), identifier);
        assert_ne!(board[Location(2, 2)].identifier(), identifier);
        assert_eq!(board[Location(1, 0)].connections(), &[Location(0, 0), Location(1, 1)]);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn connect_twice_toggles() {
        let mut board = board(3, 3);
        let (a, b) = (Location(1, 1), Location(2, 1));

        assert_eq!(board.connect(a, b), Ok(ConnectOutcome::Connected));
        assert_eq!(board.connect(a, b), Ok(ConnectOutcome::Disconnected));

        assert!(board.edges().is_empty());
        assert_eq!(board[a].identifier(), board[a].idx());
        assert_eq!(board[b].identifier(), board[b].idx());
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn connect_within_one_chain_without_link_changes_nothing() {
        let mut board = board(2, 2);
        chain(&mut board, &[Location(0, 0), Location(1, 0), Location(1, 1), Location(0, 1)]);
        let before = live_edges(&board);

        assert_eq!(board.connect(Location(0, 1), Location(0, 0)), Ok(ConnectOutcome::Unchanged));

        assert_eq!(live_edges(&board), before);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn connect_refuses_bad_locations() {
        let mut board = board(3, 3);

        assert_eq!(board.connect(Location(0, 0), Location(1, 1)), Err(EngineError::NotAdjacent(Location(0, 0), Location(1, 1))));
        assert_eq!(board.connect(Location(2, 0), Location(3, 0)), Err(EngineError::OutOfBounds(Location(3, 0))));
        assert_eq!(board.disconnect(Location(0, 5), Location(0, 0)), Err(EngineError::OutOfBounds(Location(0, 5))));
        assert_eq!(board.delete_path(Location(9, 9)), Err(EngineError::OutOfBounds(Location(9, 9))));
        assert!(board.edges().is_empty());
    }

    #[test]
    fn third_link_evicts_oldest() {
        let mut board = board(3, 3);
        let center = Location(1, 1);
        board.connect(center, Location(0, 1)).unwrap();
        board.connect(center, Location(1, 0)).unwrap();
        board.connect(center, Location(2, 1)).unwrap();

        assert_eq!(board[center].connections(), &[Location(1, 0), Location(2, 1)]);
        assert!(board[Location(0, 1)].connections().is_empty());
        assert_ne!(board[Location(0, 1)].identifier(), board[center].identifier());
        assert_eq!(board[Location(1, 0)].identifier(), board[center].identifier());
        assert_eq!(board[Location(2, 1)].identifier(), board[center].identifier());
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn numbered_cell_holds_one_link() {
        let mut board = board(3, 3);
        number(&mut board, Location(1, 1), Location(2, 2), 1);

        board.connect(Location(1, 1), Location(0, 1)).unwrap();
        board.connect(Location(1, 1), Location(1, 0)).unwrap();

        assert_eq!(board[Location(1, 1)].connections(), &[Location(1, 0)]);
        assert!(board[Location(0, 1)].connections().is_empty());
        assert_eq!(board[Location(0, 1)].hue(), None);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn hue_spreads_and_clears() {
        let mut board = board(4, 1);
        number(&mut board, Location(0, 0), Location(3, 0), 2);

        chain(&mut board, &[Location(0, 0), Location(1, 0), Location(2, 0)]);
        assert_eq!(board[Location(2, 0)].hue(), Some(Hue(PairID::new(2).unwrap())));
        assert_eq!(format!("{}", board), "BbbB
");

        board.disconnect(Location(1, 0), Location(2, 0)).unwrap();
        assert_eq!(board[Location(2, 0)].hue(), None);
        assert_eq!(board[Location(1, 0)].hue(), Some(Hue(PairID::new(2).unwrap())));
        assert_eq!(board[Location(0, 0)].hue(), Some(Hue(PairID::new(2).unwrap())));
    }

    #[test]
    fn different_hues_never_merge() {
        let mut board = board(4, 1);
        number(&mut board, Location(0, 0), Location(3, 0), 1);
        number(&mut board, Location(1, 0), Location(2, 0), 2);

        assert_eq!(board.connect(Location(0, 0), Location(1, 0)), Ok(ConnectOutcome::Rejected));
        assert!(board.edges().is_empty());
    }

    #[test]
    fn delete_path_clears_chain() {
        let mut board = board(4, 2);
        number(&mut board, Location(0, 0), Location(0, 1), 1);
        chain(&mut board, &[Location(0, 0), Location(1, 0), Location(2, 0), Location(2, 1), Location(1, 1), Location(0, 1)]);
        chain(&mut board, &[Location(3, 0), Location(3, 1)]);

        assert_eq!(board.delete_path(Location(2, 0)), Ok(5));

        for x in 0..3 {
            for y in 0..2 {
                assert!(board[Location(x, y)].connections().is_empty());
            }
        }
        assert_eq!(board[Location(3, 0)].connections(), &[Location(3, 1)]);
        assert_eq!(board[Location(0, 0)].number(), PairID::new(1));
        assert_eq!(board[Location(0, 0)].pair(), Some(Location(0, 1)));
        assert_eq!(board[Location(0, 1)].hue(), Some(Hue(PairID::new(1).unwrap())));
        assert_eq!(board.pairs().len(), 1);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn stroke_needs_colour() {
        let mut board = board(3, 1);
        assert_eq!(board.stroke(Location(0, 0), Location(1, 0)), Ok(None));
        assert!(board.edges().is_empty());

        number(&mut board, Location(0, 0), Location(2, 0), 1);
        assert_eq!(board.stroke(Location(0, 0), Location(1, 0)), Ok(Some(ConnectOutcome::Connected)));
        assert_eq!(board.stroke(Location(1, 0), Location(2, 0)), Ok(Some(ConnectOutcome::Connected)));
        assert!(board.has_win());
    }

    #[test]
    fn hand_built_puzzle_round_trip() {
        let mut board = board(3, 3);
        chain(&mut board, &[Location(0, 0), Location(0, 1), Location(0, 2), Location(1, 2), Location(2, 2)]);
        chain(&mut board, &[Location(1, 0), Location(2, 0), Location(2, 1), Location(1, 1)]);

        let order = board.locations();
        assert_eq!(board.assign_pairs(&order), 2);
        assert_eq!(board.pairs(), &[
            UnorderedPair(Location(2, 2), Location(0, 0)),
            UnorderedPair(Location(1, 1), Location(1, 0)),
        ]);
        assert!(board.has_win());
        assert_eq!(format!("{}", board), "ABb
aBb
aaA
");
        assert_eq!(board.draw_paths(), "AB┐
│B┘
└─A
");

        board.reset();
        assert!(!board.has_win());
        assert_eq!(format!("{}", board), "AB.
.B.
..A
");

        for (a, b) in solution_edges(&board) {
            assert_eq!(board.connect(a, b), Ok(ConnectOutcome::Connected));
        }
        assert!(board.has_win());
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn validate_cuts_detour() {
        let mut board = board(2, 2);
        chain(&mut board, &[Location(0, 0), Location(1, 0), Location(1, 1), Location(0, 1)]);

        assert!(board.validate(Location(1, 0)));
        assert_eq!(board[Location(1, 0)].connections(), &[Location(0, 0)]);
        assert!(!board.validate(Location(1, 0)));
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn remove_overlap_splits_adjacent_ends() {
        let mut board = board(3, 3);
        chain(&mut board, &[Location(0, 0), Location(1, 0)]);

        assert!(board.remove_overlap(Location(0, 0)));
        assert!(board.edges().is_empty());
        assert!(!board.remove_overlap(Location(0, 0)));
    }

    #[test]
    fn extend_prefers_unlinked_neighbour() {
        let mut board = board(3, 3);
        board.extend(Location(1, 1));

        assert_eq!(board[Location(1, 1)].connections(), &[Location(1, 0)]);
    }

    #[test]
    fn extend_continues_onto_loose_end() {
        let mut board = board(4, 2);
        chain(&mut board, &[Location(1, 1), Location(0, 1), Location(0, 0), Location(1, 0)]);
        chain(&mut board, &[Location(2, 0), Location(3, 0)]);
        assert_eq!(board[Location(0, 0)].degree(), 2);

        board.extend(Location(1, 0));

        assert_eq!(board[Location(1, 0)].connections(), &[Location(0, 0), Location(2, 0)]);
        assert_eq!(board[Location(2, 0)].identifier(), board[Location(1, 1)].identifier());
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn extend_continues_from_lone_link() {
        let mut board = board(4, 2);
        chain(&mut board, &[Location(0, 0), Location(1, 0)]);
        chain(&mut board, &[Location(0, 1), Location(1, 1), Location(2, 1), Location(2, 0), Location(3, 0)]);
        assert_eq!(board[Location(2, 0)].degree(), 2);

        board.extend(Location(1, 0));

        assert_eq!(board[Location(1, 0)].connections(), &[Location(0, 0), Location(2, 0)]);
        assert_eq!(board[Location(2, 0)].connections(), &[Location(3, 0), Location(1, 0)]);
        assert!(board[Location(2, 1)].connections().contains(&Location(1, 1)));
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn extend_leaves_crowded_line_alone() {
        let mut board = board(4, 2);
        chain(&mut board, &[Location(1, 1), Location(0, 1), Location(0, 0), Location(1, 0)]);
        chain(&mut board, &[Location(2, 1), Location(2, 0), Location(3, 0)]);
        let before = live_edges(&board);

        board.extend(Location(1, 0));

        assert_eq!(live_edges(&board), before);
        assert_eq!(board[Location(1, 0)].connections(), &[Location(0, 0)]);
    }

    #[test]
    fn remove_overlap_cuts_end_facing_own_path() {
        let mut board = board(3, 3);
        chain(&mut board, &[Location(0, 0), Location(0, 1), Location(1, 1), Location(2, 1), Location(2, 0)]);
        assert_ne!(board[Location(1, 0)].identifier(), board[Location(0, 0)].identifier());

        assert!(board.remove_overlap(Location(0, 0)));
        assert!(board[Location(0, 0)].connections().is_empty());
        assert_eq!(board[Location(0, 1)].connections(), &[Location(1, 1)]);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn remove_overlap_cuts_u_turn() {
        let mut board = board(3, 2);
        chain(&mut board, &[Location(0, 0), Location(0, 1), Location(1, 1), Location(1, 0), Location(2, 0), Location(2, 1)]);
        let before = live_edges(&board);

        assert!(!board.remove_overlap(Location(0, 1)));
        assert_eq!(live_edges(&board), before);

        assert!(board.remove_overlap(Location(1, 0)));
        assert_eq!(board[Location(1, 0)].connections(), &[Location(2, 0)]);
        assert_eq!(board[Location(1, 1)].connections(), &[Location(0, 1)]);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn generated_board_is_solved() {
        for seed in 0..6 {
            let mut board = board(5, 5);
            let report = Generator::seeded(seed).solve_into(&mut board);

            assert!(report.converged, "seed {seed}: {report:?}");
            assert!(report.pairs > 0);
            assert_eq!(board.pairs().len(), report.pairs);
            assert!(board.has_win(), "seed {seed}:\n{}", board.draw_paths());
            assert!(board.check_invariants().is_ok());

            for cell in board.cells() {
                assert!(cell.degree() <= cell.max_connections());
                if let Some(partner) = cell.pair() {
                    assert_eq!(board[partner].pair(), Some(cell.location()));
                    assert_eq!(board[partner].number(), cell.number());
                    assert_eq!(cell.degree(), 1);
                }
            }
        }
    }

    #[test]
    fn generate_leaves_clue_only() {
        let mut board = board(6, 4);
        let report = Generator::seeded(11).generate(&mut board);
        assert!(report.converged);

        assert!(board.edges().is_empty());
        assert!(!board.has_win());
        for cell in board.cells() {
            assert_eq!(cell.identifier(), cell.idx());
            assert!(!cell.solution().is_empty());
            assert_eq!(cell.hue().is_some(), cell.number().is_some());
        }

        for (a, b) in solution_edges(&board) {
            assert_eq!(board.connect(a, b), Ok(ConnectOutcome::Connected));
        }
        assert!(board.has_win());
    }

    #[test]
    fn generation_is_reproducible() {
        let mut first = board(6, 6);
        let mut second = board(6, 6);
        Generator::seeded(42).solve_into(&mut first);
        Generator::seeded(42).solve_into(&mut second);

        assert_eq!(format!("{}", first), format!("{}", second));
        assert_eq!(live_edges(&first), live_edges(&second));
    }

    #[test]
    fn single_cell_board_gives_up() {
        let mut board = board(1, 1);
        let report = Generator::seeded(3).solve_into(&mut board);

        assert!(!report.converged);
        assert_eq!(report.pairs, 0);
        assert!(!board.has_win());
    }

    #[test]
    fn swap_solution_round_trip() {
        let mut board = board(5, 5);
        Generator::seeded(5).generate(&mut board);
        let solution = solution_edges(&board);

        board.swap_solution();
        assert_eq!(live_edges(&board), solution);
        assert!(board.has_win());
        assert!(board.check_invariants().is_ok());

        board.swap_solution();
        assert!(board.edges().is_empty());
        assert_eq!(solution_edges(&board), solution);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn invariant_checker_spots_one_sided_link() {
        let mut board = board(2, 1);
        board[Location(0, 0)].connections.push(Location(1, 0));

        assert_eq!(board.check_invariants(), Err(InvariantViolation::Asymmetric(Location(0, 0), Location(1, 0))));
    }

    #[test]
    fn invariant_checker_spots_stale_identifier() {
        let mut board = board(3, 1);
        chain(&mut board, &[Location(0, 0), Location(1, 0)]);
        board[Location(1, 0)].identifier = 2;

        assert!(matches!(board.check_invariants(), Err(InvariantViolation::IdentifierSplit(..)) | Err(InvariantViolation::IdentifierShared(..))));
    }

    #[test]
    fn pair_letters_run_past_z() {
        let letter = |id| display_of(PairID::new(id).unwrap());

        assert_eq!(letter(1), 'A');
        assert_eq!(letter(26), 'Z');
        assert_eq!(letter(27), 'Γ');
        assert_eq!(letter(36), 'Ω');
        assert_eq!(letter(37), '#');
        assert_eq!(Hue(PairID::new(27).unwrap()).display(), 'γ');
        assert_eq!(Hue(PairID::new(36).unwrap()).display(), 'ω');

        let mut board = board(2, 1);
        number(&mut board, Location(0, 0), Location(1, 0), 30);
        assert_eq!(format!("{}", board), "ΛΛ\n");
    }

    #[test]
    fn hue_fraction_cycles() {
        let hue = Hue(PairID::new(1).unwrap());
        assert!((hue.fraction() - 1.0 / 11.3).abs() < 1e-12);
        assert!((0.0..1.0).contains(&Hue(PairID::new(57).unwrap()).fraction()));
    }
}
