#[cfg(test)]
mod tests {
    use crate::board::{Board, Cell};
    use crate::components::{GimmickKind, Piece, Position, TetrominoType};
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
    use crate::tests::test_utils::{cell, fill_row, vertical_i};

    fn empty_board() -> Board {
        Board::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    fn tagged(kind: GimmickKind) -> Cell {
        Cell {
            tetromino_type: TetrominoType::T,
            color: kind.get_color(),
            gimmick: Some(kind),
        }
    }

    #[test]
    fn test_board_new_empty() {
        let board = empty_board();
        assert_eq!(board.width, 10);
        assert_eq!(board.height, 20);
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.occupancy(0, 0), 0);
        assert_eq!(board.gimmick(0, 0), None);
    }

    #[test]
    fn test_set_and_get_out_of_bounds() {
        let mut board = empty_board();

        assert!(board.set(5, 10, Some(cell(TetrominoType::T))));
        assert_eq!(board.occupancy(5, 10), TetrominoType::T.tag());
        assert_eq!(board.color(5, 10), TetrominoType::T.get_color());

        assert!(!board.set(-1, 0, Some(cell(TetrominoType::T))));
        assert!(!board.set(0, 20, Some(cell(TetrominoType::T))));
        assert_eq!(board.get(10, 0), None);
    }

    #[test]
    fn test_spawned_pieces_do_not_collide_at_rest() {
        let board = empty_board();
        for t in TetrominoType::ALL {
            let mut piece = Piece::new(t);
            for _ in 0..t.rotation_count() {
                assert!(!board.would_collide(&piece, 0, 0), "{t:?} collides at rest");
                assert!(board.is_valid_position(&piece));
                piece.rotate();
            }
        }
    }

    #[test]
    fn test_would_collide_with_walls_and_floor() {
        let board = empty_board();
        // Horizontal I occupies columns 0..=3 of its box, row 2
        let piece = Piece::new(TetrominoType::I).at(0, 0);

        assert!(board.would_collide(&piece, -1, 0));
        assert!(!board.would_collide(&piece, 6, 0));
        assert!(board.would_collide(&piece, 7, 0));
        assert!(!board.would_collide(&piece, 0, 17));
        assert!(board.would_collide(&piece, 0, 18));
    }

    #[test]
    fn test_cells_above_top_only_hit_walls() {
        let mut board = empty_board();
        fill_row(&mut board, 0, &[]);

        // O cells at rows -2 and -1
        let piece = Piece::new(TetrominoType::O).at(3, -4);
        assert!(!board.would_collide(&piece, 0, 0));
        assert!(board.would_collide(&piece, 0, 1));
        assert!(board.would_collide(&piece, -5, 0));
    }

    #[test]
    fn test_would_collide_with_settled_cells() {
        let mut board = empty_board();
        board.set(4, 10, Some(cell(TetrominoType::Z)));

        let piece = vertical_i(4);
        assert!(!board.would_collide(&piece, 0, 5));
        assert!(board.would_collide(&piece, 0, 6));
        assert!(!board.would_collide(&piece, 1, 6));
    }

    #[test]
    fn test_lock_writes_kind_color_and_gimmick() {
        let mut board = empty_board();
        let piece = Piece::special(TetrominoType::O, GimmickKind::Speedup).at(0, 10);

        let result = board.lock(&piece);
        assert!(!result.game_over);
        assert_eq!(board.occupied_count(), 4);

        for block in piece.get_blocks() {
            assert_eq!(board.occupancy(block.x, block.y), TetrominoType::O.tag());
            assert_eq!(board.color(block.x, block.y), GimmickKind::Speedup.get_color());
            assert_eq!(board.gimmick(block.x, block.y), Some(GimmickKind::Speedup));
        }
    }

    #[test]
    fn test_lock_plain_piece_has_no_gimmick_tag() {
        let mut board = empty_board();
        let piece = Piece::new(TetrominoType::S).at(2, 10);

        board.lock(&piece);
        assert!(
            piece
                .get_blocks()
                .iter()
                .all(|b| board.gimmick(b.x, b.y).is_none())
        );
    }

    #[test]
    fn test_lock_above_top_is_game_over_without_mutation() {
        let mut board = empty_board();
        board.set(0, 19, Some(cell(TetrominoType::J)));
        let before = board.clone();

        // O cells at rows -1 and 0
        let piece = Piece::new(TetrominoType::O).at(3, -3);
        let result = board.lock(&piece);

        assert!(result.game_over);
        assert_eq!(board, before);
    }

    #[test]
    fn test_lock_over_settled_cells_is_game_over() {
        let mut board = empty_board();
        board.set(4, 2, Some(cell(TetrominoType::J)));
        let before = board.clone();

        let result = board.lock(&Piece::new(TetrominoType::O));

        assert!(result.game_over);
        assert_eq!(board, before);
    }

    #[test]
    fn test_find_full_rows() {
        let mut board = empty_board();
        fill_row(&mut board, 5, &[]);
        fill_row(&mut board, 10, &[9]);
        fill_row(&mut board, 19, &[]);
        fill_row(&mut board, 12, &[0]);

        assert_eq!(board.find_full_rows(), vec![5, 19]);
    }

    #[test]
    fn test_find_full_rows_on_empty_board() {
        assert!(empty_board().find_full_rows().is_empty());
    }

    #[test]
    fn test_collect_gimmicks_order() {
        let mut board = empty_board();
        fill_row(&mut board, 18, &[]);
        fill_row(&mut board, 19, &[]);
        board.set(7, 19, Some(tagged(GimmickKind::Slowdown)));
        board.set(2, 19, Some(tagged(GimmickKind::GravityShift)));
        board.set(5, 18, Some(tagged(GimmickKind::LineExplosion)));
        // Tag outside the requested rows is ignored
        board.set(1, 3, Some(tagged(GimmickKind::Speedup)));

        let triggers = board.collect_gimmicks(&[19, 18]);
        let found: Vec<_> = triggers.iter().map(|t| (t.kind, t.position)).collect();

        assert_eq!(
            found,
            vec![
                (GimmickKind::LineExplosion, Position::new(5, 18)),
                (GimmickKind::GravityShift, Position::new(2, 19)),
                (GimmickKind::Slowdown, Position::new(7, 19)),
            ]
        );
    }

    #[test]
    fn test_clear_area_removes_gimmick_tags() {
        let mut board = empty_board();
        board.set(1, 19, Some(tagged(GimmickKind::Slowdown)));
        board.set(5, 19, Some(tagged(GimmickKind::GravityShift)));

        let destroyed = board.clear_area(0, 19, 1);

        assert_eq!(
            destroyed,
            vec![(Position::new(1, 19), GimmickKind::Slowdown.get_color())]
        );
        assert_eq!(board.gimmick(1, 19), None);
        assert_eq!(board.gimmick(5, 19), Some(GimmickKind::GravityShift));
    }

    #[test]
    fn test_clear_area_with_oversized_radius_clears_whole_board() {
        for radius in [i32::MAX as usize, usize::MAX] {
            let mut board = empty_board();
            fill_row(&mut board, 0, &[]);
            fill_row(&mut board, 19, &[]);

            let destroyed = board.clear_area(9, 19, radius);

            assert_eq!(destroyed.len(), 2 * BOARD_WIDTH);
            assert_eq!(board.occupied_count(), 0);
        }
    }

    fn patterned_board() -> Board {
        let mut board = empty_board();
        fill_row(&mut board, 3, &[]);
        fill_row(&mut board, 7, &[]);
        board.set(0, 2, Some(cell(TetrominoType::I)));
        board.set(1, 5, Some(cell(TetrominoType::J)));
        board.set(2, 10, Some(cell(TetrominoType::L)));
        board.set(9, 19, Some(cell(TetrominoType::S)));
        board
    }

    #[test]
    fn test_clear_and_compact_is_order_independent() {
        let mut a = patterned_board();
        let mut b = patterned_board();

        a.clear_and_compact(&[3, 7]);
        b.clear_and_compact(&[7, 3]);

        assert_eq!(a, b);
    }

    #[test]
    fn test_clear_and_compact_shifts_rows_above() {
        let mut board = patterned_board();
        let before = board.occupied_count();

        board.clear_and_compact(&[3, 7]);

        assert_eq!(board.occupied_count(), before - 2 * BOARD_WIDTH);
        // Top rows are freed
        assert!(board.rows()[0].iter().all(Option::is_none));
        assert!(board.rows()[1].iter().all(Option::is_none));
        // Above both cleared rows: down by two
        assert_eq!(board.occupancy(0, 4), TetrominoType::I.tag());
        // Between the cleared rows: down by one
        assert_eq!(board.occupancy(1, 6), TetrominoType::J.tag());
        // Below both: unchanged
        assert_eq!(board.occupancy(2, 10), TetrominoType::L.tag());
        assert_eq!(board.occupancy(9, 19), TetrominoType::S.tag());
        assert!(board.find_full_rows().is_empty());
    }

    #[test]
    fn test_clear_area_within_radius() {
        let mut board = empty_board();
        fill_row(&mut board, 18, &[]);
        fill_row(&mut board, 19, &[]);
        board.set(0, 17, Some(cell(TetrominoType::T)));

        let destroyed = board.clear_area(1, 18, 1);

        assert_eq!(destroyed.len(), 7);
        for (x, y) in [(0, 17), (0, 18), (1, 18), (2, 18), (0, 19), (1, 19), (2, 19)] {
            assert!(!board.is_occupied(x, y), "({x}, {y}) should be cleared");
        }
        assert!(board.is_occupied(3, 18));
        assert!(board.is_occupied(3, 19));
    }

    #[test]
    fn test_clear_area_at_corner_stays_in_bounds() {
        let mut board = empty_board();
        fill_row(&mut board, 19, &[]);

        let destroyed = board.clear_area(9, 19, 1);

        assert_eq!(destroyed.len(), 2);
        assert_eq!(board.occupied_count(), 8);
        assert!(
            destroyed
                .iter()
                .all(|(_, color)| *color == TetrominoType::O.get_color())
        );
    }
}
