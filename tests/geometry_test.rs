//! Shape, grid and snap properties checked across the whole shape table.

use std::collections::HashSet;

use tui_tiles::core::{find_anchor, get_shape, Grid, OccupancySnapshot, PlacementError, SHAPES};
use tui_tiles::engine::{CatalogError, LevelCatalog, LevelError};
use tui_tiles::types::{Rotation, Viewport, STICK_THRESHOLD, TILE_SIZE};

#[test]
fn rotated_offsets_are_a_bijection_inside_the_rotated_box() {
    for (id, shape) in SHAPES.iter().enumerate() {
        for rotation in Rotation::ALL {
            let (w, h) = shape.rotated_size(rotation);
            let mut seen = HashSet::new();
            for local in 0..shape.cell_count() {
                let (col, row) = shape.cell_offset(rotation, local).unwrap();
                assert!(col < w && row < h, "shape {id} {rotation:?} local {local}");
                assert!(seen.insert((col, row)), "shape {id} {rotation:?} repeats");
            }
            assert!(shape.cell_offset(rotation, shape.cell_count()).is_none());
        }
    }
}

#[test]
fn four_quarter_turns_are_identity() {
    for shape in SHAPES.iter() {
        for start in Rotation::ALL {
            let mut r = start;
            for _ in 0..4 {
                r = r.rotate_cw();
            }
            assert_eq!(r, start);
            for local in 0..shape.cell_count() {
                assert_eq!(shape.cell_offset(r, local), shape.cell_offset(start, local));
            }
        }
    }
}

#[test]
fn placements_crossing_any_edge_fail_validation() {
    let grid = Grid::new(4, 3, Viewport::new(1280.0, 768.0));
    for shape in SHAPES.iter() {
        for rotation in Rotation::ALL {
            let (w, h) = shape.rotated_size(rotation);
            for cell in 0..grid.cell_count() {
                let col = (cell % 4) as u8;
                let row = (cell / 4) as u8;
                let fits = col + w <= 4 && row + h <= 3;
                let result = grid.validate_placement(shape, cell, rotation);
                assert_eq!(result.is_ok(), fits, "cell {cell} {rotation:?} {w}x{h}");
                if !fits {
                    assert_eq!(result.unwrap_err().code(), "out_of_bounds");
                }
            }
        }
    }
}

#[test]
fn overlap_is_reported_with_the_blocking_cell() {
    let mut grid = Grid::new(3, 3, Viewport::new(640.0, 480.0));
    let square = get_shape(5).unwrap();
    grid.commit(square, 4, Rotation::Deg0);
    let err = grid.validate_placement(square, 0, Rotation::Deg0).unwrap_err();
    assert_eq!(err, PlacementError::Overlap { cell: 4 });
    assert_eq!(err.code(), "overlap");
}

#[test]
fn commit_release_cycles_do_not_drift() {
    let mut grid = Grid::new(5, 5, Viewport::new(1280.0, 768.0));
    let tall = get_shape(6).unwrap();
    for _ in 0..50 {
        grid.commit(tall, 0, Rotation::Deg90);
        assert_eq!(grid.tiles_remaining(), 19);
        grid.release(tall, 0, Rotation::Deg90);
        assert_eq!(grid.tiles_remaining(), 25);
    }
    assert!(grid.occupancy().iter().all(|c| *c == 0));
}

#[test]
fn anchor_search_is_idempotent() {
    let grid = Grid::new(5, 5, Viewport::new(1280.0, 768.0));
    let (ax, ay) = grid.anchor(12).unwrap();
    let pos = (ax + 20.0, ay - 12.0);
    let a = find_anchor(grid.anchors(), pos, (128.0, 64.0), STICK_THRESHOLD);
    let b = find_anchor(grid.anchors(), pos, (128.0, 64.0), STICK_THRESHOLD);
    assert_eq!(a, b);
    assert_eq!(a.unwrap().target, (ax, ay));
}

#[test]
fn anchors_follow_row_stride_on_wide_grids() {
    let grid = Grid::new(4, 2, Viewport::new(1280.0, 768.0));
    let (ox, oy) = grid.origin();
    assert_eq!(grid.anchor(5), Some((ox + TILE_SIZE, oy + TILE_SIZE)));
    assert_eq!(grid.anchor(7), Some((ox + 3.0 * TILE_SIZE, oy + TILE_SIZE)));
    assert_eq!(grid.anchor(8), None);
}

#[test]
fn occupancy_snapshot_serializes_as_json() {
    let mut grid = Grid::new(2, 2, Viewport::new(640.0, 480.0));
    grid.commit(get_shape(4).unwrap(), 0, Rotation::Deg0);
    let snap = OccupancySnapshot::from_grid(&grid);
    let json: serde_json::Value = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["tiles_remaining"], 2);
    assert_eq!(json["cells"], serde_json::json!([1, 1, 0, 0]));
}

#[test]
fn catalog_json_is_validated_per_level() {
    let ok = LevelCatalog::from_json_str(
        r#"[{"name":"Pair","tiles_x":2,"tiles_y":1,"pieces":[4]},{"tiles_x":1,"tiles_y":1,"pieces":[0]}]"#,
    )
    .unwrap();
    assert_eq!(ok.len(), 2);
    assert_eq!(ok.get(1).unwrap().name, "");
    assert_eq!(ok.next_index(1), 0);
    assert_eq!(ok.prev_index(0), 1);

    let bad = LevelCatalog::from_json_str(r#"[{"tiles_x":2,"tiles_y":2,"pieces":[0,0]}]"#);
    match bad {
        Err(CatalogError::InvalidLevel { index: 0, source, .. }) => {
            assert_eq!(source, LevelError::DuplicatePiece { id: 0 })
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(LevelCatalog::from_json_str("[]"), Err(CatalogError::Empty)));
    assert!(matches!(LevelCatalog::from_json_str("{"), Err(CatalogError::Parse(_))));
}
