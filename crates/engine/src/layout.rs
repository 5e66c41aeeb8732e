//! Staging layout for pieces that are not on the grid
//!
//! Pieces flow left to right in rows. Each row has a left run that stops at the
//! backdrop and a right run that starts after it; a piece that does not fit in
//! the canvas width starts a new row. Each finished run is centered in its free
//! space, and each side is then centered vertically on the canvas.

use tui_tiles_types::{Viewport, STAGING_MARGIN};

/// Compute the staged top-left position of every piece.
///
/// `sizes` are the pieces' current pixel sizes in roster order;
/// `backdrop_size` is the side of the square backdrop centered on the canvas.
pub fn stage_positions(sizes: &[(f32, f32)], viewport: Viewport, backdrop_size: f32) -> Vec<(f32, f32)> {
    let margin = STAGING_MARGIN;
    let backdrop_x = (viewport.width - backdrop_size) * 0.5;
    let right_limit = viewport.width - margin;

    let mut out: Vec<(f32, f32)> = Vec::with_capacity(sizes.len());
    let mut on_left: Vec<bool> = Vec::with_capacity(sizes.len());

    let mut x = margin;
    let mut left_y = margin;
    let mut right_y = margin;
    let mut run_start = 0;
    let mut left_max_h: f32 = 0.0;
    let mut right_max_h: f32 = 0.0;
    let mut left_run = true;

    for (i, &(w, h)) in sizes.iter().enumerate() {
        let width = w + margin;

        if x + width > right_limit {
            // Row full: center the finished run against the right edge.
            let row_height = if left_run { left_max_h } else { right_max_h };
            center_run(&mut out, sizes, run_start, i, row_height, (right_limit - x) * 0.5);
            x = margin;
            left_run = true;
            run_start = i;
            left_y += left_max_h + margin;
            right_y += right_max_h + margin;
            left_max_h = 0.0;
            right_max_h = 0.0;
        } else if left_run && x + width > backdrop_x {
            // Left run reaches the backdrop: jump past it.
            center_run(&mut out, sizes, run_start, i, left_max_h, (backdrop_x - x) * 0.5);
            x = backdrop_x + backdrop_size;
            left_run = false;
            run_start = i;
        }

        if left_run {
            left_max_h = left_max_h.max(h);
        } else {
            right_max_h = right_max_h.max(h);
        }

        out.push((x, if left_run { left_y } else { right_y }));
        on_left.push(left_run);
        x += width;

        if i + 1 == sizes.len() {
            left_y += left_max_h + margin;
            right_y += right_max_h + margin;
        }
    }

    let left_shift = (viewport.height - left_y) * 0.5;
    let right_shift = (viewport.height - right_y) * 0.5;
    for (pos, left) in out.iter_mut().zip(on_left) {
        pos.1 += if left { left_shift } else { right_shift };
    }

    out
}

fn center_run(
    out: &mut [(f32, f32)],
    sizes: &[(f32, f32)],
    start: usize,
    end: usize,
    row_height: f32,
    shift_x: f32,
) {
    for j in start..end {
        out[j].1 += (row_height - sizes[j].1) * 0.5;
        out[j].0 += shift_x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_piece_stays_left_and_centers_vertically() {
        let pos = stage_positions(&[(64.0, 192.0)], Viewport::new(1280.0, 768.0), 384.0);
        // left_y ends at 20 + 192 + 20 = 232, shift = (768 - 232) / 2 = 268
        assert_eq!(pos, vec![(20.0, 288.0)]);
    }

    #[test]
    fn pieces_jump_past_the_backdrop() {
        // backdrop 512 wide starting at 384; two 192-wide pieces fit on the left.
        let sizes = [(192.0, 128.0), (128.0, 128.0), (128.0, 192.0), (192.0, 192.0)];
        let pos = stage_positions(&sizes, Viewport::new(1280.0, 768.0), 512.0);

        // Left run: x = 20, 232; the third piece would cross 384.
        // Run centered by (384 - 380) / 2 = 2.
        assert_eq!(pos[0].0, 22.0);
        assert_eq!(pos[1].0, 234.0);
        // Right run starts after the backdrop.
        assert_eq!(pos[2].0, 896.0);
        assert_eq!(pos[3].0, 896.0 + 148.0);
        assert!(pos.iter().all(|p| p.1 > 0.0));
    }

    #[test]
    fn narrow_canvas_wraps_rows() {
        // A canvas so narrow that every piece starts a new row on the left.
        let sizes = [(64.0, 64.0), (64.0, 64.0), (64.0, 64.0)];
        let pos = stage_positions(&sizes, Viewport::new(100.0, 600.0), 0.0);
        assert_eq!(pos.len(), 3);
        let ys: Vec<f32> = pos.iter().map(|p| p.1).collect();
        assert!(ys[0] < ys[1] && ys[1] < ys[2]);
    }

    #[test]
    fn wrapped_left_run_centers_on_its_own_height() {
        // backdrop_x = 150, right_limit = 280. The third piece wraps before the
        // left run ever reaches the backdrop.
        let sizes = [(40.0, 40.0), (40.0, 80.0), (180.0, 30.0)];
        let pos = stage_positions(&sizes, Viewport::new(300.0, 600.0), 0.0);

        // Run shifted by (280 - 140) / 2 = 70; rows end at left_y = 170,
        // so everything moves down by (600 - 170) / 2 = 215.
        assert_eq!(pos[0], (90.0, 255.0));
        assert_eq!(pos[1], (150.0, 235.0));
        assert_eq!(pos[2], (20.0, 335.0));
        // Both pieces of the wrapped run share a vertical center.
        assert_eq!(pos[0].1 + 20.0, pos[1].1 + 40.0);
    }

    #[test]
    fn empty_roster() {
        assert!(stage_positions(&[], Viewport::new(800.0, 600.0), 320.0).is_empty());
    }
}
