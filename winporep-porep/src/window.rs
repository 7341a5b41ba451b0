//! Window/stagger scheduling: which DRG instances cover which window, and
//! where within those DRGs a given data node's contributing labels live.

/// Number of windows covering `num_nodes` nodes of `window_size` each,
/// allowing a partial final window.
pub fn num_windows(num_nodes: usize, window_size: usize) -> usize {
    if num_nodes == 0 {
        return 0;
    }
    (num_nodes + window_size - 1) / window_size
}

/// The windows whose DRGs contribute labels to window `w`, in stagger order:
/// `w`, `w-1`, `w-2`, ..., wrapping around the tail of the stream.
pub fn window_drgs(w: usize, num_windows: usize, drg_stagger: usize) -> Vec<usize> {
    (0..drg_stagger)
        .map(|s| (w + num_windows - (s % num_windows)) % num_windows)
        .collect()
}

/// The DRG-local index of the label that covers data node `i` when drawing
/// from the DRG seeded for window `drg_w`.
///
/// `i` belongs to data-window `dw = i / window_size` with in-window offset
/// `off = i % window_size`; `shift` is the (non-negative) window distance
/// from `drg_w` to `dw`, and the label lives `shift` window-lengths into
/// that DRG's table.
pub fn drg_index(i: usize, drg_w: usize, window_size: usize, num_windows: usize) -> usize {
    let dw = i / window_size;
    let off = i % window_size;
    let shift = (dw + num_windows - drg_w % num_windows) % num_windows;
    shift * window_size + off
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_windows_rounds_up() {
        assert_eq!(num_windows(128, 4), 32);
        assert_eq!(num_windows(130, 4), 33);
        assert_eq!(num_windows(0, 4), 0);
    }

    #[test]
    fn wraparound_borrows_from_the_tail() {
        // P5: num_windows = 4, stagger = 2 -> window 0 uses {0, 3}, not {0, -1}.
        assert_eq!(window_drgs(0, 4, 2), vec![0, 3]);
    }

    #[test]
    fn wraparound_scenario_three_windows_stagger_two() {
        assert_eq!(window_drgs(0, 3, 2), vec![0, 2]);
    }

    #[test]
    fn drg_index_mapping_matches_worked_example() {
        // window_size = 16, num_windows = 5, node 50 -> dw = 3, off = 2;
        // against drg window 1: shift = (3 - 1) mod 5 = 2, drg_idx = 34.
        assert_eq!(drg_index(50, 1, 16, 5), 34);
    }

    #[test]
    fn drg_index_stays_within_drg_size() {
        let window_size = 16;
        let num_windows_ = 5;
        let drg_stagger = 3;
        for dw in 0..num_windows_ {
            for drg_w in window_drgs(dw, num_windows_, drg_stagger) {
                for off in 0..window_size {
                    let i = dw * window_size + off;
                    let idx = drg_index(i, drg_w, window_size, num_windows_);
                    assert!(idx < window_size * drg_stagger);
                }
            }
        }
    }
}
