use crate::core::{Grid, PlayerId, COLS, ROWS};

/// Scan directions, increasing only: horizontal, vertical, down-right
/// diagonal, down-left diagonal. The decreasing directions are covered when
/// the scan reaches the other endpoint of a line.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Finds a four-in-a-row, if any. Deterministic tie-break: lowest row, then
/// lowest column, then direction order.
pub fn find_winner(grid: &Grid) -> Option<PlayerId> {
    winning_line(grid).map(|(player, _)| player)
}

/// Like [`find_winner`], but also yields the four winning cells for
/// highlighting.
pub fn winning_line(grid: &Grid) -> Option<(PlayerId, [(usize, usize); 4])> {
    for row in 0..ROWS {
        for col in 0..COLS {
            let player = match grid.get(row, col) {
                Some(p) => p,
                None => continue,
            };
            for &(dr, dc) in &DIRECTIONS {
                if let Some(line) = line_from(grid, row, col, dr, dc, player) {
                    return Some((player, line));
                }
            }
        }
    }
    None
}

fn line_from(
    grid: &Grid,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    player: PlayerId,
) -> Option<[(usize, usize); 4]> {
    let mut line = [(row, col); 4];
    for (i, cell) in line.iter_mut().enumerate().skip(1) {
        let r = row as isize + dr * i as isize;
        let c = col as isize + dc * i as isize;
        if r < 0 || r >= ROWS as isize || c < 0 || c >= COLS as isize {
            return None;
        }
        if grid.get(r as usize, c as usize) != Some(player) {
            return None;
        }
        *cell = (r as usize, c as usize);
    }
    Some(line)
}

/// Columns that still accept a drop.
pub fn legal_columns(grid: &Grid) -> Vec<usize> {
    (0..COLS).filter(|&col| !grid.is_column_full(col)).collect()
}
