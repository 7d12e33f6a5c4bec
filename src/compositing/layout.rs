use std::collections::BTreeSet;
use std::fmt;

/// A grid shape candidate for arranging a sequence of images.
///
/// A pair and its transpose are distinct options: a 2x3 sheet is wide, a
/// 3x2 sheet is tall, and the choice between them belongs to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutOption {
    pub rows: u32,
    pub cols: u32,
}

impl LayoutOption {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Total number of grid positions.
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Whether `count` images fit into this grid.
    pub fn holds(&self, count: usize) -> bool {
        self.cell_count() >= count
    }

    /// Cells left transparent when `count` images are placed.
    pub fn blank_cells(&self, count: usize) -> usize {
        self.cell_count().saturating_sub(count)
    }
}

impl fmt::Display for LayoutOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Enumerate every sensible grid shape for `count` images, most compact
/// shapes first.
///
/// Exact factor pairs are generated for all divisors of `count`, then a
/// near-square fallback `(⌊√count⌋, ⌈count / ⌊√count⌋⌉)` is added so prime
/// counts still get a compact option instead of only a 1xN strip. The
/// result is ranked ascending by `(|rows - cols|, rows * cols)` with ties
/// between a shape and its transpose broken by row count, making the
/// ordering total and deterministic.
///
/// `count == 0` never reaches this function through the shell (empty
/// folders are rejected during discovery) and yields an empty vector.
pub fn layout_options(count: usize) -> Vec<LayoutOption> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as u32;
    let mut shapes: BTreeSet<(u32, u32)> = BTreeSet::new();

    // Exact factor pairs; (1, n) and (n, 1) are always among them.
    for i in 1..=n {
        if n % i == 0 {
            shapes.insert((i, n / i));
        }
    }

    // Near-square fallback for counts with no compact divisor pair.
    let side = integer_sqrt(n).max(1);
    shapes.insert((side, n.div_ceil(side)));

    // Unreachable in practice since the divisor scan always yields (1, n).
    if shapes.is_empty() {
        shapes.insert((1, n));
        shapes.insert((n.div_ceil(2), 2));
    }

    let mut options: Vec<LayoutOption> = shapes
        .into_iter()
        .map(|(rows, cols)| LayoutOption { rows, cols })
        .collect();
    options.sort_by_key(|o| (o.rows.abs_diff(o.cols), o.cell_count(), o.rows));
    options
}

fn integer_sqrt(n: u32) -> u32 {
    let n = u64::from(n);
    let mut side = (n as f64).sqrt() as u64;
    // f64 rounding can land one off near perfect squares.
    while side > 0 && side * side > n {
        side -= 1;
    }
    while (side + 1) * (side + 1) <= n {
        side += 1;
    }
    side as u32
}
