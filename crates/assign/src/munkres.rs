use crate::{Assignment, AssignError, Cost, CostMatrix, FORBIDDEN};

/// Solves the minimum-cost square assignment problem over `costs`.
///
/// Entries equal to [`FORBIDDEN`] are never part of a returned assignment;
/// if every perfect matching would need one, the result is
/// `Err(AssignError::Unsatisfiable)`. The caller's matrix is never mutated.
pub fn solve(costs: &CostMatrix) -> Result<Assignment, AssignError> {
    let n = costs.size();
    match n {
        0 => return Ok(Assignment { row_to_col: Vec::new(), total: 0 }),
        1 => {
            if costs.is_forbidden(0, 0) {
                return Err(AssignError::Unsatisfiable);
            }
            return Ok(Assignment { row_to_col: vec![0], total: costs.get(0, 0) });
        }
        _ => {}
    }

    let mut work = Munkres::new(costs);
    work.reduce_rows()?;
    work.star_initial_zeros();
    loop {
        work.cover_starred_columns();
        if work.covered_columns() == n {
            return Ok(work.extract(costs));
        }
        work.prime_and_augment()?;
    }
}

const NONE: u8 = 0;
const STAR: u8 = 1;
const PRIME: u8 = 2;

struct Munkres {
    n: usize,
    cost: Vec<Cost>,
    mark: Vec<u8>,
    row_cover: Vec<bool>,
    col_cover: Vec<bool>,
}

impl Munkres {
    fn new(costs: &CostMatrix) -> Self {
        let n = costs.size();
        Self {
            n,
            cost: costs.cells().to_vec(),
            mark: vec![NONE; n * n],
            row_cover: vec![false; n],
            col_cover: vec![false; n],
        }
    }

    fn at(&self, row: usize, col: usize) -> Cost {
        self.cost[row * self.n + col]
    }

    fn admissible(&self, row: usize, col: usize) -> bool {
        self.at(row, col) != FORBIDDEN
    }

    fn mark_at(&self, row: usize, col: usize) -> u8 {
        self.mark[row * self.n + col]
    }

    fn set_mark(&mut self, row: usize, col: usize, mark: u8) {
        self.mark[row * self.n + col] = mark;
    }

    fn reduce_rows(&mut self) -> Result<(), AssignError> {
        for row in 0..self.n {
            let mut min = None;
            for col in 0..self.n {
                if self.admissible(row, col) {
                    let value = self.at(row, col);
                    min = Some(min.map_or(value, |best: Cost| best.min(value)));
                }
            }
            let Some(min) = min else {
                return Err(AssignError::Unsatisfiable);
            };
            if min == 0 {
                continue;
            }
            for col in 0..self.n {
                if self.admissible(row, col) {
                    self.cost[row * self.n + col] -= min;
                }
            }
        }
        Ok(())
    }

    fn star_initial_zeros(&mut self) {
        let mut row_used = vec![false; self.n];
        let mut col_used = vec![false; self.n];
        for row in 0..self.n {
            for col in 0..self.n {
                if !row_used[row]
                    && !col_used[col]
                    && self.admissible(row, col)
                    && self.at(row, col) == 0
                {
                    self.set_mark(row, col, STAR);
                    row_used[row] = true;
                    col_used[col] = true;
                }
            }
        }
    }

    fn cover_starred_columns(&mut self) {
        for col in 0..self.n {
            self.col_cover[col] = (0..self.n).any(|row| self.mark_at(row, col) == STAR);
        }
    }

    fn covered_columns(&self) -> usize {
        self.col_cover.iter().filter(|covered| **covered).count()
    }

    fn find_uncovered_zero(&self) -> Option<(usize, usize)> {
        for row in 0..self.n {
            if self.row_cover[row] {
                continue;
            }
            for col in 0..self.n {
                if !self.col_cover[col] && self.admissible(row, col) && self.at(row, col) == 0 {
                    return Some((row, col));
                }
            }
        }
        None
    }

    fn star_in_row(&self, row: usize) -> Option<usize> {
        (0..self.n).find(|&col| self.mark_at(row, col) == STAR)
    }

    fn star_in_col(&self, col: usize) -> Option<usize> {
        (0..self.n).find(|&row| self.mark_at(row, col) == STAR)
    }

    fn prime_in_row(&self, row: usize) -> Option<usize> {
        (0..self.n).find(|&col| self.mark_at(row, col) == PRIME)
    }

    fn prime_and_augment(&mut self) -> Result<(), AssignError> {
        loop {
            match self.find_uncovered_zero() {
                Some((row, col)) => {
                    self.set_mark(row, col, PRIME);
                    if let Some(star_col) = self.star_in_row(row) {
                        self.row_cover[row] = true;
                        self.col_cover[star_col] = false;
                    } else {
                        self.augment_from(row, col);
                        return Ok(());
                    }
                }
                None => self.adjust_uncovered()?,
            }
        }
    }

    /// Flips the alternating prime/star path starting at a primed zero whose
    /// row carries no star, growing the matching by one.
    fn augment_from(&mut self, row: usize, col: usize) {
        let mut path = vec![(row, col)];
        let mut col = col;
        while let Some(star_row) = self.star_in_col(col) {
            path.push((star_row, col));
            let prime_col = self
                .prime_in_row(star_row)
                .unwrap_or(col);
            path.push((star_row, prime_col));
            col = prime_col;
        }
        for (row, col) in path {
            let mark = if self.mark_at(row, col) == STAR { NONE } else { STAR };
            self.set_mark(row, col, mark);
        }
        for cell in self.mark.iter_mut() {
            if *cell == PRIME {
                *cell = NONE;
            }
        }
        self.row_cover.iter_mut().for_each(|covered| *covered = false);
        self.col_cover.iter_mut().for_each(|covered| *covered = false);
    }

    /// No admissible uncovered zero remains: shift the smallest uncovered
    /// value between the covered and uncovered regions, which manufactures a
    /// new zero without changing which assignment is optimal. Fewer than n
    /// lines are covered here, so an empty uncovered region means the
    /// admissible cells admit no perfect matching at all.
    fn adjust_uncovered(&mut self) -> Result<(), AssignError> {
        let mut min = None;
        for row in 0..self.n {
            if self.row_cover[row] {
                continue;
            }
            for col in 0..self.n {
                if !self.col_cover[col] && self.admissible(row, col) {
                    let value = self.at(row, col);
                    min = Some(min.map_or(value, |best: Cost| best.min(value)));
                }
            }
        }
        let Some(min) = min else {
            return Err(AssignError::Unsatisfiable);
        };
        for row in 0..self.n {
            for col in 0..self.n {
                if !self.admissible(row, col) {
                    continue;
                }
                let index = row * self.n + col;
                if self.row_cover[row] && self.col_cover[col] {
                    // Clamp below the sentinel so a cell can never alias it.
                    self.cost[index] = self.cost[index].saturating_add(min).min(FORBIDDEN - 1);
                } else if !self.row_cover[row] && !self.col_cover[col] {
                    self.cost[index] -= min;
                }
            }
        }
        Ok(())
    }

    fn extract(&self, costs: &CostMatrix) -> Assignment {
        let mut row_to_col = vec![0usize; self.n];
        let mut total: Cost = 0;
        for row in 0..self.n {
            for col in 0..self.n {
                if self.mark_at(row, col) == STAR {
                    row_to_col[row] = col;
                    total = total.saturating_add(costs.get(row, col));
                }
            }
        }
        Assignment { row_to_col, total }
    }
}
