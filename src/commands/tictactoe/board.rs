//! 3x3 board with row-major cells and win/draw detection.

/// A player mark. The human (or invite creator) is always X and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Mark::X => "✖️",
            Mark::O => "⭕",
        }
    }
}

/// The eight winning lines, as row-major cell indices.
pub const TRIPLES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Mark>; 9],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Mark>; 9]) -> Self {
        Self { cells }
    }

    pub fn get(&self, cell: usize) -> Option<Mark> {
        self.cells.get(cell).copied().flatten()
    }

    /// Place a mark. Returns false (and changes nothing) when the cell is
    /// out of range or already taken.
    pub fn place(&mut self, cell: usize, mark: Mark) -> bool {
        match self.cells.get_mut(cell) {
            Some(slot) if slot.is_none() => {
                *slot = Some(mark);
                true
            }
            _ => false,
        }
    }

    pub fn winner(&self) -> Option<Mark> {
        for [a, b, c] in TRIPLES {
            if let Some(mark) = self.cells[a]
                && self.cells[b] == Some(mark)
                && self.cells[c] == Some(mark)
            {
                return Some(mark);
            }
        }
        None
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        (0..9).filter(|&i| self.cells[i].is_none()).collect()
    }

    /// Empty cells that would complete a triple for `mark` if taken now.
    pub fn winning_cells(&self, mark: Mark) -> Vec<usize> {
        let mut out = Vec::new();
        for line in TRIPLES {
            let owned = line.iter().filter(|&&i| self.cells[i] == Some(mark)).count();
            let open: Vec<usize> = line
                .iter()
                .copied()
                .filter(|&i| self.cells[i].is_none())
                .collect();
            if owned == 2
                && let [cell] = open[..]
                && !out.contains(&cell)
            {
                out.push(cell);
            }
        }
        out
    }
}
