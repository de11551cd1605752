use crate::error::{CoreError, CoreResult};
use crate::symbols::Symbol;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawGridSpec")]
pub struct GridSpec {
    rows: usize,
    cols: usize,
}

impl GridSpec {
    pub fn new(rows: usize, cols: usize) -> CoreResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(CoreError::InvalidConfig(format!(
                "grid dimensions must be positive, got {rows}x{cols}"
            )));
        }
        Ok(Self { rows, cols })
    }

    pub fn default_5x5() -> Self {
        Self { rows: 5, cols: 5 }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}

#[derive(Deserialize)]
struct RawGridSpec {
    rows: usize,
    cols: usize,
}

impl TryFrom<RawGridSpec> for GridSpec {
    type Error = CoreError;

    fn try_from(raw: RawGridSpec) -> CoreResult<Self> {
        GridSpec::new(raw.rows, raw.cols)
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::default_5x5()
    }
}

/// Row-major symbol matrix. Row 0 is the top of the reels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    rows: Vec<Vec<Symbol>>,
}

#[derive(Deserialize)]
struct RawGrid {
    rows: Vec<Vec<Symbol>>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = CoreError;

    fn try_from(raw: RawGrid) -> CoreResult<Self> {
        Grid::from_rows(raw.rows)
    }
}

impl Grid {
    /// Builds a grid from rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<Symbol>>) -> CoreResult<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || width == 0 {
            return Err(CoreError::InvalidConfig("grid has no cells".into()));
        }
        if rows.iter().any(|r| r.len() != width) {
            return Err(CoreError::InvalidConfig("grid rows differ in length".into()));
        }
        Ok(Self { rows })
    }

    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<Symbol>>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<Symbol>] {
        &self.rows
    }

    /// One column, top to bottom.
    pub fn column(&self, col: usize) -> Vec<Symbol> {
        self.rows.iter().filter_map(|r| r.get(col).copied()).collect()
    }

    pub fn columns(&self) -> impl Iterator<Item = Vec<Symbol>> + '_ {
        (0..self.col_count()).map(move |c| self.column(c))
    }

    pub fn tags(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|s| s.tag().to_string()).collect())
            .collect()
    }
}
