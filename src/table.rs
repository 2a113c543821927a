//! Whitespace-delimited numeric tables, one row per resolution ε.
//!
//! The layout follows `numpy.loadtxt`: `#` starts a comment, blank
//! lines are skipped and every row has the same number of fields.
//! Columns 1 to 4 are ε, C(ε), D(ε) and I(ε); further columns are
//! kept but never plotted.

use std::{fs, path::Path};
use ndarray::{s, Array2, ArrayView1};
use crate::Error;

/// Columns of a resolution table, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Epsilon,
    /// Number of ε-connected components.
    C,
    /// Largest diameter of an ε-connected component.
    D,
    /// Number of isolated points.
    I,
}

impl Column {
    /// 0-based position in the table.
    pub fn index(self) -> usize {
        match self {
            Column::Epsilon => 0,
            Column::C => 1,
            Column::D => 2,
            Column::I => 3,
        }
    }

    /// Mathtext symbol used in axis labels.
    pub fn symbol(self) -> &'static str {
        match self {
            Column::Epsilon => r"\epsilon",
            Column::C => "C",
            Column::D => "D",
            Column::I => "I",
        }
    }
}

/// Slopes appended by the producer of the table in its fifth column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub gamma: f64,
    pub delta: f64,
    /// Only written by producers that also fit the mean number of
    /// neighbours within ε.
    pub kdist: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Table {
    data: Array2<f64>,
    // 1-based source line of each row, for error messages.
    lines: Vec<usize>,
}

impl Table {
    /// Read and parse the table stored at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Table, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        Table::parse(&text)
    }

    /// Parse a table from its textual form.
    ///
    /// # Example
    ///
    /// ```
    /// use epsplot::{Column, Table};
    /// let t = Table::parse("0.1 10 0.5 20\n0.01 100 0.2 200\n")?;
    /// assert_eq!(t.len(), 2);
    /// assert_eq!(t.column(Column::I).to_vec(), vec![20., 200.]);
    /// # Ok::<(), epsplot::Error>(())
    /// ```
    pub fn parse(text: &str) -> Result<Table, Error> {
        let mut values = Vec::new();
        let mut lines = Vec::new();
        let mut width = None;
        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let content = match raw.find('#') {
                Some(c) => &raw[..c],
                None => raw,
            };
            let fields: Vec<&str> = content.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            match width {
                None => width = Some(fields.len()),
                Some(w) if w != fields.len() =>
                    return Err(Error::RaggedRow { line, expected: w,
                                                  found: fields.len() }),
                Some(_) => (),
            }
            for (c, tok) in fields.iter().enumerate() {
                let v: f64 = tok.parse().map_err(|_| Error::Parse {
                    line, column: c + 1, token: tok.to_string() })?;
                values.push(v);
            }
            lines.push(line);
        }
        let width = width.ok_or(Error::EmptyTable)?;
        if width < 4 {
            return Err(Error::TooFewColumns { found: width });
        }
        let data = Array2::from_shape_fn((lines.len(), width),
                                         |(r, c)| values[r * width + c]);
        Ok(Table { data, lines })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Number of columns, including the unplotted ones.
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn column(&self, col: Column) -> ArrayView1<'_, f64> {
        self.data.column(col.index())
    }

    /// Check that every ε can be placed on a logarithmic axis.
    /// NaN is rejected as well.
    pub fn check_epsilon(&self) -> Result<(), Error> {
        let eps = self.column(Column::Epsilon);
        match eps.iter().position(|&e| !(e > 0.)) {
            Some(r) => Err(Error::NonPositiveEpsilon {
                line: self.lines[r], value: eps[r] }),
            None => Ok(()),
        }
    }

    /// Number of values of `col` that are not strictly positive.
    pub fn non_positive(&self, col: Column) -> usize {
        self.column(col).iter().filter(|&&v| v <= 0.).count()
    }

    /// The fitted slopes carried in the fifth column, if any.
    pub fn coefficients(&self) -> Option<Coefficients> {
        if self.width() < 5 || self.len() < 2 {
            return None;
        }
        let coefs = self.data.slice(s![.., 4]);
        Some(Coefficients {
            gamma: coefs[0usize],
            delta: coefs[1usize],
            kdist: if self.width() >= 6 && self.len() >= 3 {
                Some(coefs[2usize])
            } else {
                None
            },
        })
    }
}
