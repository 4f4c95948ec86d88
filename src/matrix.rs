//! Reading the connectivity matrix.
//!
//! Input is a node count followed by that many rows of that many integers,
//! separated by any whitespace. Values are pulled one token at a time, so a
//! row may be split across lines or several rows may share one line.

use crate::error::{InputError, Result, ValidationError};
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// How matrix values other than 0 and 1 are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryPolicy {
    /// Only 0 and 1 are accepted
    #[default]
    Strict,
    /// Any non-zero value is an edge
    Lenient,
}

impl EntryPolicy {
    /// Decides whether `value` at `(row, column)` is an edge
    pub fn edge(
        &self,
        row: usize,
        column: usize,
        value: i64,
    ) -> std::result::Result<bool, ValidationError> {
        match (self, value) {
            (_, 0) => Ok(false),
            (_, 1) => Ok(true),
            (EntryPolicy::Lenient, _) => Ok(true),
            (EntryPolicy::Strict, _) => Err(ValidationError::InvalidEntry { row, column, value }),
        }
    }
}

/// Square matrix of edge flags, `cells[i][j]` meaning an edge from i to j
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    cells: Vec<Vec<bool>>,
}

impl AdjacencyMatrix {
    pub fn from_rows(
        rows: Vec<Vec<i64>>,
        policy: EntryPolicy,
    ) -> std::result::Result<Self, ValidationError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(ValidationError::NotSquare {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }

            let flags = values
                .into_iter()
                .enumerate()
                .map(|(column, value)| policy.edge(row, column, value))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            cells.push(flags);
        }

        Ok(Self { cells })
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.cells
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(false)
    }
}

/// Whitespace-separated tokens read lazily from a line-oriented source
pub struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input
    pub fn next_token(&mut self) -> std::result::Result<Option<String>, InputError> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    /// Next token parsed as an integer; `what` names the value in errors
    pub fn next_integer(&mut self, what: &str) -> std::result::Result<i64, InputError> {
        match self.next_token()? {
            Some(token) => token
                .parse()
                .map_err(|_| InputError::not_an_integer(what, token)),
            None => Err(InputError::unexpected_eof(what)),
        }
    }
}

/// Prompts for and reads the node count and matrix.
///
/// Values are checked against `policy` as soon as they are read, so a bad
/// entry stops the session before the remaining rows are requested.
pub fn read_matrix<R: BufRead, W: Write>(
    tokens: &mut Tokens<R>,
    out: &mut W,
    policy: EntryPolicy,
) -> Result<AdjacencyMatrix> {
    write!(out, "Enter number of nodes: ")?;
    out.flush()?;

    let count = tokens.next_integer("number of nodes")?;
    let n = usize::try_from(count).map_err(|_| InputError::NegativeNodeCount(count))?;

    writeln!(
        out,
        "Enter the connectivity matrix (each row of {} values, 1 for edge, 0 for no edge):",
        n
    )?;

    let mut cells = vec![];
    for i in 0..n {
        write!(out, "Row {}: ", i)?;
        out.flush()?;

        let mut row = vec![];
        for j in 0..n {
            let value = tokens.next_integer(&format!("row {}, column {}", i, j))?;
            row.push(policy.edge(i, j, value)?);
        }
        cells.push(row);
    }

    Ok(AdjacencyMatrix { cells })
}
