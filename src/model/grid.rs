use crate::Result;
use anyhow::bail;
use tracing::debug;

/// A rectangular-ish block of string cells as read from a sheet or file, with knowledge of
/// whether its first row is a header row.
///
/// This is the boundary where structural problems are reported. Past this point, reads that fall
/// outside a row yield an empty cell instead of an error.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    has_header: bool,
    /// Leading rows that are not data: a header row, or the blank row that signals its absence.
    skip: usize,
    width: usize,
}

impl Grid {
    /// Builds a grid from raw rows.
    ///
    /// When `has_header` is `None` the first row is taken to be a header row unless every one of
    /// its cells is blank, which is how header-less sheets are signalled. That blank row is not
    /// part of [`Grid::data`].
    ///
    /// # Errors
    /// - The data set is empty.
    /// - A header row is present and a data row is longer than it.
    pub fn new<S, R, I>(rows: I, has_header: Option<bool>) -> Result<Self>
    where
        S: Into<String>,
        R: IntoIterator<Item = S>,
        I: IntoIterator<Item = R>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        let first = match rows.first() {
            Some(first) => first,
            None => bail!("An empty data set cannot be read as a grid"),
        };

        let (has_header, skip) = match has_header {
            Some(has_header) => (has_header, usize::from(has_header)),
            None if is_blank_row(first) => (false, 1),
            None => (true, 1),
        };
        debug!("Reading grid of {} rows, has_header={has_header}", rows.len());

        let width = if has_header {
            let len = first.len();
            if let Some(ix) = rows.iter().position(|row| row.len() > len) {
                bail!(
                    "A row longer than the headers list was encountered at row {}",
                    ix + 1
                );
            }
            len
        } else {
            rows.iter().map(Vec::len).max().unwrap_or_default()
        };

        Ok(Self {
            rows,
            has_header,
            skip,
            width,
        })
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// The number of columns: the header length, or the widest row when there is no header.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The header row. Header-less grids report one empty header per column.
    pub fn headers(&self) -> Vec<String> {
        match (self.has_header, self.rows.first()) {
            (true, Some(first)) => first.clone(),
            _ => vec![String::new(); self.width],
        }
    }

    /// Every row, including the header row if there is one.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The rows after the header row, or after the blank row standing in for one.
    pub fn data(&self) -> &[Vec<String>] {
        self.rows.get(self.skip..).unwrap_or_default()
    }
}

/// True when every cell in `row` is empty after trimming.
pub fn is_blank_row<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().all(|cell| cell.as_ref().trim().is_empty())
}

/// Reads `row[column]`, treating a missing column index or a short row as an empty cell.
pub fn cell<S: AsRef<str>>(row: &[S], column: Option<usize>) -> &str {
    column
        .and_then(|ix| row.get(ix))
        .map(|s| s.as_ref())
        .unwrap_or_default()
}
