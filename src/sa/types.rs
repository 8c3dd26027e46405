//! Core traits and the point dataset.

use crate::error::{AnnealError, Result};

/// A temperature schedule.
///
/// Implementations must be pure: `cool(k)` depends only on `k` and the
/// schedule's fixed parameters.
///
/// # Examples
///
/// ```
/// use u_anneal::sa::Cooling;
///
/// struct Constant;
///
/// impl Cooling for Constant {
///     fn cool(&self, _step: usize) -> f64 { 10.0 }
///     fn steps(&self) -> usize { 500 }
///     fn tm_max(&self) -> f64 { 10.0 }
///     fn tm_min(&self) -> f64 { 10.0 }
/// }
/// ```
pub trait Cooling {
    /// Temperature at the 0-based `step`.
    fn cool(&self, step: usize) -> f64;

    /// Total number of annealing steps.
    fn steps(&self) -> usize;

    /// Starting temperature. Also scales the acceptance draw.
    fn tm_max(&self) -> f64;

    /// Lower temperature bound.
    fn tm_min(&self) -> f64;
}

impl<T: Cooling + ?Sized> Cooling for &T {
    fn cool(&self, step: usize) -> f64 {
        (**self).cool(step)
    }
    fn steps(&self) -> usize {
        (**self).steps()
    }
    fn tm_max(&self) -> f64 {
        (**self).tm_max()
    }
    fn tm_min(&self) -> f64 {
        (**self).tm_min()
    }
}

impl<T: Cooling + ?Sized> Cooling for Box<T> {
    fn cool(&self, step: usize) -> f64 {
        (**self).cool(step)
    }
    fn steps(&self) -> usize {
        (**self).steps()
    }
    fn tm_max(&self) -> f64 {
        (**self).tm_max()
    }
    fn tm_min(&self) -> f64 {
        (**self).tm_min()
    }
}

/// An objective over an ordered arrangement of points. Lower is better.
pub trait Fitness {
    /// Scores `data` in its current row order.
    fn performance(&self, data: &Dataset) -> f64;
}

impl<T: Fitness + ?Sized> Fitness for &T {
    fn performance(&self, data: &Dataset) -> f64 {
        (**self).performance(data)
    }
}

impl<T: Fitness + ?Sized> Fitness for Box<T> {
    fn performance(&self, data: &Dataset) -> f64 {
        (**self).performance(data)
    }
}

/// An immutable `rows x dims` matrix of points, stored row-major.
///
/// For ordering problems each row is a coordinate; for subset selection
/// each row may be a row of a distance matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDataset"))]
pub struct Dataset {
    values: Vec<f64>,
    rows: usize,
    dims: usize,
}

impl Dataset {
    /// Shapes a row-major buffer as `values.len() / dims` rows.
    pub fn new(values: Vec<f64>, dims: usize) -> Result<Self> {
        if dims == 0 {
            return Err(AnnealError::ZeroDimensions);
        }
        if values.len() % dims != 0 {
            return Err(AnnealError::ShapeMismatch {
                len: values.len(),
                rows: values.len() / dims,
                dims,
            });
        }
        let rows = values.len() / dims;
        Ok(Self { values, rows, dims })
    }

    /// Builds a dataset from rows, rejecting ragged input.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_anneal::sa::Dataset;
    ///
    /// let square = Dataset::from_rows(vec![
    ///     vec![0.0, 0.0],
    ///     vec![1.0, 0.0],
    ///     vec![1.0, 1.0],
    ///     vec![0.0, 1.0],
    /// ]).unwrap();
    /// assert_eq!(square.len(), 4);
    /// assert_eq!(square.dims(), 2);
    /// ```
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        let mut values = Vec::new();
        let mut dims = None;
        let mut count = 0;
        for (i, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let expected = *dims.get_or_insert(row.len());
            if row.len() != expected {
                return Err(AnnealError::RaggedRow {
                    row: i,
                    expected,
                    found: row.len(),
                });
            }
            values.extend_from_slice(row);
            count += 1;
        }
        let dims = dims.unwrap_or(1);
        if dims == 0 {
            return Err(AnnealError::ZeroDimensions);
        }
        Ok(Self {
            values,
            rows: count,
            dims,
        })
    }

    /// Number of rows (points).
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of columns per row.
    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Row `i`.
    ///
    /// # Panics
    /// Panics if `i >= self.len()`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.dims..(i + 1) * self.dims]
    }

    /// Iterates rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.dims)
    }

    /// Row-major view of all values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Copies the rows at `indices`, in that order, into a new dataset.
    pub fn select(&self, indices: &[usize]) -> Result<Dataset> {
        let mut values = Vec::with_capacity(indices.len() * self.dims);
        for &index in indices {
            if index >= self.rows {
                return Err(AnnealError::IndexOutOfBounds {
                    index,
                    rows: self.rows,
                });
            }
            values.extend_from_slice(self.row(index));
        }
        Ok(Dataset {
            values,
            rows: indices.len(),
            dims: self.dims,
        })
    }

    /// Whether some row equals `row` exactly.
    pub fn contains_row(&self, row: &[f64]) -> bool {
        self.rows().any(|r| r == row)
    }
}

/// Unvalidated wire form of [`Dataset`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDataset {
    values: Vec<f64>,
    rows: usize,
    dims: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDataset> for Dataset {
    type Error = AnnealError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        let data = Dataset::new(raw.values, raw.dims)?;
        if data.rows != raw.rows {
            return Err(AnnealError::ShapeMismatch {
                len: data.values.len(),
                rows: raw.rows,
                dims: raw.dims,
            });
        }
        Ok(data)
    }
}
