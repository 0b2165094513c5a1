/*! Numeric matrices as they are exchanged with the scripting host.
 *
 * The host hands arguments over as a count-prefixed list of real, double precision matrices
 * stored in column-major order. [HostArray] mirrors that layout so values can be copied in and
 * out of the component buffers without reordering.
 */

use core::fmt;
use itertools::Itertools;
use ndarray::prelude::*;

use crate::ComponentError;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostArray {
    rows: usize,
    cols: usize,
    /// Column-major storage
    data: Vec<f64>,
}

impl HostArray {
    /// A matrix filled with zeros, as allocated for return values.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        HostArray {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wraps column-major `data`. Fails if the length does not match `rows * cols`.
    pub fn from_column_major(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, ComponentError> {
        if data.len() != rows * cols {
            return Err(ndarray::ShapeError::from_kind(ndarray::ErrorKind::IncompatibleShape).into());
        }
        Ok(HostArray { rows, cols, data })
    }

    /// A `n x 1` column vector
    pub fn column(values: &[f64]) -> Self {
        HostArray {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    /// A `1 x n` row vector
    pub fn row(values: &[f64]) -> Self {
        HostArray {
            rows: 1,
            cols: values.len(),
            data: values.to_vec(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Raw column-major data
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Checks the dimensions and returns the data as a flat view.
    pub(crate) fn expect_column(&self, argument: &'static str, len: usize) -> Result<ArrayView1<f64>, ComponentError> {
        if self.dims() != (len, 1) {
            return Err(ComponentError::InvalidArgumentShape {
                argument,
                expected: (len, 1),
                actual: self.dims(),
            });
        }
        Ok(ArrayView1::from(&self.data[..]))
    }

    /// The matrix as a 2D view (column-major layout is preserved).
    pub fn view(&self) -> Result<ArrayView2<f64>, ComponentError> {
        Ok(ArrayView2::from_shape((self.rows, self.cols).f(), &self.data)?)
    }
}

impl fmt::Display for HostArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} [{}]",
            self.rows,
            self.cols,
            self.data.iter().map(|v| format!("{v:.4}")).join(", ")
        )
    }
}
