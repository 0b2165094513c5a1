//! Rigid transformations (rotation and translation) used for the pose of the floating base.
use crate::ComponentError;
use ndarray::{prelude::*, ErrorKind::IncompatibleShape, ShapeError};

/// Pose of a frame with respect to a parent frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    rotation: Array2<f64>,
    position: Array1<f64>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}

impl Frame {
    /// Returns the neutral element
    pub fn identity() -> Self {
        Frame {
            rotation: Array2::<f64>::eye(3),
            position: Array1::<f64>::zeros(3),
        }
    }

    pub fn new(rotation: Array2<f64>, position: Array1<f64>) -> Result<Self, ComponentError> {
        if rotation.dim() != (3, 3) || position.len() != 3 {
            return Err(ShapeError::from_kind(IncompatibleShape).into());
        }
        Ok(Frame { rotation, position })
    }

    /// A pure translation
    pub fn translation(position: &[f64]) -> Result<Self, ComponentError> {
        Frame::new(Array2::<f64>::eye(3), ArrayView1::from_shape(3, position)?.to_owned())
    }

    /// Reads a homogeneous, 4x4 transformation matrix. The last row is ignored.
    pub fn from_homogeneous(trafo: ArrayView2<f64>) -> Result<Self, ComponentError> {
        if trafo.dim() != (4, 4) {
            return Err(ShapeError::from_kind(IncompatibleShape).into());
        }
        Frame::new(trafo.slice(s![..3, ..3]).to_owned(), trafo.slice(s![..3, 3]).to_owned())
    }

    pub fn to_homogeneous(&self) -> Array2<f64> {
        let mut result = Array2::<f64>::eye(4);
        result.slice_mut(s![..3, ..3]).assign(&self.rotation);
        result.slice_mut(s![..3, 3]).assign(&self.position);
        result
    }

    /// Inverse transformation (R^T, -R^T p)
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.t().to_owned();
        let position = rotation.dot(&self.position) * -1.0;
        Frame { rotation, position }
    }

    /// `self * other`, i.e. `other` expressed in the parent of `self`
    pub fn compose(&self, other: &Frame) -> Self {
        Frame {
            rotation: self.rotation.dot(&other.rotation),
            position: self.rotation.dot(&other.position) + &self.position,
        }
    }

    pub fn rotation(&self) -> ArrayView2<f64> {
        self.rotation.view()
    }

    pub fn position(&self) -> ArrayView1<f64> {
        self.position.view()
    }
}
