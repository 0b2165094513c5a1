/*! Defines the interface to the external whole-body dynamics engine.
 *
 * The rigid-body algorithms live in the engine; this crate only marshals arguments to it.
 * Generalised vectors follow the floating-base convention: six base entries (linear, then
 * angular) followed by one entry per joint.
 */

use crate::{errors::DynamicsError, Frame};
use ndarray::{ArrayView1, ArrayViewMut1};

/// Number of degrees of freedom of the floating base
pub const BASE_DOF: usize = 6;

/// A whole-body model of a floating-base robot.
pub trait WholeBodyModel {
    /// Number of actuated joints (excluding the floating base)
    fn dof(&self) -> usize;

    /// Writes the generalised bias forces (Coriolis, centrifugal and gravity terms) into
    /// `target`, which holds `BASE_DOF + dof()` entries.
    ///
    /// * `q` – joint positions (`dof()`)
    /// * `base` – world pose of the floating base
    /// * `dq` – joint velocities (`dof()`)
    /// * `dxb` – spatial velocity of the base (`BASE_DOF`)
    /// * `gravity` – gravity acceleration in world coordinates (3)
    fn generalized_bias_forces(
        &self,
        q: ArrayView1<f64>,
        base: &Frame,
        dq: ArrayView1<f64>,
        dxb: ArrayView1<f64>,
        gravity: ArrayView1<f64>,
        target: ArrayViewMut1<f64>,
    ) -> Result<(), DynamicsError>;

    /// Pose of the link named `link` in world coordinates for the joint positions `q`.
    fn link_pose(&self, q: ArrayView1<f64>, base: &Frame, link: &str) -> Result<Frame, DynamicsError>;
}

impl<T> WholeBodyModel for &T
where
    T: WholeBodyModel + ?Sized,
{
    fn dof(&self) -> usize {
        (**self).dof()
    }

    fn generalized_bias_forces(
        &self,
        q: ArrayView1<f64>,
        base: &Frame,
        dq: ArrayView1<f64>,
        dxb: ArrayView1<f64>,
        gravity: ArrayView1<f64>,
        target: ArrayViewMut1<f64>,
    ) -> Result<(), DynamicsError> {
        (**self).generalized_bias_forces(q, base, dq, dxb, gravity, target)
    }

    fn link_pose(&self, q: ArrayView1<f64>, base: &Frame, link: &str) -> Result<Frame, DynamicsError> {
        (**self).link_pose(q, base, link)
    }
}
