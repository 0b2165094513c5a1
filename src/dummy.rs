/*! Dummy implementation of a whole-body model used for testing */

// TODO move to the test directory once a model backed by a real dynamics engine is available

use crate::{errors::DynamicsError, Frame, WholeBodyModel, BASE_DOF};
use ndarray::prelude::*;

/// Deterministic stand-in for a dynamics engine. It is *not* physically meaningful:
///
/// * base force: `-mass * gravity`, base torque: zero
/// * joint `i`: `q[i] * dq[i]`
/// * every link sits at height `sum(q)` above the base
#[derive(Debug, Clone, PartialEq)]
pub struct DummyModel {
    dof: usize,
    mass: f64,
    failing: bool,
}

impl DummyModel {
    pub fn new(dof: usize) -> Self {
        DummyModel {
            dof,
            mass: 1.0,
            failing: false,
        }
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// A model whose every query fails
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

impl WholeBodyModel for DummyModel {
    fn dof(&self) -> usize {
        self.dof
    }

    fn generalized_bias_forces(
        &self,
        q: ArrayView1<f64>,
        _base: &Frame,
        dq: ArrayView1<f64>,
        dxb: ArrayView1<f64>,
        gravity: ArrayView1<f64>,
        mut target: ArrayViewMut1<f64>,
    ) -> Result<(), DynamicsError> {
        if self.failing {
            return Err(DynamicsError::new("dummy model configured to fail"));
        }
        if q.len() != self.dof || dq.len() != self.dof || dxb.len() != BASE_DOF || target.len() != BASE_DOF + self.dof
        {
            return Err(DynamicsError::new("inconsistent vector sizes"));
        }
        target.slice_mut(s![..3]).assign(&(&gravity * -self.mass));
        target.slice_mut(s![3..BASE_DOF]).fill(0.0);
        target.slice_mut(s![BASE_DOF..]).assign(&(&q * &dq));
        Ok(())
    }

    fn link_pose(&self, q: ArrayView1<f64>, base: &Frame, link: &str) -> Result<Frame, DynamicsError> {
        if self.failing || link.is_empty() {
            return Err(DynamicsError::new(format!("unknown link `{link}`")));
        }
        let local = Frame::translation(&[0.0, 0.0, q.sum()]).map_err(|e| DynamicsError::new(e.to_string()))?;
        Ok(base.compose(&local))
    }
}
