/*! Component returning the generalised bias forces of a floating-base robot.
 *
 * Inputs: `q` (dof x 1), `dq` (dof x 1) and `dxb` (6 x 1).
 * Output: `h` ((6 + dof) x 1), the floating-base part first.
 */

use crate::{ComponentError, Frame, HostArray, ModelComponent, ModelState, WholeBodyModel, BASE_DOF};
use core::fmt;
use itertools::Itertools;
use ndarray::prelude::*;
use std::marker::PhantomData;
use tracing::{debug, info, trace};
use tracing_attributes::instrument;

const NUM_INPUTS: usize = 3;
const NUM_RETURNS: usize = 1;

/// Bias-force component for states bound to a model of type `M`
#[derive(Debug)]
pub struct GeneralisedBiasForces<M> {
    q: Array1<f64>,
    dq: Array1<f64>,
    dxb: Array1<f64>,
    h: Array1<f64>,
    model: PhantomData<M>,
}

impl<M: WholeBodyModel> GeneralisedBiasForces<M> {
    /// Allocates the buffers for the model bound to `state`.
    pub fn new(state: &ModelState<M>) -> Result<Self, ComponentError> {
        state.model()?;
        let dof = state.dof();
        Ok(GeneralisedBiasForces {
            q: Array1::zeros(dof),
            dq: Array1::zeros(dof),
            dxb: Array1::zeros(BASE_DOF),
            h: Array1::zeros(BASE_DOF + dof),
            model: PhantomData,
        })
    }

    /// Joint degrees of freedom the buffers are sized for
    pub fn dof(&self) -> usize {
        self.q.len()
    }

    /// Result of the last computation
    pub fn bias_forces(&self) -> ArrayView1<f64> {
        self.h.view()
    }

    /// Floating-base part (force, then torque) of the last result
    pub fn base_forces(&self) -> ArrayView1<f64> {
        self.h.slice(s![..BASE_DOF])
    }

    /// Joint part of the last result
    pub fn joint_forces(&self) -> ArrayView1<f64> {
        self.h.slice(s![BASE_DOF..])
    }

    fn check_model(&self, state: &ModelState<M>) -> Result<(), ComponentError> {
        state.model()?;
        if state.dof() != self.dof() {
            return Err(ComponentError::ModelMismatch {
                expected: self.dof(),
                actual: state.dof(),
            });
        }
        Ok(())
    }

    /// Validates the host arguments and copies them into the buffers.
    fn process_arguments(&mut self, inputs: &[HostArray]) -> Result<(), ComponentError> {
        if inputs.len() < NUM_INPUTS {
            return Err(ComponentError::WrongArgumentCount {
                expected: NUM_INPUTS,
                actual: inputs.len(),
            });
        }
        let dof = self.dof();
        // Validate everything before touching the buffers
        let q = inputs[0].expect_column("q", dof)?;
        let dq = inputs[1].expect_column("dq", dof)?;
        let dxb = inputs[2].expect_column("dxb", BASE_DOF)?;

        self.q.assign(&q);
        self.dq.assign(&dq);
        self.dxb.assign(&dxb);
        Ok(())
    }

    /// Calls the model with the buffered robot state. `h` is zeroed on failure.
    fn evaluate(&mut self, state: &ModelState<M>, base: &Frame) -> Result<(), ComponentError> {
        let model = state.model()?;
        let result = model.generalized_bias_forces(
            self.q.view(),
            base,
            self.dq.view(),
            self.dxb.view(),
            state.gravity(),
            self.h.view_mut(),
        );
        if let Err(error) = result {
            self.h.fill(0.0);
            return Err(error.into());
        }
        trace!(h = %self.h, "Computed generalised bias forces");
        Ok(())
    }

    fn write_returns(&self, outputs: &mut [HostArray]) -> Result<(), ComponentError> {
        let output = outputs.first_mut().ok_or(ComponentError::OutputNotAllocated)?;
        if output.dims() != (self.h.len(), 1) {
            return Err(ComponentError::OutputShape {
                expected: (self.h.len(), 1),
                actual: output.dims(),
            });
        }
        output
            .data_mut()
            .iter_mut()
            .zip(self.h.iter())
            .for_each(|(target, value)| *target = *value);
        Ok(())
    }
}

impl<M: WholeBodyModel> ModelComponent<M> for GeneralisedBiasForces<M> {
    fn num_returns(&self) -> usize {
        NUM_RETURNS
    }

    fn allocate_return_space(&self, n_outputs: usize, outputs: &mut Vec<HostArray>) -> Result<(), ComponentError> {
        // The host may request none and still receive the answer
        if n_outputs > NUM_RETURNS {
            return Err(ComponentError::WrongArgumentCount {
                expected: NUM_RETURNS,
                actual: n_outputs,
            });
        }
        outputs.clear();
        outputs.push(HostArray::zeros(BASE_DOF + self.dof(), 1));
        Ok(())
    }

    fn display(&self, state: &ModelState<M>, inputs: &[HostArray]) -> Result<(), ComponentError> {
        info!(dof = state.dof(), bound = state.is_bound(), "{}", self);
        debug!(
            "Received {} input(s): {}",
            inputs.len(),
            inputs.iter().map(|i| format!("{}x{}", i.rows(), i.cols())).join(", ")
        );
        Ok(())
    }

    #[instrument(skip_all, fields(inputs = inputs.len()))]
    fn compute(
        &mut self,
        state: &ModelState<M>,
        inputs: &[HostArray],
        outputs: &mut [HostArray],
    ) -> Result<(), ComponentError> {
        self.check_model(state)?;
        self.process_arguments(inputs)?;
        // The pose follows the `q` passed in, not the one stored in the state
        let base = state.base_frame_at(self.q.view()).map_err(|error| {
            self.h.fill(0.0);
            error
        })?;
        self.evaluate(state, &base)?;
        self.write_returns(outputs)
    }

    #[instrument(skip_all)]
    fn compute_fast(&mut self, state: &ModelState<M>, outputs: &mut [HostArray]) -> Result<(), ComponentError> {
        self.check_model(state)?;
        let (q, dq, dxb) = state.robot_state().ok_or(ComponentError::StateNotSet)?;
        self.q.assign(&q);
        self.dq.assign(&dq);
        self.dxb.assign(&dxb);
        self.evaluate(state, state.base_frame())?;
        self.write_returns(outputs)
    }
}

impl<M: WholeBodyModel> fmt::Display for GeneralisedBiasForces<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generalised bias forces: h = generalisedBiasForces(q, dq, dxb) with q, dq ({0}x1), dxb (6x1), h ({1}x1)",
            self.dof(),
            BASE_DOF + self.dof()
        )
    }
}
