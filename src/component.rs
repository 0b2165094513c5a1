//! Lifecycle hooks shared by all components that are exposed to the scripting host.

use crate::{ComponentError, HostArray, ModelState, WholeBodyModel};

/// A computation that can be invoked from the scripting host.
///
/// The host first asks for the number of return values, lets the component allocate them
/// and then calls [ModelComponent::compute] (or [ModelComponent::compute_fast]) which writes
/// into the allocated outputs. Inputs never contain the command name the host dispatched on.
pub trait ModelComponent<M: WholeBodyModel> {
    /// Number of values returned to the host
    fn num_returns(&self) -> usize;

    /// Replaces `outputs` with zeroed arrays of the correct dimensions. `n_outputs` is the
    /// number of return values the host requested.
    fn allocate_return_space(&self, n_outputs: usize, outputs: &mut Vec<HostArray>) -> Result<(), ComponentError>;

    /// Reports what the component computes and which inputs it received.
    fn display(&self, state: &ModelState<M>, inputs: &[HostArray]) -> Result<(), ComponentError>;

    /// Computes from the robot state passed in `inputs`.
    fn compute(
        &mut self,
        state: &ModelState<M>,
        inputs: &[HostArray],
        outputs: &mut [HostArray],
    ) -> Result<(), ComponentError>;

    /// Computes from the robot state stored in `state` (see [ModelState::update_state]).
    fn compute_fast(&mut self, state: &ModelState<M>, outputs: &mut [HostArray]) -> Result<(), ComponentError>;
}
