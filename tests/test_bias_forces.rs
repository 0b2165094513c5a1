use std::cell::RefCell;

use approx::assert_abs_diff_eq;
use ndarray::prelude::*;
use wbi_bias::dummy::DummyModel;
use wbi_bias::{
    ComponentError, DynamicsError, Frame, GeneralisedBiasForces, HostArray, ModelComponent, ModelState, StateConfig,
    WholeBodyModel,
};

/// Records what the component hands over to the model
#[derive(Debug, Default)]
struct RecordingModel {
    base: RefCell<Option<Frame>>,
    gravity: RefCell<Vec<f64>>,
}

impl WholeBodyModel for RecordingModel {
    fn dof(&self) -> usize {
        1
    }

    fn generalized_bias_forces(
        &self,
        _q: ArrayView1<f64>,
        base: &Frame,
        _dq: ArrayView1<f64>,
        _dxb: ArrayView1<f64>,
        gravity: ArrayView1<f64>,
        mut target: ArrayViewMut1<f64>,
    ) -> Result<(), DynamicsError> {
        *self.base.borrow_mut() = Some(base.clone());
        *self.gravity.borrow_mut() = gravity.to_vec();
        target.fill(1.0);
        Ok(())
    }

    fn link_pose(&self, q: ArrayView1<f64>, base: &Frame, _link: &str) -> Result<Frame, DynamicsError> {
        let local = Frame::translation(&[q[0], 0.0, 0.0]).map_err(|e| DynamicsError::new(e.to_string()))?;
        Ok(base.compose(&local))
    }
}

/// Writes part of the result before reporting a failure
#[derive(Debug)]
struct InterruptedModel;

impl WholeBodyModel for InterruptedModel {
    fn dof(&self) -> usize {
        2
    }

    fn generalized_bias_forces(
        &self,
        _q: ArrayView1<f64>,
        _base: &Frame,
        _dq: ArrayView1<f64>,
        _dxb: ArrayView1<f64>,
        _gravity: ArrayView1<f64>,
        mut target: ArrayViewMut1<f64>,
    ) -> Result<(), DynamicsError> {
        target.slice_mut(s![..3]).fill(5.0);
        Err(DynamicsError::new("interrupted"))
    }

    fn link_pose(&self, _q: ArrayView1<f64>, base: &Frame, _link: &str) -> Result<Frame, DynamicsError> {
        Ok(base.clone())
    }
}

fn host_inputs(q: &[f64], dq: &[f64], dxb: &[f64]) -> Vec<HostArray> {
    vec![HostArray::column(q), HostArray::column(dq), HostArray::column(dxb)]
}

#[test_log::test]
fn test_host_lifecycle() {
    let model = DummyModel::new(3).with_mass(2.0);
    // The state borrows a model owned by the application
    let state = ModelState::new(&model);
    let mut component = GeneralisedBiasForces::new(&state).unwrap();

    let mut outputs = Vec::new();
    component
        .allocate_return_space(component.num_returns(), &mut outputs)
        .unwrap();
    component.display(&state, &[]).unwrap();
    component
        .compute(
            &state,
            &host_inputs(&[1.0, 2.0, 3.0], &[1.0, 1.0, -1.0], &[0.0; 6]),
            &mut outputs,
        )
        .unwrap();

    let h = outputs[0].view().unwrap();
    assert_eq!(h.dim(), (9, 1));
    assert_abs_diff_eq!(
        h.column(0),
        array![0.0, 0.0, 19.62, 0.0, 0.0, 0.0, 1.0, 2.0, -3.0].view(),
        epsilon = 1e-12
    );
}

#[test_log::test]
fn test_compute_fast_matches_compute() {
    let mut state = ModelState::new(DummyModel::new(2));
    let mut component = GeneralisedBiasForces::new(&state).unwrap();
    let mut fast = vec![HostArray::zeros(8, 1)];
    let mut full = vec![HostArray::zeros(8, 1)];

    assert!(matches!(
        component.compute_fast(&state, &mut fast),
        Err(ComponentError::StateNotSet)
    ));

    let (q, dq, dxb) = ([0.3, -0.2], [1.5, 4.0], [0.1, 0.0, 0.0, 0.0, 0.0, 0.2]);
    state.update_state(&q, &dq, &dxb).unwrap();
    component.compute_fast(&state, &mut fast).unwrap();
    component
        .compute(&state, &host_inputs(&q, &dq, &dxb), &mut full)
        .unwrap();

    assert_eq!(fast, full);
}

#[test_log::test]
fn test_base_frame_and_gravity_forwarded() {
    let model = RecordingModel::default();
    let mut state = ModelState::with_config(
        &model,
        StateConfig {
            gravity: [0.0, 0.0, -1.62],
            ..Default::default()
        },
    );
    state.update_state(&[0.4], &[0.0], &[0.0; 6]).unwrap();

    let mut component = GeneralisedBiasForces::new(&state).unwrap();
    let mut outputs = vec![HostArray::zeros(7, 1)];
    component.compute_fast(&state, &mut outputs).unwrap();

    let base = model.base.borrow().clone().unwrap();
    assert_abs_diff_eq!(base.position(), array![-0.4, 0.0, 0.0].view(), epsilon = 1e-12);
    assert_eq!(*model.gravity.borrow(), vec![0.0, 0.0, -1.62]);
    assert_eq!(component.base_forces().len(), 6);
    assert_eq!(component.joint_forces().to_vec(), vec![1.0]);
}

#[test]
fn test_unbound_model() {
    let state = ModelState::<DummyModel>::unbound(StateConfig::default());
    assert!(matches!(
        GeneralisedBiasForces::new(&state),
        Err(ComponentError::UnboundModel)
    ));

    let bound = ModelState::new(DummyModel::new(1));
    let mut component = GeneralisedBiasForces::new(&bound).unwrap();
    let result = component.compute(
        &state,
        &host_inputs(&[0.0], &[0.0], &[0.0; 6]),
        &mut [HostArray::zeros(7, 1)],
    );
    assert!(matches!(result, Err(ComponentError::UnboundModel)));
}

#[test]
fn test_model_failure() {
    let state = ModelState::new(DummyModel::new(1).failing());
    let mut component = GeneralisedBiasForces::new(&state).unwrap();
    let result = component.compute(
        &state,
        &host_inputs(&[0.0], &[0.0], &[0.0; 6]),
        &mut [HostArray::zeros(7, 1)],
    );
    match result {
        Err(ComponentError::Computation(error)) => assert!(error.to_string().contains("fail")),
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_row_vectors_rejected() {
    let state = ModelState::new(DummyModel::new(2));
    let mut component = GeneralisedBiasForces::new(&state).unwrap();
    let inputs = vec![
        HostArray::row(&[0.0, 0.0]),
        HostArray::column(&[0.0, 0.0]),
        HostArray::column(&[0.0; 6]),
    ];
    match component.compute(&state, &inputs, &mut [HostArray::zeros(8, 1)]) {
        Err(ComponentError::InvalidArgumentShape {
            argument,
            expected,
            actual,
        }) => {
            assert_eq!(argument, "q");
            assert_eq!(expected, (2, 1));
            assert_eq!(actual, (1, 2));
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test_log::test]
fn test_compute_uses_pose_of_given_configuration() {
    let model = RecordingModel::default();
    let mut state = ModelState::new(&model);
    let mut component = GeneralisedBiasForces::new(&state).unwrap();
    let inputs = host_inputs(&[0.4], &[0.0], &[0.0; 6]);
    let mut outputs = vec![HostArray::zeros(7, 1)];

    component.compute(&state, &inputs, &mut outputs).unwrap();
    let before = model.base.borrow().clone().unwrap();

    // Storing another configuration must not leak into `compute`
    state.update_state(&[0.9], &[0.0], &[0.0; 6]).unwrap();
    component.compute(&state, &inputs, &mut outputs).unwrap();
    let after = model.base.borrow().clone().unwrap();

    assert_eq!(before, after);
    assert_abs_diff_eq!(after.position(), array![-0.4, 0.0, 0.0].view(), epsilon = 1e-12);

    // The fast path still uses the stored configuration
    component.compute_fast(&state, &mut outputs).unwrap();
    let stored = model.base.borrow().clone().unwrap();
    assert_abs_diff_eq!(stored.position(), array![-0.9, 0.0, 0.0].view(), epsilon = 1e-12);
}

#[test]
fn test_interrupted_model_leaves_no_partial_result() {
    let state = ModelState::new(InterruptedModel);
    let mut component = GeneralisedBiasForces::new(&state).unwrap();
    let mut outputs = vec![HostArray::zeros(8, 1)];

    let result = component.compute(&state, &host_inputs(&[0.0, 0.0], &[0.0, 0.0], &[0.0; 6]), &mut outputs);

    assert!(matches!(result, Err(ComponentError::Computation(_))));
    assert!(component.base_forces().iter().all(|v| *v == 0.0));
    assert!(component.joint_forces().iter().all(|v| *v == 0.0));
    assert!(outputs[0].data().iter().all(|v| *v == 0.0));
}
