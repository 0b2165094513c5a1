/*! The shared context every component operates on.
 *
 * A [ModelState] is created once by the host application, bound to a whole-body model and
 * handed to the components by reference. Besides the binding it keeps the quantities shared
 * between components: gravity, the last robot state and the resulting pose of the floating base.
 */

use crate::{ComponentError, Frame, WholeBodyModel, BASE_DOF};
use ndarray::prelude::*;
use tracing::{debug, info};
use tracing_attributes::instrument;

/// Settings of a [ModelState]
#[derive(Debug, Clone, PartialEq)]
pub struct StateConfig {
    /// Gravity acceleration in world coordinates
    pub gravity: [f64; 3],
    /// Link whose pose defines the world frame
    pub reference_link: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        StateConfig {
            gravity: [0.0, 0.0, -9.81],
            reference_link: "l_sole".to_string(),
        }
    }
}

#[derive(Debug)]
struct RobotState {
    q: Array1<f64>,
    dq: Array1<f64>,
    dxb: Array1<f64>,
}

#[derive(Debug)]
pub struct ModelState<M> {
    model: Option<M>,
    dof: usize,
    gravity: Array1<f64>,
    reference_link: String,
    base_frame: Frame,
    robot: Option<RobotState>,
}

impl<M: WholeBodyModel> ModelState<M> {
    pub fn new(model: M) -> Self {
        Self::with_config(model, StateConfig::default())
    }

    pub fn with_config(model: M, config: StateConfig) -> Self {
        let mut state = Self::unbound(config);
        state.bind(model);
        state
    }

    /// A state without a model. Components fail with [ComponentError::UnboundModel] until
    /// [ModelState::bind] is called.
    pub fn unbound(config: StateConfig) -> Self {
        ModelState {
            model: None,
            dof: 0,
            gravity: Array1::from(config.gravity.to_vec()),
            reference_link: config.reference_link,
            base_frame: Frame::identity(),
            robot: None,
        }
    }

    /// Binds `model` and discards the stored robot state.
    pub fn bind(&mut self, model: M) {
        self.dof = model.dof();
        info!(dof = self.dof, "Binding whole-body model");
        self.model = Some(model);
        self.base_frame = Frame::identity();
        self.robot = None;
    }

    pub fn model(&self) -> Result<&M, ComponentError> {
        self.model.as_ref().ok_or(ComponentError::UnboundModel)
    }

    pub fn is_bound(&self) -> bool {
        self.model.is_some()
    }

    /// Joint degrees of freedom of the bound model (0 if unbound)
    pub fn dof(&self) -> usize {
        self.dof
    }

    pub fn gravity(&self) -> ArrayView1<f64> {
        self.gravity.view()
    }

    pub fn set_gravity(&mut self, gravity: &[f64]) -> Result<(), ComponentError> {
        if gravity.len() != 3 {
            return Err(ComponentError::InvalidArgumentShape {
                argument: "gravity",
                expected: (3, 1),
                actual: (gravity.len(), 1),
            });
        }
        self.gravity.assign(&ArrayView1::from(gravity));
        Ok(())
    }

    pub fn reference_link(&self) -> &str {
        &self.reference_link
    }

    /// World pose of the floating base
    pub fn base_frame(&self) -> &Frame {
        &self.base_frame
    }

    /// Joint positions, joint velocities and base velocity from the last [ModelState::update_state]
    pub fn robot_state(&self) -> Option<(ArrayView1<f64>, ArrayView1<f64>, ArrayView1<f64>)> {
        self.robot
            .as_ref()
            .map(|robot| (robot.q.view(), robot.dq.view(), robot.dxb.view()))
    }

    /// World pose of the floating base for the joint positions `q`, such that the reference
    /// link coincides with the world frame. Does not touch the stored state.
    pub fn base_frame_at(&self, q: ArrayView1<f64>) -> Result<Frame, ComponentError> {
        world_base_frame(self.model()?, q, &self.reference_link)
    }

    /// Stores the robot state and recomputes the pose of the floating base such that the
    /// reference link coincides with the world frame.
    #[instrument(skip_all, fields(dof = self.dof))]
    pub fn update_state(&mut self, q: &[f64], dq: &[f64], dxb: &[f64]) -> Result<(), ComponentError> {
        let model = self.model.as_ref().ok_or(ComponentError::UnboundModel)?;
        for (argument, values, len) in [("q", q, self.dof), ("dq", dq, self.dof), ("dxb", dxb, BASE_DOF)] {
            if values.len() != len {
                return Err(ComponentError::InvalidArgumentShape {
                    argument,
                    expected: (len, 1),
                    actual: (values.len(), 1),
                });
            }
        }

        let q = Array1::from(q.to_vec());
        self.base_frame = world_base_frame(model, q.view(), &self.reference_link)?;
        debug!(position = ?self.base_frame.position(), "Updated base frame");

        self.robot = Some(RobotState {
            q,
            dq: Array1::from(dq.to_vec()),
            dxb: Array1::from(dxb.to_vec()),
        });
        Ok(())
    }
}

fn world_base_frame<M: WholeBodyModel>(model: &M, q: ArrayView1<f64>, link: &str) -> Result<Frame, ComponentError> {
    let base_to_link = model.link_pose(q, &Frame::identity(), link)?;
    Ok(base_to_link.inverse())
}
