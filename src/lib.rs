//! ## About
//!
//! This crate exposes the generalised bias forces (Coriolis, centrifugal and gravity terms) of a
//! floating-base robot to a scripting host. The dynamics are computed by an external engine
//! behind the [WholeBodyModel] trait; the crate validates and marshals the host arguments
//! (see [HostArray]) and keeps the state shared between calls in a [ModelState].
//!
//! See [GeneralisedBiasForces] to get started.
//!
//! ## Naming conventions
//! * Traits – capability or role of the implementor
//! * Structs – substantives that indicate entities implementing a behavior
//! * Methods – imperative forms with the exception of getters and factories, which
//!             use substantives (i.e., omit a `get_` prefix) much like the standard library.

pub mod bias_forces;
pub mod component;
pub mod dummy;
pub mod errors;
pub mod frame;
pub mod host;
pub mod model;
pub mod state;

pub use bias_forces::GeneralisedBiasForces;
pub use component::ModelComponent;
pub use errors::{ComponentError, DynamicsError};
pub use frame::Frame;
pub use host::HostArray;
pub use model::{WholeBodyModel, BASE_DOF};
pub use state::{ModelState, StateConfig};
