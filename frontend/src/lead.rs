//! Lead-capture modal: validation rules, the submission state machine and
//! the transports it hands finished leads to.

pub mod controller;
pub mod model;
pub mod transport;
pub mod validation;
