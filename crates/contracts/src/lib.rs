//! Wire types shared between the departments UI and the departments service.

pub mod domain;
pub mod shared;
pub mod usecases;
