//! Specialist roles, personas, and the registry
//!
//! A specialist is a fixed-persona text-generation role bound to a model
//! identifier. The roster of roles is closed: the five built-in personas
//! are the only participants a session can have.

pub mod entities;
pub mod role;
