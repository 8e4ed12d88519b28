//! Unit and behaviour tests for gopat.

mod behaviour;
