//! Unit tests for gopat-syntax.

mod unit;
