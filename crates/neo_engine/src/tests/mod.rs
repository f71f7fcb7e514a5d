//! Cross-module tests
//!
//! Drive a [`crate::Visualizer`] end to end against a recording backend.

mod support;

mod lifecycle;
