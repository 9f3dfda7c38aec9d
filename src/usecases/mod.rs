//! Use cases - the demo's single orchestration routine.

pub mod demo;
