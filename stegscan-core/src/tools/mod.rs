//! Forensic tool integration module

pub mod invoker;
pub mod registry;
pub mod wrappers;

pub use invoker::{InvocationOutcome, InvocationResult, Invoker};
pub use registry::{ToolRegistry, ToolSpec, ToolStatus};
pub use wrappers::ToolOutput;
