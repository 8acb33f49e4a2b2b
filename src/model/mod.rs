// Model module - Execution request and result types
#![allow(unused_imports)]

pub mod result;
pub mod types;

pub use result::{FAILED_TEST_ICON, PASSED_TEST_ICON, RunResult};
pub use types::{
    ContentType, ExecutionRequest, ExecutionResult, ExecutionStatus, TestContent, Variable,
    VariableType,
};
