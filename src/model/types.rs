// Data types for execution requests and results
#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of test content attached to an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    /// Test definition passed inline
    String,
    /// Test definition downloaded from a URI
    FileUri,
    /// Single file from a git repository
    GitFile,
    /// Directory from a git repository
    GitDir,
    /// Whole git repository
    Git,
}

/// Test content descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestContent {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Inline content body (for `string`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Content location (for `file-uri` and git variants)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl TestContent {
    pub fn inline(data: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::String,
            data: Some(data.into()),
            uri: None,
        }
    }

    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::FileUri,
            data: None,
            uri: Some(uri.into()),
        }
    }

    /// Whether the content resolves to a single file
    pub fn is_file(&self) -> bool {
        matches!(
            self.content_type,
            ContentType::String | ContentType::FileUri | ContentType::GitFile
        )
    }
}

/// Variable visibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    #[default]
    Basic,
    /// Value is masked in reported output
    Secret,
}

/// A named execution variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type", default)]
    pub var_type: VariableType,
}

impl Variable {
    pub fn basic(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            var_type: VariableType::Basic,
        }
    }

    pub fn secret(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            var_type: VariableType::Secret,
        }
    }
}

/// Execution request received from the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub content: TestContent,
    #[serde(default)]
    pub variables: HashMap<String, Variable>,
    /// Extra tool arguments. Accepted but not passed to the tool.
    #[serde(default)]
    pub args: Vec<String>,
}

impl ExecutionRequest {
    pub fn new(content: TestContent) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            content,
            variables: HashMap::new(),
            args: Vec::new(),
        }
    }

    /// Add a basic variable (builder style)
    pub fn with_variable(mut self, name: &str, value: impl Into<String>) -> Self {
        self.variables
            .insert(name.to_string(), Variable::basic(name, value));
        self
    }

    /// Add a secret variable (builder style)
    pub fn with_secret(mut self, name: &str, value: impl Into<String>) -> Self {
        self.variables
            .insert(name.to_string(), Variable::secret(name, value));
        self
    }
}

/// Overall execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Passed,
    Failed,
}

/// Normalized execution result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}
