// Execution variables as seen by the backends
#![allow(dead_code)]

use crate::model::{Variable, VariableType};
use std::collections::HashMap;

/// Replacement for secret values in reported output
pub const SECRET_MASK: &str = "********";

/// Name to value mapping built from an execution request.
///
/// Values are stored with surrounding quote characters already removed.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: HashMap<String, String>,
    secrets: Vec<String>,
}

impl Variables {
    pub fn from_request(variables: &HashMap<String, Variable>) -> Self {
        let mut vars = Self::default();
        for (name, variable) in variables {
            let value = unquote(&variable.value);
            if variable.var_type == VariableType::Secret && !value.is_empty() {
                vars.secrets.push(value.clone());
            }
            vars.values.insert(name.clone(), value);
        }
        // Longest first so a secret containing another is masked whole
        vars.secrets.sort_by(|a, b| b.len().cmp(&a.len()));
        vars
    }

    /// Presence check by key; empty values count as present
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Variables exported to the tool's environment
    pub fn env(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every secret value in `text` with [`SECRET_MASK`]
    pub fn obfuscate(&self, text: &str) -> String {
        self.secrets
            .iter()
            .fold(text.to_string(), |acc, secret| acc.replace(secret, SECRET_MASK))
    }
}

fn unquote(value: &str) -> String {
    value.replace('"', "")
}
