//! Wire-level data model shared by the API and the agent pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DdlStatement {
    pub statement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStatement {
    pub statement: String,
}

/// A workload query with its observed execution statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub queryid: String,
    pub query: String,
    pub runquantity: u64,
    pub executiontime: u64,
}

impl QuerySpec {
    /// Optimization priority: how much total time this query costs.
    pub fn impact(&self) -> u128 {
        self.runquantity as u128 * self.executiontime as u128
    }
}

/// Immutable input of one optimization task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    /// Connection descriptor for the lakehouse backend. Opaque to the core.
    pub url: String,
    #[serde(default)]
    pub ddl: Vec<DdlStatement>,
    #[serde(default)]
    pub queries: Vec<QuerySpec>,
}

impl OptimizationRequest {
    /// Structural validation applied before a task record is created.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.ddl.is_empty() && self.queries.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "request must contain at least one DDL statement or query".to_string(),
            ));
        }
        if self.ddl.iter().any(|d| d.statement.trim().is_empty()) {
            return Err(ServiceError::InvalidRequest(
                "DDL statements must not be blank".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for spec in &self.queries {
            if spec.query.trim().is_empty() {
                return Err(ServiceError::InvalidRequest(format!(
                    "query '{}' has blank SQL text",
                    spec.queryid
                )));
            }
            if !seen.insert(spec.queryid.as_str()) {
                return Err(ServiceError::InvalidRequest(format!(
                    "duplicate query id '{}'",
                    spec.queryid
                )));
            }
        }
        Ok(())
    }
}

/// A query from the input workload with its SQL text replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewrittenQuery {
    pub queryid: String,
    pub query: String,
}

/// Output of one completed optimization task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub ddl: Vec<DdlStatement>,
    pub migrations: Vec<MigrationStatement>,
    pub queries: Vec<RewrittenQuery>,
}
