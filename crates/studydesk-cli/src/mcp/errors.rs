//! Error handling utilities for MCP server

use rmcp::ErrorData;
use studydesk_core::PlannerError;

/// Converts a planner error into an MCP error. Problems with the caller's
/// input become `invalid_params`, everything else `internal_error`.
pub fn to_mcp_error(message: &str, error: &PlannerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        PlannerError::InvalidInput { .. }
        | PlannerError::Unparseable { .. }
        | PlannerError::TaskNotFound { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}
