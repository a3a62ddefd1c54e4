use std::io::Write;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::json;
use version_reaper_core::records::{AliasRecord, FunctionRecord, VersionRecord};
use version_reaper_core::selection::{is_reapable, protected_versions};

use crate::adapters::function_catalog::{
    all_aliases, all_functions, all_versions, FunctionCatalog,
};

/// What happens when processing a single function fails.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Abort the whole run on the first fault.
    #[default]
    FailFast,
    /// Record the fault and move on to the next function.
    #[serde(rename = "continue")]
    ContinueWithNextFunction,
}

impl FailurePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FailFast => "fail_fast",
            Self::ContinueWithNextFunction => "continue",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReapOptions {
    pub failure_policy: FailurePolicy,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FunctionFailure {
    pub function_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReapSummary {
    pub functions_scanned: usize,
    pub versions_inspected: usize,
    pub versions_deleted: usize,
    pub deleted_versions: Vec<VersionRecord>,
    pub failures: Vec<FunctionFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReapError {
    pub message: String,
    pub function_name: Option<String>,
}

impl std::fmt::Display for ReapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.function_name {
            Some(name) => write!(f, "reaping {name} failed: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ReapError {}

/// Deletes every published version that is neither a function's current
/// version nor the target of one of its aliases.
///
/// Functions and versions are pulled page by page and each qualifying
/// version is deleted as soon as it is seen. One [`deletion_line`] per
/// deleted version goes to stdout.
pub fn reap(
    catalog: &impl FunctionCatalog,
    options: &ReapOptions,
) -> Result<ReapSummary, ReapError> {
    reap_with_output(catalog, options, &mut std::io::stdout())
}

/// Human-readable record of one deletion, written before the delete call.
pub fn deletion_line(version_arn: &str) -> String {
    format!("  🥊 {version_arn}")
}

pub fn reap_with_output(
    catalog: &impl FunctionCatalog,
    options: &ReapOptions,
    output: &mut impl Write,
) -> Result<ReapSummary, ReapError> {
    let started_at = Instant::now();
    log_reaper_info(
        "reap_started",
        json!({ "failure_policy": options.failure_policy.as_str() }),
    );

    let mut summary = ReapSummary::default();
    for function in all_functions(catalog) {
        let function = match function {
            Ok(value) => value,
            Err(message) => {
                log_reaper_error(
                    "reap_failed",
                    json!({
                        "functions_scanned": summary.functions_scanned,
                        "versions_deleted": summary.versions_deleted,
                        "error": message.clone(),
                    }),
                );
                return Err(ReapError {
                    message,
                    function_name: None,
                });
            }
        };
        summary.functions_scanned += 1;

        let deleted_before = summary.versions_deleted;
        match reap_function(catalog, &function, &mut *output, &mut summary) {
            Ok(()) => log_reaper_info(
                "function_scanned",
                json!({
                    "function": &function,
                    "versions_deleted": summary.versions_deleted - deleted_before,
                }),
            ),
            Err(message) => match options.failure_policy {
                FailurePolicy::FailFast => {
                    log_reaper_error(
                        "reap_failed",
                        json!({
                            "function_name": function.name.clone(),
                            "functions_scanned": summary.functions_scanned,
                            "versions_deleted": summary.versions_deleted,
                            "error": message.clone(),
                        }),
                    );
                    return Err(ReapError {
                        message,
                        function_name: Some(function.name),
                    });
                }
                FailurePolicy::ContinueWithNextFunction => {
                    log_reaper_error(
                        "function_failed",
                        json!({
                            "function_name": function.name.clone(),
                            "error": message.clone(),
                        }),
                    );
                    summary.failures.push(FunctionFailure {
                        function_name: function.name,
                        message,
                    });
                }
            },
        }
    }

    log_reaper_info(
        "reap_completed",
        json!({
            "functions_scanned": summary.functions_scanned,
            "versions_inspected": summary.versions_inspected,
            "versions_deleted": summary.versions_deleted,
            "failed_functions": summary.failures.len(),
            "duration_ms": started_at.elapsed().as_millis(),
        }),
    );
    Ok(summary)
}

fn reap_function(
    catalog: &impl FunctionCatalog,
    function: &FunctionRecord,
    output: &mut impl Write,
    summary: &mut ReapSummary,
) -> Result<(), String> {
    let aliases: Vec<AliasRecord> =
        all_aliases(catalog, &function.arn).collect::<Result<_, _>>()?;
    let protected = protected_versions(function, &aliases);

    for version in all_versions(catalog, &function.arn) {
        let version = version?;
        summary.versions_inspected += 1;
        if !is_reapable(&version, &protected) {
            continue;
        }

        writeln!(output, "{}", deletion_line(&version.arn))
            .map_err(|error| format!("failed to write deletion line: {error}"))?;
        catalog.delete_version(&version.arn)?;
        log_reaper_info(
            "version_deleted",
            json!({
                "function_name": function.name.clone(),
                "version": &version,
            }),
        );
        summary.versions_deleted += 1;
        summary.deleted_versions.push(version);
    }

    Ok(())
}

fn log_reaper_info(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "version_reaper",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_reaper_error(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "version_reaper",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
