// JSON Output Module

use crate::Result;
use crate::scanner::AuditResults;
use std::path::Path;

/// Generate JSON output from audit results
pub fn generate_json(results: &AuditResults, pretty: bool) -> Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(results)?)
    } else {
        Ok(serde_json::to_string(results)?)
    }
}

/// Write JSON to file
pub fn write_json_file(results: &AuditResults, path: &Path, pretty: bool) -> Result<()> {
    let json = generate_json(results, pretty)?;
    std::fs::write(path, json)?;
    Ok(())
}
