//! YAML export of fetched transactions

use std::io::Write;

use crate::error::{FinanzError, FinanzResult};

use super::json::TransactionExport;

/// Write the export as YAML with a short comment header
pub fn export_yaml<W: Write>(export: &TransactionExport, writer: &mut W) -> FinanzResult<()> {
    let header = format!(
        "# FinanzCLI transaction export\n# Generated: {}\n# Client version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| FinanzError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| FinanzError::Export(e.to_string()))?;
    Ok(())
}
