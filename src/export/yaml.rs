//! YAML export for a human-readable backup

use std::io::Write;

use crate::error::{KharchaError, KharchaResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> KharchaResult<()> {
    let export = FullExport::from_storage(storage)?;
    let io_err = |e: std::io::Error| KharchaError::Export(e.to_string());

    writeln!(writer, "# Kharcha Export").map_err(io_err)?;
    writeln!(writer, "# User: {}", export.principal).map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| KharchaError::Export(e.to_string()))?;

    Ok(())
}
