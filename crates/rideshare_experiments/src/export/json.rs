use anyhow::Result;
use serde::Serialize;

pub(crate) fn export_to_json_impl<T: Serialize + ?Sized>(
    value: &T,
    file: std::fs::File,
) -> Result<()> {
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}
