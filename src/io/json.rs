use crate::io::error::Error;
use crate::model::params::{ParameterTable, Record};
use std::io::Write;

pub fn write<W: Write, R: Record>(mut writer: W, table: &ParameterTable<R>) -> Result<(), Error> {
    serde_json::to_writer(&mut writer, table)?;
    writeln!(writer)?;
    Ok(())
}
