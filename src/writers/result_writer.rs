use crate::error::Result;
use crate::models::ResultEntry;
use crate::utils::constants::OUTPUT_LINE_ENDING;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `name;min;mean;max` per line
    #[default]
    Text,
    /// JSON array of entries
    Json,
}

/// Writes result entries to any `io::Write`
pub struct ResultWriter {
    format: OutputFormat,
}

impl ResultWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn write<W: Write>(&self, entries: &[ResultEntry], mut out: W) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                for entry in entries {
                    write!(out, "{}{}", entry, OUTPUT_LINE_ENDING)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, entries)?;
                out.write_all(OUTPUT_LINE_ENDING.as_bytes())?;
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn to_string(&self, entries: &[ResultEntry]) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(entries, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Default for ResultWriter {
    fn default() -> Self {
        Self::new(OutputFormat::Text)
    }
}
