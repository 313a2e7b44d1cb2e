//! Tool library - semicolon-delimited CSV tool definitions.
//!
//! The library is an owned repository passed to whoever needs it; there
//! is no ambient global. Reloading replaces the in-memory set from the
//! file, and edits can be written back with the same layout.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolLibraryError {
    #[error("tool file not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("tool file format error: {0}")]
    Csv(#[from] csv::Error),
}

/// One cutting tool with its nominal cutting parameters.
///
/// CSV layout: `Name;Diam;Z;Vc;Fz;Type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(rename = "Name")]
    pub name: String,

    /// Tool diameter (mm).
    #[serde(rename = "Diam")]
    pub diameter: f64,

    /// Tooth count.
    #[serde(rename = "Z")]
    pub teeth: u32,

    /// Cutting speed Vc (m/min).
    #[serde(rename = "Vc")]
    pub vc: f64,

    /// Feed per tooth Fz (mm/tooth).
    #[serde(rename = "Fz")]
    pub fz: f64,

    /// Free-form type label ("end_mill", "drill", ...).
    #[serde(rename = "Type", default)]
    pub tool_type: String,
}

impl Tool {
    /// Cutting parameters for the chip-flow model, with the engagement
    /// the caller picked.
    pub fn cutting_parameters(&self, ap: f64, ae: f64) -> crate::estimate::CuttingParameters {
        crate::estimate::CuttingParameters {
            diameter: self.diameter,
            teeth: self.teeth,
            vc: self.vc,
            fz: self.fz,
            ap,
            ae,
        }
    }
}

/// Tool repository keyed by tool name.
#[derive(Debug, Clone, Default)]
pub struct ToolLibrary {
    tools: HashMap<String, Tool>,
    /// Rows that failed to parse on the last load (kept as a count so the
    /// UI can warn without the load failing outright).
    skipped_rows: usize,
}

impl ToolLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a library from a `tools.csv`-style file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, ToolLibraryError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ToolLibraryError::NotFound(path.display().to_string()));
        }
        Self::from_csv_reader(File::open(path)?)
    }

    /// Load a library from any reader carrying the CSV layout. Rows that
    /// fail to parse are skipped and counted, matching how a hand-edited
    /// tool table should degrade.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ToolLibraryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut tools = HashMap::new();
        let mut skipped_rows = 0;

        for row in csv_reader.deserialize::<Tool>() {
            match row {
                Ok(tool) => {
                    tools.insert(tool.name.clone(), tool);
                }
                Err(_) => skipped_rows += 1,
            }
        }

        Ok(Self {
            tools,
            skipped_rows,
        })
    }

    /// Replace the in-memory set from the file.
    pub fn reload<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ToolLibraryError> {
        *self = Self::from_csv_path(path)?;
        Ok(())
    }

    /// Write the library back out, sorted by name.
    pub fn save_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ToolLibraryError> {
        self.save_csv_writer(File::create(path)?)
    }

    pub fn save_csv_writer<W: Write>(&self, writer: W) -> Result<(), ToolLibraryError> {
        let mut csv_writer = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
        for name in self.names() {
            csv_writer.serialize(&self.tools[&name])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Tool names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Insert or replace a tool. Returns the previous definition under
    /// the same name, if any.
    pub fn insert(&mut self, tool: Tool) -> Option<Tool> {
        self.tools.insert(tool.name.clone(), tool)
    }

    pub fn remove(&mut self, name: &str) -> Option<Tool> {
        self.tools.remove(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Rows skipped on the last load.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}
