//! CSV export

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use tracing::instrument;

use crate::error::ExportError;
use crate::export::{PopulationExporter, EXPORT_HEADERS};
use crate::population::population::Population;

/// Writes one `X,Y,Z,Distance` row per individual, in population order
#[derive(Clone, Debug, Default)]
pub struct CsvExporter;

impl CsvExporter {
    /// Create a new CSV exporter
    pub fn new() -> Self {
        Self
    }

    /// Write the table to any writer
    pub fn write<W: Write>(
        &self,
        population: &Population,
        writer: W,
    ) -> Result<(), ExportError> {
        let mut wtr = Writer::from_writer(writer);

        wtr.write_record(EXPORT_HEADERS)?;
        for individual in population {
            let [x, y, z] = *individual.genes();
            wtr.write_record([
                x.to_string(),
                y.to_string(),
                z.to_string(),
                individual.fitness().to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Render the table as a string
    pub fn export(&self, population: &Population) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        self.write(population, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl PopulationExporter for CsvExporter {
    #[instrument(
        level = "debug",
        skip_all,
        fields(path = %path.display(), rows = population.len())
    )]
    fn export_to_path(&self, population: &Population, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path)?;
        self.write(population, file)
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}
