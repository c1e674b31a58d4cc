//! Vehicle registry: CSV with header `plate,kind`; a vehicle's id is its row index.

use anyhow::{anyhow, Context, Result};
use lotnav::lot::{SpaceKind, Vehicle, VehicleId};
use polars::prelude::*;
use std::path::Path;

pub struct Registry {
    vehicles: Vec<Vehicle>,
}

impl Registry {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        // Schema length 0 reads every column as text.
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()
            .and_then(|lf| lf.collect())
            .with_context(|| format!("reading registry {}", path.display()))?;
        let plates = df.column("plate")?.str()?;
        let kinds = df.column("kind")?.str()?;
        let vehicles = plates
            .into_iter()
            .zip(kinds)
            .enumerate()
            .map(|(row, (plate, kind))| {
                let plate = plate.ok_or_else(|| anyhow!("row {row}: missing plate"))?;
                let kind: SpaceKind = kind
                    .ok_or_else(|| anyhow!("row {row}: missing kind"))?
                    .parse()
                    .map_err(|e: String| anyhow!("row {row}: {e}"))?;
                Ok(Vehicle::new(plate.trim().to_ascii_uppercase(), kind))
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(path = %path.display(), vehicles = vehicles.len(), "registry loaded");
        Ok(Self { vehicles })
    }

    /// Case-insensitive plate lookup.
    pub fn find(&self, plate: &str) -> Option<(VehicleId, &Vehicle)> {
        let plate = plate.trim().to_ascii_uppercase();
        self.vehicles
            .iter()
            .position(|v| v.plate == plate)
            .map(|i| (VehicleId(i), &self.vehicles[i]))
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }
}
