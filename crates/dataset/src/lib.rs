mod mock;
pub mod plot;

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, Datelike, Duration, Utc};
use floatchat_core::RegionKey;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use mock::{
    mock_region, sample_dates, MockRegion, FLOATS_PER_SAMPLE, HISTORY_DAYS, MAX_PRESSURE_DBAR,
    MOCK_REGIONS, SAMPLE_INTERVAL_DAYS,
};

pub const RECENT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("float `{0}` has no measurements")]
    UnknownFloat(String),
    #[error("dataset has no measurements")]
    Empty,
    #[error("failed writing dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed encoding dataset: {0}")]
    Json(#[from] serde_json::Error),
}

pub type DatasetResult<T> = Result<T, DatasetError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgoMeasurement {
    pub date: DateTime<Utc>,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub salinity: f64,
    pub pressure: f64,
    pub float_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionYearMean {
    pub region: String,
    pub year: i32,
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionMean {
    pub region: String,
    pub temperature: f64,
    pub salinity: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArgoDataset {
    generated_at: DateTime<Utc>,
    rows: Vec<ArgoMeasurement>,
}

impl ArgoDataset {
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng(), Utc::now())
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Self {
        Self {
            generated_at: now,
            rows: mock::generate_rows(rng, now),
        }
    }

    pub fn from_rows(generated_at: DateTime<Utc>, rows: Vec<ArgoMeasurement>) -> Self {
        Self { generated_at, rows }
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn rows(&self) -> &[ArgoMeasurement] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    // Rows strictly newer than `now - 30 days`.
    pub fn recent_at(&self, now: DateTime<Utc>) -> Vec<&ArgoMeasurement> {
        let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
        self.rows.iter().filter(|row| row.date > cutoff).collect()
    }

    pub fn recent(&self) -> Vec<&ArgoMeasurement> {
        self.recent_at(Utc::now())
    }

    pub fn for_ocean(&self, key: RegionKey) -> Vec<&ArgoMeasurement> {
        self.rows
            .iter()
            .filter(|row| region_matches(&row.region, key))
            .collect()
    }

    pub fn for_float(&self, float_id: &str) -> DatasetResult<Vec<&ArgoMeasurement>> {
        let rows = self
            .rows
            .iter()
            .filter(|row| row.float_id == float_id)
            .collect::<Vec<_>>();
        if rows.is_empty() {
            return Err(DatasetError::UnknownFloat(float_id.to_string()));
        }
        Ok(rows)
    }

    pub fn float_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .map(|row| row.float_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    pub fn pick_float<R: Rng + ?Sized>(&self, rng: &mut R) -> DatasetResult<&str> {
        let ids = self.float_ids();
        if ids.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(ids[rng.gen_range(0..ids.len())])
    }

    pub fn yearly_mean_temperature(&self) -> Vec<RegionYearMean> {
        let mut sums: BTreeMap<(usize, i32), (f64, usize)> = BTreeMap::new();
        for row in &self.rows {
            let entry = sums
                .entry((region_rank(&row.region), row.date.year()))
                .or_insert((0.0, 0));
            entry.0 += row.temperature;
            entry.1 += 1;
        }

        sums.into_iter()
            .map(|((rank, year), (total, count))| RegionYearMean {
                region: region_name(rank, &self.rows),
                year,
                temperature: total / count as f64,
            })
            .collect()
    }

    pub fn mean_by_region(&self) -> Vec<RegionMean> {
        let mut sums: BTreeMap<usize, (f64, f64, usize)> = BTreeMap::new();
        for row in &self.rows {
            let entry = sums
                .entry(region_rank(&row.region))
                .or_insert((0.0, 0.0, 0));
            entry.0 += row.temperature;
            entry.1 += row.salinity;
            entry.2 += 1;
        }

        sums.into_iter()
            .map(|(rank, (temperature, salinity, count))| RegionMean {
                region: region_name(rank, &self.rows),
                temperature: temperature / count as f64,
                salinity: salinity / count as f64,
                count,
            })
            .collect()
    }

    pub fn write_csv<W: Write>(&self, mut out: W) -> DatasetResult<()> {
        writeln!(
            out,
            "date,region,latitude,longitude,temperature,salinity,pressure,float_id"
        )?;
        for row in &self.rows {
            writeln!(
                out,
                "{},{},{:.4},{:.4},{:.3},{:.3},{:.1},{}",
                row.date.to_rfc3339(),
                row.region,
                row.latitude,
                row.longitude,
                row.temperature,
                row.salinity,
                row.pressure,
                row.float_id
            )?;
        }
        Ok(())
    }

    pub fn write_json<W: Write>(&self, out: W) -> DatasetResult<()> {
        serde_json::to_writer_pretty(out, &self.rows)?;
        Ok(())
    }
}

pub fn region_matches(region: &str, key: RegionKey) -> bool {
    region.to_lowercase().contains(key.as_key())
}

// Unknown region names sort after the mock table.
fn region_rank(name: &str) -> usize {
    MOCK_REGIONS
        .iter()
        .position(|region| region.name == name)
        .unwrap_or(MOCK_REGIONS.len())
}

fn region_name(rank: usize, rows: &[ArgoMeasurement]) -> String {
    match MOCK_REGIONS.get(rank) {
        Some(region) => region.name.to_string(),
        None => rows
            .iter()
            .find(|row| region_rank(&row.region) == rank)
            .map(|row| row.region.clone())
            .unwrap_or_default(),
    }
}
