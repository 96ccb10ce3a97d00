use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::ArgoMeasurement;

pub const HISTORY_DAYS: i64 = 1825;
pub const SAMPLE_INTERVAL_DAYS: usize = 30;
pub const FLOATS_PER_SAMPLE: usize = 5;
pub const MAX_PRESSURE_DBAR: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockRegion {
    pub name: &'static str,
    pub lat_range: (f64, f64),
    pub lon_range: (f64, f64),
    pub temp_range: (f64, f64),
    pub salinity_range: (f64, f64),
}

impl MockRegion {
    pub fn contains(&self, row: &ArgoMeasurement) -> bool {
        within(self.lat_range, row.latitude)
            && within(self.lon_range, row.longitude)
            && within(self.temp_range, row.temperature)
            && within(self.salinity_range, row.salinity)
    }

    pub fn float_prefix(&self) -> String {
        let short = self.name.chars().take(3).collect::<String>();
        format!("ARGO_{}", short.to_uppercase())
    }
}

// South Pacific longitudes run past 180 and are kept as declared.
pub static MOCK_REGIONS: [MockRegion; 7] = [
    MockRegion {
        name: "North Atlantic",
        lat_range: (20.0, 45.0),
        lon_range: (-75.0, -15.0),
        temp_range: (5.0, 25.0),
        salinity_range: (34.5, 37.5),
    },
    MockRegion {
        name: "South Atlantic",
        lat_range: (-45.0, -20.0),
        lon_range: (-50.0, 15.0),
        temp_range: (2.0, 20.0),
        salinity_range: (34.0, 36.5),
    },
    MockRegion {
        name: "North Pacific",
        lat_range: (20.0, 45.0),
        lon_range: (120.0, 180.0),
        temp_range: (5.0, 28.0),
        salinity_range: (33.5, 36.0),
    },
    MockRegion {
        name: "South Pacific",
        lat_range: (-45.0, -20.0),
        lon_range: (150.0, 250.0),
        temp_range: (3.0, 22.0),
        salinity_range: (34.0, 36.5),
    },
    MockRegion {
        name: "Indian Ocean",
        lat_range: (-35.0, 20.0),
        lon_range: (40.0, 120.0),
        temp_range: (10.0, 30.0),
        salinity_range: (34.5, 36.5),
    },
    MockRegion {
        name: "Arctic Ocean",
        lat_range: (70.0, 85.0),
        lon_range: (-180.0, 180.0),
        temp_range: (-2.0, 5.0),
        salinity_range: (28.0, 32.0),
    },
    MockRegion {
        name: "Southern Ocean",
        lat_range: (-75.0, -45.0),
        lon_range: (-180.0, 180.0),
        temp_range: (-2.0, 5.0),
        salinity_range: (33.5, 34.5),
    },
];

pub fn mock_region(name: &str) -> Option<&'static MockRegion> {
    MOCK_REGIONS.iter().find(|region| region.name == name)
}

// Sample dates, newest first: `now`, `now - 30d`, ... back five years.
pub fn sample_dates(now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    (0..HISTORY_DAYS)
        .step_by(SAMPLE_INTERVAL_DAYS)
        .map(|days| now - Duration::days(days))
        .collect()
}

pub fn generate_rows<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<ArgoMeasurement> {
    let dates = sample_dates(now);
    let mut rows = Vec::with_capacity(MOCK_REGIONS.len() * dates.len() * FLOATS_PER_SAMPLE);

    for region in &MOCK_REGIONS {
        let prefix = region.float_prefix();
        for date in &dates {
            for _ in 0..FLOATS_PER_SAMPLE {
                rows.push(ArgoMeasurement {
                    date: *date,
                    region: region.name.to_string(),
                    latitude: uniform(rng, region.lat_range),
                    longitude: uniform(rng, region.lon_range),
                    temperature: uniform(rng, region.temp_range),
                    salinity: uniform(rng, region.salinity_range),
                    pressure: uniform(rng, (0.0, MAX_PRESSURE_DBAR)),
                    float_id: format!("{}_{}", prefix, rng.gen_range(1000..=9999)),
                });
            }
        }
    }

    rows
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, (low, high): (f64, f64)) -> f64 {
    rng.gen_range(low..=high)
}

fn within((low, high): (f64, f64), value: f64) -> bool {
    (low..=high).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sixty_one_sample_dates() {
        let now = Utc::now();
        let dates = sample_dates(now);
        assert_eq!(dates.len(), 61);
        assert_eq!(dates[0], now);
        assert_eq!(dates[60], now - Duration::days(1800));
    }

    #[test]
    fn float_prefixes() {
        assert_eq!(MOCK_REGIONS[0].float_prefix(), "ARGO_NOR");
        assert_eq!(MOCK_REGIONS[4].float_prefix(), "ARGO_IND");
        assert_eq!(MOCK_REGIONS[6].float_prefix(), "ARGO_SOU");
    }

    #[test]
    fn rows_stay_inside_their_region() {
        let mut rng = StdRng::seed_from_u64(7);
        let rows = generate_rows(&mut rng, Utc::now());
        assert_eq!(rows.len(), 61 * 7 * 5);

        for row in &rows {
            let region = mock_region(&row.region).expect("known region");
            assert!(region.contains(row), "{row:?}");
            assert!((0.0..=MAX_PRESSURE_DBAR).contains(&row.pressure));
            assert!(row.float_id.starts_with(&region.float_prefix()));
            let suffix = row.float_id.rsplit('_').next().unwrap();
            let number: u32 = suffix.parse().unwrap();
            assert!((1000..=9999).contains(&number));
        }
    }
}
