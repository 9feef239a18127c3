//! Participants loaded from the announcement CSV format.
//!
//! Each row is one trip announcement. Only the columns below are read; any
//! other column in the file is ignored.
//!
//! | column | meaning |
//! |---|---|
//! | `Announcement` | participant id |
//! | `Announcementtime` | announcement time, used for ordering |
//! | `Earliesttime`, `Latesttime` | scheduling window (may be empty) |
//! | `Origin_Latitude`, `Origin_Longitude` | trip origin |
//! | `Destination_Latitude`, `Destination_Longitude` | trip destination |
//! | `Distance_Car-Peak` | solo trip length in km |

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use rideshare_core::{GeoPoint, Participant};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Announcement ids below this are drivers, above it riders.
pub const DEFAULT_ANNOUNCEMENT_THRESHOLD: u64 = 100_000;

/// Default number of drivers and of riders kept after sorting.
pub const DEFAULT_SIDE_LIMIT: usize = 500;

/// How rows are assigned to the driver and rider sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RoleSplit {
    /// Ids below `threshold` drive, ids above ride. A row whose id equals
    /// the threshold belongs to neither side.
    AnnouncementThreshold { threshold: u64 },
    /// The first half of the rows ride, the rest drive.
    Halves,
}

impl Default for RoleSplit {
    fn default() -> Self {
        RoleSplit::AnnouncementThreshold {
            threshold: DEFAULT_ANNOUNCEMENT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AnnouncementRow {
    #[serde(rename = "Announcement")]
    id: u64,
    #[serde(rename = "Announcementtime")]
    announce_time: f64,
    #[serde(rename = "Earliesttime", default)]
    earliest_time: Option<f64>,
    #[serde(rename = "Latesttime", default)]
    latest_time: Option<f64>,
    #[serde(rename = "Origin_Latitude")]
    origin_lat: f64,
    #[serde(rename = "Origin_Longitude")]
    origin_lon: f64,
    #[serde(rename = "Destination_Latitude")]
    destination_lat: f64,
    #[serde(rename = "Destination_Longitude")]
    destination_lon: f64,
    #[serde(rename = "Distance_Car-Peak")]
    trip_length_km: f64,
}

impl AnnouncementRow {
    fn into_participant(self, driver: bool) -> Participant {
        let origin = GeoPoint::new(self.origin_lat, self.origin_lon);
        let destination = GeoPoint::new(self.destination_lat, self.destination_lon);
        let participant = if driver {
            Participant::driver(self.id, origin, destination, self.trip_length_km)
        } else {
            Participant::rider(self.id, origin, destination, self.trip_length_km)
        }
        .with_announce_time(self.announce_time);
        match (self.earliest_time, self.latest_time) {
            (Some(earliest), Some(latest)) => participant.with_window(earliest, latest),
            _ => participant,
        }
    }
}

/// The driver and rider populations of one experiment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantStore {
    pub drivers: Vec<Participant>,
    pub riders: Vec<Participant>,
}

impl ParticipantStore {
    /// Reads `path`, splits rows by `split`, orders each side by announcement
    /// time and keeps at most `driver_limit` drivers and `rider_limit` riders.
    pub fn load(
        path: impl AsRef<Path>,
        split: RoleSplit,
        driver_limit: usize,
        rider_limit: usize,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("opening participant file {}", path.display()))?;
        let store = Self::from_reader(file, split, driver_limit, rider_limit)
            .with_context(|| format!("reading participant file {}", path.display()))?;
        info!(
            path = %path.display(),
            drivers = store.drivers.len(),
            riders = store.riders.len(),
            "participants loaded"
        );
        Ok(store)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        split: RoleSplit,
        driver_limit: usize,
        rider_limit: usize,
    ) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let rows = csv_reader
            .deserialize::<AnnouncementRow>()
            .collect::<Result<Vec<_>, _>>()
            .context("malformed announcement row")?;
        debug!(rows = rows.len(), ?split, "splitting announcement rows");

        let (drivers, riders) = split_rows(rows, split);
        Ok(Self {
            drivers: earliest_first(drivers, driver_limit, true),
            riders: earliest_first(riders, rider_limit, false),
        })
    }
}

fn split_rows(
    rows: Vec<AnnouncementRow>,
    split: RoleSplit,
) -> (Vec<AnnouncementRow>, Vec<AnnouncementRow>) {
    match split {
        RoleSplit::AnnouncementThreshold { threshold } => {
            let mut drivers = Vec::new();
            let mut riders = Vec::new();
            for row in rows {
                if row.id < threshold {
                    drivers.push(row);
                } else if row.id > threshold {
                    riders.push(row);
                }
            }
            (drivers, riders)
        }
        RoleSplit::Halves => {
            let mut riders = rows;
            let drivers = riders.split_off(riders.len() / 2);
            (drivers, riders)
        }
    }
}

/// Stable sort by announcement time, then truncate.
fn earliest_first(mut rows: Vec<AnnouncementRow>, limit: usize, driver: bool) -> Vec<Participant> {
    rows.sort_by(|a, b| a.announce_time.total_cmp(&b.announce_time));
    rows.into_iter().take(limit).map(|row| row.into_participant(driver)).collect()
}
