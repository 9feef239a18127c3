use std::io::Write;

use rideshare_core::spatial::haversine_km;
use rideshare_core::{GeoPoint, Objective, SolveConfig};
use rideshare_experiments::{
    export_to_csv, export_to_json, run_parallel_sweep_with_progress, run_single, ParticipantStore,
    RoleSplit, RunSpec, SweepSpace,
};
use tempfile::NamedTempFile;

/// Drivers 1..=6 and riders 100001..=100009 spread around central Berlin,
/// written in reverse announcement order.
fn announcement_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Announcement,Announcementtime,Earliesttime,Latesttime,\
         Origin_Latitude,Origin_Longitude,Destination_Latitude,Destination_Longitude,\
         Distance_Car-Peak,Time_Car-Peak"
    )
    .unwrap();

    let mut rows = Vec::new();
    for i in 0..6u64 {
        rows.push((i + 1, i as f64));
    }
    for i in 0..9u64 {
        rows.push((100_001 + i, i as f64));
    }
    rows.reverse();

    for (id, t) in rows {
        let origin = GeoPoint::new(52.50 + t * 0.004, 13.38 + (id % 3) as f64 * 0.01);
        let destination = GeoPoint::new(52.54 - t * 0.002, 13.44 + (id % 4) as f64 * 0.008);
        let length = haversine_km(origin, destination) * 1.3;
        writeln!(
            file,
            "{id},{},{},{},{},{},{},{},{length},{}",
            t * 60.0,
            t * 60.0,
            t * 60.0 + 1_800.0,
            origin.lat,
            origin.lon,
            destination.lat,
            destination.lon,
            length * 2.0
        )
        .unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn store_applies_split_and_limits() {
    let file = announcement_csv();
    let store = ParticipantStore::load(file.path(), RoleSplit::default(), 4, 500).expect("store");

    assert_eq!(store.drivers.len(), 4);
    assert_eq!(store.riders.len(), 9);
    let driver_ids: Vec<u64> = store.drivers.iter().map(|d| d.id.0).collect();
    assert_eq!(driver_ids, vec![1, 2, 3, 4]);
    assert!(store.riders.iter().all(|r| r.id.0 > 100_000));
}

#[test]
fn missing_file_is_an_error() {
    let result = ParticipantStore::load("/nonexistent/announcements.csv", RoleSplit::Halves, 1, 1);
    assert!(result.is_err());
}

#[test]
fn sweep_over_loaded_store_exports_every_run() {
    let file = announcement_csv();
    let store = ParticipantStore::load(file.path(), RoleSplit::default(), 500, 500).expect("store");
    let specs = SweepSpace::grid().generate();
    let results =
        run_parallel_sweep_with_progress(&store, specs.clone(), Some(2), false).expect("sweep");
    assert_eq!(results.len(), specs.len());

    for result in &results {
        assert!(result.report.matches <= store.drivers.len());
        if result.spec.config.objective == Objective::MaximizeCount {
            assert_eq!(result.objective_value, result.report.matches as f64);
        }
    }

    let csv_out = NamedTempFile::new().unwrap();
    export_to_csv(&results, csv_out.path()).expect("csv export");
    let mut reader = csv::Reader::from_path(csv_out.path()).unwrap();
    assert_eq!(reader.records().count(), specs.len());

    let json_out = NamedTempFile::new().unwrap();
    export_to_json(&results, json_out.path()).expect("json export");
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(json_out.path()).unwrap()).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(specs.len()));
}

#[test]
fn count_objective_matches_every_driver_on_a_complete_graph() {
    let file = announcement_csv();
    let store = ParticipantStore::load(file.path(), RoleSplit::default(), 500, 500).expect("store");
    let spec = RunSpec::new(0, SolveConfig::default().with_objective(Objective::MaximizeCount));
    let result = run_single(&store, &spec).expect("run");
    assert_eq!(result.report.matches, 6);
}
