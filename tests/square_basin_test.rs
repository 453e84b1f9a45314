//! Integration tests for the square-basin case: full assembly,
//! data-file emission, and round-trip re-parsing.

use std::fs;
use std::path::PathBuf;

use surgerun::{square_basin, ConfigError, DataFile, Value};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("surgerun_it_{}_{}", std::process::id(), name));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_square_basin_assembly() {
    let setup = square_basin("geoclaw", 12.0 * 3600.0).unwrap();

    // Numerics
    assert_eq!(setup.run.start_time, -43_200.0);
    assert_eq!(setup.run.equation_count, 3);
    assert_eq!(setup.run.aux_types.len(), 9);
    assert_eq!(setup.run.grid.mx(), 70);
    assert_eq!(setup.run.grid.my(), 60);
    assert_eq!(setup.run.refinement.signed_levels(), -5);
    assert_eq!(setup.run.schedule.final_time(), Some(144_000.0));
    // 160 frames over 40 h plus 48 over the 12 h ramp-up
    assert_eq!(setup.run.schedule.frame_count(setup.run.ramp_up()), Some(208));

    // Geophysics
    assert_eq!(setup.geo.gravity, 9.81);
    assert_eq!(setup.geo.coriolis, Some(45.0));
    assert_eq!(setup.geo.speed_tolerance.len(), 6);
    assert!(setup.geo.topo_files.is_empty());

    // Storm
    assert_eq!(setup.storm.central_pressure, 95_000.0);
    assert_eq!(setup.storm.velocity, (5.0, 0.0));
    assert_eq!(setup.storm.wind_refine.len(), setup.storm.radius_refine.len());

    assert!(setup.validate().is_ok());
}

#[test]
fn test_gauge_array_geometry() {
    let setup = square_basin("geoclaw", 12.0 * 3600.0).unwrap();
    let gauges = &setup.geo.gauges;
    assert_eq!(gauges.len(), 21);

    // First gauge lands 25 km inside the inset span
    assert!((gauges[0].y - (-250e3)).abs() < 1e-9);

    let spacing = 550e3 / 22.0;
    for pair in gauges.windows(2) {
        assert!(pair[1].y > pair[0].y);
        assert!(pair[1].id > pair[0].id);
        assert!((pair[1].y - pair[0].y - spacing).abs() < 1e-9);
    }
    for gauge in gauges {
        assert!(gauge.y > -275e3 && gauge.y < 275e3);
        assert_eq!(gauge.x, 455e3);
        assert!(gauge.t_start < gauge.t_end);
        assert!(setup.run.bounds.contains(gauge.x, gauge.y));
    }
}

#[test]
fn test_ramp_up_shared_between_configurators() {
    for ramp_up in [0.0, 3600.0, 43_200.0] {
        let setup = square_basin("geoclaw", ramp_up).unwrap();
        assert_eq!(setup.run.start_time, -setup.storm.ramp_up_t);
        assert_eq!(setup.storm.ramp_up_t, ramp_up);
    }
}

#[test]
fn test_unsupported_package_fails_fast() {
    let err = square_basin("pyclaw", 0.0).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedPackage { .. }));
    let message = err.to_string();
    assert!(message.contains("pyclaw"));
    assert!(message.contains("geoclaw"));
}

#[test]
fn test_write_all_then_reparse_round_trips() {
    let setup = square_basin("geoclaw", 12.0 * 3600.0).unwrap();
    let dir = scratch_dir("roundtrip");
    setup.write_all(&dir).unwrap();

    for (name, emitted) in [
        ("amr2ez.data", setup.run.records()),
        ("setgeo.data", setup.geo.records()),
        ("surge.data", setup.storm.records()),
    ] {
        let reread = DataFile::read_from(&dir.join(name)).unwrap();
        assert_eq!(reread, emitted, "{} did not round-trip", name);
    }
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_emitted_numerics_values() {
    let setup = square_basin("geoclaw", 12.0 * 3600.0).unwrap();
    let file = setup.run.records();

    assert_eq!(file.get("t0"), Some(&Value::Float(-43_200.0)));
    assert_eq!(file.get("nout"), Some(&Value::Int(208)));
    assert_eq!(file.get("tfinal"), Some(&Value::Float(144_000.0)));
    assert_eq!(file.get("mxnest"), Some(&Value::Int(-5)));
    assert_eq!(file.get("mthlim"), Some(&Value::IntList(vec![3, 3, 3])));
    assert_eq!(file.get("inratx"), Some(&Value::IntList(vec![2; 5])));
    assert_eq!(file.get("cfl_desired"), Some(&Value::Float(0.75)));
}

#[test]
fn test_emitted_storm_values() {
    let setup = square_basin("geoclaw", 12.0 * 3600.0).unwrap();
    let file = setup.storm.records();

    assert_eq!(file.get("storm_type"), Some(&Value::Int(2)));
    assert_eq!(file.get("Pc"), Some(&Value::Float(95_000.0)));
    assert_eq!(file.get("ramp_up_t"), Some(&Value::Float(43_200.0)));
    assert_eq!(
        file.get("wind_refine"),
        Some(&Value::FloatList(vec![20.0, 40.0, 60.0]))
    );
    assert_eq!(
        file.get("R_refine"),
        Some(&Value::FloatList(vec![60e3, 40e3, 20e3]))
    );
}

#[test]
fn test_invalid_setup_writes_nothing() {
    let mut setup = square_basin("geoclaw", 12.0 * 3600.0).unwrap();
    setup.storm.radius_refine.pop();

    let dir = scratch_dir("invalid");
    assert!(setup.write_all(&dir).is_err());
    assert!(fs::read_dir(&dir).unwrap().next().is_none());
    fs::remove_dir_all(&dir).unwrap();
}
