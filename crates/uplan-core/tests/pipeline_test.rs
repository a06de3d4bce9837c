//! End-to-end tests of the trajectory -> volume pipeline on WGS84.

use chrono::DateTime;
use uplan_core::{
    read_waypoints, reduce_waypoints, BufferRules, Geodesy, Volume, VolumeGenerator, Waypoint,
    Wgs84Geodesy, DEFAULT_STRIDE, MIN_GROUND_CLEARANCE_M,
};

/// Takeoff, climb, cruise east, descend and land.
fn survey_flight() -> Vec<Waypoint> {
    let mut waypoints = Vec::new();
    let mut t = 0.0;
    for step in 0..=30 {
        waypoints.push(Waypoint::new(t, 38.5386, -0.1310, step as f64 * 2.0));
        t += 0.5;
    }
    for step in 1..=200 {
        waypoints.push(Waypoint::new(t, 38.5386, -0.1310 + step as f64 * 2e-5, 60.0));
        t += 0.5;
    }
    for step in 1..=30 {
        waypoints.push(Waypoint::new(t, 38.5386, -0.1270, 60.0 - step as f64 * 2.0));
        t += 0.5;
    }
    waypoints
}

fn assert_volume_invariants(volumes: &[Volume]) {
    for (index, volume) in volumes.iter().enumerate() {
        assert_eq!(volume.ordinal, index);
        assert!(volume.min_altitude.value >= MIN_GROUND_CLEARANCE_M);
        assert!(volume.min_altitude.value <= volume.max_altitude.value);
        assert!(volume.time_begin < volume.time_end);

        let ring = &volume.geometry.ring;
        assert_eq!(ring.len(), 5);
        assert!((ring[0][0] - ring[4][0]).abs() < 1e-12);
        assert!((ring[0][1] - ring[4][1]).abs() < 1e-12);
    }
}

#[test]
fn climb_then_hover_on_wgs84() {
    let waypoints = vec![
        Waypoint::new(0.0, 40.0, -3.0, 0.0),
        Waypoint::new(10.0, 40.0001, -3.0, 50.0),
        Waypoint::new(40.0, 40.0001, -3.0, 50.0),
    ];
    let start = DateTime::from_timestamp(1000, 0).unwrap();
    let volumes = VolumeGenerator::default().generate(&waypoints, start).unwrap();

    assert_eq!(volumes.len(), 2);
    assert_volume_invariants(&volumes);

    assert_eq!(volumes[0].min_altitude.value, 10.0);
    assert_eq!(volumes[0].max_altitude.value, 60.0);
    assert_eq!(volumes[0].time_begin.timestamp(), 995);
    assert_eq!(volumes[0].time_end.timestamp(), 1015);

    assert_eq!(volumes[1].min_altitude.value, 40.0);
    assert_eq!(volumes[1].max_altitude.value, 60.0);
    assert_eq!(volumes[1].time_begin.timestamp(), 1005);
    assert_eq!(volumes[1].time_end.timestamp(), 1045);

    // both segments get a 30 m x 30 m footprint: along-track = cross-track = TSE_H
    let geodesy = Wgs84Geodesy;
    for volume in &volumes {
        let [fl, fr, br, _, _] = volume.geometry.ring;
        let width = geodesy.inverse(fl[1], fl[0], fr[1], fr[0]).unwrap().distance_m;
        let length = geodesy.inverse(fr[1], fr[0], br[1], br[0]).unwrap().distance_m;
        assert!((width - 30.0).abs() < 0.01, "width {width}");
        assert!((length - 30.0).abs() < 0.01, "length {length}");
    }
}

#[test]
fn reduced_survey_flight_keeps_invariants() {
    let raw = survey_flight();
    let reduced = reduce_waypoints(&raw, DEFAULT_STRIDE);
    assert_eq!(reduced.last().unwrap().time_s, raw.last().unwrap().time_s);

    let start = DateTime::from_timestamp(1_756_717_200, 0).unwrap();
    let generator = VolumeGenerator::new(BufferRules::default());
    let volumes = generator
        .generate_from_raw(&raw, DEFAULT_STRIDE, start)
        .unwrap();

    assert_eq!(volumes.len(), reduced.len() - 1);
    assert_volume_invariants(&volumes);

    // cruise volumes stay within the TSE_V band around 60 m
    let cruise = &volumes[volumes.len() / 2];
    assert_eq!(cruise.min_altitude.value, 50.0);
    assert_eq!(cruise.max_altitude.value, 70.0);
}

#[test]
fn csv_to_volumes() {
    let data = "\
SimTime,Lat,Lon,Alt,qw,qx,qy,qz,Vx,Vy,Vz
0.0,40.0,-3.0,0.0,1,0,0,0,0,0,0
5.0,40.0,-3.0,30.0,1,0,0,0,0,0,6
10.0,40.0,-2.9990,30.0,1,0,0,0,17,0,0
15.0,40.0,-2.9980,30.0,1,0,0,0,17,0,0
";
    let waypoints = read_waypoints(data.as_bytes()).unwrap();
    assert_eq!(waypoints.len(), 4);

    let start = DateTime::from_timestamp(0, 0).unwrap();
    let volumes = VolumeGenerator::default()
        .generate_from_raw(&waypoints, 1, start)
        .unwrap();

    // the origin sample is dropped by reduction, leaving two cruise segments
    assert_eq!(volumes.len(), 2);
    assert_volume_invariants(&volumes);
    assert_eq!(volumes[0].time_begin.timestamp(), 0);
    assert_eq!(volumes[1].time_end.timestamp(), 20);
}
