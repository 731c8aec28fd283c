mod common;

use ecoflux::radtrans::solar_radiation::{
    atmospheric_refraction, solar_angle, solar_angle_batch, solar_angle_from_str,
    solar_angle_with, AcosDomain, ObservationInstant, SolarAngleOptions, SolarAngleResult,
};
use ecoflux::time::parse_civil_timestamp;
use hifitime::Epoch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{assert_close_or_nan, assert_solar_close};

const CLAMPED: SolarAngleOptions = SolarAngleOptions {
    acos_domain: AcosDomain::Clamped,
};

/// Random observation instants between 1950 and 2050, away from the poles.
fn random_instants(rng: &mut StdRng, n: usize) -> Vec<ObservationInstant> {
    (0..n)
        .map(|_| {
            let epoch = Epoch::from_gregorian_utc_hms(
                rng.random_range(1950..2050),
                rng.random_range(1..=12),
                rng.random_range(1..=28),
                rng.random_range(0..24),
                rng.random_range(0..60),
                rng.random_range(0..60),
            );
            ObservationInstant::new(
                epoch,
                rng.random_range(-89.0..89.0),
                rng.random_range(-180.0..180.0),
                rng.random_range(-12..=12) as f64,
            )
        })
        .collect()
}

#[test]
fn test_los_angeles_reference() {
    let res = solar_angle_from_str("2015-11-23 12:00:00", 34.0, -118.0, -8.0).unwrap();

    let refraction = 0.022688554496777806;
    let expected = SolarAngleResult {
        solar_noon: 0.48499938865258485,
        sunrise: 0.2722786010747809,
        sunset: 0.6977201762303888,
        hour_angle: 5.400220085069492,
        solar_zenith_angle: 54.63952843087983,
        solar_elevation_angle: 35.36047156912017,
        solar_azimuth_angle: 186.2095399885736,
        atmospheric_refraction: refraction,
        solar_zenith_angle_corrected: 54.63952843087983 - refraction,
        solar_elevation_angle_corrected: 35.36047156912017 + refraction,
    };
    assert_solar_close(&res, &expected, 1e-9);

    // the clamped domain is a no-op away from the polar regions
    let epoch = parse_civil_timestamp("2015-11-23T12:00:00").unwrap();
    let clamped = solar_angle_with(&epoch, 34.0, -118.0, -8.0, &CLAMPED);
    assert_eq!(clamped, res);
}

#[test]
fn test_range_invariants() {
    let mut rng = StdRng::seed_from_u64(42_u64);
    let instants = random_instants(&mut rng, 2_000);

    let strict = solar_angle_batch(&instants, &SolarAngleOptions::default());
    let clamped = solar_angle_batch(&instants, &CLAMPED);

    for (s, res) in strict.iter().zip(&clamped) {
        assert!((0.0..=180.0).contains(&res.solar_zenith_angle));
        assert!((-90.0..=90.0).contains(&res.solar_elevation_angle));
        assert!((0.0..360.0).contains(&res.solar_azimuth_angle));
        assert!((-180.0..=180.0).contains(&res.hour_angle));
        assert!(res.atmospheric_refraction.is_finite());

        assert!(res.sunrise <= res.solar_noon && res.solar_noon <= res.sunset);
        assert!(res.sunset - res.sunrise <= 1.0);

        // outside polar day and night the sun rises strictly before noon and sets after it
        if s.sunrise.is_finite() {
            assert!(s.sunrise < s.solar_noon && s.solar_noon < s.sunset);
            assert_eq!(s.sunrise, res.sunrise);
        }

        let total = res.solar_zenith_angle_corrected + res.solar_elevation_angle_corrected;
        assert!((total - 90.0).abs() < 1e-9);
    }
}

#[test]
fn test_strict_agrees_with_clamped_when_finite() {
    let mut rng = StdRng::seed_from_u64(7_u64);
    let instants = random_instants(&mut rng, 500);

    let strict = solar_angle_batch(&instants, &SolarAngleOptions::default());
    let clamped = solar_angle_batch(&instants, &CLAMPED);

    for (s, c) in strict.iter().zip(&clamped) {
        assert!(s.solar_zenith_angle.is_finite());
        if s.sunrise.is_finite() {
            assert_eq!(s.sunrise, c.sunrise);
            assert_eq!(s.sunset, c.sunset);
        }
        if s.solar_azimuth_angle.is_finite() {
            assert_eq!(s.solar_azimuth_angle, c.solar_azimuth_angle);
        }
        assert_eq!(s.solar_noon, c.solar_noon);
        assert_eq!(s.hour_angle, c.hour_angle);
    }
}

#[test]
fn test_determinism() {
    let mut rng = StdRng::seed_from_u64(1234_u64);
    let instants = random_instants(&mut rng, 100);

    let first = solar_angle_batch(&instants, &SolarAngleOptions::default());
    let second = solar_angle_batch(&instants, &SolarAngleOptions::default());
    for (a, b) in first.iter().zip(&second) {
        assert_solar_close(a, b, 0.0);
    }
}

#[test]
fn test_timezone_shifts_clock_not_sun() {
    // the same physical instant, expressed on two different local clocks
    let utc = Epoch::from_gregorian_utc_hms(2021, 4, 10, 14, 0, 0);
    let cest = Epoch::from_gregorian_utc_hms(2021, 4, 10, 16, 0, 0);

    let a = solar_angle(&utc, 48.85, 2.35, 0.0);
    let b = solar_angle(&cest, 48.85, 2.35, 2.0);

    assert!((a.solar_zenith_angle - b.solar_zenith_angle).abs() < 1e-8);
    assert!((a.solar_azimuth_angle - b.solar_azimuth_angle).abs() < 1e-8);
    assert!((a.hour_angle - b.hour_angle).abs() < 1e-8);
    // local noon moves by two hours on the local clock
    assert!((b.solar_noon - a.solar_noon - 2.0 / 24.0).abs() < 1e-8);
}

#[test]
fn test_equinox_day_length() {
    let res = solar_angle_from_str("2024-03-20T12:00:00", 0.0, 0.0, 0.0).unwrap();
    assert!((res.sunrise - 0.25).abs() < 0.01);
    assert!((res.sunset - 0.75).abs() < 0.01);
}

#[test]
fn test_polar_night() {
    let epoch = Epoch::from_gregorian_utc_hms(2019, 12, 21, 12, 0, 0);

    let strict = solar_angle(&epoch, 80.0, 15.0, 1.0);
    assert_close_or_nan(strict.sunrise, f64::NAN, 0.0, "sunrise");
    assert_close_or_nan(strict.sunset, f64::NAN, 0.0, "sunset");
    assert!(strict.solar_elevation_angle < 0.0);

    let clamped = solar_angle_with(&epoch, 80.0, 15.0, 1.0, &CLAMPED);
    assert!(clamped.sunrise.is_finite() && clamped.sunset.is_finite());
    assert_eq!(clamped.sunrise, clamped.solar_noon);
}

#[test]
fn test_refraction_curve_is_bounded() {
    let mut elevation = -90.0;
    while elevation <= 90.0 {
        let refraction = atmospheric_refraction(elevation);
        assert!(refraction.is_finite());
        assert!((-0.1..1.0).contains(&refraction), "{elevation}: {refraction}");
        elevation += 0.25;
    }
    assert_eq!(atmospheric_refraction(90.0), 0.0);
}
