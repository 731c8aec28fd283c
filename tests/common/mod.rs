use approx::assert_relative_eq;
use ecoflux::radtrans::solar_radiation::SolarAngleResult;

/// Compare two floats, where two `NaN` are considered equal.
pub fn assert_close_or_nan(actual: f64, expected: f64, epsilon: f64, field: &str) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "{field}: expected NaN, got {actual}");
    } else {
        assert_relative_eq!(actual, expected, epsilon = epsilon);
    }
}

pub fn assert_solar_close(actual: &SolarAngleResult, expected: &SolarAngleResult, epsilon: f64) {
    let fields = [
        ("solar_noon", actual.solar_noon, expected.solar_noon),
        ("sunrise", actual.sunrise, expected.sunrise),
        ("sunset", actual.sunset, expected.sunset),
        ("hour_angle", actual.hour_angle, expected.hour_angle),
        (
            "solar_zenith_angle",
            actual.solar_zenith_angle,
            expected.solar_zenith_angle,
        ),
        (
            "solar_elevation_angle",
            actual.solar_elevation_angle,
            expected.solar_elevation_angle,
        ),
        (
            "solar_azimuth_angle",
            actual.solar_azimuth_angle,
            expected.solar_azimuth_angle,
        ),
        (
            "atmospheric_refraction",
            actual.atmospheric_refraction,
            expected.atmospheric_refraction,
        ),
        (
            "solar_zenith_angle_corrected",
            actual.solar_zenith_angle_corrected,
            expected.solar_zenith_angle_corrected,
        ),
        (
            "solar_elevation_angle_corrected",
            actual.solar_elevation_angle_corrected,
            expected.solar_elevation_angle_corrected,
        ),
    ];

    for (field, a, e) in fields {
        assert_close_or_nan(a, e, epsilon, field);
    }
}
