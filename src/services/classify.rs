//! Serial-number classification

use crate::models::DeviceCategory;

const ACCESS_POINT_PREFIX: &str = "FP";
const SWITCH_PREFIX: &str = "S";

/// Classify a serial number by its prefix, ignoring case and surrounding
/// whitespace.
///
/// `FP…` is an access point, `S…` is a switch, anything else (including an
/// empty serial) is invalid.
#[must_use]
pub fn classify(serial: &str) -> DeviceCategory {
    let serial = serial.trim();

    if has_prefix_ignore_case(serial, ACCESS_POINT_PREFIX) {
        DeviceCategory::AccessPoint
    } else if has_prefix_ignore_case(serial, SWITCH_PREFIX) {
        DeviceCategory::Switch
    } else {
        DeviceCategory::Invalid
    }
}

fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
