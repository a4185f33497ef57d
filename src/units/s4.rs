//! Session 4: analog readings through an ADS1115 over I2C.

use crate::unit::{Check, CheckKind, Unit};

/// Opens the ADS1115 on the default I2C bus; fails when the board is absent.
const ADS1115_PROBE_SCRIPT: &str = "\
import board
import busio
import adafruit_ads1x15.ads1115 as ADS
ADS.ADS1115(busio.I2C(board.SCL, board.SDA))
";

pub fn unit() -> Unit {
    Unit::new("s4")
        .description("Session 4: ADS1115 analog input via CircuitPython")
        .interfaces(["i2c"])
        .language_packages(["Adafruit-Blinka", "adafruit-circuitpython-ads1x15"])
        .self_tests([
            Check::interface_enabled("i2c"),
            Check::can_import("board"),
            Check::can_import("busio"),
            Check::can_import("adafruit_ads1x15"),
        ])
        .hardware_tests([Check::new(
            "ADS1115 responds on I2C",
            CheckKind::PythonScript(ADS1115_PROBE_SCRIPT.to_string()),
        )])
}
