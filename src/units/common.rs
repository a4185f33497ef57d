//! Content common to every part of the course.

use crate::unit::{Check, Unit};

pub fn unit() -> Unit {
    Unit::new("common")
        .description("Editors, pip and remote access used throughout the course")
        // how students typically reach the Pi
        .interfaces(["vnc"])
        .system_packages([
            "git",
            "python3-pip",
            "mu-editor",
            "thonny",
            "realvnc-vnc-server",
        ])
        .language_packages(["matplotlib", "numpy"])
        .self_tests([
            Check::interface_enabled("vnc"),
            Check::can_import("matplotlib"),
            Check::can_import("numpy"),
            Check::on_path("pip"),
            Check::on_path("mu-editor"),
            Check::on_path("thonny"),
        ])
}
