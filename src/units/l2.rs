//! Lecture 2: plotting and data handling in Python.

use crate::unit::{Check, Unit};

pub fn unit() -> Unit {
    Unit::new("l2")
        .description("Lecture 2: numpy, matplotlib and serialisation")
        .language_packages(["numpy"])
        .self_tests([
            Check::can_import("matplotlib"),
            Check::can_import("matplotlib.pyplot"),
            Check::can_import("numpy"),
            Check::can_import("pickle"),
            Check::can_import("json"),
        ])
}
