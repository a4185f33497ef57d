//! Lecture 3: GUIs and GPIO.

use crate::unit::{Check, Unit};

pub fn unit() -> Unit {
    Unit::new("l3")
        .description("Lecture 3: guizero GUIs and blinking an LED with gpiozero")
        // guizero renders through tkinter
        .system_packages(["python3-tk"])
        .language_packages(["guizero", "gpiozero", "ipython"])
        .self_tests([
            Check::can_import("guizero"),
            Check::can_import("IPython.display"),
            Check::can_import("gpiozero"),
        ])
}
