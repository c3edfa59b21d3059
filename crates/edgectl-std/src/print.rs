use std::io::{self, Write};

use crate::{success_message, Style};

/// Prints to the standard error, with a newline.
///
/// Equivalent to the [`eprintln!`] macro except that an info prefix is
/// printed before the message.
#[macro_export]
macro_rules! infoln {
    ($($t:tt)*) => {{
        eprint!("{} ", $crate::Style::InfoPrefix.paint("==>"));
        eprintln!($($t)*);
    }};
}

/// Prints to the standard error, with a newline.
///
/// Equivalent to the [`eprintln!`] macro except that a warning prefix is
/// printed before the message.
#[macro_export]
macro_rules! warnln {
    ($($t:tt)*) => {{
        eprint!("{} ", $crate::Style::WarningPrefix.paint("warning:"));
        eprintln!($($t)*);
    }};
}

/// Prints to the standard error, with a newline.
///
/// Equivalent to the [`eprintln!`] macro except that an error prefix is
/// printed before the message.
#[macro_export]
macro_rules! errln {
    ($($t:tt)*) => {{
        eprint!("{} ", $crate::Style::ErrorPrefix.paint("error:"));
        eprintln!($($t)*);
    }};
}

/// Writes a success line (checkmark prefix) to `out`.
pub fn success(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out, "{}", success_message(message))
}

/// Writes a warning line to `out`.
pub fn warning(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Style::WarningPrefix.paint("warning:"), message)
}

/// Writes an informational line to `out`.
pub fn info(out: &mut dyn Write, message: &str) -> io::Result<()> {
    writeln!(out, "{} {}", Style::InfoPrefix.paint("==>"), message)
}

/// Writes an empty line, used to separate blocks of output.
pub fn blank(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)
}
