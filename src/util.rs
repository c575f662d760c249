use crate::error::ParseError;
use crate::value::RuntimeError;

// Diagnostics go to stderr so they don't mix with program output.

pub fn report_parse_error(error: &ParseError) {
    // Print all causes.
    for cause in error.causes.iter() {
        eprintln!("{}", cause);
    }
}

pub fn report_runtime_error(error: &RuntimeError) {
    eprintln!("{}", error);
}
