use std::fmt::Display;

use anyhow::Error;

/// Exits with status `1`, printing the error and its causes, instead of panicking.
pub trait NiceError<T> {
    fn nice_unwrap(self) -> T;

    /// Like `nice_unwrap`, adding `message` as the outermost context of the error.
    fn nice_expect<S: Display + Send + Sync + 'static>(self, message: S) -> T;
}

fn print_error(error: Error) {
    debug!("{:?}", error);
    let mut fail: &dyn std::error::Error = error.as_ref();
    eprintln!("Error: {fail}");
    while let Some(cause) = fail.source() {
        eprintln!("\nCaused by:\n    {cause}");
        fail = cause;
    }
}

impl<T> NiceError<T> for Result<T, Error> {
    fn nice_unwrap(self) -> T {
        self.unwrap_or_else(|e| {
            print_error(e);
            std::process::exit(1)
        })
    }

    fn nice_expect<S: Display + Send + Sync + 'static>(self, message: S) -> T {
        self.unwrap_or_else(|e| {
            print_error(e.context(message));
            std::process::exit(1)
        })
    }
}
