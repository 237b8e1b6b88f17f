//! Process-wide console critical section.
//!
//! Inbound broker messages, publish confirmations and the operator status line
//! all write to stdout from different tasks. Every such write goes through
//! [`with_console`] so multi-line output from one writer is never split by
//! another. The lock guards output only and carries no program state.

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

static CONSOLE: Mutex<()> = Mutex::new(());

/// Run `f` with exclusive access to stdout.
pub fn with_console<R>(f: impl FnOnce(&mut dyn Write) -> R) -> R {
    let _guard = CONSOLE.lock().unwrap_or_else(PoisonError::into_inner);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = f(&mut out);
    let _ = out.flush();
    result
}

pub fn print_line(line: impl Display) {
    with_console(|out| {
        let _ = writeln!(out, "{line}");
    });
}

/// Print several lines without any other console writer in between.
pub fn print_block<S: AsRef<str>>(lines: &[S]) {
    with_console(|out| {
        for line in lines {
            let _ = writeln!(out, "{}", line.as_ref());
        }
    });
}
