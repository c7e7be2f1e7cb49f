//! Interactive confirmation.

use std::io::{BufRead, Write};

/// Ask `question` and read one answer line from `input`.
///
/// Only answers whose first character is `y` or `Y` confirm. End of input and read
/// errors count as "no".
pub fn confirm<R: BufRead>(input: &mut R, question: &str) -> bool {
    print!("{} [y/N] ", question);
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) => {
            println!();
            false
        }
        Ok(_) => answer.starts_with(['y', 'Y']),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read confirmation");
            false
        }
    }
}
