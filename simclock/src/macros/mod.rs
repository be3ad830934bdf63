use colored::Colorize;

use crate::time::Instant;

mod print;

#[doc(hidden)]
pub fn stamp(time: &Instant) -> String {
    format!("[{}]", time).as_str().dimmed().to_string()
}
