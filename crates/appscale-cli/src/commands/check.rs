//! Check command - validate an app's thread-safety declaration

use appscale_core::{FsReader, threadsafe_value};
use console::style;

use crate::error::Result;

pub fn run(app_dir: &str, descriptor: &str) -> Result<()> {
    let reader = FsReader;
    let value = threadsafe_value(&reader, app_dir, descriptor)?;

    println!(
        "{} {} declares threadsafe={}",
        style("✓").green(),
        descriptor,
        value
    );

    Ok(())
}
