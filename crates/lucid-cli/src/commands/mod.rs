pub mod rename;
pub mod symbols;

use std::io::Read;
use std::path::Path;

use anyhow::Context;

/// Read the input file, or stdin when no path was given.
pub fn read_input(filename: Option<&Path>) -> anyhow::Result<String> {
    match filename {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}
