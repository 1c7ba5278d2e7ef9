use anyhow::{Context, Result};
use log::info;
use ormdto_schema::{transform_file, Dialect, DEFAULT_DIALECT};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub fn run(input: PathBuf, output: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let custom;
    let dialect: &Dialect = match config {
        Some(path) => {
            custom = Dialect::from_file(&path)
                .with_context(|| format!("Failed to load dialect {}", path.display()))?;
            info!("Using dialect from {}", path.display());
            &custom
        }
        None => &*DEFAULT_DIALECT,
    };

    let dto = transform_file(&input, dialect)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    match output {
        Some(path) => {
            fs::write(&path, format!("{}\n", dto))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote DTO for {} to {}", input.display(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", dto).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
