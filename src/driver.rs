use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::icon::IconSpec;
use crate::png;

/// Generate every icon in order, printing one `Created <path>` line per file
/// and a summary line at the end.
///
/// Stops at the first failure; icons already written are left in place.
pub fn run(specs: &[IconSpec], create_dirs: bool, out: &mut impl Write) -> Result<()> {
    for spec in specs {
        generate(spec, create_dirs)
            .with_context(|| format!("Failed to create {}", spec.output_path.display()))?;
        writeln!(out, "Created {}", spec.output_path.display())?;
    }
    writeln!(out, "All icons created successfully!")?;
    Ok(())
}

/// Render, encode and write a single icon.
pub fn generate(spec: &IconSpec, create_dirs: bool) -> Result<()> {
    debug!(
        "Rendering {}x{} icon in {}",
        spec.size, spec.size, spec.color
    );
    let pixels = spec.render()?;
    let bytes = png::encode(&pixels)?;

    if create_dirs {
        if let Some(parent) = spec.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    write_file(&spec.output_path, &bytes)?;
    info!("Wrote {} ({} bytes)", spec.output_path.display(), bytes.len());
    Ok(())
}

/// The file handle is closed when this returns, on success or error.
fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}
