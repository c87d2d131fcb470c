use std::io::{self, Write};
use std::path::{Path, PathBuf};

use arbpo::traits::Parser;
use arbpo::{ArbFormat, ConvertOptions, Error, PoFormat, convert_auto, export, import};

/// ARB → PO. Without `output` the catalog goes to stdout.
pub fn run_export_command(
    source: &Path,
    translated: Option<&Path>,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<(), Error> {
    let source_document = ArbFormat::read_from(source)?;
    let translated_document = match translated {
        Some(path) => ArbFormat::read_from(path)?,
        None => ArbFormat::new(),
    };
    let catalog = export(&source_document, &translated_document, options)?;

    match output {
        Some(path) => {
            catalog.write_to(path)?;
            tracing::info!(
                output = %path.display(),
                entries = catalog.entries.len(),
                "wrote catalog"
            );
            Ok(())
        }
        None => write_stdout(|out| catalog.to_writer(out)),
    }
}

/// PO → ARB. Without `output` the document goes to stdout.
pub fn run_import_command(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<(), Error> {
    let catalog = PoFormat::read_from(input)?;
    let document = import(&catalog, options)?;

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            document.to_writer_with_indent(io::BufWriter::new(file), options.indent)?;
            tracing::info!(
                output = %path.display(),
                messages = document.len(),
                "wrote ARB document"
            );
            Ok(())
        }
        None => write_stdout(|out| document.to_writer_with_indent(out, options.indent)),
    }
}

pub fn run_convert_command(
    input: PathBuf,
    output: PathBuf,
    options: &ConvertOptions,
) -> Result<(), Error> {
    convert_auto(&input, &output, options)?;
    tracing::info!(input = %input.display(), output = %output.display(), "converted");
    Ok(())
}

fn write_stdout<F>(write: F) -> Result<(), Error>
where
    F: FnOnce(&mut io::StdoutLock<'static>) -> Result<(), Error>,
{
    let mut out = io::stdout().lock();
    write(&mut out)?;
    out.flush().map_err(Error::Io)
}
