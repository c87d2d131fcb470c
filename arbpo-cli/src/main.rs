mod commands;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use arbpo::{ConvertOptions, Error};
use arbpo::formats::arb::DEFAULT_INDENT;
use clap::{ArgAction, Parser, Subcommand};

use crate::commands::{run_convert_command, run_export_command, run_import_command};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a PO catalog from an ARB source file.
    Export {
        /// ARB file in the source language
        source: PathBuf,
        /// ARB file with existing translations
        translated: Option<PathBuf>,
        /// The PO file to write (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip messages with malformed plurals instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Build a translated ARB file from a PO catalog.
    Import {
        /// The PO catalog to read
        input: PathBuf,
        /// The ARB file to write (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Indentation of the written JSON
        #[arg(long, default_value_t = DEFAULT_INDENT)]
        indent: usize,
        /// Value for `@@locale`, e.g. `fr` or `pt_BR`
        #[arg(long)]
        locale: Option<String>,
        /// Skip entries that cannot be converted instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Convert between ARB and PO, picking the direction from file extensions.
    Convert {
        /// The input file to process
        #[arg(short, long)]
        input: PathBuf,
        /// The output file to write the results to
        #[arg(short, long)]
        output: PathBuf,
        /// Indentation of written JSON
        #[arg(long, default_value_t = DEFAULT_INDENT)]
        indent: usize,
        /// Value for `@@locale` when writing ARB
        #[arg(long)]
        locale: Option<String>,
        /// Skip messages that cannot be converted instead of failing
        #[arg(long)]
        skip_invalid: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose, args.quiet);

    let result = match args.commands {
        Commands::Export {
            source,
            translated,
            output,
            skip_invalid,
        } => {
            let options = ConvertOptions::new().with_skip_invalid(skip_invalid);
            run_export_command(&source, translated.as_deref(), output.as_deref(), &options)
        }
        Commands::Import {
            input,
            output,
            indent,
            locale,
            skip_invalid,
        } => {
            let options = ConvertOptions::new()
                .with_indent(indent)
                .with_locale(locale)
                .with_skip_invalid(skip_invalid);
            run_import_command(&input, output.as_deref(), &options)
        }
        Commands::Convert {
            input,
            output,
            indent,
            locale,
            skip_invalid,
        } => {
            let options = ConvertOptions::new()
                .with_indent(indent)
                .with_locale(locale)
                .with_skip_invalid(skip_invalid);
            run_convert_command(input, output, &options)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            // Other variants already include their source in the message.
            if let Error::Conversion {
                source: Some(cause),
                ..
            } = &e
            {
                eprintln!("  caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
