//! CLI logic for the vlake deduction tool.
//!
//! The command-line host replays an edit script against a fresh
//! [`Editor`], then writes the exported markup and, when asked, an SVG
//! picture of the final deduction.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;

use std::fs;

use log::{info, warn};

use vlake::{Editor, draw::CosmicTextMeasurer};
use vlake_script::Script;

/// Run the vlake CLI application
///
/// # Errors
///
/// Returns [`CliError`] for:
/// - File I/O errors
/// - Configuration loading errors
/// - Script parsing errors
/// - Commands that fail during replay
/// - Scripts that leave nothing to export
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Replaying script"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let script = Script::parse(&source).map_err(|err| CliError::Parse {
        err,
        src: source.clone(),
    })?;

    let measurer = CosmicTextMeasurer::shared();
    let mut editor = Editor::new(app_config);
    let report = script
        .replay(&mut editor, measurer)
        .map_err(|err| CliError::from_script(err, source.as_str()))?;
    if !report.declined().is_empty() {
        warn!(declined = report.declined().len(); "Some commands had no effect");
    }

    let markup = editor.checked_markup().map_err(CliError::Export)?;
    fs::write(&args.output, markup)?;
    info!(output_file = args.output; "Markup exported successfully");

    if let Some(svg_path) = &args.svg {
        let svg = editor.render_svg(measurer)?;
        fs::write(svg_path, svg)?;
        info!(output_file = svg_path.as_str(); "SVG exported successfully");
    }

    Ok(())
}
