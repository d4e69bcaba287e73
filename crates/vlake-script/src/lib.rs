//! # vlake Script
//!
//! A line-oriented language for replaying editing sessions against a
//! [`vlake::Editor`]. Every line holds one command:
//!
//! ```text
//! # modus ponens
//! select root
//! text "A"
//! add right
//! text "A \to B"
//! select parent
//! add below
//! text "B"
//! select root
//! select connective 0
//! annotate right "MP"
//! ```
//!
//! ## Usage
//!
//! ```
//! # use vlake::Editor;
//! # use vlake::draw::MonospaceMeasurer;
//! # use vlake_script::{Script, ScriptError};
//! fn main() -> Result<(), ScriptError> {
//!     let script = Script::parse("select root\ntext \"A\"\nadd below\ntext \"B\"")?;
//!     let mut editor = Editor::default();
//!     let report = script.replay(&mut editor, &MonospaceMeasurer::default())?;
//!     assert_eq!(report.applied(), 4);
//!     Ok(())
//! }
//! ```

mod command;
mod error;
mod parser;
mod span;

pub use command::{Command, SelectTarget};
pub use error::{Diagnostic, ErrorCode, Label, ParseError, ScriptError};
pub use span::{Span, Spanned};

use log::{info, warn};

use vlake::{Decline, EditStatus, Editor, VlakeError, draw::TextMeasurer};

/// A parsed edit script.
#[derive(Debug, Clone, Default)]
pub struct Script {
    commands: Vec<Spanned<Command>>,
}

/// What happened while replaying a script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayReport {
    applied: usize,
    declined: Vec<(Span, Decline)>,
}

impl ReplayReport {
    /// Number of commands that changed the tree or the selection.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Commands that were declined, with the reason.
    pub fn declined(&self) -> &[(Span, Decline)] {
        &self.declined
    }
}

impl Script {
    /// Parses `source`, reporting every malformed line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] with one diagnostic per rejected line.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let commands = parser::parse_commands(source)?;
        info!(commands = commands.len(); "Script parsed");
        Ok(Self { commands })
    }

    pub fn commands(&self) -> &[Spanned<Command>] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Runs every command against `editor`, laying out after each one.
    ///
    /// Declined commands are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Command`] for the first command that hits
    /// broken editor state; earlier commands stay applied.
    pub fn replay(
        &self,
        editor: &mut Editor,
        measurer: &dyn TextMeasurer,
    ) -> Result<ReplayReport, ScriptError> {
        let mut report = ReplayReport::default();
        let fail = |span: Span| move |source: VlakeError| ScriptError::Command { span, source };

        editor.layout(measurer).map_err(fail(Span::default()))?;
        for command in &self.commands {
            let span = command.span();
            match command.inner().apply(editor).map_err(fail(span))? {
                EditStatus::Applied => report.applied += 1,
                EditStatus::Declined(reason) => {
                    warn!(command:% = command.inner(), span:% = span, reason:% = reason; "Command declined");
                    report.declined.push((span, reason));
                }
            }
            editor.layout(measurer).map_err(fail(span))?;
        }

        info!(
            applied = report.applied,
            declined = report.declined.len();
            "Script replayed"
        );
        Ok(report)
    }
}
