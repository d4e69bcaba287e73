//! Line-oriented parser for edit scripts.
//!
//! Each non-blank line holds one command followed by optional arguments and
//! an optional `#` comment. Parsing recovers at the next line after an
//! error, so a single pass reports every bad line.

use log::{debug, trace};
use winnow::{
    Parser as _,
    ascii::{dec_uint, float, line_ending, space0},
    combinator::{alt, eof, opt, preceded, repeat},
    error::{AddContext, ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{none_of, one_of, take_till, take_while},
};

use vlake::{draw::LineStyle, edit::Direction, element::Side, geometry::Point, symbol::SymbolTable};

use crate::{
    command::{Command, SelectTarget},
    error::{Diagnostic, ErrorCode, ParseError},
    span::{Span, Spanned},
};

const COMMANDS: &str =
    "add, text, connective, line, annotate, box, select, click, copy, paste, delete, reset";

/// Diagnostic details attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq)]
struct ScriptDiagnostic {
    code: ErrorCode,
    message: String,
    help: Option<String>,
    span: Span,
}

impl ScriptDiagnostic {
    fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            help: None,
            span,
        }
    }

    fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn into_diagnostic(self) -> Diagnostic {
        let diag = Diagnostic::error(self.message)
            .with_code(self.code)
            .with_label(self.span, self.code.description());
        match self.help {
            Some(help) => diag.with_help(help),
            None => diag,
        }
    }
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<ScriptDiagnostic>>;

/// Aborts the current line with `diagnostic`.
fn fail<O>(input: &Input<'_>, diagnostic: ScriptDiagnostic) -> IResult<O> {
    Err(ErrMode::Cut(ContextError::new().add_context(
        input,
        &input.checkpoint(),
        diagnostic,
    )))
}

/// Span from the current position to the end of the line.
fn rest_of_line(input: &Input<'_>) -> Span {
    let start = input.current_token_start();
    let len = input.find(['\n', '\r']).unwrap_or(input.len());
    Span::new(start..start + len.max(1))
}

fn at_line_end(input: &Input<'_>) -> bool {
    matches!(input.chars().next(), None | Some('\n' | '\r' | '#'))
}

fn comment(input: &mut Input<'_>) -> IResult<()> {
    ('#', take_till(0.., ['\n', '\r'])).void().parse_next(input)
}

/// Blanks, an optional comment, then a line break or the end of input.
fn end_of_line(input: &mut Input<'_>) -> IResult<()> {
    space0.parse_next(input)?;
    opt(comment).parse_next(input)?;
    if opt(alt((line_ending, eof))).parse_next(input)?.is_some() {
        return Ok(());
    }
    let span = rest_of_line(input);
    fail(
        input,
        ScriptDiagnostic::new(ErrorCode::E100, "unexpected input after command", span)
            .with_help("write one command per line; start comments with `#`"),
    )
}

fn keyword<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '!').parse_next(input)
}

/// A bare argument: everything up to the next blank, comment or line break.
fn word<'a>(input: &mut Input<'a>) -> IResult<(&'a str, Span)> {
    take_while(1.., |c: char| !c.is_whitespace() && c != '#' && c != '"')
        .with_span()
        .map(|(text, range)| (text, Span::new(range)))
        .parse_next(input)
}

/// Skips the blanks before an argument, failing if the line ends first.
fn expect_argument(input: &mut Input<'_>, command: Span, what: &str, help: &str) -> IResult<()> {
    space0.parse_next(input)?;
    if at_line_end(input) {
        return fail(
            input,
            ScriptDiagnostic::new(ErrorCode::E102, format!("missing {what}"), command)
                .with_help(help),
        );
    }
    Ok(())
}

fn named_argument<T>(
    input: &mut Input<'_>,
    command: Span,
    what: &str,
    choices: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> IResult<T> {
    let help = format!("use one of: {choices}");
    expect_argument(input, command, what, &help)?;
    let (text, span) = word(input)?;
    match parse(text) {
        Some(value) => Ok(value),
        None => fail(
            input,
            ScriptDiagnostic::new(ErrorCode::E100, format!("expected {what}, found `{text}`"), span)
                .with_help(help),
        ),
    }
}

fn direction(input: &mut Input<'_>, command: Span) -> IResult<Direction> {
    named_argument(input, command, "a direction", "above, below, left, right", |text| {
        text.parse().ok()
    })
}

fn side(input: &mut Input<'_>, command: Span) -> IResult<Side> {
    named_argument(input, command, "a side", "left, right", |text| text.parse().ok())
}

fn symbol_key(input: &mut Input<'_>, command: Span) -> IResult<&'static str> {
    let table = SymbolTable::builtin();
    let keys = table.iter().map(|symbol| symbol.key()).collect::<Vec<_>>().join(", ");
    expect_argument(input, command, "a symbol key", &format!("use one of: {keys}"))?;
    let (text, span) = word(input)?;
    match table.get(text) {
        Ok(symbol) => Ok(symbol.key()),
        Err(_) => fail(
            input,
            ScriptDiagnostic::new(ErrorCode::E200, format!("unknown symbol key `{text}`"), span)
                .with_help(format!("valid keys: {keys}")),
        ),
    }
}

fn line_style(input: &mut Input<'_>, command: Span) -> IResult<LineStyle> {
    let styles = LineStyle::ALL.map(|style| style.as_str()).join(", ");
    expect_argument(input, command, "a line style", &format!("use one of: {styles}"))?;
    let (text, span) = word(input)?;
    match text.parse::<LineStyle>() {
        Ok(style) => Ok(style),
        Err(_) => fail(
            input,
            ScriptDiagnostic::new(ErrorCode::E201, format!("unknown line style `{text}`"), span)
                .with_help(format!("valid values: {styles}")),
        ),
    }
}

/// A double-quoted string with `\"` and `\\` escapes.
///
/// Any other backslash is kept as written, so LaTeX commands need no escaping.
fn quoted(input: &mut Input<'_>) -> IResult<String> {
    let start = input.current_token_start();
    '"'.parse_next(input)?;
    let text = repeat(
        0..,
        alt((
            preceded('\\', one_of(['"', '\\'])),
            none_of(['"', '\n', '\r']),
        )),
    )
    .fold(String::new, |mut acc: String, ch: char| {
        acc.push(ch);
        acc
    })
    .parse_next(input)?;

    if opt('"').parse_next(input)?.is_none() {
        let span = Span::new(start..input.current_token_start());
        return fail(
            input,
            ScriptDiagnostic::new(ErrorCode::E101, "unterminated string", span)
                .with_help("close the string with `\"` before the end of the line"),
        );
    }
    Ok(text)
}

fn expect_quoted(input: &mut Input<'_>, command: Span, what: &str) -> IResult<String> {
    let help = "write the text in double quotes";
    expect_argument(input, command, what, help)?;
    if input.starts_with('"') {
        return quoted(input);
    }
    let span = rest_of_line(input);
    fail(
        input,
        ScriptDiagnostic::new(ErrorCode::E100, format!("expected {what} in double quotes"), span)
            .with_help(help),
    )
}

fn number<T>(
    input: &mut Input<'_>,
    command: Span,
    what: &str,
    mut parser: impl FnMut(&mut Input<'_>) -> IResult<T>,
) -> IResult<T> {
    expect_argument(input, command, what, "write a plain decimal number")?;
    let start = input.current_token_start();
    let checkpoint = input.checkpoint();
    match parser(input) {
        Ok(value) => Ok(value),
        Err(ErrMode::Backtrack(_)) => {
            input.reset(&checkpoint);
            let span = word(input).map(|(_, span)| span).unwrap_or_else(|_| Span::new(start..start + 1));
            fail(
                input,
                ScriptDiagnostic::new(ErrorCode::E100, format!("expected {what}"), span)
                    .with_help("write a plain decimal number"),
            )
        }
        Err(err) => Err(err),
    }
}

fn index(input: &mut Input<'_>, command: Span) -> IResult<usize> {
    number(input, command, "an index", |input| dec_uint.parse_next(input))
}

fn coordinate(input: &mut Input<'_>, command: Span) -> IResult<f32> {
    number(input, command, "a coordinate", |input| float.parse_next(input))
}

fn select_target(input: &mut Input<'_>, command: Span) -> IResult<SelectTarget> {
    let target = named_argument(
        input,
        command,
        "a selection target",
        "root, parent, none, child <n>, connective <n>",
        |text| match text {
            "root" => Some(Ok(SelectTarget::Root)),
            "parent" => Some(Ok(SelectTarget::Parent)),
            "none" => Some(Ok(SelectTarget::None)),
            "child" => Some(Err(SelectTarget::Child as fn(usize) -> SelectTarget)),
            "connective" => Some(Err(SelectTarget::Connective as fn(usize) -> SelectTarget)),
            _ => None,
        },
    )?;
    match target {
        Ok(target) => Ok(target),
        Err(indexed) => Ok(indexed(index(input, command)?)),
    }
}

fn command(input: &mut Input<'_>) -> IResult<Spanned<Command>> {
    let (name, range) = keyword.with_span().parse_next(input)?;
    let span = Span::new(range);
    let command = match name {
        "add" => Command::Add(direction(input, span)?),
        "text" => {
            space0.parse_next(input)?;
            if at_line_end(input) {
                Command::Text(String::new())
            } else {
                Command::Text(expect_quoted(input, span, "the leaf text")?)
            }
        }
        "connective" => Command::Connective(symbol_key(input, span)?),
        "line" => Command::Line(line_style(input, span)?),
        "annotate" => {
            let side = side(input, span)?;
            Command::Annotate(side, expect_quoted(input, span, "the annotation text")?)
        }
        "box" => Command::ToggleBox,
        "select" => Command::Select(select_target(input, span)?),
        "click" => {
            let x = coordinate(input, span)?;
            let y = coordinate(input, span)?;
            Command::Click(Point::new(x, y))
        }
        "copy" => Command::Copy,
        "paste" => Command::Paste,
        "delete" => Command::Delete { confirmed: false },
        "delete!" => Command::Delete { confirmed: true },
        "reset" => Command::Reset { confirmed: false },
        "reset!" => Command::Reset { confirmed: true },
        other => {
            return fail(
                input,
                ScriptDiagnostic::new(ErrorCode::E100, format!("unknown command `{other}`"), span)
                    .with_help(format!("commands: {COMMANDS}")),
            );
        }
    };
    let span = Span::new(span.start()..input.current_token_start());
    end_of_line(input)?;
    trace!(command:% = command, span:% = span; "Parsed command");
    Ok(Spanned::new(command, span))
}

/// Parses one line; blank and comment-only lines yield nothing.
fn line(input: &mut Input<'_>) -> IResult<Option<Spanned<Command>>> {
    space0.parse_next(input)?;
    if at_line_end(input) {
        end_of_line(input)?;
        return Ok(None);
    }
    command(input).map(Some)
}

fn convert_err_mode(err: ErrMode<ContextError<ScriptDiagnostic>>, input: &Input<'_>) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };
    if let Some(diagnostic) = context_error.context().next() {
        return diagnostic.clone().into_diagnostic();
    }

    // A line that does not start with a command keyword
    ScriptDiagnostic::new(ErrorCode::E100, "expected a command", rest_of_line(input))
        .with_help(format!("commands: {COMMANDS}"))
        .into_diagnostic()
}

/// Skips past the next line break.
fn skip_line(input: &mut Input<'_>) {
    let len = input.find('\n').map_or(input.len(), |at| at + 1);
    input.next_slice(len);
}

/// Parses a whole script, collecting a diagnostic for every bad line.
pub(crate) fn parse_commands(source: &str) -> Result<Vec<Spanned<Command>>, ParseError> {
    let mut input = LocatingSlice::new(source);
    let mut commands = Vec::new();
    let mut diagnostics = Vec::new();

    while !input.is_empty() {
        let checkpoint = input.checkpoint();
        match line(&mut input) {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(err) => {
                let diagnostic = convert_err_mode(err, &input);
                debug!(diagnostic:% = diagnostic; "Script line rejected");
                diagnostics.push(diagnostic);
                input.reset(&checkpoint);
                skip_line(&mut input);
            }
        }
    }

    if diagnostics.is_empty() {
        Ok(commands)
    } else {
        Err(ParseError::new(diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(source: &str) -> Command {
        let mut commands = parse_commands(source).expect("script should parse");
        assert_eq!(commands.len(), 1, "expected one command in {source:?}");
        commands.remove(0).into_inner()
    }

    fn first_error(source: &str) -> Diagnostic {
        let err = parse_commands(source).expect_err("script should be rejected");
        err.diagnostics()[0].clone()
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_one("box"), Command::ToggleBox);
        assert_eq!(parse_one("copy"), Command::Copy);
        assert_eq!(parse_one("paste"), Command::Paste);
        assert_eq!(parse_one("delete"), Command::Delete { confirmed: false });
        assert_eq!(parse_one("delete!"), Command::Delete { confirmed: true });
        assert_eq!(parse_one("reset!"), Command::Reset { confirmed: true });
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(parse_one("add below"), Command::Add(Direction::Below));
        assert_eq!(parse_one("connective log_or"), Command::Connective("log_or"));
        assert_eq!(
            parse_one("line single_dotted"),
            Command::Line(LineStyle::SingleDotted)
        );
        assert_eq!(
            parse_one("annotate right \"R1\""),
            Command::Annotate(Side::Right, "R1".to_string())
        );
        assert_eq!(
            parse_one("click 120.5 40"),
            Command::Click(Point::new(120.5, 40.0))
        );
    }

    #[test]
    fn test_select_targets() {
        assert_eq!(parse_one("select root"), Command::Select(SelectTarget::Root));
        assert_eq!(parse_one("select none"), Command::Select(SelectTarget::None));
        assert_eq!(
            parse_one("select child 2"),
            Command::Select(SelectTarget::Child(2))
        );
        assert_eq!(
            parse_one("select connective 0"),
            Command::Select(SelectTarget::Connective(0))
        );
    }

    #[test]
    fn test_text_strings() {
        assert_eq!(parse_one("text"), Command::Text(String::new()));
        assert_eq!(
            parse_one(r#"text "A \land B""#),
            Command::Text("A \\land B".to_string())
        );
        assert_eq!(
            parse_one(r#"text "say \"hi\" \\""#),
            Command::Text("say \"hi\" \\".to_string())
        );
        assert_eq!(
            parse_one("text \"# not a comment\""),
            Command::Text("# not a comment".to_string())
        );
    }

    #[test]
    fn test_blank_lines_and_comments() {
        let source = "# heading\n\n  copy   # trailing\r\n\t\npaste\n";
        let commands = parse_commands(source).unwrap();
        let parsed: Vec<_> = commands.iter().map(|c| c.inner().clone()).collect();
        assert_eq!(parsed, vec![Command::Copy, Command::Paste]);
        assert_eq!(commands[0].span(), Span::new(13..17));
    }

    #[test]
    fn test_empty_script() {
        assert!(parse_commands("").unwrap().is_empty());
        assert!(parse_commands("\n# only comments\n").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let diag = first_error("frobnicate");
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.span(), Some(Span::new(0..10)));
        assert!(diag.message().contains("frobnicate"));
    }

    #[test]
    fn test_line_without_keyword() {
        let diag = first_error("copy\n42\n");
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.span(), Some(Span::new(5..7)));
    }

    #[test]
    fn test_unterminated_string() {
        let diag = first_error("text \"open");
        assert_eq!(diag.code(), Some(ErrorCode::E101));
        assert_eq!(diag.span(), Some(Span::new(5..10)));
    }

    #[test]
    fn test_missing_argument() {
        let diag = first_error("add   # where?");
        assert_eq!(diag.code(), Some(ErrorCode::E102));
        assert_eq!(diag.span(), Some(Span::new(0..3)));
        assert!(diag.help().unwrap().contains("above"));

        assert_eq!(first_error("click 10").code(), Some(ErrorCode::E102));
        assert_eq!(first_error("annotate left").code(), Some(ErrorCode::E102));
    }

    #[test]
    fn test_unknown_symbol_key() {
        let diag = first_error("connective log_xor");
        assert_eq!(diag.code(), Some(ErrorCode::E200));
        assert_eq!(diag.span(), Some(Span::new(11..18)));
        assert!(diag.help().unwrap().contains("log_and"));
    }

    #[test]
    fn test_unknown_line_style() {
        let diag = first_error("line wavy");
        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert_eq!(diag.span(), Some(Span::new(5..9)));
    }

    #[test]
    fn test_bad_arguments() {
        assert_eq!(first_error("add sideways").code(), Some(ErrorCode::E100));
        assert_eq!(first_error("select child x").code(), Some(ErrorCode::E100));
        assert_eq!(first_error("click ten 4").code(), Some(ErrorCode::E100));
        assert_eq!(first_error("annotate left R1").code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_trailing_input() {
        let diag = first_error("copy now");
        assert_eq!(diag.code(), Some(ErrorCode::E100));
        assert_eq!(diag.span(), Some(Span::new(5..8)));
    }

    #[test]
    fn test_every_bad_line_is_reported() {
        let err = parse_commands("copy\nline wavy\npaste\nconnective nope\nbox extra\n").unwrap_err();
        let codes: Vec<_> = err.diagnostics().iter().map(|d| d.code()).collect();
        assert_eq!(
            codes,
            vec![Some(ErrorCode::E201), Some(ErrorCode::E200), Some(ErrorCode::E100)]
        );
    }
}
