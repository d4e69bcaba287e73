use vlake::{
    Decline, Editor,
    draw::{LineStyle, MonospaceMeasurer},
    edit::Direction,
    element::Side,
};
use vlake_script::{Command, ErrorCode, Script, ScriptError, SelectTarget};

const MODUS_PONENS: &str = r#"
# modus ponens
select root
text "A"
add right
text "A \to B"
select parent
add below
text "B"
select root
select connective 0
line double_solid
annotate right "MP"
"#;

#[test]
fn test_parse_modus_ponens() {
    let script = Script::parse(MODUS_PONENS).expect("Failed to parse");
    assert_eq!(script.len(), 11);
    assert_eq!(
        script.commands()[3].inner(),
        &Command::Text("A \\to B".to_string())
    );
    assert_eq!(
        script.commands()[9].inner(),
        &Command::Line(LineStyle::DoubleSolid)
    );
}

#[test]
fn test_replay_modus_ponens() {
    let script = Script::parse(MODUS_PONENS).expect("Failed to parse");
    let mut editor = Editor::default();
    let report = script
        .replay(&mut editor, &MonospaceMeasurer::default())
        .expect("Failed to replay");

    assert_eq!(report.applied(), 11);
    assert!(report.declined().is_empty());
    assert_eq!(
        editor.checked_markup().unwrap(),
        "$ \\vlgoodsyntax \\odframefalse \\od{\\odI{\\odh{A \\vlan A \\to B}}{}{B}{MP}} $"
    );
}

#[test]
fn test_confirmation_commands() {
    let source = "select root\ntext \"A\"\nadd below\nselect root\ndelete\nreset\ndelete!\n";
    let script = Script::parse(source).unwrap();
    let mut editor = Editor::default();
    let report = script
        .replay(&mut editor, &MonospaceMeasurer::default())
        .unwrap();

    let reasons: Vec<_> = report.declined().iter().map(|(_, reason)| *reason).collect();
    assert_eq!(
        reasons,
        vec![Decline::NeedsConfirmation, Decline::NeedsConfirmation]
    );
    assert!(editor.is_empty());
}

#[test]
fn test_parse_errors_carry_codes_and_spans() {
    let source = "select root\nconnective log_xor\nline wavy\ntext \"open\n";
    let err = Script::parse(source).unwrap_err();
    let diagnostics = err.diagnostics();
    assert_eq!(diagnostics.len(), 3);

    assert_eq!(diagnostics[0].code(), Some(ErrorCode::E200));
    let span = diagnostics[0].span().unwrap();
    assert_eq!(&source[span.start()..span.end()], "log_xor");
    assert_eq!(span.line_in(source), 2);

    assert_eq!(diagnostics[1].code(), Some(ErrorCode::E201));
    assert_eq!(diagnostics[2].code(), Some(ErrorCode::E101));
}

#[test]
fn test_parse_error_converts_to_script_error() {
    let result: Result<Script, ScriptError> = Script::parse("add\n").map_err(Into::into);
    match result {
        Err(ScriptError::Parse(err)) => {
            assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E102));
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

mod proptest_tests {
    use proptest::prelude::*;
    use vlake::geometry::Point;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn text_strategy() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 \\\\\"#{}_^]{0,12}"
    }

    fn command_strategy() -> impl Strategy<Value = Command> {
        prop_oneof![
            prop_oneof![
                Just(Direction::Above),
                Just(Direction::Below),
                Just(Direction::Left),
                Just(Direction::Right),
            ]
            .prop_map(Command::Add),
            text_strategy().prop_map(Command::Text),
            prop::sample::select(vec!["log_and", "log_or", "right_arrow", "black_star"])
                .prop_map(Command::Connective),
            prop::sample::select(LineStyle::ALL.to_vec()).prop_map(Command::Line),
            (prop_oneof![Just(Side::Left), Just(Side::Right)], text_strategy())
                .prop_map(|(side, text)| Command::Annotate(side, text)),
            (0usize..10).prop_map(|index| Command::Select(SelectTarget::Child(index))),
            (0u16..800, 0u16..300)
                .prop_map(|(x, y)| Command::Click(Point::new(f32::from(x), f32::from(y)))),
            Just(Command::ToggleBox),
            Just(Command::Delete { confirmed: true }),
        ]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Printing a command in script syntax and parsing it back gives the same command.
    fn check_printed_command_parses_back(command: Command) -> Result<(), TestCaseError> {
        let source = command.to_string();
        let script = Script::parse(&source);
        prop_assert!(script.is_ok(), "`{source}` was rejected: {:?}", script.err());
        let script = script.unwrap();
        prop_assert_eq!(script.len(), 1);
        prop_assert_eq!(script.commands()[0].inner(), &command);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn printed_command_parses_back(command in command_strategy()) {
            check_printed_command_parses_back(command)?;
        }
    }
}
