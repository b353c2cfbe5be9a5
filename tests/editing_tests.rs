use notepad::buffer::Movement;
use notepad::editor::Clipboard;
use notepad::file::FsFileStore;
use notepad::{Command, Notepad};
use proptest::prelude::*;

fn notepad() -> Notepad<FsFileStore> {
    Notepad::with_parts(FsFileStore, Clipboard::detached())
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => prop::sample::select(vec!['a', 'z', ' ', '1', 'あ', '\t']).prop_map(Command::InsertChar),
        2 => Just(Command::InsertNewline),
        2 => Just(Command::DeleteBackward),
        1 => Just(Command::DeleteForward),
        1 => Just(Command::Undo),
        1 => Just(Command::Redo),
        1 => Just(Command::SelectAll),
        1 => Just(Command::Cut),
        1 => Just(Command::Paste),
        1 => prop::sample::select(vec![
            Movement::Left,
            Movement::Right,
            Movement::Up,
            Movement::Down,
            Movement::LineStart,
            Movement::BufferEnd,
        ])
        .prop_map(|movement| Command::Move { movement, extend: false }),
        1 => Just(Command::Move { movement: Movement::Left, extend: true }),
    ]
}

proptest! {
    #[test]
    fn gutter_always_matches_buffer(commands in prop::collection::vec(command_strategy(), 0..80)) {
        let mut notepad = notepad();
        for command in commands {
            notepad.dispatch(command);
            let lines = notepad.editor().line_count();
            let labels: Vec<String> = notepad.gutter().labels().map(str::to_string).collect();
            let expected: Vec<String> = (1..=lines).map(|n| n.to_string()).collect();
            prop_assert_eq!(labels, expected);
            prop_assert!(!notepad.gutter().is_writable());
        }
    }

    #[test]
    fn undo_everything_restores_empty_buffer(text in "[a-z \n]{0,40}") {
        let mut notepad = notepad();
        for ch in text.chars() {
            notepad.dispatch(if ch == '\n' { Command::InsertNewline } else { Command::InsertChar(ch) });
        }
        while notepad.history().can_undo() {
            notepad.dispatch(Command::Undo);
        }
        prop_assert_eq!(notepad.text(), "");
        prop_assert_eq!(notepad.gutter().text(), "1");
    }
}

#[test]
fn word_typing_undoes_as_one_step() {
    let mut notepad = notepad();
    for ch in "hello world".chars() {
        notepad.dispatch(Command::InsertChar(ch));
    }
    notepad.dispatch(Command::Undo);
    assert_eq!(notepad.text(), "hello ");
    notepad.dispatch(Command::Undo);
    assert_eq!(notepad.text(), "hello");
    notepad.dispatch(Command::Undo);
    assert_eq!(notepad.text(), "");
}

#[test]
fn new_edit_discards_redo() {
    let mut notepad = notepad();
    for ch in "abc".chars() {
        notepad.dispatch(Command::InsertChar(ch));
    }
    notepad.dispatch(Command::Undo);
    assert_eq!(notepad.text(), "");
    notepad.dispatch(Command::InsertChar('x'));
    notepad.dispatch(Command::Redo);
    assert_eq!(notepad.text(), "x");
}

#[test]
fn boundary_deletes_are_silent() {
    let mut notepad = notepad();
    let outcome = notepad.dispatch(Command::DeleteBackward);
    assert!(outcome.effects.is_empty());
    let outcome = notepad.dispatch(Command::DeleteForward);
    assert!(outcome.effects.is_empty());
    assert!(!notepad.document().is_modified());
}

#[test]
fn control_characters_are_ignored() {
    let mut notepad = notepad();
    let outcome = notepad.dispatch(Command::InsertChar('\u{7}'));
    assert!(outcome.effects.is_empty());
    assert_eq!(notepad.text(), "");
}

#[test]
fn shift_selection_then_typing_replaces() {
    let mut notepad = notepad();
    for ch in "abcdef".chars() {
        notepad.dispatch(Command::InsertChar(ch));
    }
    for _ in 0..3 {
        notepad.dispatch(Command::Move { movement: Movement::Left, extend: true });
    }
    assert_eq!(notepad.editor().selected_text().as_deref(), Some("def"));
    notepad.dispatch(Command::InsertChar('X'));
    assert_eq!(notepad.text(), "abcX");
    notepad.dispatch(Command::Undo);
    assert_eq!(notepad.text(), "abcdef");
}
