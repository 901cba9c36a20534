//! End-to-end editing scenarios through the public API: history bounds,
//! formatting toggles on non-ASCII text, code-fence gating and persistence.

use slidemark::atoms::storage::{FileStore, PresentationStore};
use slidemark::molecules::editor::boundaries::{find_word_boundaries, is_in_code_block};
use slidemark::molecules::editor::markdown_fmt::{toggle_format, toggle_markdown};
use slidemark::molecules::editor::{
    EditorSession, FormatOutcome, HistoryState, LineFormat, MarkdownFormat, Markers,
};
use slidemark::types::{Presentation, Selection};

// ============================================================================
// History
// ============================================================================

#[test]
fn undo_then_redo_restores_every_step() {
    let mut h = HistoryState::new("");
    let steps = ["a", "ab", "abc", "abcd"];
    for s in steps {
        h.write(s);
    }
    for expected in ["abc", "ab", "a", ""] {
        assert!(h.undo());
        assert_eq!(h.current_value(), expected);
    }
    assert!(!h.undo());
    for expected in steps {
        assert!(h.redo());
        assert_eq!(h.current_value(), expected);
    }
    assert!(!h.redo());
}

#[test]
fn history_is_capped_at_five_hundred() {
    let mut h = HistoryState::new("0");
    for i in 1..=600 {
        h.write(i.to_string());
    }
    assert_eq!(h.entries().len(), 500);
    assert_eq!(h.current_value(), "600");

    let mut undos = 0;
    while h.undo() {
        undos += 1;
    }
    assert_eq!(undos, 499);
    assert_eq!(h.current_value(), "101");
}

#[test]
fn writing_after_undo_drops_the_redo_branch() {
    let mut h = HistoryState::new("a");
    h.write("ab");
    h.write("abc");
    h.undo();
    h.undo();
    h.write("ax");
    assert!(!h.can_redo());
    assert_eq!(h.entries(), ["a", "ax"]);
}

#[test]
fn duplicate_write_is_not_an_undo_step() {
    let mut h = HistoryState::new("same");
    assert!(!h.write("same"));
    assert!(!h.can_undo());
}

// ============================================================================
// Inline formatting
// ============================================================================

#[test]
fn selection_toggle_round_trips_on_cyrillic_text() {
    let text = "привет мир";
    for format in [
        MarkdownFormat::Bold,
        MarkdownFormat::Italic,
        MarkdownFormat::Strikethrough,
        MarkdownFormat::InlineCode,
    ] {
        let on = toggle_markdown(text, Selection::new(0, 6), format);
        let marker_len = format.marker().chars().count();
        assert_eq!(on.text, format!("{m}привет{m} мир", m = format.marker()));
        assert_eq!(on.selection, Selection::new(marker_len, marker_len + 6));

        let off = toggle_markdown(&on.text, on.selection, format);
        assert_eq!(off.text, text);
        assert_eq!(off.selection, Selection::new(0, 6));
    }
}

#[test]
fn cursor_toggle_wraps_cyrillic_word() {
    assert_eq!(find_word_boundaries("привет мир", 2).map(|w| (w.start, w.end)), Some((0, 6)));
    let result = toggle_markdown("привет мир", Selection::cursor(2), MarkdownFormat::Italic);
    assert_eq!(result.text, "*привет* мир");
    assert_eq!(result.selection, Selection::cursor(3));
}

#[test]
fn asymmetric_markers_toggle_back() {
    let markers = Markers::new("<u>", "</u>");
    let on = toggle_format("say hi", Selection::new(4, 6), markers);
    assert_eq!(on.text, "say <u>hi</u>");
    assert_eq!(on.selection, Selection::new(7, 9));

    let off = toggle_format(&on.text, on.selection, markers);
    assert_eq!(off.text, "say hi");
    assert_eq!(off.selection, Selection::new(4, 6));
}

#[test]
fn out_of_range_selection_is_clamped() {
    let result = toggle_markdown("abc", Selection::new(1, 99), MarkdownFormat::Bold);
    assert_eq!(result.text, "a**bc**");
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn formatting_inside_fence_is_refused() {
    let text = "# Demo\n```\nlet a = b * c;\n```\nafter";
    assert!(is_in_code_block(text, 14));
    assert!(!is_in_code_block(text, text.chars().count()));

    let mut s = EditorSession::new(text, 500);
    s.set_cursor(14);
    assert_eq!(s.apply_format(MarkdownFormat::Bold), FormatOutcome::InCodeBlock);
    assert_eq!(s.apply_line_format(LineFormat::Quote), FormatOutcome::InCodeBlock);
    assert_eq!(s.text(), text);
}

#[test]
fn unterminated_fence_is_not_a_code_block() {
    assert!(!is_in_code_block("```\nstill typing", 6));
}

#[test]
fn typing_and_formatting_share_one_timeline() {
    let mut s = EditorSession::new("", 500);
    for c in "hi".chars() {
        s.insert_char(c);
    }
    s.apply_format(MarkdownFormat::Bold);
    assert_eq!(s.text(), "**hi**");

    s.undo();
    assert_eq!(s.text(), "hi");
    s.undo();
    assert_eq!(s.text(), "h");
    s.redo();
    s.redo();
    assert_eq!(s.text(), "**hi**");
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn edited_session_survives_a_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let mut p = Presentation::new("alice", "Quarterly Review", "# Q3\n".to_string());
    store.create(&p).unwrap();

    let mut s = EditorSession::new(&p.markdown, 500);
    s.set_cursor(5);
    s.insert_str("---\n# Q4");
    p.update_markdown(s.text().to_string());
    store.update(&p).unwrap();

    let loaded = store.read("alice", "quarterly-review").unwrap();
    assert_eq!(loaded.markdown, "# Q3\n---\n# Q4");
    let reopened = EditorSession::new(&loaded.markdown, 500);
    assert_eq!(reopened.slide_position(), (1, 2));
    assert!(!reopened.can_undo());
}
