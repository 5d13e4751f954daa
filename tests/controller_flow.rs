mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use clip_format::clipboard::{ClipboardRead, UserGesture};
use clip_format::constants::{
    MSG_CLIPBOARD_EMPTY, MSG_COPIED, MSG_COPY_FAILED, MSG_COULD_NOT_FORMAT, MSG_NOTHING_TO_COPY,
    MSG_PASTE_BLOCKED,
};
use clip_format::controller::{CopyOutcome, PasteOutcome, UiHandle, UiUpdate};
use clip_format::state::{AppState, Focus};
use clip_format::status::StatusKind;
use common::{FakeClipboard, FakeService, TTL, apply_all, controller};
use reqwest::StatusCode;

#[tokio::test]
async fn format_sends_one_request_and_shows_output() {
    let clipboard = Arc::new(FakeClipboard::holding("unused"));
    let service = Arc::new(FakeService::answering("FORMATTED"));
    let c = controller(&clipboard, &service);
    let (ui, mut rx) = UiHandle::channel();

    let out = c.format("raw text\nline 2", &ui).await;

    assert_eq!(out.as_deref(), Some("FORMATTED"));
    assert_eq!(service.requests(), vec!["raw text\nline 2".to_string()]);
    let mut state = AppState::new();
    apply_all(&mut state, &mut rx);
    assert_eq!(state.output.text(), "FORMATTED");
    assert_eq!(state.status.text(), MSG_COPIED);
    assert_eq!(clipboard.writes(), vec!["FORMATTED".to_string()]);
    // paste path untouched
    assert_eq!(clipboard.read_count(), 0);
}

#[tokio::test]
async fn empty_output_is_shown_and_not_copied() {
    let clipboard = Arc::new(FakeClipboard::holding(""));
    let service = Arc::new(FakeService::answering(""));
    let c = controller(&clipboard, &service);
    let (ui, mut rx) = UiHandle::channel();

    let out = c.format("anything", &ui).await;

    assert_eq!(out.as_deref(), Some(""));
    let mut state = AppState::new();
    state.output.set_text("stale");
    let updates = apply_all(&mut state, &mut rx);
    assert_eq!(state.output.text(), "");
    assert!(clipboard.writes().is_empty());
    assert!(!updates.iter().any(|u| matches!(u, UiUpdate::Status(_))));
}

#[tokio::test]
async fn non_success_clears_output_and_reports() {
    for code in [StatusCode::BAD_REQUEST, StatusCode::INTERNAL_SERVER_ERROR] {
        let clipboard = Arc::new(FakeClipboard::holding(""));
        let service = Arc::new(FakeService::failing(code));
        let c = controller(&clipboard, &service);
        let (ui, mut rx) = UiHandle::channel();

        let out = c.format("x", &ui).await;

        assert!(out.is_none());
        let mut state = AppState::new();
        state.output.set_text("previous result");
        apply_all(&mut state, &mut rx);
        assert_eq!(state.output.text(), "");
        assert_eq!(state.status.text(), MSG_COULD_NOT_FORMAT);
        assert_eq!(
            state.status.message().map(|m| m.kind),
            Some(StatusKind::Error)
        );
        assert!(clipboard.writes().is_empty());
    }
}

#[tokio::test]
async fn transport_failure_clears_output_and_reports() {
    let clipboard = Arc::new(FakeClipboard::holding(""));
    let service = Arc::new(FakeService::unreachable());
    let c = controller(&clipboard, &service);
    let (ui, mut rx) = UiHandle::channel();

    let out = c.format("x", &ui).await;

    assert!(out.is_none());
    assert_eq!(service.requests(), vec!["x".to_string()]);
    let mut state = AppState::new();
    state.output.set_text("previous result");
    apply_all(&mut state, &mut rx);
    assert_eq!(state.output.text(), "");
    assert_eq!(state.status.text(), MSG_COULD_NOT_FORMAT);
    assert_eq!(
        state.status.message().map(|m| m.kind),
        Some(StatusKind::Error)
    );
    assert!(clipboard.writes().is_empty());
}

#[tokio::test]
async fn copy_failure_keeps_the_result() {
    let clipboard = Arc::new(FakeClipboard::holding("").failing_writes());
    let service = Arc::new(FakeService::answering("kept"));
    let c = controller(&clipboard, &service);
    let (ui, mut rx) = UiHandle::channel();

    let out = c.format("in", &ui).await;

    assert_eq!(out.as_deref(), Some("kept"));
    let mut state = AppState::new();
    apply_all(&mut state, &mut rx);
    assert_eq!(state.output.text(), "kept");
    assert_eq!(state.status.text(), MSG_COPY_FAILED);
}

#[tokio::test]
async fn auto_copy_can_be_disabled() {
    let clipboard = Arc::new(FakeClipboard::holding(""));
    let service = Arc::new(FakeService::answering("out"));
    let c = controller(&clipboard, &service).with_auto_copy(false);
    let (ui, _rx) = UiHandle::channel();

    c.format("in", &ui).await;

    assert!(clipboard.writes().is_empty());
}

#[test]
fn clear_empties_everything_and_focuses_input() {
    let clipboard = Arc::new(FakeClipboard::holding(""));
    let service = Arc::new(FakeService::answering(""));
    let c = controller(&clipboard, &service);
    let (ui, mut rx) = UiHandle::channel();

    let mut state = AppState::new();
    state.input.set_text("in");
    state.output.set_text("out");
    state.set_focus(Focus::Output);
    c.copy("out", &ui);
    apply_all(&mut state, &mut rx);
    assert_eq!(state.status.text(), MSG_COPIED);

    c.clear(&ui);
    apply_all(&mut state, &mut rx);

    assert_eq!(state.input.text(), "");
    assert_eq!(state.output.text(), "");
    assert_eq!(state.status.text(), "");
    assert_eq!(state.focus(), Focus::Input);
    assert!(service.requests().is_empty());
}

#[test]
fn explicit_copy_outcomes() {
    let ok = Arc::new(FakeClipboard::holding(""));
    let failing = Arc::new(FakeClipboard::holding("").failing_writes());
    let service = Arc::new(FakeService::answering(""));
    let (ui, mut rx) = UiHandle::channel();
    let mut state = AppState::new();

    assert_eq!(controller(&ok, &service).copy("", &ui), CopyOutcome::NothingToCopy);
    apply_all(&mut state, &mut rx);
    assert_eq!(state.status.text(), MSG_NOTHING_TO_COPY);

    assert_eq!(controller(&ok, &service).copy("abc", &ui), CopyOutcome::Copied);
    assert_eq!(ok.writes(), vec!["abc".to_string()]);

    assert_eq!(controller(&failing, &service).copy("abc", &ui), CopyOutcome::Failed);
    apply_all(&mut state, &mut rx);
    assert_eq!(state.status.text(), MSG_COPY_FAILED);
}

#[tokio::test]
async fn paste_with_empty_clipboard_sends_nothing() {
    for read in [ClipboardRead::Empty, ClipboardRead::Text(String::new())] {
        let clipboard = Arc::new(FakeClipboard::with_read(read));
        let service = Arc::new(FakeService::answering("never"));
        let c = controller(&clipboard, &service);
        let (ui, mut rx) = UiHandle::channel();

        let outcome = c.paste_and_format(UserGesture::command_line(), &ui).await;

        assert_eq!(outcome, PasteOutcome::ClipboardEmpty);
        assert!(service.requests().is_empty());
        let mut state = AppState::new();
        state.input.set_text("untouched");
        apply_all(&mut state, &mut rx);
        assert_eq!(state.input.text(), "untouched");
        assert_eq!(state.status.text(), MSG_CLIPBOARD_EMPTY);
    }
}

#[tokio::test]
async fn paste_hello_matches_format_hello() {
    let clipboard = Arc::new(FakeClipboard::holding("hello"));
    let service = Arc::new(FakeService::answering("HELLO"));
    let c = controller(&clipboard, &service);

    let (ui, mut rx) = UiHandle::channel();
    let outcome = c.paste_and_format(UserGesture::command_line(), &ui).await;
    let mut pasted = AppState::new();
    pasted.input.set_text("old");
    apply_all(&mut pasted, &mut rx);

    let (ui, mut rx) = UiHandle::channel();
    c.format("hello", &ui).await;
    let mut formatted = AppState::new();
    formatted.input.set_text("hello");
    apply_all(&mut formatted, &mut rx);

    assert_eq!(outcome, PasteOutcome::Formatted("HELLO".into()));
    assert_eq!(pasted.input.text(), "hello");
    assert_eq!(pasted.output.text(), formatted.output.text());
    assert_eq!(pasted.status.text(), formatted.status.text());
    assert_eq!(
        service.requests(),
        vec!["hello".to_string(), "hello".to_string()]
    );
}

#[tokio::test]
async fn paste_then_failed_format_reports_format_failure() {
    let clipboard = Arc::new(FakeClipboard::holding("hello"));
    let service = Arc::new(FakeService::failing(StatusCode::BAD_GATEWAY));
    let c = controller(&clipboard, &service);
    let (ui, mut rx) = UiHandle::channel();

    let outcome = c.paste_and_format(UserGesture::command_line(), &ui).await;

    assert_eq!(outcome, PasteOutcome::FormatFailed);
    let mut state = AppState::new();
    apply_all(&mut state, &mut rx);
    assert_eq!(state.input.text(), "hello");
    assert_eq!(state.output.text(), "");
    assert_eq!(state.status.text(), MSG_COULD_NOT_FORMAT);
}

#[tokio::test]
async fn denied_read_falls_back_to_manual_paste() {
    for read in [
        ClipboardRead::PermissionDenied("denied".into()),
        ClipboardRead::Unsupported("no backend".into()),
    ] {
        let clipboard = Arc::new(FakeClipboard::with_read(read));
        let service = Arc::new(FakeService::answering("never"));
        let c = controller(&clipboard, &service);
        let (ui, mut rx) = UiHandle::channel();

        let outcome = c.paste_and_format(UserGesture::command_line(), &ui).await;

        assert_eq!(outcome, PasteOutcome::Blocked);
        assert!(service.requests().is_empty());
        let mut state = AppState::new();
        state.input.set_text("typed by hand");
        state.set_focus(Focus::Output);
        apply_all(&mut state, &mut rx);
        assert_eq!(state.input.text(), "typed by hand");
        assert_eq!(state.status.text(), MSG_PASTE_BLOCKED);
        assert_eq!(state.focus(), Focus::Input);
    }
}

#[tokio::test]
async fn permission_answer_never_gates_the_read() {
    let mut fake = FakeClipboard::holding("still read");
    fake.permission = clip_format::clipboard::ClipboardPermission::Denied;
    let clipboard = Arc::new(fake);
    let service = Arc::new(FakeService::answering("ok"));
    let c = controller(&clipboard, &service);
    let (ui, _rx) = UiHandle::channel();

    let outcome = c.paste_and_format(UserGesture::command_line(), &ui).await;

    assert_eq!(clipboard.read_count(), 1);
    assert_eq!(outcome, PasteOutcome::Formatted("ok".into()));
}

#[tokio::test]
async fn statuses_expire_independently() {
    let clipboard = Arc::new(FakeClipboard::holding(""));
    let service = Arc::new(FakeService::answering(""));
    let c = controller(&clipboard, &service);
    let (ui, mut rx) = UiHandle::channel();
    let mut state = AppState::new();

    let t0 = Instant::now();
    c.copy("", &ui);
    while let Ok(u) = rx.try_recv() {
        state.apply(u, t0);
    }
    let t1 = t0 + Duration::from_millis(1000);
    c.copy("later", &ui);
    while let Ok(u) = rx.try_recv() {
        state.apply(u, t1);
    }

    // the first message's deadline passes; the second is still visible
    state.status.tick(t0 + TTL);
    assert_eq!(state.status.text(), MSG_COPIED);
    state.status.tick(t1 + TTL);
    assert_eq!(state.status.text(), "");
}

#[test]
fn dropped_ui_does_not_panic() {
    let clipboard = Arc::new(FakeClipboard::holding(""));
    let service = Arc::new(FakeService::answering(""));
    let c = controller(&clipboard, &service);
    let (ui, rx) = UiHandle::channel();
    drop(rx);
    c.clear(&ui);
    assert_eq!(c.copy("x", &ui), CopyOutcome::Copied);
}
