use super::*;
use futures::channel::mpsc::TryRecvError;
use std::sync::atomic::AtomicUsize;

fn drain(rx: &mut UnboundedReceiver<Outbound>) -> Vec<Outbound> {
    let mut items = Vec::new();
    while let Ok(item) = rx.try_recv() {
        items.push(item);
    }
    items
}

// =============================================================
// OutboundGate
// =============================================================

#[test]
fn gate_holds_emits_until_ready_then_releases_in_order() {
    let mut gate = OutboundGate::default();
    assert_eq!(gate.admit(Outbound::Emit("42[\"a\"]".to_owned())), Flush::default());
    assert_eq!(gate.admit(Outbound::Emit("42[\"b\"]".to_owned())), Flush::default());
    assert_eq!(gate.held(), 2);

    let flush = gate.admit(Outbound::Ready);
    assert_eq!(flush.frames, vec!["42[\"a\"]".to_owned(), "42[\"b\"]".to_owned()]);
    assert!(!flush.close);
    assert_eq!(gate.held(), 0);

    let flush = gate.admit(Outbound::Emit("42[\"c\"]".to_owned()));
    assert_eq!(flush.frames, vec!["42[\"c\"]".to_owned()]);
}

#[test]
fn gate_writes_control_frames_immediately() {
    let mut gate = OutboundGate::default();
    gate.admit(Outbound::Emit("42[\"early\"]".to_owned()));
    let flush = gate.admit(Outbound::Control("40".to_owned()));
    assert_eq!(flush.frames, vec!["40".to_owned()]);
    assert_eq!(gate.held(), 1);
}

#[test]
fn gate_close_before_ready_drops_held_and_skips_disconnect_frame() {
    let mut gate = OutboundGate::default();
    gate.admit(Outbound::Emit("42[\"lost\"]".to_owned()));
    let flush = gate.admit(Outbound::Close("41".to_owned()));
    assert!(flush.frames.is_empty());
    assert!(flush.close);
    assert_eq!(gate.held(), 0);
}

#[test]
fn gate_close_after_ready_writes_disconnect_frame() {
    let mut gate = OutboundGate::default();
    gate.admit(Outbound::Ready);
    let flush = gate.admit(Outbound::Close("41".to_owned()));
    assert_eq!(flush, Flush { frames: vec!["41".to_owned()], close: true });
}

// =============================================================
// SocketHandle
// =============================================================

#[test]
fn emit_queues_encoded_event_frame() {
    let (handle, mut rx) = SocketHandle::new("/");
    assert!(handle.emit("ai-res", Value::String("Hello".to_owned())));
    assert_eq!(drain(&mut rx), vec![Outbound::Emit(r#"42["ai-res","Hello"]"#.to_owned())]);
}

#[test]
fn emit_uses_handle_namespace() {
    let (handle, mut rx) = SocketHandle::new("/assistant");
    handle.emit("ai-res", serde_json::json!("x"));
    assert_eq!(drain(&mut rx), vec![Outbound::Emit(r#"42/assistant,["ai-res","x"]"#.to_owned())]);
}

#[test]
fn disconnect_takes_effect_exactly_once() {
    let (handle, mut rx) = SocketHandle::new("/");
    let clone = handle.clone();

    handle.disconnect();
    clone.disconnect();
    handle.disconnect();

    assert!(handle.is_closed());
    assert!(clone.is_closed());
    assert_eq!(drain(&mut rx), vec![Outbound::Close("41".to_owned())]);
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Closed)), "queue should be closed after disconnect");
}

#[test]
fn emit_after_disconnect_is_rejected() {
    let (handle, mut rx) = SocketHandle::new("/");
    handle.disconnect();
    assert!(!handle.emit("ai-res", serde_json::json!("late")));
    assert_eq!(drain(&mut rx), vec![Outbound::Close("41".to_owned())]);
}

#[test]
fn emit_without_connection_task_reports_failure() {
    let (handle, rx) = SocketHandle::new("/");
    drop(rx);
    assert!(!handle.emit("ai-res", serde_json::json!("nobody listening")));
}

#[test]
fn disconnect_without_connection_task_still_marks_closed() {
    let (handle, rx) = SocketHandle::new("/");
    drop(rx);
    handle.disconnect();
    assert!(handle.is_closed());
}

#[test]
fn dispatch_runs_listeners_for_matching_event_only() {
    let (handle, _rx) = SocketHandle::new("/");
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&hits);
    handle.on("ai-response", move |payload| {
        assert_eq!(payload["result"], "Hi there");
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let counter = Arc::clone(&hits);
    handle.on("ai-response", move |_| {
        counter.fetch_add(10, Ordering::SeqCst);
    });

    let ran = handle.dispatch("ai-response", &serde_json::json!({"result": "Hi there"}));
    assert_eq!(ran, 2);
    assert_eq!(hits.load(Ordering::SeqCst), 11);

    assert_eq!(handle.dispatch("ai-error", &Value::Null), 0);
    assert_eq!(hits.load(Ordering::SeqCst), 11);
}

#[test]
fn listeners_are_shared_between_clones() {
    let (handle, _rx) = SocketHandle::new("/");
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    handle.clone().on("ai-error", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(handle.dispatch("ai-error", &serde_json::json!("boom")), 1);
}

#[test]
fn control_frames_and_ready_are_queued_in_order() {
    let (handle, mut rx) = SocketHandle::new("/");
    assert!(handle.send_control("40".to_owned()));
    assert!(handle.mark_ready());
    assert_eq!(drain(&mut rx), vec![Outbound::Control("40".to_owned()), Outbound::Ready]);
}
