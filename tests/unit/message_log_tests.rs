use peer_chat::session::{MessageDisplay, MessageLog};

#[test]
fn new_log_is_empty() {
    let log = MessageLog::new();
    assert!(log.is_empty());
    assert_eq!(log.len(), 0);
    assert!(log.entries().is_empty());
}

#[test]
fn entries_keep_append_order() {
    let log = MessageLog::new();
    log.push("Client: one");
    log.push("Client: two");
    log.push("Client: three");

    assert_eq!(
        log.entries(),
        vec!["Client: one", "Client: two", "Client: three"]
    );
}

#[test]
fn clear_resets_length() {
    let log = MessageLog::new();
    log.push("Server: a");
    log.push("Server: b");

    log.clear();

    assert_eq!(log.len(), 0);
    log.push("Server: c");
    assert_eq!(log.entries(), vec!["Server: c"]);
}

#[test]
fn clones_share_entries() {
    let log = MessageLog::new();
    let handle = log.clone();

    handle.push("Client: shared");

    assert_eq!(log.entries(), vec!["Client: shared"]);
}

#[test]
fn log_doubles_as_display_capture() {
    let log = MessageLog::new();
    log.show("Server: shown");
    assert_eq!(log.entries(), vec!["Server: shown"]);
}

#[test]
fn concurrent_pushes_are_all_recorded() {
    let log = MessageLog::new();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let log = log.clone();
            std::thread::spawn(move || {
                for i in 0..50 {
                    log.push(format!("t{t}-{i}"));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread");
    }

    assert_eq!(log.len(), 200);
}
