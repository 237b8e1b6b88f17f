use crate::control::{spawn_enter_listener, status_lines};

use pulse_hub::ShutdownCoordinator;

use std::io::Cursor;

#[test]
fn given_enter_pressed_when_listening_then_shutdown_triggered() {
    let shutdown = ShutdownCoordinator::new();

    spawn_enter_listener(Cursor::new(b"\n".to_vec()), shutdown.clone())
        .join()
        .unwrap();

    assert!(shutdown.is_shutdown());
}

#[test]
fn given_stdin_at_eof_when_listening_then_shutdown_not_triggered() {
    let shutdown = ShutdownCoordinator::new();

    spawn_enter_listener(Cursor::new(Vec::new()), shutdown.clone())
        .join()
        .unwrap();

    assert!(!shutdown.is_shutdown());
}

#[test]
fn given_bound_address_when_status_built_then_ends_with_exit_hint() {
    let lines = status_lines("127.0.0.1:5000".parse().unwrap(), true);

    assert_eq!(lines.first().unwrap(), "Streaming chart data on http://127.0.0.1:5000/");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines.last().unwrap(), "Press Enter to exit");
}
