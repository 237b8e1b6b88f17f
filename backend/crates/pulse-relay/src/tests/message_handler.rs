use crate::{ConsoleMessageHandler, MessageHandler};

use std::sync::{Arc, Mutex};

#[test]
fn given_inbound_message_when_formatted_then_matches_console_line() {
    let line = ConsoleMessageHandler::format("measures", b"21.5");

    assert_eq!(line, "Received `21.5` from `measures` topic");
}

#[test]
fn given_non_utf8_payload_when_formatted_then_replacement_chars_used() {
    let line = ConsoleMessageHandler::format("measures", &[0x66, 0xff]);

    assert_eq!(line, "Received `f\u{fffd}` from `measures` topic");
}

#[test]
fn given_closure_when_used_as_handler_then_receives_topic_and_payload() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let handler = {
        let seen = Arc::clone(&seen);
        move |topic: &str, payload: &[u8]| {
            seen.lock().unwrap().push((topic.to_string(), payload.to_vec()));
        }
    };

    handler.on_message("measures", b"1");

    assert_eq!(
        *seen.lock().unwrap(),
        vec![("measures".to_string(), b"1".to_vec())]
    );
}
