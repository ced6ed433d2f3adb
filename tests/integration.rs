//! Integration tests: trigger and trigger-batch bodies through the public API.

use notif_trigger::crypto::{decrypt, encrypt_with_nonce, NONCE_SIZE};
use notif_trigger::{
    encode_trigger_batch_body, encode_trigger_body, EncodeError, EncryptionKey, Event, EventData,
    MAX_EVENT_PAYLOAD_SIZE,
};
use serde::Serialize;
use serde_json::{json, Value};

fn key() -> EncryptionKey {
    EncryptionKey::from_bytes(b"an encryption key of 32 bytes!!!").unwrap()
}

#[derive(Serialize)]
struct Order {
    status: &'static str,
    id: u32,
    items: Vec<&'static str>,
}

#[test]
fn trigger_body_for_plain_string() {
    let body = encode_trigger_body(
        &["test-channel".to_string()],
        "my-event",
        &"hello".into(),
        None,
        None,
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"{"name":"my-event","channels":["test-channel"],"data":"hello"}"#
    );
}

#[test]
fn trigger_body_for_serializable_struct() {
    let order = Order {
        status: "new",
        id: 7,
        items: vec!["tea", "cake"],
    };
    let data = EventData::from_serialize(&order).unwrap();
    let body = encode_trigger_body(&["orders".to_string()], "created", &data, None, None).unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        value["data"].as_str().unwrap(),
        serde_json::to_string(&order).unwrap()
    );
    assert_eq!(
        value["data"].as_str().unwrap(),
        r#"{"status":"new","id":7,"items":["tea","cake"]}"#
    );
}

#[test]
fn trigger_body_for_wide_integer() {
    let data = EventData::from_serialize(&u128::MAX).unwrap();
    let body = encode_trigger_body(&["c".to_string()], "ev", &data, None, None).unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["data"], "340282366920938463463374607431768211455");
}

#[test]
fn encoding_is_idempotent_for_plain_channels() {
    let batch = vec![
        Event::new("a", "ev", json!({ "z": 1, "a": 2 })).with_socket_id("1.1"),
        Event::new("b", "ev", vec![104u8, 105]),
    ];
    let first = encode_trigger_batch_body(&batch, None).unwrap();
    let second = encode_trigger_batch_body(&batch, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn oversized_payload_produces_no_body() {
    let data = EventData::Text("x".repeat(25000));
    let result = encode_trigger_body(&["c".to_string()], "ev", &data, None, None);
    assert!(matches!(
        result,
        Err(EncodeError::PayloadTooLarge { size: 25000 })
    ));
}

#[test]
fn batch_is_all_or_nothing() {
    let batch = vec![
        Event::new("private-encrypted-a", "ev", "fine"),
        Event::new("b", "ev", "y".repeat(MAX_EVENT_PAYLOAD_SIZE + 1)),
        Event::new("c", "ev", "never reached"),
    ];
    let result = encode_trigger_batch_body(&batch, Some(&key()));
    assert!(matches!(
        result,
        Err(EncodeError::BatchPayloadTooLarge { index: 1 })
    ));
}

#[test]
fn batch_socket_id_only_where_supplied() {
    let batch = vec![
        Event::new("ch", "ev", "a").with_socket_id("123.456"),
        Event::new("ch", "ev", "b"),
    ];
    let body = encode_trigger_batch_body(&batch, None).unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();
    let entries = value["batch"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["socket_id"], "123.456");
    assert!(entries[1].as_object().unwrap().get("socket_id").is_none());
}

#[test]
fn encrypted_batch_entry_round_trips_through_subscriber_key() {
    let batch = vec![Event::new(
        "private-encrypted-room",
        "msg",
        json!({ "text": "hi" }),
    )];
    let body = encode_trigger_batch_body(&batch, Some(&key())).unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();
    let data = value["batch"][0]["data"].as_str().unwrap();
    let envelope: Value = serde_json::from_str(data).unwrap();
    assert!(envelope["nonce"].is_string());
    assert!(envelope["ciphertext"].is_string());
    assert_eq!(
        decrypt("private-encrypted-room", data, &key()).unwrap(),
        br#"{"text":"hi"}"#
    );
}

#[test]
fn fixed_nonce_ciphertext_is_stable() {
    let nonce = [0u8; NONCE_SIZE];
    let a = encrypt_with_nonce("private-encrypted-x", b"payload", &key(), &nonce).unwrap();
    let b = encrypt_with_nonce("private-encrypted-x", b"payload", &key(), &nonce).unwrap();
    assert_eq!(a, b);
    assert_eq!(decrypt("private-encrypted-x", &a, &key()).unwrap(), b"payload");
}
