//! Integration tests for result-stream-json.
//!
//! These tests drive the encoder against real producer tasks.

use std::time::Duration;

use result_stream_json::producer::channel;
use result_stream_json::{
    spawn_producer, write_array, EncodeError, ResultItem, ResultSender, StreamEncoder,
};
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
struct Membership {
    user_id: u64,
    group: String,
    admin: bool,
}

fn membership(i: u64) -> Membership {
    Membership {
        user_id: i,
        group: format!("team-{}", i % 3),
        admin: i == 0,
    }
}

/// Test a producer that finishes without sending anything.
#[tokio::test]
async fn test_empty_producer() {
    let (mut rx, task) =
        spawn_producer(4, |_tx: ResultSender<Membership, String>| async move { Ok(()) });

    let bytes = StreamEncoder::new().encode(&mut rx).await.unwrap();
    assert_eq!(&bytes[..], b"[]");
    task.await.unwrap();
}

/// Test that rows come out in production order and parse back as a JSON array.
#[tokio::test]
async fn test_order_preserved_across_tasks() {
    let (mut rx, task) = spawn_producer(2, |tx: ResultSender<Membership, String>| async move {
        for i in 0..50 {
            tx.send(membership(i)).await.map_err(|e| e.to_string())?;
            if i % 10 == 0 {
                tokio::task::yield_now().await;
            }
        }
        Ok(())
    });

    let bytes = StreamEncoder::new().encode(&mut rx).await.unwrap();
    task.await.unwrap();

    let parsed: Vec<serde_json::Value> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed.len(), 50);
    for (i, row) in parsed.iter().enumerate() {
        assert_eq!(row["user_id"], i as u64);
        assert_eq!(row["group"], format!("team-{}", i % 3));
    }
    assert_eq!(bytes.iter().filter(|&&b| b == b'[').count(), 1);
}

/// Test the concrete mixed scalar scenario.
#[tokio::test]
async fn test_scalar_sequence() {
    let (tx, mut rx) = channel::<serde_json::Value, String>(4);
    tokio::spawn(async move {
        tx.send(serde_json::json!(1)).await?;
        tx.send(serde_json::json!("a")).await
    });

    let bytes = StreamEncoder::new().encode(&mut rx).await.unwrap();
    assert_eq!(&bytes[..], br#"[1,"a"]"#);
}

/// Test that an error mid-stream aborts and the producer still runs to completion.
#[tokio::test]
async fn test_abort_drains_producer() {
    let (tx, mut rx) = channel::<u32, String>(1);
    let producer = tokio::spawn(async move {
        tx.send(1).await.unwrap();
        tx.fail("boom".to_string()).await.unwrap();
        // Every later send must still be received.
        for i in 0..25 {
            tx.send(i).await.unwrap();
        }
        25
    });

    let err = StreamEncoder::new().encode(&mut rx).await.unwrap_err();
    assert_eq!(err.to_string(), "producer error: boom");

    let sent = tokio::time::timeout(Duration::from_secs(1), producer)
        .await
        .expect("producer must not stay blocked")
        .unwrap();
    assert_eq!(sent, 25);
}

/// Test that an error as the very first item yields nothing but the error.
#[tokio::test]
async fn test_first_item_error() {
    let (mut rx, task) = spawn_producer(1, |_tx: ResultSender<u32, String>| async move {
        Err("unauthorized".to_string())
    });

    match StreamEncoder::new().encode(&mut rx).await {
        Err(EncodeError::Producer(e)) => assert_eq!(e, "unauthorized"),
        other => panic!("expected producer error, got {:?}", other),
    }
    task.await.unwrap();
}

/// Test HTML-sensitive characters stay literal while JSON escapes apply.
#[tokio::test]
async fn test_no_html_escaping() {
    let (tx, mut rx) = channel::<String, ()>(1);
    tokio::spawn(async move {
        tx.send_item(ResultItem::Value("<a href=\"x\">&amp;</a>".to_string()))
            .await
    });

    let bytes = StreamEncoder::new().encode(&mut rx).await.unwrap();
    assert_eq!(&bytes[..], br#"["<a href=\"x\">&amp;</a>"]"#);
}

/// Test writing to a sink end to end.
#[tokio::test]
async fn test_write_array_to_sink() {
    let encoder = StreamEncoder::builder().initial_capacity(8).build();
    let (mut rx, _task) = encoder.spawn_producer(|tx: ResultSender<Membership, String>| async move {
        tx.send(membership(0)).await.map_err(|e| e.to_string())
    });

    let mut out = std::io::Cursor::new(Vec::new());
    write_array(&encoder, &mut rx, &mut out).await.unwrap();

    assert_eq!(
        String::from_utf8(out.into_inner()).unwrap(),
        r#"[{"user_id":0,"group":"team-0","admin":true}]"#
    );
}

/// Test that one encoder serves several streams in sequence.
#[tokio::test]
async fn test_encoder_reuse() {
    let encoder = StreamEncoder::new();
    for n in 0..3u32 {
        let (mut rx, _task) = encoder.spawn_producer(move |tx: ResultSender<u32, String>| async move {
            for i in 0..n {
                tx.send(i).await.map_err(|e| e.to_string())?;
            }
            Ok(())
        });
        let bytes = encoder.encode(&mut rx).await.unwrap();
        let parsed: Vec<u32> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, (0..n).collect::<Vec<_>>());
    }
}
