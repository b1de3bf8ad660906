//! Rows demo - streaming query rows into a JSON array.
//!
//! This demo shows:
//! - Running a producer on its own task with `spawn_producer`
//! - Encoding the rows as one JSON array with `StreamEncoder`
//! - A failing producer: the array is discarded, the error is reported
//!
//! ```text
//! cargo run --example rows
//! ```

use std::time::Duration;

use result_stream_json::{ResultSender, StreamEncoder};
use serde::Serialize;

/// One simulated database row.
#[derive(Serialize, Debug)]
struct Row {
    id: u32,
    email: String,
}

async fn query(tx: ResultSender<Row, String>, rows: u32, fail_at: Option<u32>) -> Result<(), String> {
    for id in 0..rows {
        if Some(id) == fail_at {
            return Err(format!("connection reset while reading row {}", id));
        }
        tx.send(Row {
            id,
            email: format!("user{}@example.com", id),
        })
        .await
        .map_err(|e| e.to_string())?;

        // Simulate a slow cursor
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let encoder = StreamEncoder::builder().channel_capacity(4).build();

    let (mut rx, task) = encoder.spawn_producer(|tx| query(tx, 5, None));
    let bytes = encoder.encode(&mut rx).await?;
    task.await?;
    println!("{}", String::from_utf8_lossy(&bytes));

    let (mut rx, task) = encoder.spawn_producer(|tx| query(tx, 5, Some(2)));
    match encoder.encode(&mut rx).await {
        Ok(bytes) => println!("{}", String::from_utf8_lossy(&bytes)),
        Err(e) => eprintln!("query failed: {}", e),
    }
    task.await?;

    Ok(())
}
