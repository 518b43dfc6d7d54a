//! Periodic retention sweep.
//!
//! Documents past their deletion date are removed on a fixed cadence.
//! The first pass runs at startup, so a daemon that was down over a
//! boundary catches up immediately.

use std::sync::Arc;
use std::time::Duration;

use rusqlite::Connection;
use tokio::sync::Mutex;

/// Current Unix timestamp in seconds.
pub fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// One sweep pass. Failures are logged, never fatal; the next pass
/// retries.
fn sweep_pass(conn: &Connection, now: u64) -> usize {
    match remedia_vault::sweep::sweep_expired(conn, now) {
        Ok(purged) => purged,
        Err(e) => {
            tracing::warn!("retention sweep failed: {e}");
            0
        }
    }
}

/// Run the sweep loop forever.
pub async fn run(db: Arc<Mutex<Connection>>, interval_minutes: u64) {
    // tokio intervals reject a zero period; clamp to one minute.
    let minutes = interval_minutes.max(1);
    let mut ticker = tokio::time::interval(Duration::from_secs(minutes * 60));
    loop {
        ticker.tick().await;
        let conn = db.lock().await;
        sweep_pass(&conn, unix_now());
    }
}
