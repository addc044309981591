//! Keystroke debouncing for search input.

use std::time::Duration;

use tokio::sync::mpsc;

/// Forward only the latest query once `delay` passes without new input.
///
/// A query still pending when the input closes is flushed immediately.
pub fn debounce(mut input: mpsc::Receiver<String>, delay: Duration) -> mpsc::Receiver<String> {
    let (tx, output) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut pending: Option<String> = None;

        loop {
            let Some(query) = pending.take() else {
                match input.recv().await {
                    Some(query) => pending = Some(query),
                    None => break,
                }
                continue;
            };

            tokio::select! {
                next = input.recv() => match next {
                    Some(newer) => pending = Some(newer),
                    None => {
                        let _ = tx.send(query).await;
                        break;
                    }
                },
                _ = tokio::time::sleep(delay) => {
                    if tx.send(query).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    #[tokio::test(start_paused = true)]
    async fn test_emits_latest_after_pause() {
        let (tx, rx) = mpsc::channel(8);
        let mut out = debounce(rx, Duration::from_millis(300));

        tx.send("c".to_string()).await.unwrap();
        sleep(Duration::from_millis(100)).await;
        tx.send("ca".to_string()).await.unwrap();
        sleep(Duration::from_millis(100)).await;
        tx.send("car".to_string()).await.unwrap();

        let start = Instant::now();
        assert_eq!(out.recv().await.as_deref(), Some("car"));
        assert!(start.elapsed() >= Duration::from_millis(300));

        tx.send("cara".to_string()).await.unwrap();
        assert_eq!(out.recv().await.as_deref(), Some("cara"));

        drop(tx);
        assert_eq!(out.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flushes_on_close() {
        let (tx, rx) = mpsc::channel(8);
        let mut out = debounce(rx, Duration::from_millis(300));

        tx.send("maracay".to_string()).await.unwrap();
        drop(tx);

        let start = Instant::now();
        assert_eq!(out.recv().await.as_deref(), Some("maracay"));
        assert!(start.elapsed() < Duration::from_millis(300));
        assert_eq!(out.recv().await, None);
    }
}
