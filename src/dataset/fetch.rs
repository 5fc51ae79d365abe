use futures::channel::oneshot;

use super::record::{Series, parse_series};
use crate::error::{DatasetError, DatasetResult};

type FetchReceiver = oneshot::Receiver<DatasetResult<Vec<Series>>>;

/// A one-shot dataset request running off the UI thread.
///
/// The result is delivered through a oneshot channel that the app polls once
/// per frame. There is no cancellation and no timeout.
pub struct DatasetFetch {
    receiver: Option<FetchReceiver>,
}

impl std::fmt::Debug for DatasetFetch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetFetch")
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl DatasetFetch {
    /// Starts fetching `url`, retrying transport failures up to `max_attempts` times.
    pub fn start(url: String, max_attempts: u32, ctx: egui::Context) -> Self {
        let (sender, receiver) = oneshot::channel();
        log::info!("Fetching dataset from {}", url);
        spawn_fetch(url, max_attempts.max(1), sender, ctx);
        Self {
            receiver: Some(receiver),
        }
    }

    /// Wraps an already-running receiver, mostly useful for tests.
    pub fn from_receiver(receiver: FetchReceiver) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Returns the result exactly once, when it becomes available.
    pub fn poll(&mut self) -> Option<DatasetResult<Vec<Series>>> {
        let receiver = self.receiver.as_mut()?;
        match receiver.try_recv() {
            Ok(None) => None,
            Ok(Some(result)) => {
                self.receiver = None;
                Some(result)
            }
            Err(oneshot::Canceled) => {
                self.receiver = None;
                Some(Err(DatasetError::Cancelled))
            }
        }
    }
}

/// Only transport-level failures are worth another attempt.
fn is_retryable(error: &DatasetError) -> bool {
    matches!(error, DatasetError::Http(_) | DatasetError::Status(_))
}

/// Runs `attempt` until it yields a body that decodes, or the attempts run out.
pub fn fetch_with_retry<F>(max_attempts: u32, mut attempt: F) -> DatasetResult<Vec<Series>>
where
    F: FnMut(u32) -> DatasetResult<String>,
{
    for n in 1..=max_attempts {
        match attempt(n).and_then(|body| parse_series(&body)) {
            Ok(series) => return Ok(series),
            Err(err) if is_retryable(&err) => {
                log::warn!("Dataset fetch attempt {}/{} failed: {}", n, max_attempts, err);
            }
            Err(err) => return Err(err),
        }
    }
    Err(DatasetError::Exhausted {
        attempts: max_attempts,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn spawn_fetch(
    url: String,
    max_attempts: u32,
    sender: oneshot::Sender<DatasetResult<Vec<Series>>>,
    ctx: egui::Context,
) {
    std::thread::spawn(move || {
        let result = fetch_with_retry(max_attempts, |_| get_blocking(&url));
        // The receiver may be gone if the app closed first.
        let _ = sender.send(result);
        ctx.request_repaint();
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn get_blocking(url: &str) -> DatasetResult<String> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        let path = url.strip_prefix("file://").unwrap_or(url);
        return Ok(std::fs::read_to_string(path)?);
    }
    let response = reqwest::blocking::get(url).map_err(|e| DatasetError::Http(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(DatasetError::Status(status.as_u16()));
    }
    response.text().map_err(|e| DatasetError::Http(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn spawn_fetch(
    url: String,
    max_attempts: u32,
    sender: oneshot::Sender<DatasetResult<Vec<Series>>>,
    ctx: egui::Context,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let mut result = Err(DatasetError::Exhausted {
            attempts: max_attempts,
        });
        for n in 1..=max_attempts {
            match get_async(&url).await.and_then(|body| parse_series(&body)) {
                Ok(series) => {
                    result = Ok(series);
                    break;
                }
                Err(err) if is_retryable(&err) => {
                    log::warn!("Dataset fetch attempt {}/{} failed: {}", n, max_attempts, err);
                }
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
        }
        let _ = sender.send(result);
        ctx.request_repaint();
    });
}

#[cfg(target_arch = "wasm32")]
async fn get_async(url: &str) -> DatasetResult<String> {
    let response = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| DatasetError::Http(e.to_string()))?;
    if !response.ok() {
        return Err(DatasetError::Status(response.status()));
    }
    response
        .text()
        .await
        .map_err(|e| DatasetError::Http(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r##"[{"name":"X","text":["p1"],"x":[1],"y":[2],"marker":{"color":["#ff0000"]}}]"##;

    #[test]
    fn test_retry_recovers_from_transport_failure() {
        let mut calls = 0;
        let result = fetch_with_retry(3, |n| {
            calls += 1;
            if n < 3 {
                Err(DatasetError::Status(503))
            } else {
                Ok(BODY.to_owned())
            }
        });
        assert_eq!(calls, 3);
        assert_eq!(result.unwrap().len(), 1);
    }

    #[test]
    fn test_retry_is_bounded() {
        let mut calls = 0;
        let result = fetch_with_retry(2, |_| {
            calls += 1;
            Err(DatasetError::Http("offline".into()))
        });
        assert_eq!(calls, 2);
        assert!(matches!(result, Err(DatasetError::Exhausted { attempts: 2 })));
    }

    #[test]
    fn test_decode_errors_are_not_retried() {
        let mut calls = 0;
        let result = fetch_with_retry(5, |_| {
            calls += 1;
            Ok("not json".to_owned())
        });
        assert_eq!(calls, 1);
        assert!(matches!(result, Err(DatasetError::Json(_))));
    }

    #[test]
    fn test_poll_yields_once() {
        let (sender, receiver) = oneshot::channel();
        let mut fetch = DatasetFetch::from_receiver(receiver);
        assert!(fetch.poll().is_none());
        assert!(fetch.is_pending());

        sender.send(Ok(Vec::new())).unwrap();
        assert!(matches!(fetch.poll(), Some(Ok(_))));
        assert!(!fetch.is_pending());
        assert!(fetch.poll().is_none());
    }

    #[test]
    fn test_dropped_sender_reports_cancelled() {
        let (sender, receiver) = oneshot::channel::<DatasetResult<Vec<Series>>>();
        let mut fetch = DatasetFetch::from_receiver(receiver);
        drop(sender);
        assert!(matches!(fetch.poll(), Some(Err(DatasetError::Cancelled))));
    }
}
