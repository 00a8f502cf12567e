//! Controllable station source for tests.
//!
//! Counts calls, and can be stubbed to answer immediately or to hold every
//! call open until the test resolves it.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::{oneshot, watch};

use crate::domain::{Departure, Station};

use super::error::StationError;
use super::source::StationSource;

type FetchResult = Result<Vec<Station>, StationError>;

/// How `fetch_all` answers.
enum Stub {
    /// Answer immediately with this result.
    Ready(FetchResult),
    /// Park the call until [`FakeStationSource::resolve`].
    Pending,
    /// Panic inside the call.
    Panic,
}

/// What one `fetch_all` call will do, decided under the stub lock.
enum Answer {
    Ready(FetchResult),
    Panic,
    Parked(oneshot::Receiver<FetchResult>),
}

/// Fake source whose `fetch_all` is fully controlled by the test.
pub struct FakeStationSource {
    stub: Mutex<Stub>,
    parked: Mutex<Vec<oneshot::Sender<FetchResult>>>,
    calls: watch::Sender<usize>,
}

impl Default for FakeStationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeStationSource {
    /// A fake whose calls stay pending until resolved.
    pub fn new() -> Self {
        Self {
            stub: Mutex::new(Stub::Pending),
            parked: Mutex::new(Vec::new()),
            calls: watch::channel(0).0,
        }
    }

    /// Answer future calls immediately with `stations`.
    pub fn stub_success(&self, stations: Vec<Station>) {
        *self.stub.lock().unwrap() = Stub::Ready(Ok(stations));
    }

    /// Answer future calls immediately with `error`.
    pub fn stub_failure(&self, error: StationError) {
        *self.stub.lock().unwrap() = Stub::Ready(Err(error));
    }

    /// Hold future calls open until [`resolve`](Self::resolve).
    pub fn stub_pending(&self) {
        *self.stub.lock().unwrap() = Stub::Pending;
    }

    /// Panic inside future calls.
    pub fn stub_panic(&self) {
        *self.stub.lock().unwrap() = Stub::Panic;
    }

    /// Complete every parked call with `result`.
    pub fn resolve(&self, result: FetchResult) {
        for sender in self.parked.lock().unwrap().drain(..) {
            let _ = sender.send(result.clone());
        }
    }

    /// Number of `fetch_all` calls so far.
    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }

    /// Reset the call count to zero.
    pub fn clear_calls(&self) {
        self.calls.send_replace(0);
    }

    /// Wait until `fetch_all` has been called at least `n` times.
    ///
    /// Parked calls are registered before they are counted, so a
    /// [`resolve`](Self::resolve) after this returns reaches them.
    pub async fn wait_for_calls(&self, n: usize) {
        let mut rx = self.calls.subscribe();
        rx.wait_for(|calls| *calls >= n)
            .await
            .expect("sender lives as long as the fake");
    }
}

#[async_trait]
impl StationSource for FakeStationSource {
    async fn fetch_all(&self) -> FetchResult {
        let answer = match &*self.stub.lock().unwrap() {
            Stub::Ready(result) => Answer::Ready(result.clone()),
            Stub::Panic => Answer::Panic,
            Stub::Pending => {
                let (tx, rx) = oneshot::channel();
                self.parked.lock().unwrap().push(tx);
                Answer::Parked(rx)
            }
        };
        self.calls.send_modify(|calls| *calls += 1);

        match answer {
            Answer::Ready(result) => result,
            Answer::Panic => panic!("fake station source panicked"),
            Answer::Parked(rx) => rx.await.unwrap_or_else(|_| {
                Err(StationError::Interrupted {
                    message: "fake dropped a parked call".into(),
                })
            }),
        }
    }

    async fn departures(&self, station: &Station) -> Result<Vec<Departure>, StationError> {
        Err(StationError::NotFound {
            station: station.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_parks_calls_until_resolved() {
        let source = std::sync::Arc::new(FakeStationSource::default());
        assert_eq!(source.calls(), 0);

        let task = tokio::spawn({
            let source = std::sync::Arc::clone(&source);
            async move { source.fetch_all().await }
        });
        source.wait_for_calls(1).await;
        source.resolve(Ok(vec![Station::new("a", ["b"])]));

        assert_eq!(task.await.unwrap().unwrap(), vec![Station::new("a", ["b"])]);
    }
}
