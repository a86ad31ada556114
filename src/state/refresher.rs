use crate::state::messages::NetworkRequest;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Re-requests today's fixtures every minute, but only while the fixture
/// store reports a live match. The UI loop keeps `live` current.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    live: Arc<AtomicBool>,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>, live: Arc<AtomicBool>) -> Self {
        Self { network_requests, live }
    }

    pub async fn run(self) {
        let mut fixtures_interval = interval(REFRESH_INTERVAL);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        fixtures_interval.tick().await;

        loop {
            fixtures_interval.tick().await;
            if !self.live.load(Ordering::Relaxed) {
                continue;
            }
            if self
                .network_requests
                .send(NetworkRequest::LoadTodaysFixtures)
                .await
                .is_err()
            {
                break;
            }
        }
    }
}
