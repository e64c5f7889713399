use super::{parse_tracker_response, TrackerRequest, TrackerResponse};
use crate::error::{BittorrentError, Result};
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Client for communicating with BitTorrent trackers
pub struct TrackerClient {
    client: Client,
}

impl TrackerClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Send a request to a tracker and get the peer list
    pub async fn announce(
        &self,
        tracker_url: &[u8],
        request: &TrackerRequest,
    ) -> Result<TrackerResponse> {
        info!(
            "Announcing to tracker: {}",
            String::from_utf8_lossy(tracker_url)
        );

        let url = request.announce_url(tracker_url)?;
        debug!("Tracker request URL: {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        let body: Bytes = response.bytes().await?;

        debug!("Tracker response status: {}, body length: {}", status, body.len());

        if !status.is_success() {
            return Err(BittorrentError::HttpStatus(status.as_u16()));
        }

        let tracker_response = parse_tracker_response(&body)?;

        info!(
            "Received {} peers from tracker (interval: {:?}s)",
            tracker_response.peers.len(),
            tracker_response.interval
        );

        Ok(tracker_response)
    }
}
