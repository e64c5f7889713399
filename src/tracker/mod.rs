mod client;
mod peer;
mod request;
mod response;

pub use client::TrackerClient;
pub use peer::{Peer, COMPACT_PEER_LEN};
pub use request::TrackerRequest;
pub use response::{parse_tracker_response, TrackerResponse};

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random peer ID
/// Format: -TT0001-<12 random alphanumerics>
pub fn generate_peer_id() -> [u8; 20] {
    let mut peer_id = [0u8; 20];
    peer_id[0..8].copy_from_slice(b"-TT0001-");

    let mut rng = rand::thread_rng();
    for byte in &mut peer_id[8..] {
        *byte = rng.sample(Alphanumeric);
    }

    peer_id
}
