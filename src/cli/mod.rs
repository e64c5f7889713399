use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tinytorrent::bencode::decode_all;
use tinytorrent::client::{ClientConfig, TorrentClient, DEFAULT_PEER_ID};
use tinytorrent::torrent::{load_torrent_file, TorrentSummary};
use tinytorrent::tracker::{generate_peer_id, Peer};

#[derive(Parser)]
#[command(name = "tinytorrent")]
#[command(about = "Inspect bencoded data, torrent files and tracker peers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a bencoded value and print it as JSON
    Decode {
        /// The bencoded value, e.g. "l4:spami42ee"
        encoded: String,
    },

    /// Show information about a torrent file
    Info {
        /// Path to the .torrent file
        torrent: PathBuf,

        /// Print the information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the tracker for peers of a torrent
    Peers {
        /// Path to the .torrent file
        torrent: PathBuf,

        /// Port reported to the tracker
        #[arg(short, long, default_value = "6881")]
        port: u16,

        /// 20-byte peer ID reported to the tracker
        #[arg(long, value_parser = parse_peer_id, conflicts_with = "random_peer_id")]
        peer_id: Option<[u8; 20]>,

        /// Generate a random peer ID instead of the fixed default
        #[arg(long)]
        random_peer_id: bool,

        /// Tracker request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Decode { encoded } => {
                let value = decode_all(encoded.as_bytes())?;
                println!("{}", value.to_json());
            }

            Commands::Info { torrent, json } => {
                let summary = load_torrent_file(torrent).await?.summary();
                if *json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                } else {
                    print!("{}", format_info(&summary));
                }
            }

            Commands::Peers {
                torrent,
                port,
                peer_id,
                random_peer_id,
                timeout,
            } => {
                let peer_id = match peer_id {
                    Some(id) => *id,
                    None if *random_peer_id => generate_peer_id(),
                    None => DEFAULT_PEER_ID,
                };

                let config = ClientConfig {
                    peer_id,
                    listen_port: *port,
                    timeout: Duration::from_secs(*timeout),
                };

                let client = TorrentClient::new(config);
                let peers = client.peers_for_file(torrent).await?;
                print!("{}", format_peers(&peers));
            }
        }

        Ok(())
    }
}

fn parse_peer_id(s: &str) -> std::result::Result<[u8; 20], String> {
    <[u8; 20]>::try_from(s.as_bytes())
        .map_err(|_| format!("peer ID must be exactly 20 bytes, got {}", s.len()))
}

fn format_info(summary: &TorrentSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Tracker URL: {}\n", summary.tracker_url));
    out.push_str(&format!("Length: {}\n", summary.length));
    out.push_str(&format!("Info Hash: {}\n", summary.info_hash));
    out.push_str(&format!("Piece Length: {}\n", summary.piece_length));
    out.push_str("Piece Hashes:\n");
    for hash in &summary.piece_hashes {
        out.push_str(hash);
        out.push('\n');
    }
    out
}

fn format_peers(peers: &[Peer]) -> String {
    peers.iter().map(|peer| format!("{}\n", peer)).collect()
}
