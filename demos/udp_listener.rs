// ABOUTME: UDP listener example that decodes GTP-C datagrams arriving on the control plane port
// ABOUTME: Shows how to share the process-wide IE registry across a receive loop and log decode results

//! # GTP-C UDP Listener
//!
//! Binds a UDP socket, decodes every datagram with the default registry and
//! logs the header and a few well-known fields.
//!
//! ## Usage
//!
//! ```bash
//! # Listen on the standard GTP-C port
//! cargo run --example udp_listener
//!
//! # Custom address with debug logging
//! cargo run --example udp_listener -- --bind 127.0.0.1:2123 -d
//! ```

use argh::FromArgs;
use gtpc::{Body, Message};
use std::error::Error;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{Level, debug, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Decode GTP-C datagrams received on a UDP socket
#[derive(FromArgs)]
struct CliArgs {
    /// whether or not to enable debugging
    #[argh(switch, short = 'd')]
    debugging: bool,

    /// the address to listen on (default: 0.0.0.0:2123)
    #[argh(option)]
    bind: Option<SocketAddr>,

    /// the largest datagram accepted in bytes (default: 65535)
    #[argh(option)]
    max_datagram: Option<usize>,
}

fn log_message(peer: SocketAddr, message: &Message) {
    let header = message.header();
    info!(
        %peer,
        version = ?message.version(),
        message_type = header.message_type(),
        teid = ?header.teid(),
        sequence = ?header.sequence_number(),
        imsi = message.imsi().unwrap_or("-"),
        "decoded GTP-C message"
    );

    if let Some(context) = message.gprs_context() {
        debug!(
            apn = context.apn.as_deref().unwrap_or("-"),
            msisdn = context.msisdn.as_deref().unwrap_or("-"),
            sgsn_signalling = ?context.gsn_address_signalling,
            sgsn_user = ?context.gsn_address_user,
            "PDP context"
        );
    }
    if let Body::V1(body) = message.body() {
        debug!(
            teid_data = ?body.teid_data,
            teid_control_plane = ?body.teid_control_plane,
            rat_type = ?body.rat_type,
            "GTPv1 tunnel"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = argh::from_env();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli_args.debugging { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let bind = cli_args
        .bind
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 2123)));
    let max_datagram = cli_args.max_datagram.unwrap_or(65535);

    // Build the decoder tables before the first datagram arrives
    let registry = gtpc::initialize();
    debug!(?registry, "IE registry ready");

    let socket = UdpSocket::bind(bind).await?;
    info!("Listening for GTP-C on {}", socket.local_addr()?);

    let mut buf = vec![0u8; max_datagram];
    loop {
        tokio::select! {
            received = socket.recv_from(&mut buf) => {
                let (len, peer) = received?;
                match registry.decode(&buf[..len]) {
                    Ok(message) => log_message(peer, &message),
                    Err(e) => warn!(%peer, len, status = ?e.status(), "decode failed: {e}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
        }
    }

    Ok(())
}
