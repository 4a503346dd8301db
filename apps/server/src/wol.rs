//! Wake-on-LAN magic packet construction and delivery.

use anyhow::{Context, Result, bail};
use tokio::net::UdpSocket;

pub const DEFAULT_BROADCAST_ADDRESS: &str = "255.255.255.255";
pub const DEFAULT_WOL_PORT: u16 = 9;

/// Parse a MAC address in `aa:bb:cc:dd:ee:ff` or `aa-bb-...` form.
pub fn parse_mac(mac: &str) -> Result<[u8; 6]> {
    let hex: String = mac.chars().filter(|c| *c != ':' && *c != '-').collect();
    if hex.len() != 12 {
        bail!("invalid MAC address format: {mac}");
    }

    let mut bytes = [0u8; 6];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .with_context(|| format!("invalid MAC address format: {mac}"))?;
    }
    Ok(bytes)
}

/// Magic packet: six 0xFF bytes followed by the MAC repeated sixteen times.
pub fn magic_packet(mac: [u8; 6]) -> [u8; 102] {
    let mut packet = [0xFFu8; 102];
    for repetition in 0..16 {
        packet[6 + repetition * 6..6 + (repetition + 1) * 6].copy_from_slice(&mac);
    }
    packet
}

/// Send one magic packet for `mac` to `address:port` over UDP broadcast.
pub async fn send_magic_packet(mac: [u8; 6], address: &str, port: u16) -> Result<()> {
    let packet = magic_packet(mac);

    let socket = UdpSocket::bind(("0.0.0.0", 0))
        .await
        .context("failed to bind WOL socket")?;
    socket
        .set_broadcast(true)
        .context("failed to enable UDP broadcast")?;
    socket
        .send_to(&packet, (address, port))
        .await
        .with_context(|| format!("failed to send WOL packet to {address}:{port}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colon_and_dash_separated_macs() {
        let expected = [0xAA, 0xBB, 0xCC, 0x00, 0x11, 0x22];
        assert_eq!(parse_mac("aa:bb:cc:00:11:22").unwrap(), expected);
        assert_eq!(parse_mac("AA-BB-CC-00-11-22").unwrap(), expected);
    }

    #[test]
    fn rejects_malformed_macs() {
        assert!(parse_mac("aa:bb:cc").is_err());
        assert!(parse_mac("zz:zz:zz:zz:zz:zz").is_err());
        assert!(parse_mac("aabbccddeeff00").is_err());
    }

    #[test]
    fn packet_layout_is_prefix_plus_sixteen_repetitions() {
        let mac = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let packet = magic_packet(mac);

        assert_eq!(packet.len(), 102);
        assert!(packet[..6].iter().all(|b| *b == 0xFF));
        for repetition in 0..16 {
            assert_eq!(&packet[6 + repetition * 6..6 + (repetition + 1) * 6], &mac);
        }
    }
}
