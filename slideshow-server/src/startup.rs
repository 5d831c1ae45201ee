use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use crate::config::Config;
use crate::store::{PhotoStore, SettingsStore, StoreError};

/// Creates the upload directory and writes the default settings if missing.
pub async fn prepare(photos: &PhotoStore, settings: &SettingsStore) -> Result<(), StoreError> {
    photos.ensure_dir().await?;
    tracing::info!("Photos folder: {}", photos.dir().display());
    settings.ensure_exists().await?;
    tracing::info!("Config file: {}", settings.path().display());
    Ok(())
}

/// Address other devices on the LAN can reach us at.
///
/// Connecting a UDP socket sends no packets; it only makes the OS pick the
/// outbound interface, whose address is then read back.
pub fn local_ip() -> IpAddr {
    let discover = || -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.connect(("8.8.8.8", 80))?;
        Ok(socket.local_addr()?.ip())
    };
    discover().unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

pub fn access_urls(host: &str, port: u16) -> (String, String) {
    let base = match host.parse::<IpAddr>() {
        Ok(IpAddr::V6(v6)) => format!("http://[{}]:{}", v6, port),
        _ => format!("http://{}:{}", host, port),
    };
    (format!("{}/", base), format!("{}/admin", base))
}

pub fn log_banner(config: &Config, lan_ip: IpAddr) {
    let port = config.port();
    let (tv, admin) = access_urls("localhost", port);
    let (lan_tv, lan_admin) = access_urls(&lan_ip.to_string(), port);

    tracing::info!("Photo slideshow listening on {}", config.listen_addr);
    tracing::info!("TV Display:  {}", tv);
    tracing::info!("Admin Panel: {}", admin);
    tracing::info!("Network access: TV Display {} / Admin Panel {}", lan_tv, lan_admin);
    tracing::info!("API docs at http://localhost:{}/docs/", port);
}
