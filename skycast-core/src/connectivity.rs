use sysinfo::Networks;

/// Transport class of a network interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Wifi,
    Cellular,
    Ethernet,
    Other,
}

/// True iff any reported transport can carry traffic. An empty slice means
/// "no connectivity information", which counts as unavailable rather than
/// as a failure.
pub fn has_usable_transport(transports: &[TransportKind]) -> bool {
    transports.iter().any(|t| {
        matches!(
            t,
            TransportKind::Wifi | TransportKind::Cellular | TransportKind::Ethernet
        )
    })
}

/// Classify an interface by its kernel name. Loopback, bridges, tunnels and
/// container veth pairs all land in `Other`.
pub fn classify_interface(name: &str) -> TransportKind {
    let name = name.to_ascii_lowercase();

    if name.starts_with("wl") || name.starts_with("wifi") || name.starts_with("ath") {
        TransportKind::Wifi
    } else if name.starts_with("wwan") || name.starts_with("ppp") || name.starts_with("rmnet") {
        TransportKind::Cellular
    } else if name.starts_with("eth") || name.starts_with("en") || name.starts_with("em") {
        TransportKind::Ethernet
    } else {
        TransportKind::Other
    }
}

/// Answers "is there a usable network right now?".
pub trait Connectivity: Send + Sync {
    fn is_network_available(&self) -> bool;
}

/// Probes the operating system's interface list.
#[derive(Debug, Default)]
pub struct SystemConnectivity;

impl Connectivity for SystemConnectivity {
    fn is_network_available(&self) -> bool {
        let networks = Networks::new_with_refreshed_list();

        let active: Vec<TransportKind> = networks
            .iter()
            .filter(|(_, data)| {
                data.ip_networks()
                    .iter()
                    .any(|ip| !ip.addr.is_loopback())
            })
            .map(|(name, _)| classify_interface(name))
            .collect();

        has_usable_transport(&active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_transports_means_unavailable() {
        assert!(!has_usable_transport(&[]));
    }

    #[test]
    fn unknown_transports_mean_unavailable() {
        assert!(!has_usable_transport(&[TransportKind::Other, TransportKind::Other]));
    }

    #[test]
    fn any_usable_transport_means_available() {
        assert!(has_usable_transport(&[TransportKind::Wifi]));
        assert!(has_usable_transport(&[TransportKind::Cellular]));
        assert!(has_usable_transport(&[TransportKind::Ethernet]));
        assert!(has_usable_transport(&[TransportKind::Other, TransportKind::Wifi]));
    }

    #[test]
    fn interface_names_classify_by_prefix() {
        assert_eq!(classify_interface("wlan0"), TransportKind::Wifi);
        assert_eq!(classify_interface("wlp3s0"), TransportKind::Wifi);
        assert_eq!(classify_interface("eth0"), TransportKind::Ethernet);
        assert_eq!(classify_interface("enp4s0"), TransportKind::Ethernet);
        assert_eq!(classify_interface("wwan0"), TransportKind::Cellular);
        assert_eq!(classify_interface("ppp0"), TransportKind::Cellular);
        assert_eq!(classify_interface("lo"), TransportKind::Other);
        assert_eq!(classify_interface("docker0"), TransportKind::Other);
        assert_eq!(classify_interface("veth1a2b"), TransportKind::Other);
    }
}
