use std::time::Duration;

use lanaudit_common::error::DiscoveryError;
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};

/// How long a blocking read waits before handing control back to the listen loop.
const READ_TIMEOUT: Duration = Duration::from_millis(50);

pub struct EthernetHandle {
    pub tx: Box<dyn DataLinkSender>,
    pub rx: Box<dyn DataLinkReceiver>,
}

/// Opens a layer 2 channel on `intf`. Requires raw socket privileges.
pub fn open(intf: &NetworkInterface) -> Result<EthernetHandle, DiscoveryError> {
    open_eth_channel(intf, &get_config(), datalink::channel)
}

fn open_eth_channel<F>(
    intf: &NetworkInterface,
    cfg: &Config,
    channel_opener: F,
) -> Result<EthernetHandle, DiscoveryError>
where
    F: FnOnce(&NetworkInterface, Config) -> std::io::Result<Channel>,
{
    let channel = channel_opener(intf, *cfg).map_err(|source| DiscoveryError::Channel {
        interface: intf.name.clone(),
        source,
    })?;

    match channel {
        Channel::Ethernet(tx, rx) => Ok(EthernetHandle { tx, rx }),
        _ => Err(DiscoveryError::NotEthernet(intf.name.clone())),
    }
}

fn get_config() -> Config {
    Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
