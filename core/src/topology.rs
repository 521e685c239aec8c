//! Decides which interface, subnet and gateway a scan uses.

use netmap_common::error::TopologyError;
use netmap_common::network::interface::{
    InterfaceContext, NetworkInterfaceExtension, best_lan_interface,
};
use netmap_common::network::range::enclosing_network;
use pnet::datalink::NetworkInterface;
use tracing::debug;

use crate::system::{DefaultRoute, TopologyProvider};

/// Resolves the scan context.
///
/// With `requested` set, that interface is used as is and the gateway comes
/// from the default route bound to it, or from the global default route if
/// it has none. Otherwise the device of the lowest-metric default route is
/// used, and when there is no default route at all the best-looking LAN
/// interface is picked without a gateway.
pub fn resolve(
    provider: &dyn TopologyProvider,
    requested: Option<&str>,
) -> Result<InterfaceContext, TopologyError> {
    let interfaces = provider.interfaces();
    let mut routes = provider.default_routes();
    routes.sort_by_key(|route| route.metric);

    let (interface, gateway) = match requested {
        Some(name) => {
            let interface = find(interfaces, name)
                .ok_or_else(|| TopologyError::InterfaceNotFound(name.to_string()))?;
            let gateway = routes
                .iter()
                .find(|route| route.device == name && route.gateway.is_some())
                .or_else(|| routes.iter().find(|route| route.gateway.is_some()))
                .and_then(|route| route.gateway);
            (interface, gateway)
        }
        None => from_routes(interfaces, &routes)?,
    };

    let net = interface
        .get_ipv4_net()
        .ok_or_else(|| TopologyError::NoIpv4Address(interface.name.clone()))?;
    let mac = interface
        .mac
        .ok_or_else(|| TopologyError::NoMacAddress(interface.name.clone()))?;
    let subnet = enclosing_network(net.ip(), net.prefix())
        .ok_or_else(|| TopologyError::NoIpv4Address(interface.name.clone()))?;

    debug!(
        "resolved {} ({}) on {subnet}, gateway {:?}",
        interface.name,
        net.ip(),
        gateway
    );

    Ok(InterfaceContext {
        address: net.ip(),
        mac,
        subnet,
        gateway,
        interface,
    })
}

fn from_routes(
    interfaces: Vec<NetworkInterface>,
    routes: &[DefaultRoute],
) -> Result<(NetworkInterface, Option<std::net::Ipv4Addr>), TopologyError> {
    if let Some(route) = routes.first() {
        let device = route.device.clone();
        match find(interfaces.clone(), &device) {
            Some(interface) => return Ok((interface, route.gateway)),
            None => debug!("default route names {device}, which is not a known interface"),
        }
    }

    best_lan_interface(interfaces)
        .map(|interface| (interface, None))
        .ok_or(TopologyError::NoInterface)
}

fn find(interfaces: Vec<NetworkInterface>, name: &str) -> Option<NetworkInterface> {
    interfaces.into_iter().find(|interface| interface.name == name)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
