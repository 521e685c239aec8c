use colored::Color;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color as TableColor, ContentArrangement, Table};
use netmap_common::network::category::{Category, DeviceClass};
use netmap_common::snapshot::{DeviceRecord, ScanSnapshot};

use crate::terminal::colors;

const DEEP_HEADERS: [&str; 7] = ["#", "IP", "MAC", "Vendor", "TTL", "Open ports", "Class"];
const SHALLOW_HEADERS: [&str; 4] = ["#", "IP", "MAC", "Vendor"];
const PLACEHOLDER: &str = "-";

pub fn headers(deep: bool) -> &'static [&'static str] {
    if deep { &DEEP_HEADERS } else { &SHALLOW_HEADERS }
}

/// Plain-text cells of the summary table, one row per device.
pub fn rows(snapshot: &ScanSnapshot) -> Vec<Vec<String>> {
    snapshot
        .devices
        .iter()
        .enumerate()
        .map(|(idx, device)| row(idx + 1, device, snapshot.meta.deep))
        .collect()
}

fn row(position: usize, device: &DeviceRecord, deep: bool) -> Vec<String> {
    let mut cells = vec![
        position.to_string(),
        device.ip.to_string(),
        device.mac.to_string(),
        device.vendor.clone(),
    ];
    if deep {
        cells.push(device.ttl.map_or_else(|| PLACEHOLDER.to_string(), |ttl| ttl.to_string()));
        cells.push(ports(&device.open_ports));
        cells.push(device.class.as_str().to_string());
    }
    cells
}

fn ports(open_ports: &[u16]) -> String {
    if open_ports.is_empty() {
        return PLACEHOLDER.to_string();
    }
    open_ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the summary table. Addresses and classes get their own colours.
pub fn build_table(snapshot: &ScanSnapshot) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .apply_modifier(UTF8_ROUND_CORNERS);

    table.set_header(headers(snapshot.meta.deep).iter().map(|h| {
        Cell::new(h)
            .fg(table_color(colors::PRIMARY))
            .add_attribute(Attribute::Bold)
    }));

    for (cells, device) in rows(snapshot).into_iter().zip(&snapshot.devices) {
        table.add_row(
            cells
                .into_iter()
                .enumerate()
                .map(|(col, cell)| Cell::new(cell).fg(table_color(cell_color(col, device)))),
        );
    }
    table
}

pub fn render_table(snapshot: &ScanSnapshot) -> Vec<String> {
    build_table(snapshot).lines().collect()
}

fn cell_color(col: usize, device: &DeviceRecord) -> Color {
    match col {
        1 => colors::IPV4_ADDR,
        2 => colors::MAC_ADDR,
        6 => class_color(&device.class),
        _ => colors::TEXT_DEFAULT,
    }
}

/// Maps a terminal colour onto the table's palette.
fn table_color(color: Color) -> TableColor {
    match color {
        Color::Black => TableColor::Black,
        Color::Red => TableColor::DarkRed,
        Color::Green => TableColor::DarkGreen,
        Color::Yellow => TableColor::DarkYellow,
        Color::Blue => TableColor::DarkBlue,
        Color::Magenta => TableColor::DarkMagenta,
        Color::Cyan => TableColor::DarkCyan,
        Color::White => TableColor::Grey,
        Color::BrightBlack => TableColor::DarkGrey,
        Color::BrightRed => TableColor::Red,
        Color::BrightGreen => TableColor::Green,
        Color::BrightYellow => TableColor::Yellow,
        Color::BrightBlue => TableColor::Blue,
        Color::BrightMagenta => TableColor::Magenta,
        Color::BrightCyan => TableColor::Cyan,
        Color::BrightWhite => TableColor::White,
        Color::TrueColor { r, g, b } => TableColor::Rgb { r, g, b },
        #[allow(unreachable_patterns)]
        _ => TableColor::Reset,
    }
}

pub fn class_color(class: &DeviceClass) -> Color {
    match class.category() {
        Some(Category::Gateway) => colors::GATEWAY,
        Some(Category::Infrastructure | Category::PossibleInfrastructure) => {
            colors::INFRASTRUCTURE
        }
        Some(Category::Unknown) | None => colors::UNCLASSIFIED,
        Some(_) => colors::ENDPOINT,
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

#[cfg(test)]
mod tests {
    use super::*;
    use netmap_common::snapshot::ScanMeta;
    use pnet::util::MacAddr;
    use std::net::Ipv4Addr;

    fn record(last: u8, vendor: &str, ttl: Option<u8>, ports: Vec<u16>, class: DeviceClass) -> DeviceRecord {
        DeviceRecord {
            ip: Ipv4Addr::new(10, 0, 0, last),
            mac: MacAddr::new(0, 0x11, 0x22, 0, 0, last),
            vendor: vendor.to_string(),
            ttl,
            open_ports: ports,
            ssdp: vec![],
            class,
        }
    }

    fn snapshot(deep: bool, devices: Vec<DeviceRecord>) -> ScanSnapshot {
        ScanSnapshot {
            meta: ScanMeta { deep, ts: 0.0 },
            devices,
        }
    }

    #[test]
    fn deep_rows_carry_ttl_ports_and_class() {
        let snap = snapshot(
            true,
            vec![
                record(1, "Cisco Systems", Some(64), vec![80, 443], Category::Gateway.into()),
                record(9, "Unknown", None, vec![], Category::Unknown.into()),
            ],
        );
        let rows = rows(&snap);
        assert_eq!(
            rows[0],
            vec!["1", "10.0.0.1", "00:11:22:00:00:01", "Cisco Systems", "64", "80, 443", "Router (gateway)"]
        );
        assert_eq!(rows[1][4], "-");
        assert_eq!(rows[1][5], "-");
        assert_eq!(rows[1][6], "Desconocido");
    }

    #[test]
    fn shallow_rows_stop_at_vendor() {
        let snap = snapshot(false, vec![record(3, "Apple, Inc.", None, vec![], "Apple, Inc.".to_string().into())]);
        assert_eq!(headers(false).len(), 4);
        assert_eq!(rows(&snap)[0].len(), 4);
    }

    #[test]
    fn accented_classes_keep_columns_aligned() {
        let snap = snapshot(
            true,
            vec![
                record(4, "Samsung", Some(64), vec![], Category::Mobile.into()),
                record(7, "Sony", Some(64), vec![8008], Category::Media.into()),
            ],
        );
        let lines = render_table(&snap);
        // top, header, header rule, row, row rule, row, bottom
        assert_eq!(lines.len(), 7);
        let width = console::measure_text_width(&lines[0]);
        assert!(lines.iter().all(|l| console::measure_text_width(l) == width));
        assert!(lines.iter().any(|l| l.contains("Móvil")));
    }

    #[test]
    fn render_table_has_header_rule_and_rows() {
        let snap = snapshot(false, vec![record(1, "Cisco", None, vec![], "Cisco".to_string().into())]);
        let lines = render_table(&snap);
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("Vendor"));
        assert!(lines[3].contains("10.0.0.1"));
        assert!(!lines.iter().any(|l| l.contains("TTL")));
    }

    #[test]
    fn table_colors_follow_terminal_palette() {
        assert_eq!(table_color(colors::GATEWAY), TableColor::Red);
        assert_eq!(table_color(colors::UNCLASSIFIED), TableColor::DarkGrey);
        assert_eq!(
            table_color(colors::IPV4_ADDR),
            TableColor::Rgb { r: 110, g: 220, b: 140 }
        );
    }

    #[test]
    fn class_colors() {
        assert_eq!(class_color(&Category::Gateway.into()), colors::GATEWAY);
        assert_eq!(class_color(&Category::PossibleInfrastructure.into()), colors::INFRASTRUCTURE);
        assert_eq!(class_color(&Category::Printer.into()), colors::ENDPOINT);
        assert_eq!(class_color(&"Apple, Inc.".to_string().into()), colors::UNCLASSIFIED);
    }
}
