use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Device family inferred by the classifier.
///
/// [`Category::label`] is the exact string written to the snapshot; renderers
/// key their icons on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Gateway,
    Printer,
    Media,
    Infrastructure,
    PossibleInfrastructure,
    Iot,
    Mobile,
    Workstation,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Gateway,
        Category::Printer,
        Category::Media,
        Category::Infrastructure,
        Category::PossibleInfrastructure,
        Category::Iot,
        Category::Mobile,
        Category::Workstation,
        Category::Unknown,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Gateway => "Router (gateway)",
            Category::Printer => "Impresora",
            Category::Media => "TV / Consola",
            Category::Infrastructure => "Switch/AP",
            Category::PossibleInfrastructure => "Infraestructura de red (posible switch/AP)",
            Category::Iot => "IoT Device",
            Category::Mobile => "Móvil",
            Category::Workstation => "Ordenador",
            Category::Unknown => "Desconocido",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The `class` of a device record.
///
/// Shallow scans never run the classifier and copy the vendor label instead,
/// so a class is either a real [`Category`] or free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceClass {
    Category(Category),
    Unclassified(String),
}

impl DeviceClass {
    pub fn as_str(&self) -> &str {
        match self {
            DeviceClass::Category(category) => category.label(),
            DeviceClass::Unclassified(label) => label,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            DeviceClass::Category(category) => Some(*category),
            DeviceClass::Unclassified(_) => None,
        }
    }
}

impl From<Category> for DeviceClass {
    fn from(category: Category) -> Self {
        DeviceClass::Category(category)
    }
}

impl From<String> for DeviceClass {
    fn from(label: String) -> Self {
        match Category::from_label(&label) {
            Some(category) => DeviceClass::Category(category),
            None => DeviceClass::Unclassified(label),
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DeviceClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DeviceClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(DeviceClass::from)
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
