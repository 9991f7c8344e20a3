//! Container registry and color assignment.

use std::fmt;

/// Display colors cycled over containers by index.
///
/// The palette is fixed at six entries; registries with more containers
/// wrap around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogColor {
    Red,
    Green,
    Blue,
    Yellow,
    Cyan,
    Magenta,
}

impl LogColor {
    /// The palette, in assignment order.
    pub const PALETTE: [LogColor; 6] = [
        LogColor::Red,
        LogColor::Green,
        LogColor::Blue,
        LogColor::Yellow,
        LogColor::Cyan,
        LogColor::Magenta,
    ];

    /// Color for a container at the given registry index.
    #[must_use]
    pub const fn for_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }
}

impl fmt::Display for LogColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogColor::Red => "red",
            LogColor::Green => "green",
            LogColor::Blue => "blue",
            LogColor::Yellow => "yellow",
            LogColor::Cyan => "cyan",
            LogColor::Magenta => "magenta",
        };
        write!(f, "{name}")
    }
}

/// A named container from the compose file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Service name, unique within the compose file.
    pub name: String,
    /// Stable position used for numeric selection.
    pub index: usize,
    /// Display color, assigned once at startup.
    pub color: LogColor,
}

impl Container {
    /// The runtime-level container name: `<project>_<name>_1`.
    #[must_use]
    pub fn qualified_name(&self, project: &str) -> String {
        format!("{project}_{}_1", self.name)
    }
}

/// Ordered, immutable collection of the containers under management.
///
/// Built once at startup from the compose file; order and colors never
/// change afterwards.
#[derive(Debug, Clone)]
pub struct ContainerRegistry {
    containers: Vec<Container>,
}

impl ContainerRegistry {
    /// Build a registry from an ordered list of service names.
    #[must_use]
    pub fn from_names(names: Vec<String>) -> Self {
        let containers = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Container {
                name,
                index,
                color: LogColor::for_index(index),
            })
            .collect();
        Self { containers }
    }

    /// Look up a container by its selection index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Container> {
        self.containers.get(index)
    }

    /// Look up a container by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.name == name)
    }

    /// Iterate over containers in compose-file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Container> {
        self.containers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}

impl<'a> IntoIterator for &'a ContainerRegistry {
    type Item = &'a Container;
    type IntoIter = std::slice::Iter<'a, Container>;

    fn into_iter(self) -> Self::IntoIter {
        self.containers.iter()
    }
}
