//! Read-only netlist shapes for export scripts
//!
//! A netlist front-end builds these from revision content; export back ends
//! (XML dumps, tEDAx, ...) only read them. Order is meaningful everywhere:
//! packages and nets in netlist order, connections in net order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One pin of one package, as connected to a net
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    /// Pin number as printed on the symbol (`"1"`, `"A3"`, ...)
    pub number: String,
    /// Reference designator of the component the pin belongs to
    pub component: String,
}

impl Pin {
    pub fn new(component: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            component: component.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    pub name: String,
    pub connections: Vec<Pin>,
}

/// A placed component package and its attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub refdes: String,
    pub attributes: BTreeMap<String, String>,
}

impl Package {
    pub fn new(refdes: impl Into<String>) -> Self {
        Self {
            refdes: refdes.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Value of attribute `name`, or `default` if the package has none
    pub fn attribute<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attributes.get(name).map_or(default, String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Netlist {
    pub packages: Vec<Package>,
    pub nets: Vec<Net>,
}

impl Netlist {
    pub fn package(&self, refdes: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.refdes == refdes)
    }

    pub fn net(&self, name: &str) -> Option<&Net> {
        self.nets.iter().find(|n| n.name == name)
    }

    /// Every connected pin of package `refdes` with the net it is on
    ///
    /// Pins come in net order, then connection order within a net.
    pub fn pins_of<'a>(&'a self, refdes: &'a str) -> impl Iterator<Item = (&'a Net, &'a Pin)> + 'a {
        self.nets.iter().flat_map(move |net| {
            net.connections
                .iter()
                .filter(move |pin| pin.component == refdes)
                .map(move |pin| (net, pin))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_default() {
        let r1 = Package::new("R1").with_attribute("value", "10k");
        assert_eq!(r1.attribute("value", "unknown"), "10k");
        assert_eq!(r1.attribute("footprint", "unknown"), "unknown");
    }

    #[test]
    fn test_pins_of_follows_net_order() {
        let netlist = Netlist {
            packages: vec![Package::new("R1")],
            nets: vec![
                Net {
                    name: "VCC".to_string(),
                    connections: vec![Pin::new("R1", "2")],
                },
                Net {
                    name: "GND".to_string(),
                    connections: vec![Pin::new("C1", "1"), Pin::new("R1", "1")],
                },
            ],
        };

        let pins: Vec<_> = netlist
            .pins_of("R1")
            .map(|(net, pin)| (net.name.as_str(), pin.number.as_str()))
            .collect();
        assert_eq!(pins, vec![("VCC", "2"), ("GND", "1")]);
        assert_eq!(netlist.pins_of("U9").count(), 0);
    }
}
