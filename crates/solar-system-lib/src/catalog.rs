//! Planet catalog: canonical names, aliases and descriptions.
//!
//! The catalog is immutable once constructed. [`PlanetCatalog::solar_system`]
//! builds the eight-planet catalog served by the MCP tool; [`PlanetCatalog::new`]
//! accepts arbitrary tables and validates them, which keeps catalog-order
//! behavior of the resolver testable on catalogs other than the built-in one.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Canonical planet names in catalog order.
pub const PLANETS: [&str; 8] = [
    "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
];

/// Planet returned when the caller does not name one.
pub const DEFAULT_PLANET: &str = "Earth";

/// Alternate names (already lowercase and alphanumeric) mapped to canonical planets.
pub const PLANET_ALIASES: [(&str, &str); 10] = [
    ("terra", "Earth"),
    ("gaia", "Earth"),
    ("soliii", "Earth"),
    ("tellus", "Earth"),
    ("ares", "Mars"),
    ("jove", "Jupiter"),
    ("zeus", "Jupiter"),
    ("cronus", "Saturn"),
    ("ouranos", "Uranus"),
    ("poseidon", "Neptune"),
];

const PLANET_DESCRIPTIONS: [(&str, &str); 8] = [
    (
        "Mercury",
        "Mercury is the smallest planet in the Solar System and the closest to the Sun. \
         It has a rocky, cratered surface and extreme temperature swings.",
    ),
    (
        "Venus",
        "Venus, similar in size to Earth, is cloaked in thick clouds of sulfuric acid with \
         surface temperatures hot enough to melt lead.",
    ),
    (
        "Earth",
        "Earth is the only known planet to support life, with liquid water covering most of \
         its surface and a protective atmosphere.",
    ),
    (
        "Mars",
        "Mars, the Red Planet, shows evidence of ancient rivers and volcanoes and is a prime \
         target in the search for past life.",
    ),
    (
        "Jupiter",
        "Jupiter is the largest planet, a gas giant with a Great Red Spot, an enormous storm \
         raging for centuries.",
    ),
    (
        "Saturn",
        "Saturn is famous for its stunning ring system composed of billions of ice and rock \
         particles orbiting the planet.",
    ),
    (
        "Uranus",
        "Uranus is an ice giant rotating on its side, giving rise to extreme seasonal \
         variations during its long orbit.",
    ),
    (
        "Neptune",
        "Neptune, the farthest known giant, is a deep-blue world with supersonic winds and a \
         faint ring system.",
    ),
];

/// Immutable lookup tables used by the planet resolver.
#[derive(Debug, Clone)]
pub struct PlanetCatalog {
    names: Vec<String>,
    aliases: HashMap<String, String>,
    descriptions: HashMap<String, String>,
    default_planet: String,
}

impl PlanetCatalog {
    /// Build a catalog from explicit tables.
    ///
    /// Alias keys are stored lowercase. Construction fails when a canonical
    /// name lacks a description, an alias targets an unknown planet, the
    /// default is not canonical, or a canonical name is listed twice.
    pub fn new<N, A, D>(names: N, aliases: A, descriptions: D, default_planet: &str) -> Result<Self>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        A: IntoIterator<Item = (String, String)>,
        D: IntoIterator<Item = (String, String)>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let aliases: HashMap<String, String> = aliases
            .into_iter()
            .map(|(alias, planet)| (alias.to_lowercase(), planet))
            .collect();
        let descriptions: HashMap<String, String> = descriptions.into_iter().collect();

        if names.is_empty() {
            return Err(Error::InvalidCatalog {
                message: "catalog has no planets".to_string(),
            });
        }

        for (idx, name) in names.iter().enumerate() {
            if names[..idx].contains(name) {
                return Err(Error::InvalidCatalog {
                    message: format!("planet '{name}' is listed twice"),
                });
            }
            if !descriptions.contains_key(name) {
                return Err(Error::InvalidCatalog {
                    message: format!("planet '{name}' has no description"),
                });
            }
        }

        if let Some((alias, target)) = aliases.iter().find(|(_, target)| !names.contains(target)) {
            return Err(Error::InvalidCatalog {
                message: format!("alias '{alias}' points at unknown planet '{target}'"),
            });
        }

        if !names.iter().any(|name| name == default_planet) {
            return Err(Error::InvalidCatalog {
                message: format!("default planet '{default_planet}' is not in the catalog"),
            });
        }

        Ok(Self {
            names,
            aliases,
            descriptions,
            default_planet: default_planet.to_string(),
        })
    }

    /// The eight-planet catalog served by the widget.
    pub fn solar_system() -> Self {
        Self {
            names: PLANETS.iter().map(|name| name.to_string()).collect(),
            aliases: PLANET_ALIASES
                .iter()
                .map(|(alias, planet)| (alias.to_string(), planet.to_string()))
                .collect(),
            descriptions: PLANET_DESCRIPTIONS
                .iter()
                .map(|(planet, text)| (planet.to_string(), text.to_string()))
                .collect(),
            default_planet: DEFAULT_PLANET.to_string(),
        }
    }

    /// Canonical names in catalog order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Planet used when the caller leaves the name empty.
    pub fn default_planet(&self) -> &str {
        &self.default_planet
    }

    /// Look up an alias by its lowercase key.
    pub fn alias(&self, key: &str) -> Option<&str> {
        self.aliases.get(key).map(String::as_str)
    }

    /// Description for a canonical planet name.
    pub fn description(&self, planet: &str) -> Option<&str> {
        self.descriptions.get(planet).map(String::as_str)
    }

    /// Iterate over `(alias, planet)` pairs in no particular order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(alias, planet)| (alias.as_str(), planet.as_str()))
    }
}

impl Default for PlanetCatalog {
    fn default() -> Self {
        Self::solar_system()
    }
}
