//! Free-text planet name resolution.
//!
//! Resolution runs through a fixed sequence of increasingly loose rules:
//!
//! 1. empty or whitespace-only input resolves to the catalog default
//! 2. exact match on the cleaned or lowercased name
//! 3. alias lookup on the cleaned name
//! 4. prefix match, first planet in catalog order wins
//!
//! The "clean" form of a string is its lowercase form with every
//! non-alphanumeric character removed, so `"Jupi-ter!"` and `"JUPITER"` both
//! clean to `"jupiter"`.

use tracing::debug;

use crate::catalog::PlanetCatalog;
use crate::error::{Error, Result};

/// Lowercase `input` and drop every non-alphanumeric character.
pub fn clean_key(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Resolve `input` to a canonical planet name from `catalog`.
///
/// Returns [`Error::UnknownPlanet`] listing every canonical name when no rule
/// matches. Input made only of punctuation is unresolvable: the default only
/// applies when the raw input is blank.
pub fn resolve_planet<'a>(catalog: &'a PlanetCatalog, input: &str) -> Result<&'a str> {
    let key = input.trim().to_lowercase();
    if key.is_empty() {
        return Ok(catalog.default_planet());
    }

    let clean = clean_key(&key);
    if clean.is_empty() {
        debug!(input, "planet name has no alphanumeric characters");
        return Err(unknown(catalog, input));
    }

    if let Some(planet) = catalog
        .names()
        .iter()
        .find(|planet| clean_key(planet) == clean || planet.to_lowercase() == key)
    {
        return Ok(planet);
    }

    if let Some(planet) = catalog.alias(&clean) {
        return Ok(planet);
    }

    if let Some(planet) = catalog
        .names()
        .iter()
        .find(|planet| clean_key(planet).starts_with(&clean))
    {
        debug!(input, planet = %planet, "planet resolved by prefix");
        return Ok(planet);
    }

    Err(unknown(catalog, input))
}

fn unknown(catalog: &PlanetCatalog, input: &str) -> Error {
    Error::UnknownPlanet {
        name: input.to_string(),
        valid: catalog.names().to_vec(),
    }
}
