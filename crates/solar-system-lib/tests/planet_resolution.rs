use solar_system_lib::{resolve_planet, Error, PlanetCatalog, PLANETS};

fn custom_catalog(names: &[&str]) -> PlanetCatalog {
    PlanetCatalog::new(
        names.iter().copied(),
        Vec::new(),
        names
            .iter()
            .map(|name| (name.to_string(), format!("{name} description")))
            .collect::<Vec<_>>(),
        names[0],
    )
    .expect("catalog is valid")
}

#[test]
fn canonical_names_resolve_in_any_case_and_with_punctuation() {
    let catalog = PlanetCatalog::solar_system();
    for planet in PLANETS {
        assert_eq!(resolve_planet(&catalog, planet).unwrap(), planet);
        assert_eq!(
            resolve_planet(&catalog, &planet.to_uppercase()).unwrap(),
            planet
        );

        let (head, tail) = planet.split_at(2);
        let punctuated = format!("{head}-{tail}!");
        assert_eq!(
            resolve_planet(&catalog, &punctuated).unwrap(),
            planet,
            "{punctuated} should resolve to {planet}"
        );
    }
}

#[test]
fn aliases_resolve_regardless_of_case() {
    let catalog = PlanetCatalog::solar_system();
    let aliases: Vec<(String, String)> = catalog
        .aliases()
        .map(|(alias, planet)| (alias.to_string(), planet.to_string()))
        .collect();
    assert_eq!(aliases.len(), 10);

    for (alias, planet) in aliases {
        assert_eq!(resolve_planet(&catalog, &alias).unwrap(), planet);
        assert_eq!(
            resolve_planet(&catalog, &alias.to_uppercase()).unwrap(),
            planet
        );
    }
}

#[test]
fn blank_and_punctuation_inputs() {
    let catalog = PlanetCatalog::solar_system();
    assert_eq!(resolve_planet(&catalog, "").unwrap(), "Earth");
    assert_eq!(resolve_planet(&catalog, "   ").unwrap(), "Earth");
    assert!(matches!(
        resolve_planet(&catalog, "###"),
        Err(Error::UnknownPlanet { .. })
    ));
}

#[test]
fn unique_prefix_resolves() {
    let catalog = PlanetCatalog::solar_system();
    assert_eq!(resolve_planet(&catalog, "nep").unwrap(), "Neptune");
    assert_eq!(resolve_planet(&catalog, "sat").unwrap(), "Saturn");
    assert_eq!(resolve_planet(&catalog, "j").unwrap(), "Jupiter");
}

#[test]
fn ambiguous_prefix_picks_first_in_catalog_order() {
    let catalog = custom_catalog(&["Marsupial", "Mars", "Mercury"]);
    assert_eq!(resolve_planet(&catalog, "mar").unwrap(), "Marsupial");
    // An exact match still beats an earlier prefix match.
    assert_eq!(resolve_planet(&catalog, "mars").unwrap(), "Mars");

    let reordered = custom_catalog(&["Mercury", "Mars", "Marsupial"]);
    assert_eq!(resolve_planet(&reordered, "mar").unwrap(), "Mars");
    assert_eq!(resolve_planet(&reordered, "m").unwrap(), "Mercury");
}

#[test]
fn exact_match_beats_alias() {
    let catalog = PlanetCatalog::new(
        ["Ares", "Mars"],
        vec![("ares".to_string(), "Mars".to_string())],
        vec![
            ("Ares".to_string(), "Asteroid".to_string()),
            ("Mars".to_string(), "Planet".to_string()),
        ],
        "Mars",
    )
    .unwrap();
    assert_eq!(resolve_planet(&catalog, "ares").unwrap(), "Ares");
}

#[test]
fn unresolved_error_message_lists_all_planets() {
    let catalog = PlanetCatalog::solar_system();
    let err = resolve_planet(&catalog, "Pluto").unwrap_err();
    let message = err.to_string();
    assert_eq!(
        message,
        "Unknown planet. Provide one of: Mercury, Venus, Earth, Mars, Jupiter, Saturn, Uranus, Neptune"
    );
}
