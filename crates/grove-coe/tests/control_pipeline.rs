//! Loading definition files and coefficient tables through a shared
//! control map, in dependency order.

use grove_coe::bec_zone_by_species::ZoneSpeciesCoefficients;
use grove_coe::stocking_class::StockingClassFactors;
use grove_coe::{
    BecDefinitionParser, BecZoneBySpeciesCoefficientParser, CoefficientParser, ControlKey,
    ControlMap, GenusDefinitionParser, ResourceParser, SiteCurve, SiteCurveParser,
    StockingClassFactorParser,
};
use grove_core::{BecLookup, Coefficients, GenusDefinitionMap, Region};
use grove_matrix::{MatrixMap, MatrixMap3};
use grove_parse::ParseError;
use grove_test_utils::{bec_definition_text, genus_definition_text, zone_by_species_row};
use indexmap::IndexMap;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn load_definitions() -> ControlMap {
    let mut control = ControlMap::new();
    BecDefinitionParser::new()
        .parse_into(bec_definition_text().as_bytes(), &mut control)
        .unwrap();
    GenusDefinitionParser::default()
        .parse_into(genus_definition_text().as_bytes(), &mut control)
        .unwrap();
    control
}

#[test]
fn definitions_land_under_their_keys() {
    init_tracing();
    let control = load_definitions();
    assert_eq!(
        control.keys().cloned().collect::<Vec<_>>(),
        vec![ControlKey::BecDef, ControlKey::GenusDef]
    );
    assert_eq!(control.becs().unwrap().len(), 14);
    assert_eq!(control.genera().unwrap().index_of("PL"), Some(12));
    assert!(control.get::<BecLookup>(&ControlKey::BecDef).is_some());
    assert!(control.get::<GenusDefinitionMap>(&ControlKey::BecDef).is_none());
}

#[test]
fn basal_area_yield_uses_loaded_domains() {
    init_tracing();
    let mut control = load_definitions();
    let mut values = vec![0.0f32; 16];
    values[0] = 1.5;
    values[11] = 0.25;
    let text = [
        zone_by_species_row("IDF", 0, 1, &values),
        zone_by_species_row("CWH", 6, 0, &values),
    ]
    .join("\n");

    BecZoneBySpeciesCoefficientParser::basal_area_yield()
        .parse_into(text.as_bytes(), &mut control)
        .unwrap();
    let table = control
        .expect::<ZoneSpeciesCoefficients>(&ControlKey::BasalAreaYield)
        .unwrap();

    assert_eq!(table.get("IDF", "AC").unwrap().get(0).unwrap(), 1.5);
    assert_eq!(table.get("IDF", "PL").unwrap().get(0).unwrap(), 1.75);
    assert_eq!(table.get("IDF", "S").unwrap().get(0).unwrap(), 1.5);
    assert_eq!(table.get("CWH", "PL").unwrap().get(6).unwrap(), 0.25);
    assert_eq!(table.get("CWH", "S").unwrap().get(6).unwrap(), 0.0);
    assert!(!table.has("SWB", "AC").unwrap());
}

#[test]
fn zone_table_without_definitions_is_resource_error() {
    let mut control = ControlMap::new();
    let err = BecZoneBySpeciesCoefficientParser::quad_mean_diameter_yield()
        .parse_into("".as_bytes(), &mut control)
        .unwrap_err();
    assert!(matches!(err, ParseError::Resource { .. }));
    assert_eq!(err.to_string(), "control map has no entry for BEC_DEF");
    assert!(!control.contains(&ControlKey::QuadMeanDiameterYield));
}

#[test]
fn three_key_table_through_control_map() {
    let mut control = load_definitions();
    let parser = CoefficientParser::new(ControlKey::Coefficients("UTIL_COMP_DQ".into()))
        .ucl_key()
        .space(1)
        .species_key()
        .space(1)
        .bec_key()
        .coefficients(2, 9)
        .index_from(1);
    let text = " 2 PL IDF      1.25     -0.5\n 4 F  CWH       3.0      4.0\n";
    parser.parse_into(text.as_bytes(), &mut control).unwrap();

    let map = control
        .expect::<MatrixMap<Coefficients>>(&ControlKey::Coefficients("UTIL_COMP_DQ".into()))
        .unwrap();
    let view = MatrixMap3::<i32, String, String, Coefficients, _>::cast(map).unwrap();
    let cell = view.get(&2, "PL", "IDF").unwrap();
    assert_eq!(cell.index_from(), 1);
    assert_eq!(cell.get(2).unwrap(), -0.5);
    assert_eq!(view.get(&4, "F", "CWH").unwrap().get(1).unwrap(), 3.0);
    assert_eq!(view.map().populated_len(), 2);
}

#[test]
fn site_curves_require_every_loaded_species() {
    let mut control = load_definitions();
    let full: String = control
        .genera()
        .unwrap()
        .aliases()
        .enumerate()
        .map(|(i, alias)| format!("{alias:<3}{:>3}{:>3}\n", i + 1, i + 20))
        .collect();

    SiteCurveParser::new()
        .parse_into(full.as_bytes(), &mut control)
        .unwrap();
    let curves = control
        .expect::<IndexMap<String, SiteCurve>>(&ControlKey::SiteCurveNumbers)
        .unwrap();
    assert_eq!(curves["PL"].value(Region::Coastal), 12);
    assert_eq!(curves["PL"].value(Region::Interior), 31);

    let partial: String = full.lines().skip(1).map(|l| format!("{l}\n")).collect();
    let err = SiteCurveParser::new()
        .parse(partial.as_bytes(), &control)
        .unwrap_err();
    assert_eq!(err.to_string(), "missing expected entries for AC");
}

#[test]
fn stocking_classes_stored_by_class_and_region() {
    let mut control = ControlMap::new();
    let text = "R I P  0 1.00   100\nR C P  0 0.90    90\n";
    StockingClassFactorParser::new()
        .parse_into(text.as_bytes(), &mut control)
        .unwrap();
    let store = control
        .expect::<StockingClassFactors>(&ControlKey::StockingClassFactors)
        .unwrap();
    let factor = store.get(&'R', &Region::Interior).unwrap().unwrap();
    assert_eq!(factor.npct_area, 100);
}

#[test]
fn wrong_type_request_names_key() {
    let control = load_definitions();
    let err = control
        .expect::<BecLookup>(&ControlKey::GenusDef)
        .unwrap_err();
    assert!(err.to_string().starts_with("control map entry SP0_DEF is not a"));
}
