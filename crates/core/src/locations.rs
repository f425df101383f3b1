//! Location Registry: province → district → hospital → facility lookups.
//!
//! The registry is built once from tabular reference rows into immutable
//! maps of maps and exposes query methods only; the nested table shape is
//! not part of the public API. Unknown provinces, hospitals, or programs
//! resolve to empty results rather than errors, so callers' option lists
//! simply narrow to nothing selectable.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use crate::program::Program;

/// Hierarchical facility/location lookup tables, built once at startup.
pub struct LocationRegistry {
    districts_by_province: BTreeMap<String, BTreeSet<String>>,
    district_by_hospital: BTreeMap<String, String>,
    facilities_by_hospital: HashMap<String, HashMap<Program, Vec<String>>>,
}

impl LocationRegistry {
    /// Build a registry from `(province, district)`, `(hospital, district)`,
    /// and `(program, hospital, facility)` reference rows.
    ///
    /// Duplicate rows collapse. Facility order within a `(program, hospital)`
    /// pair follows first appearance in the input; provinces, districts, and
    /// hospitals sort alphabetically.
    pub fn from_rows(
        districts: &[(&str, &str)],
        hospitals: &[(&str, &str)],
        facilities: &[(Program, &str, &str)],
    ) -> Self {
        let mut districts_by_province: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (province, district) in districts {
            districts_by_province
                .entry((*province).to_string())
                .or_default()
                .insert((*district).to_string());
        }

        let mut district_by_hospital = BTreeMap::new();
        for (hospital, district) in hospitals {
            district_by_hospital.insert((*hospital).to_string(), (*district).to_string());
        }

        let mut facilities_by_hospital: HashMap<String, HashMap<Program, Vec<String>>> =
            HashMap::new();
        for (program, hospital, facility) in facilities {
            let list = facilities_by_hospital
                .entry((*hospital).to_string())
                .or_default()
                .entry(*program)
                .or_default();
            if !list.iter().any(|f| f == facility) {
                list.push((*facility).to_string());
            }
        }

        Self {
            districts_by_province,
            district_by_hospital,
            facilities_by_hospital,
        }
    }

    /// The bundled reference dataset.
    pub fn bundled() -> &'static LocationRegistry {
        static BUNDLED: LazyLock<LocationRegistry> =
            LazyLock::new(|| LocationRegistry::from_rows(DISTRICT_ROWS, HOSPITAL_ROWS, FACILITY_ROWS));
        &BUNDLED
    }

    /// Province names, alphabetically sorted and deduplicated.
    pub fn provinces(&self) -> Vec<&str> {
        self.districts_by_province
            .keys()
            .map(String::as_str)
            .collect()
    }

    /// District names for a province, sorted and deduplicated.
    /// Unknown province → empty.
    pub fn districts(&self, province: &str) -> Vec<&str> {
        self.districts_by_province
            .get(province)
            .map(|districts| districts.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Hospital names, sorted and deduplicated.
    pub fn hospitals(&self) -> Vec<&str> {
        self.district_by_hospital
            .keys()
            .map(String::as_str)
            .collect()
    }

    /// The district a hospital belongs to. Unknown hospital → `None`.
    pub fn district_of(&self, hospital: &str) -> Option<&str> {
        self.district_by_hospital.get(hospital).map(String::as_str)
    }

    /// Facility names available under a hospital for a program, in catalog
    /// order.
    ///
    /// TB is a hospital-only program: it resolves to an empty list for every
    /// hospital (a domain rule, not a data gap). Unknown hospitals or
    /// programs likewise resolve empty.
    pub fn facilities_for(&self, program: Program, hospital: &str) -> &[String] {
        if program == Program::Tb {
            return &[];
        }
        self.facilities_by_hospital
            .get(hospital)
            .and_then(|by_program| by_program.get(&program))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Bundled reference dataset
// ---------------------------------------------------------------------------
// Stands in for the externally loaded flat tabular files; the construction
// path above accepts any row set with the same shape.

/// `(province, district)` rows.
const DISTRICT_ROWS: &[(&str, &str)] = &[
    ("East", "Bugesera"),
    ("East", "Gatsibo"),
    ("East", "Kayonza"),
    ("East", "Kirehe"),
    ("East", "Ngoma"),
    ("East", "Nyagatare"),
    ("East", "Rwamagana"),
    ("Kigali", "Gasabo"),
    ("Kigali", "Kicukiro"),
    ("Kigali", "Nyarugenge"),
    ("North", "Burera"),
    ("North", "Gakenke"),
    ("North", "Gicumbi"),
    ("North", "Musanze"),
    ("North", "Rulindo"),
    ("South", "Gisagara"),
    ("South", "Huye"),
    ("South", "Kamonyi"),
    ("South", "Muhanga"),
    ("South", "Nyamagabe"),
    ("South", "Nyanza"),
    ("South", "Nyaruguru"),
    ("South", "Ruhango"),
    ("West", "Karongi"),
    ("West", "Ngororero"),
    ("West", "Nyabihu"),
    ("West", "Nyamasheke"),
    ("West", "Rubavu"),
    ("West", "Rusizi"),
    ("West", "Rutsiro"),
];

/// `(hospital, district)` rows.
const HOSPITAL_ROWS: &[(&str, &str)] = &[
    ("BUTARO HOSPITAL", "Burera"),
    ("BYUMBA HOSPITAL", "Gicumbi"),
    ("GISENYI HOSPITAL", "Rubavu"),
    ("KIBAGABAGA HOSPITAL", "Gasabo"),
    ("KIGEME HOSPITAL", "Nyamagabe"),
    ("KIREHE HOSPITAL", "Kirehe"),
    ("MASAKA HOSPITAL", "Kicukiro"),
    ("MUHIMA HOSPITAL", "Nyarugenge"),
    ("RUHENGERI HOSPITAL", "Musanze"),
    ("RWINKWAVU HOSPITAL", "Kayonza"),
];

/// `(program, hospital, facility)` rows. TB has no rows: it is a
/// hospital-only program.
const FACILITY_ROWS: &[(Program, &str, &str)] = &[
    (Program::Hiv, "BUTARO HOSPITAL", "Butaro Health Center"),
    (Program::Hiv, "BUTARO HOSPITAL", "Kinoni Health Center"),
    (Program::Hiv, "BUTARO HOSPITAL", "Rusarabuye Health Center"),
    (Program::Hiv, "BYUMBA HOSPITAL", "Byumba Health Center"),
    (Program::Hiv, "BYUMBA HOSPITAL", "Mukarange Health Center"),
    (Program::Hiv, "GISENYI HOSPITAL", "Gacuba Health Center"),
    (Program::Hiv, "GISENYI HOSPITAL", "Gisenyi Health Center"),
    (Program::Hiv, "KIBAGABAGA HOSPITAL", "Kacyiru Health Center"),
    (Program::Hiv, "KIBAGABAGA HOSPITAL", "Kimironko Health Center"),
    (Program::Hiv, "KIBAGABAGA HOSPITAL", "Remera Health Center"),
    (Program::Hiv, "KIGEME HOSPITAL", "Gasaka Health Center"),
    (Program::Hiv, "KIGEME HOSPITAL", "Kigeme Health Center"),
    (Program::Hiv, "KIREHE HOSPITAL", "Kirehe Health Center"),
    (Program::Hiv, "KIREHE HOSPITAL", "Nasho Health Center"),
    (Program::Hiv, "KIREHE HOSPITAL", "Nyamugali Health Center"),
    (Program::Hiv, "MASAKA HOSPITAL", "Gahanga Health Center"),
    (Program::Hiv, "MASAKA HOSPITAL", "Masaka Health Center"),
    (Program::Hiv, "MUHIMA HOSPITAL", "Biryogo Health Center"),
    (Program::Hiv, "MUHIMA HOSPITAL", "Muhima Health Center"),
    (Program::Hiv, "RUHENGERI HOSPITAL", "Kinigi Health Center"),
    (Program::Hiv, "RUHENGERI HOSPITAL", "Muhoza Health Center"),
    (Program::Hiv, "RWINKWAVU HOSPITAL", "Kabarondo Health Center"),
    (Program::Hiv, "RWINKWAVU HOSPITAL", "Ndego Health Center"),
    (Program::Hiv, "RWINKWAVU HOSPITAL", "Rwinkwavu Health Center"),
    (Program::Malaria, "BUTARO HOSPITAL", "Butaro Health Center"),
    (Program::Malaria, "BUTARO HOSPITAL", "Nemba Health Center"),
    (Program::Malaria, "BYUMBA HOSPITAL", "Byumba Health Center"),
    (Program::Malaria, "GISENYI HOSPITAL", "Gisenyi Health Center"),
    (Program::Malaria, "KIBAGABAGA HOSPITAL", "Kimironko Health Center"),
    (Program::Malaria, "KIGEME HOSPITAL", "Kigeme Health Center"),
    (Program::Malaria, "KIREHE HOSPITAL", "Kirehe Health Center"),
    (Program::Malaria, "KIREHE HOSPITAL", "Nasho Health Center"),
    (Program::Malaria, "MASAKA HOSPITAL", "Masaka Health Center"),
    (Program::Malaria, "MUHIMA HOSPITAL", "Muhima Health Center"),
    (Program::Malaria, "RUHENGERI HOSPITAL", "Muhoza Health Center"),
    (Program::Malaria, "RWINKWAVU HOSPITAL", "Rwinkwavu Health Center"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provinces_are_sorted_and_deduplicated() {
        let registry = LocationRegistry::bundled();
        let provinces = registry.provinces();
        assert_eq!(provinces, vec!["East", "Kigali", "North", "South", "West"]);
    }

    #[test]
    fn kigali_districts_are_sorted_and_nonempty() {
        let registry = LocationRegistry::bundled();
        let districts = registry.districts("Kigali");
        assert_eq!(districts, vec!["Gasabo", "Kicukiro", "Nyarugenge"]);
    }

    #[test]
    fn duplicate_source_rows_collapse() {
        let registry = LocationRegistry::from_rows(
            &[("Kigali", "Gasabo"), ("Kigali", "Gasabo"), ("Kigali", "Kicukiro")],
            &[("A HOSPITAL", "Gasabo"), ("A HOSPITAL", "Gasabo")],
            &[
                (Program::Hiv, "A HOSPITAL", "X Health Center"),
                (Program::Hiv, "A HOSPITAL", "X Health Center"),
            ],
        );
        assert_eq!(registry.districts("Kigali"), vec!["Gasabo", "Kicukiro"]);
        assert_eq!(registry.hospitals(), vec!["A HOSPITAL"]);
        assert_eq!(
            registry.facilities_for(Program::Hiv, "A HOSPITAL"),
            ["X Health Center".to_string()]
        );
    }

    #[test]
    fn unknown_province_yields_empty() {
        let registry = LocationRegistry::bundled();
        assert!(registry.districts("Atlantis").is_empty());
        assert!(registry.districts("").is_empty());
    }

    #[test]
    fn hospitals_are_sorted() {
        let registry = LocationRegistry::bundled();
        let hospitals = registry.hospitals();
        assert!(!hospitals.is_empty());
        let mut sorted = hospitals.clone();
        sorted.sort_unstable();
        assert_eq!(hospitals, sorted);
    }

    #[test]
    fn district_of_known_hospital() {
        let registry = LocationRegistry::bundled();
        assert_eq!(registry.district_of("BUTARO HOSPITAL"), Some("Burera"));
        assert_eq!(registry.district_of("RWINKWAVU HOSPITAL"), Some("Kayonza"));
    }

    #[test]
    fn district_of_unknown_hospital_is_none() {
        let registry = LocationRegistry::bundled();
        assert_eq!(registry.district_of("unknown hospital"), None);
    }

    #[test]
    fn tb_has_no_facilities_under_any_hospital() {
        let registry = LocationRegistry::bundled();
        for hospital in registry.hospitals() {
            assert!(
                registry.facilities_for(Program::Tb, hospital).is_empty(),
                "TB must have no facilities under {hospital}"
            );
        }
    }

    #[test]
    fn tb_is_empty_even_with_data_rows() {
        // The rule is enforced in the query, not just by dataset omission.
        let registry = LocationRegistry::from_rows(
            &[],
            &[("A HOSPITAL", "Gasabo")],
            &[(Program::Tb, "A HOSPITAL", "Phantom Health Center")],
        );
        assert!(registry.facilities_for(Program::Tb, "A HOSPITAL").is_empty());
    }

    #[test]
    fn hiv_facilities_exist_for_butaro() {
        let registry = LocationRegistry::bundled();
        let facilities = registry.facilities_for(Program::Hiv, "BUTARO HOSPITAL");
        assert_eq!(
            facilities,
            [
                "Butaro Health Center".to_string(),
                "Kinoni Health Center".to_string(),
                "Rusarabuye Health Center".to_string(),
            ]
        );
    }

    #[test]
    fn unknown_hospital_yields_empty_facilities() {
        let registry = LocationRegistry::bundled();
        assert!(registry
            .facilities_for(Program::Hiv, "unknown hospital")
            .is_empty());
    }

    #[test]
    fn facility_order_is_stable_across_calls() {
        let registry = LocationRegistry::bundled();
        let first = registry.facilities_for(Program::Malaria, "KIREHE HOSPITAL");
        let second = registry.facilities_for(Program::Malaria, "KIREHE HOSPITAL");
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn every_hospital_maps_to_a_known_district() {
        let registry = LocationRegistry::bundled();
        let all_districts: Vec<&str> = registry
            .provinces()
            .iter()
            .flat_map(|p| registry.districts(p))
            .collect();
        for hospital in registry.hospitals() {
            let district = registry
                .district_of(hospital)
                .unwrap_or_else(|| panic!("{hospital} has no district"));
            assert!(
                all_districts.contains(&district),
                "{hospital} maps to unknown district {district}"
            );
        }
    }
}
