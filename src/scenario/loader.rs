//! Scenario CSV loading

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;

use super::Scenario;
use crate::report::ReportError;

/// Load scenarios from a CSV file with a header row
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, ReportError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let scenarios = load_scenarios_from_reader(file)?;
    info!("Loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load scenarios from any CSV reader
pub fn load_scenarios_from_reader<R: Read>(reader: R) -> Result<Vec<Scenario>, ReportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut scenarios = Vec::new();
    for record in rdr.deserialize() {
        let scenario: Scenario = record?;
        scenarios.push(scenario);
    }
    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cells_keep_base() {
        let data = "\
name,cost_to_win,cash_floor,payment_delay
baseline,,,
pricey, 1200 ,,
strict,,0,6
";
        let scenarios = load_scenarios_from_reader(data.as_bytes()).expect("Failed to load");

        assert_eq!(scenarios.len(), 3);
        assert_eq!(scenarios[0], Scenario { name: "baseline".to_string(), ..Default::default() });
        assert_eq!(scenarios[1].cost_to_win, Some(1_200.0));
        assert_eq!(scenarios[1].cash_floor, None);
        assert_eq!(scenarios[2].cash_floor, Some(0.0));
        assert_eq!(scenarios[2].payment_delay, Some(6));
        assert_eq!(scenarios[2].period_count, None);
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let data = "name,cost_to_win\nbroken,cheap\n";
        assert!(matches!(
            load_scenarios_from_reader(data.as_bytes()),
            Err(ReportError::Csv(_))
        ));
    }

    #[test]
    fn test_bundled_scenarios_load() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/scenarios.csv");
        let scenarios = load_scenarios(path).expect("Failed to load bundled scenarios");
        assert!(!scenarios.is_empty());
        assert_eq!(scenarios[0].name, "baseline");
    }
}
