use crate::Combustion::equivalence_ratio::{
    equivalence_ratio, equivalence_ratio_local, equivalence_ratio_oxidizer_species,
};
use crate::Combustion::mixture_fraction::mixture_fraction;
use crate::Combustion::stoichiometry::{blend, complete_combustion};
use crate::Mechanism::composition::CompositionSpec;
use crate::Mechanism::mixture_state::MixtureState;
use crate::settings::MixtureTask;
use log::{info, warn};
use prettytable::{Table, row};

/// One line of the comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub case: String,
    pub oxidizer_species_phi: f64,
    pub local_phi: f64,
    /// None if the fuel/oxidizer pair admits no mixture fraction
    pub reference_phi: Option<f64>,
    pub mixture_fraction: Option<f64>,
}

impl CaseReport {
    pub fn evaluate(
        case: &str,
        state: &MixtureState,
        fuel: &CompositionSpec,
        oxidizer: &CompositionSpec,
    ) -> Self {
        let reference_phi = match equivalence_ratio(state, fuel, oxidizer) {
            Ok(phi) => Some(phi),
            Err(e) => {
                warn!("{}: equivalence ratio not available: {}", case, e);
                None
            }
        };
        let mixture_fraction = match mixture_fraction(state, fuel, oxidizer) {
            Ok(z) => Some(z),
            Err(e) => {
                warn!("{}: mixture fraction not available: {}", case, e);
                None
            }
        };
        CaseReport {
            case: case.to_string(),
            oxidizer_species_phi: equivalence_ratio_oxidizer_species(state, None, &[]),
            local_phi: equivalence_ratio_local(state),
            reference_phi,
            mixture_fraction,
        }
    }
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:5.4}", v),
        None => "n/a".to_string(),
    }
}

pub fn reports_table(reports: &[CaseReport]) -> Table {
    let mut table = Table::new();
    table.add_row(row![
        "case",
        "oxidizer-species phi",
        "local phi",
        "phi",
        "mix fraction"
    ]);
    for report in reports {
        table.add_row(row![
            report.case,
            format_value(Some(report.oxidizer_species_phi)),
            format_value(Some(report.local_phi)),
            format_value(report.reference_phi),
            format_value(report.mixture_fraction)
        ]);
    }
    table
}

pub fn print_reports(title: &str, reports: &[CaseReport]) {
    println!("\n{}", title);
    reports_table(reports).printstd();
}

/// Blends at every equivalence ratio of the task (and their burnt states if asked),
/// then the pure fuel and the pure oxidizer.
pub fn run_task(task: &MixtureTask) -> Result<Vec<CaseReport>, String> {
    task.validate()?;
    let species = task.species_set()?;
    let (fuel, oxidizer) = (&task.fuel, &task.oxidizer);
    let ambient = MixtureState::from_spec(&species, oxidizer, task.temperature, task.pressure)
        .map_err(|e| e.to_string())?;
    info!(
        "mixture task: fuel {}, oxidizer {}, {} species",
        fuel,
        oxidizer,
        species.len()
    );

    let mut reports = Vec::new();
    for &phi in &task.equivalence_ratios {
        let fresh = blend(&ambient, phi, fuel, oxidizer).map_err(|e| e.to_string())?;
        reports.push(CaseReport::evaluate(
            &format!("phi = {}", phi),
            &fresh,
            fuel,
            oxidizer,
        ));
        if task.burnt {
            match complete_combustion(&fresh) {
                Ok(burnt) => reports.push(CaseReport::evaluate(
                    &format!("phi = {}, burnt", phi),
                    &burnt,
                    fuel,
                    oxidizer,
                )),
                Err(e) => warn!("phi = {}: no burnt state: {}", phi, e),
            }
        }
    }
    let pure_fuel = ambient.with_composition(fuel).map_err(|e| e.to_string())?;
    reports.push(CaseReport::evaluate("pure fuel", &pure_fuel, fuel, oxidizer));
    reports.push(CaseReport::evaluate("pure oxidizer", &ambient, fuel, oxidizer));
    Ok(reports)
}

pub fn run_and_print(title: &str, task: &MixtureTask) -> Result<(), String> {
    let reports = run_task(task)?;
    print_reports(title, &reports);
    Ok(())
}

fn general_mixture_task() -> MixtureTask {
    let mut task = MixtureTask::default();
    // both streams carry fuel species, O2 and products
    task.fuel = "CH4:0.2,O2:0.02,N2:0.1,CO:0.05,CO2:0.02"
        .parse()
        .unwrap_or_else(|_| CompositionSpec::single("CH4"));
    task.oxidizer = "O2:0.21,N2:0.79,CO:0.04,CH4:0.01,CO2:0.03"
        .parse()
        .unwrap_or_else(|_| CompositionSpec::air());
    task
}

pub fn mixture_examples(mixture_task: usize) {
    let result = match mixture_task {
        0 => run_and_print(
            "case 1) fuel contains only C, H, S and oxidizer only O (and N)",
            &MixtureTask::default(),
        ),
        1 => run_and_print(
            "case 2) fuel and oxidizer contain fuel species, O2 and products",
            &general_mixture_task(),
        ),
        2 => {
            // pure streams only
            let mut task = MixtureTask::default();
            task.equivalence_ratios.clear();
            run_and_print("case 3) pure fuel and pure oxidizer", &task).and_then(|_| {
                let mut general = general_mixture_task();
                general.equivalence_ratios.clear();
                run_and_print("case 3) pure fuel and pure oxidizer, general mixture", &general)
            })
        }
        3 => {
            // a sulfur bearing fuel in argon diluted air
            let task = MixtureTask {
                species: ["H2S", "O2", "N2", "AR", "SO2", "H2O", "H2"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                fuel: CompositionSpec::single("H2S"),
                oxidizer: "O2:0.21,N2:0.78,AR:0.01"
                    .parse()
                    .unwrap_or_else(|_| CompositionSpec::air()),
                equivalence_ratios: vec![0.5, 1.0, 2.0],
                ..MixtureTask::default()
            };
            run_and_print("H2S in air with argon", &task)
        }
        _ => {
            println!("No such example: {}", mixture_task);
            Ok(())
        }
    };
    if let Err(e) = result {
        warn!("example {} failed: {}", mixture_task, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_task_reports() {
        let reports = run_task(&MixtureTask::default()).unwrap();
        // two blends, two burnt states, pure fuel, pure oxidizer
        assert_eq!(reports.len(), 6);
        let cases: Vec<&str> = reports.iter().map(|r| r.case.as_str()).collect();
        assert_eq!(
            cases,
            vec![
                "phi = 1",
                "phi = 1, burnt",
                "phi = 1.3",
                "phi = 1.3, burnt",
                "pure fuel",
                "pure oxidizer"
            ]
        );
        for report in &reports[..4] {
            let expected = if report.case.starts_with("phi = 1.3") { 1.3 } else { 1.0 };
            assert_relative_eq!(report.reference_phi.unwrap(), expected, epsilon = 1e-6);
            assert_relative_eq!(report.local_phi, expected, epsilon = 1e-6);
        }
        assert_relative_eq!(reports[0].oxidizer_species_phi, 1.0, epsilon = 1e-9);
        assert_eq!(reports[3].oxidizer_species_phi, f64::INFINITY);

        assert_eq!(reports[4].mixture_fraction, Some(1.0));
        assert_eq!(reports[4].reference_phi, Some(f64::INFINITY));
        assert_eq!(reports[5].mixture_fraction, Some(0.0));
        assert_eq!(reports[5].reference_phi, Some(0.0));
    }

    #[test]
    fn test_general_mixture_reports() {
        let reports = run_task(&general_mixture_task()).unwrap();
        assert_eq!(reports.len(), 6);
        assert_relative_eq!(reports[0].local_phi, 1.0, epsilon = 1e-6);
        assert_relative_eq!(reports[2].reference_phi.unwrap(), 1.3, epsilon = 1e-6);
        // the burnt state keeps its element based measures
        assert_relative_eq!(
            reports[3].mixture_fraction.unwrap(),
            reports[2].mixture_fraction.unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_degenerate_pair_is_reported_not_fatal() {
        let task = MixtureTask {
            fuel: CompositionSpec::single("N2"),
            oxidizer: CompositionSpec::single("N2"),
            equivalence_ratios: Vec::new(),
            ..MixtureTask::default()
        };
        let reports = run_task(&task).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.mixture_fraction.is_none()));
        assert!(reports.iter().all(|r| r.reference_phi.is_none()));
        assert_eq!(reports[0].local_phi, f64::INFINITY);
    }

    #[test]
    fn test_unknown_species_fails_the_task() {
        let task = MixtureTask {
            fuel: CompositionSpec::single("C3H8"),
            ..MixtureTask::default()
        };
        assert!(run_task(&task).is_err());
    }

    #[test]
    fn test_reports_table() {
        let reports = run_task(&MixtureTask::default()).unwrap();
        let table = reports_table(&reports);
        assert_eq!(table.len(), reports.len() + 1);
        let rendered = table.to_string();
        assert!(rendered.contains("pure oxidizer"));
        assert!(rendered.contains("inf"));
    }
}
