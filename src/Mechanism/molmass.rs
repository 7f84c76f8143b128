/// Module to calculate the atomic composition and molar mass of a chemical formula
///
///
use crate::Mechanism::mechanism_error::MechanismError;
use log::debug;
use std::collections::HashMap;

/// Named chemical groups, e.g. {"Me": {"C": 1, "H": 3}}
pub type Groups = HashMap<String, HashMap<String, usize>>;

// Define a struct to hold element data
pub struct Element {
    pub name: &'static str,
    pub atomic_mass: f64,
}

// periodic table subset, atomic masses in g/mol
const ELEMENTS: &[Element] = &[
    Element {
        name: "H",
        atomic_mass: 1.008,
    },
    Element {
        name: "He",
        atomic_mass: 4.0026,
    },
    Element {
        name: "Li",
        atomic_mass: 6.94,
    },
    Element {
        name: "Be",
        atomic_mass: 9.0122,
    },
    Element {
        name: "B",
        atomic_mass: 10.81,
    },
    Element {
        name: "C",
        atomic_mass: 12.011,
    },
    Element {
        name: "N",
        atomic_mass: 14.007,
    },
    Element {
        name: "O",
        atomic_mass: 15.999,
    },
    Element {
        name: "F",
        atomic_mass: 18.998,
    },
    Element {
        name: "Ne",
        atomic_mass: 20.18,
    },
    Element {
        name: "Na",
        atomic_mass: 22.99,
    },
    Element {
        name: "Mg",
        atomic_mass: 24.305,
    },
    Element {
        name: "Al",
        atomic_mass: 26.98,
    },
    Element {
        name: "Si",
        atomic_mass: 28.085,
    },
    Element {
        name: "P",
        atomic_mass: 30.974,
    },
    Element {
        name: "S",
        atomic_mass: 32.065,
    },
    Element {
        name: "Cl",
        atomic_mass: 35.45,
    },
    Element {
        name: "Ar",
        atomic_mass: 39.948,
    },
    Element {
        name: "K",
        atomic_mass: 39.102,
    },
    Element {
        name: "Ca",
        atomic_mass: 40.08,
    },
    Element {
        name: "Ti",
        atomic_mass: 47.867,
    },
    Element {
        name: "V",
        atomic_mass: 50.9415,
    },
    Element {
        name: "Cr",
        atomic_mass: 51.9961,
    },
    Element {
        name: "Mn",
        atomic_mass: 54.938,
    },
    Element {
        name: "Fe",
        atomic_mass: 55.845,
    },
    Element {
        name: "Co",
        atomic_mass: 58.933,
    },
    Element {
        name: "Ni",
        atomic_mass: 58.69,
    },
    Element {
        name: "Cu",
        atomic_mass: 63.546,
    },
    Element {
        name: "Zn",
        atomic_mass: 65.38,
    },
    Element {
        name: "Br",
        atomic_mass: 79.904,
    },
    Element {
        name: "Kr",
        atomic_mass: 83.798,
    },
    Element {
        name: "I",
        atomic_mass: 126.904,
    },
    Element {
        name: "Xe",
        atomic_mass: 131.293,
    },
];

const PHASE_MARKS: [&str; 8] = ["(C)", "(c)", "(L)", "(l)", "(G)", "(g)", "(S)", "(s)"];

pub fn atomic_mass(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|element| element.name == symbol)
        .map(|element| element.atomic_mass)
}

pub fn is_element(symbol: &str) -> bool {
    atomic_mass(symbol).is_some()
}

// phase marks only make sense at the end of a formula: "H2O(g)", "C(s)"
fn filter_phases_marks(formula: &str) -> &str {
    let mut formula = formula;
    while let Some(stripped) = PHASE_MARKS
        .iter()
        .find_map(|mark| formula.strip_suffix(mark))
    {
        formula = stripped;
    }
    formula
}

// Chemical formulae may contain special names for chemical groups,
// e.g. Me (methyl) which is {"C":1, "H":3},
// so they are converted into regular elements
fn handle_groups(
    formula: &str,
    mut counts: HashMap<String, usize>,
    groups: Option<&Groups>,
) -> Result<HashMap<String, usize>, MechanismError> {
    if let Some(groups) = groups {
        for (chemical_group, atomic_composition) in groups.iter() {
            if let Some(number_of_chemical_groups) = counts.remove(chemical_group) {
                for (atom, &quantity) in atomic_composition.iter() {
                    let added = quantity
                        .checked_mul(number_of_chemical_groups)
                        .ok_or_else(|| overflow_error(formula))?;
                    add_atoms(formula, &mut counts, atom.clone(), added)?;
                }
            }
        }
    }
    Ok(counts)
}

fn add_atoms(
    formula: &str,
    counts: &mut HashMap<String, usize>,
    symbol: String,
    n: usize,
) -> Result<(), MechanismError> {
    let entry = counts.entry(symbol).or_insert(0);
    *entry = entry.checked_add(n).ok_or_else(|| overflow_error(formula))?;
    Ok(())
}

// reads a stoichiometric coefficient starting at `start`; no digits means 1
fn read_count(
    formula: &str,
    chars: &[char],
    start: usize,
) -> Result<(usize, usize), MechanismError> {
    let mut end = start;
    let mut count = 0usize;
    while let Some(digit) = chars.get(end).and_then(|c| c.to_digit(10)) {
        count = count
            .checked_mul(10)
            .and_then(|c| c.checked_add(digit as usize))
            .ok_or_else(|| overflow_error(formula))?;
        end += 1;
    }
    if end == start {
        Ok((1, start))
    } else {
        Ok((count, end))
    }
}

fn overflow_error(formula: &str) -> MechanismError {
    parse_error(formula, "atom count is too large")
}

fn parse_error(formula: &str, reason: &str) -> MechanismError {
    MechanismError::FormulaParse {
        formula: formula.to_string(),
        reason: reason.to_string(),
    }
}

/// Parses a chemical formula and returns a HashMap of elements and their counts.
///
/// Brackets may be nested and carry a multiplier, `(..)` and `[..]` are equivalent.
/// `groups` is needed if the formula contains special names for chemical groups
/// like Me, Ph, etc. In that case it should contain the names of these groups
/// and their atomic composition { "Me":{"C":1, "H":3}}.
/// Mechanism-style upper case names are understood: in "AR" the "R" is not an element
/// on its own but "Ar" is, so the symbol is read as argon. "KMnO4" stays K, Mn, O.
pub fn parse_formula(
    formula: &str,
    groups: Option<&Groups>,
) -> Result<HashMap<String, usize>, MechanismError> {
    let no_spaces = formula.replace(' ', "");
    let cleaned = filter_phases_marks(&no_spaces);
    if cleaned.is_empty() {
        return Err(parse_error(formula, "empty formula"));
    }
    let is_known = |symbol: &str| {
        is_element(symbol) || groups.is_some_and(|groups| groups.contains_key(symbol))
    };

    let chars: Vec<char> = cleaned.chars().collect();
    // one frame per open bracket, the bottom frame is the formula itself
    let mut frames: Vec<HashMap<String, usize>> = vec![HashMap::new()];
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '(' | '[' => {
                frames.push(HashMap::new());
                i += 1;
            }
            ')' | ']' => {
                if frames.len() < 2 {
                    return Err(parse_error(formula, "closing bracket without opening one"));
                }
                let (multiplier, next) = read_count(formula, &chars, i + 1)?;
                i = next;
                let inner = frames.pop().unwrap_or_default();
                if let Some(outer) = frames.last_mut() {
                    for (symbol, n) in inner {
                        let n = n
                            .checked_mul(multiplier)
                            .ok_or_else(|| overflow_error(formula))?;
                        add_atoms(formula, outer, symbol, n)?;
                    }
                }
            }
            first if first.is_ascii_uppercase() => {
                let mut symbol = first.to_string();
                let mut next = i + 1;
                if let Some(&second) = chars.get(next) {
                    if second.is_ascii_lowercase() {
                        symbol.push(second);
                        next += 1;
                    } else if second.is_ascii_uppercase()
                        && !is_known(&second.to_string())
                        && is_known(&format!("{}{}", first, second.to_ascii_lowercase()))
                    {
                        symbol.push(second.to_ascii_lowercase());
                        next += 1;
                    }
                }
                if !is_known(&symbol) {
                    return Err(MechanismError::UnknownElement {
                        element: symbol,
                        formula: formula.to_string(),
                    });
                }
                let (count, after) = read_count(formula, &chars, next)?;
                i = after;
                if let Some(frame) = frames.last_mut() {
                    add_atoms(formula, frame, symbol, count)?;
                }
            }
            other => {
                return Err(parse_error(
                    formula,
                    &format!("unexpected character '{}'", other),
                ));
            }
        }
    }
    if frames.len() != 1 {
        return Err(parse_error(formula, "unclosed bracket"));
    }
    let counts = handle_groups(formula, frames.pop().unwrap_or_default(), groups)?;
    debug!("formula {} parsed into {:?}", formula, counts);
    Ok(counts)
}

/// Molar mass [g/mol] of an already parsed atomic composition; an empty composition
/// has no molar mass and is rejected.
pub fn molar_mass_of_composition(
    formula: &str,
    counts: &HashMap<String, usize>,
) -> Result<f64, MechanismError> {
    let mut molar_mass = 0.0;
    for (element, count) in counts {
        let mass = atomic_mass(element).ok_or_else(|| MechanismError::UnknownElement {
            element: element.clone(),
            formula: formula.to_string(),
        })?;
        molar_mass += mass * *count as f64;
    }
    if !(molar_mass.is_finite() && molar_mass > 0.0) {
        return Err(MechanismError::InvalidComposition(format!(
            "'{}' has no atoms, molar mass {}",
            formula, molar_mass
        )));
    }
    Ok(molar_mass)
}

// Function to calculate the molar mass of a substance given its chemical formula
pub fn calculate_molar_mass(
    formula: &str,
    groups: Option<&Groups>,
) -> Result<(f64, HashMap<String, usize>), MechanismError> {
    let counts = parse_formula(formula, groups)?;
    let molar_mass = molar_mass_of_composition(formula, &counts)?;
    Ok((molar_mass, counts))
}

pub fn calculate_molar_mass_of_vector_of_subs(
    vec_of_formulae: &[&str],
    groups: Option<&Groups>,
) -> Result<Vec<f64>, MechanismError> {
    vec_of_formulae
        .iter()
        .map(|formula| calculate_molar_mass(formula, groups).map(|(molar_mass, _)| molar_mass))
        .collect()
}
