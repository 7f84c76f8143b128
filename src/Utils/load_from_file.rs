use crate::settings::MixtureTask;
use log::{error, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub struct LoadData {
    pub file_name: String,
}

impl LoadData {
    pub fn new(file_name: String) -> Self {
        LoadData { file_name }
    }
    pub fn load_mixture_task(&self) -> Result<MixtureTask, String> {
        load_mixture_task_from_file(&self.file_name)
    }
}

fn read_lines(file_name: &str) -> Result<Vec<String>, String> {
    let path = Path::new(file_name);
    if !path.exists() {
        return Err(format!("File '{}' does not exist", file_name));
    }

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => return Err(format!("Failed to open file '{}': {}", file_name, e)),
    };

    let reader = BufReader::new(file);
    reader
        .lines()
        .collect::<Result<Vec<String>, _>>()
        .map_err(|e| format!("Failed to read file '{}': {}", file_name, e))
}

/// Returns the lines between one of `headers` and the next all-caps header (or the end of
/// the document), together with the index of the first of them.
fn section_after_header(lines: &[String], headers: &[&str]) -> Option<(usize, usize)> {
    let start_index = lines
        .iter()
        .position(|line| headers.contains(&line.trim().to_uppercase().as_str()))?
        + 1;

    let mut end_index = lines.len();
    for (i, line) in lines.iter().enumerate().skip(start_index) {
        let trimmed = line.trim();
        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_uppercase() || c == '_') {
            end_index = i;
            break;
        }
    }
    Some((start_index, end_index))
}

/// Parses a document for a mixture task under the "MIXTURE" (or "MIXTURE_TASK") header.
/// The section is a JSON object with the fields of `MixtureTask`; missing fields take
/// their default values.
pub fn load_mixture_task_from_file(file_name: &str) -> Result<MixtureTask, String> {
    let lines = read_lines(file_name)?;

    let (start_index, end_index) = match section_after_header(&lines, &["MIXTURE", "MIXTURE_TASK"])
    {
        Some(bounds) => bounds,
        None => {
            return Err(format!(
                "No 'MIXTURE' header found in file '{}'",
                file_name
            ));
        }
    };

    let section = lines[start_index..end_index].join("\n");
    if section.trim().is_empty() {
        warn!("Empty 'MIXTURE' section in file '{}', using defaults", file_name);
        return Ok(MixtureTask::default());
    }

    match serde_json::from_str::<MixtureTask>(&section) {
        Ok(task) => {
            task.validate()?;
            info!("Successfully parsed mixture task from file '{}'", file_name);
            Ok(task)
        }
        Err(e) => {
            // Find the line and column where the error occurred
            let error_line = e.line();
            let error_column = e.column();

            // Calculate the actual line number in the file
            let actual_line = start_index + error_line.max(1) - 1;

            let error_msg = format!(
                "Error parsing mixture task at line {}, column {} (line {} in file): {}",
                error_line,
                error_column,
                actual_line + 1,
                e
            );
            error!("{}", error_msg);

            // If possible, show the problematic line
            if actual_line < lines.len() {
                let problem_line = &lines[actual_line];
                error!("Problematic line: {}", problem_line);

                // Create a visual pointer to the error position
                if error_column >= 1 && error_column <= problem_line.len() {
                    let pointer = " ".repeat(error_column - 1) + "^";
                    error!("{}", pointer);
                }
            }

            Err(error_msg)
        }
    }
}
