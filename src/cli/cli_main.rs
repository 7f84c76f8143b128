use crate::Examples::mixture_examples::{mixture_examples, run_and_print};
use crate::Utils::load_from_file::LoadData;
use crate::settings::MixtureTask;
use log::error;
use std::io::{self, Write};

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            break;
        };

        match choice.trim() {
            "1" => examples_menu(),
            "2" => task_file_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options (1, 2, 0)

Cyan (\x1b[36m) - "Enter your choice:" prompt

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n MixFrac: Bilger mixture fraction and equivalence ratio\n
    of a gas mixture relative to a fuel/oxidizer pair \n \x1b[0m"
    );
    println!("\x1b[33m1. Comparison cases\x1b[0m");
    println!("\x1b[33m2. Evaluate a task file\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}

fn examples_menu() {
    loop {
        println!("\n=== Comparison cases ===");
        println!("1. CH4 in air");
        println!("2. General mixture: both streams carry fuel, O2 and products");
        println!("3. Pure fuel and pure oxidizer");
        println!("4. H2S in air with argon");
        println!("0. Back to main menu");
        print!("Enter your choice: ");
        let _ = io::stdout().flush();

        let Some(choice) = get_user_input() else {
            break;
        };
        match choice.trim() {
            "1" => mixture_examples(0),
            "2" => mixture_examples(1),
            "3" => mixture_examples(2),
            "4" => mixture_examples(3),
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn task_file_menu() {
    print!("Path to the task file: ");
    let _ = io::stdout().flush();
    if let Some(path) = get_user_input() {
        if let Err(e) = run_task_file(path.trim()) {
            println!("\x1b[31m{}\x1b[0m", e);
        }
    }
}

/// Loads a task: a file with a `MIXTURE` section, or a plain JSON file.
pub fn load_task(path: &str) -> Result<MixtureTask, String> {
    if path.ends_with(".json") {
        MixtureTask::load(path)
    } else {
        LoadData::new(path.to_string()).load_mixture_task()
    }
}

pub fn run_task_file(path: &str) -> Result<(), String> {
    let task = load_task(path)?;
    run_and_print(path, &task).inspect_err(|e| error!("task '{}' failed: {}", path, e))
}

// None once stdin is closed
fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_load_task_by_extension() {
        let json_file = Builder::new().suffix(".json").tempfile().unwrap();
        let json_path = json_file.path().to_str().unwrap();
        let mut task = MixtureTask::default();
        task.burnt = false;
        task.save(json_path).unwrap();
        assert_eq!(load_task(json_path).unwrap(), task);

        let mut section_file = NamedTempFile::new().unwrap();
        writeln!(section_file, "MIXTURE").unwrap();
        writeln!(section_file, "{{ \"burnt\": false }}").unwrap();
        assert_eq!(
            load_task(section_file.path().to_str().unwrap()).unwrap(),
            task
        );
    }

    #[test]
    fn test_run_task_file() {
        let mut section_file = NamedTempFile::new().unwrap();
        writeln!(section_file, "MIXTURE").unwrap();
        writeln!(section_file, "{{ \"equivalence_ratios\": [0.7] }}").unwrap();
        assert!(run_task_file(section_file.path().to_str().unwrap()).is_ok());
        assert!(run_task_file("no_such_task.json").is_err());
        assert!(run_task_file("no_such_task.txt").is_err());
    }
}
