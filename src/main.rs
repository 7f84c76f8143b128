use MixFrac::Utils::logger::init_logger;
use MixFrac::cli::cli_main::{load_task, run_interactive_menu};
use MixFrac::Examples::mixture_examples::run_and_print;
use simplelog::LevelFilter;
use std::process;

pub fn main() {
    let args: Vec<String> = std::env::args().collect();
    match args.get(1) {
        Some(path) => {
            let task = match load_task(path) {
                Ok(task) => task,
                Err(e) => {
                    eprintln!("{}", e);
                    process::exit(1);
                }
            };
            let _ = init_logger(task.level_filter().unwrap_or(LevelFilter::Info));
            if let Err(e) = run_and_print(path, &task) {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
        None => {
            let _ = init_logger(LevelFilter::Info);
            run_interactive_menu();
        }
    }
}
