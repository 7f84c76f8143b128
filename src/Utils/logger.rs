use simplelog::{ColorChoice, Config, LevelFilter, SimpleLogger, TermLogger, TerminalMode};

/// Installs the global logger: a colored terminal logger when a terminal is available,
/// a plain stdout logger otherwise. Fails if a logger is already installed.
pub fn init_logger(level: LevelFilter) -> Result<(), String> {
    if TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .is_ok()
    {
        return Ok(());
    }
    SimpleLogger::init(level, Config::default()).map_err(|e| e.to_string())
}
