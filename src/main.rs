use std::{process::ExitCode, time::Duration};

use clap::Parser;

use spanmaze::{
    app::App,
    config::{Cli, seed_from_env},
    error::Result,
    logging,
    maze::Maze,
};

fn run(cli: &Cli) -> Result<()> {
    let term_size = crossterm::terminal::size()?;
    let config = cli.maze_config(App::fit_layout(term_size));
    let mut maze = Maze::configure(config, seed_from_env())?;
    maze.select_generator(cli.generator);

    let mut app = App::new(Duration::from_millis(cli.delay_ms));
    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout, &mut maze);
    // Restore the terminal before anything gets printed
    let restored = App::restore_terminal(&mut stdout);
    result?;
    restored?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file.as_deref());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("exiting with error: {}", e);
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
