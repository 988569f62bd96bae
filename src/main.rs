use clap::Parser;
use routers::core::config;
use routers::core::DrawerRouter;
use routers::shell::{self, Command, Session};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "routers", about = "Drive a drawer navigator from the command line")]
struct Args {
    /// Navigator config (TOML)
    #[arg(short, long)]
    config: PathBuf,

    /// Route to focus first, overriding the config file
    #[arg(short, long)]
    initial_route: Option<String>,

    /// Where to write the debug log
    #[arg(long, default_value = "routers.log")]
    log_file: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }

    let navigator = config::load_config(&args.config)?;
    let resolved = config::resolve(&navigator, args.initial_route.as_deref())?;
    log::info!("Starting navigator with options {:?}", resolved.options);

    let router = DrawerRouter::from_options(resolved.options);
    let mut session = Session::new(router, &resolved.routes)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", shell::summarize(session.state()))?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let changed = match shell::parse_command(&line) {
            Ok(Command::Dispatch(action)) => session.dispatch(&action),
            Ok(Command::Focus(name)) => session.focus(&name),
            Ok(Command::Show) => true,
            Ok(Command::Quit) => break,
            Err(e) => {
                log::warn!("Rejected command {:?}: {}", line, e);
                writeln!(out, "error: {e}")?;
                continue;
            }
        };
        if changed {
            writeln!(out, "{}", shell::summarize(session.state()))?;
        } else {
            writeln!(out, "(unchanged)")?;
        }
    }

    log::info!("Navigator closed");
    Ok(())
}
