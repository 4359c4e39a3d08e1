// src/cli.rs
use std::{env, path::PathBuf};

use crate::params::Params;
use crate::runner;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut params = Params::new();
    parse_cli(&mut params)?;

    let summary = runner::run(&params)?;
    println!(
        "Wrote {} with {} sessions for event_id={}",
        summary.out.display(),
        summary.sessions,
        summary.event_id
    );
    Ok(())
}

fn parse_cli(params: &mut Params) -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--event-id" => {
                params.event_id = Some(args.next().ok_or("Missing value for --event-id")?);
            }
            "--limit-sessions" => {
                params.limit_sessions = args
                    .next()
                    .ok_or("Missing value for --limit-sessions")?
                    .parse()?;
            }
            "--sleep-ms" => {
                params.sleep_ms = args.next().ok_or("Missing value for --sleep-ms")?.parse()?;
            }
            "-o" | "--out" => {
                params.out = PathBuf::from(args.next().ok_or("Missing output path")?);
            }
            "--only-main-events" => params.only_main_events = true,
            "--debug" => params.debug = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }
    Ok(())
}
