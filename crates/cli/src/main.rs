mod command;

use command::{parse_command, Command};
use stackshuffle_core::{copy_text, Mode, Outcome, Role, Session, TeamStack};
use stackshuffle_data::{resolve_config, write_export, ShuffleConfig};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_ENV: &str = "STACKSHUFFLE_LOG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CliOptions {
    once: Option<Mode>,
    seed: Option<u64>,
    teams: Option<i64>,
    config: Option<PathBuf>,
    pool: Option<PathBuf>,
    export: Option<PathBuf>,
    help: bool,
}

fn parse_cli_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--single" => options.once = Some(Mode::Single),
            "--team" => options.once = Some(Mode::Team),
            "--help" | "-h" => options.help = true,
            "--seed" => {
                let value = option_value(args, idx, "--seed")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid seed '{value}'"))?;
                options.seed = Some(seed);
                idx += 1;
            }
            "--teams" | "-t" => {
                let value = option_value(args, idx, "--teams")?;
                let teams = value
                    .parse::<i64>()
                    .map_err(|_| format!("invalid team count '{value}'"))?;
                options.teams = Some(teams);
                idx += 1;
            }
            "--config" | "-c" => {
                options.config = Some(PathBuf::from(option_value(args, idx, "--config")?));
                idx += 1;
            }
            "--pool" | "-p" => {
                options.pool = Some(PathBuf::from(option_value(args, idx, "--pool")?));
                idx += 1;
            }
            "--export" | "-o" => {
                options.export = Some(PathBuf::from(option_value(args, idx, "--export")?));
                idx += 1;
            }
            other => return Err(format!("unknown option '{other}'")),
        }
        idx += 1;
    }
    Ok(options)
}

fn option_value<'a>(args: &'a [String], idx: usize, name: &str) -> Result<&'a str, String> {
    args.get(idx + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{name} needs a value"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    // stdout carries the stacks, logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            std::process::exit(2);
        }
    };
    if options.help {
        print_usage();
        return;
    }
    init_tracing();
    if let Err(err) = run(options) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(options: CliOptions) -> anyhow::Result<()> {
    let mut config = resolve_config(options.config.as_deref())?;
    apply_overrides(&mut config, &options);
    let mut session = config.session()?;
    tracing::debug!(seed = session.seed(), "session ready");

    match options.once {
        Some(mode) => run_once(&mut session, mode, options.export.as_deref()),
        None => {
            run_interactive(&mut session, &config);
            Ok(())
        }
    }
}

fn apply_overrides(config: &mut ShuffleConfig, options: &CliOptions) {
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    if let Some(teams) = options.teams {
        config.team_count = stackshuffle_core::clamp_team_count(teams);
    }
    if let Some(pool) = &options.pool {
        config.pool = Some(pool.clone());
    }
    if let Some(export) = &options.export {
        config.export_path = export.clone();
    }
}

fn run_once(session: &mut Session, mode: Mode, export: Option<&Path>) -> anyhow::Result<()> {
    session.set_mode(mode);
    let outcome = session.generate()?.clone();
    print_outcome(&outcome);
    if let Some(path) = export {
        write_export(path, &session.export()?)?;
    }
    Ok(())
}

fn run_interactive(session: &mut Session, config: &ShuffleConfig) {
    println!("StackShuffle: hackathon stack randomizer (type 'help' for commands)");
    print_status(session);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("{}> ", session.mode());
        let _ = io::stdout().flush();
        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(err) => {
                eprintln!("input error: {err}");
                break;
            }
        }
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        execute(session, config, command);
    }
}

fn execute(session: &mut Session, config: &ShuffleConfig, command: Command) {
    match command {
        Command::Generate => match session.generate() {
            Ok(outcome) => print_outcome(outcome),
            Err(err) => println!("cannot generate: {err}"),
        },
        Command::Mode(mode) => {
            session.set_mode(mode);
            print_status(session);
        }
        Command::Teams(requested) => {
            let count = session.set_team_count(requested);
            if i64::from(count) != requested {
                println!("team count clamped to {count}");
            }
            print_status(session);
        }
        Command::Pool => print_pool(session),
        Command::Add { role, name, icon } => {
            match session.add_item(role, &name, icon.as_deref()) {
                Ok(item) => println!("added {} {} to {}", item.icon, item.name, role.label()),
                Err(err) => println!("{err}"),
            }
        }
        Command::Remove { role, name } => match session.remove_item(role, &name) {
            Ok(item) => println!("removed {} {} from {}", item.icon, item.name, role.label()),
            Err(err) => println!("{err}"),
        },
        Command::Reset => {
            session.reset();
            println!("results cleared");
        }
        Command::Show => match session.outcome() {
            Some(outcome) => print_outcome(outcome),
            None => println!("nothing generated yet"),
        },
        Command::Copy(team) => match find_assignment(session, team) {
            Ok(assignment) => {
                let label = (assignment.team_number != 0).then(|| assignment.label());
                println!("{}", copy_text(&assignment.stack, label.as_deref()));
            }
            Err(err) => println!("{err}"),
        },
        Command::Export(path) => {
            let path = path.unwrap_or_else(|| config.export_path.clone());
            match session.export() {
                Ok(text) => match write_export(&path, &text) {
                    Ok(()) => println!("exported to {}", path.display()),
                    Err(err) => println!("export failed: {err:#}"),
                },
                Err(err) => println!("{err}"),
            }
        }
        Command::Seed => println!("seed {}", session.seed()),
        Command::Help => print_help(),
        Command::Quit => {}
    }
}

fn find_assignment(session: &Session, team: Option<u32>) -> Result<TeamStack, String> {
    let outcome = session
        .outcome()
        .ok_or_else(|| "nothing generated yet".to_string())?;
    let assignments = outcome.assignments();
    match team {
        None => assignments
            .into_iter()
            .next()
            .ok_or_else(|| "nothing generated yet".to_string()),
        Some(number) => assignments
            .into_iter()
            .find(|assignment| assignment.team_number == number)
            .ok_or_else(|| format!("no team {number}")),
    }
}

fn print_outcome(outcome: &Outcome) {
    for assignment in outcome.assignments() {
        print_assignment(&assignment);
    }
    if let Outcome::Team { filled, .. } = outcome {
        if *filled > 0 {
            println!(
                "note: ran out of unique combinations; {filled} team(s) were drawn without the uniqueness check"
            );
        }
    }
}

fn print_assignment(assignment: &TeamStack) {
    println!("{}", assignment.label());
    for (role, item) in assignment.stack.entries() {
        println!("  {:<9} {} {}", format!("{}:", role.label()), item.icon, item.name);
    }
    println!();
}

fn print_status(session: &Session) {
    match session.mode() {
        Mode::Single => println!("mode: single"),
        Mode::Team => println!("mode: team ({} teams)", session.team_count()),
    }
}

fn print_pool(session: &Session) {
    for (role, category) in session.pool.categories() {
        let items: Vec<String> = category
            .items
            .iter()
            .map(|item| format!("{} {}", item.icon, item.name))
            .collect();
        println!("{} ({}): {}", category.label, category.len(), items.join(", "));
        if category.is_empty() {
            println!("  warning: no {} options, generation will fail", role.key());
        }
    }
    println!("{} distinct combinations", session.pool.combination_count());
}

fn print_usage() {
    println!("Usage: stackshuffle [options]");
    println!();
    println!("Options:");
    println!("  --single                 print one random stack and exit");
    println!("  --team                   print stacks for every team and exit");
    println!("  -t, --teams <n>          number of teams (clamped to 2..=20)");
    println!("  --seed <n>               fixed random seed");
    println!("  -c, --config <path>      config file (default: $STACKSHUFFLE_CONFIG)");
    println!("  -p, --pool <path>        pool file to start from");
    println!("  -o, --export <path>      export file (written by --single/--team)");
    println!("  -h, --help               show this help");
}

fn print_help() {
    println!("Commands:");
    println!("  gen|g                    generate for the current mode");
    println!("  mode single|team         switch mode (clears results)");
    println!("  teams <n>                set team count (2..=20)");
    println!("  show                     show the last result");
    println!("  copy [team]              print a stack with icons for pasting");
    println!("  export [path]            write all assignments to a text file");
    println!("  reset                    clear results");
    println!();
    println!("Pool:");
    println!("  pool                     list every option");
    println!("  add <role> <name> [icon=X] add an option ({})", role_keys());
    println!("  remove|rm <role> <name>  remove an option");
    println!();
    println!("  seed                     show the random seed");
    println!("  help|h|?                 show help");
    println!("  quit|exit|q              exit");
}

fn role_keys() -> String {
    Role::ALL
        .iter()
        .map(|role| role.key())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackshuffle_core::{Pool, RngState};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_one_shot_options() {
        let options =
            parse_cli_options(&args(&["--team", "--teams", "6", "--seed", "42"])).expect("options");
        assert_eq!(options.once, Some(Mode::Team));
        assert_eq!(options.teams, Some(6));
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.config, None);
    }

    #[test]
    fn rejects_bad_options() {
        assert!(parse_cli_options(&args(&["--seed"])).is_err());
        assert!(parse_cli_options(&args(&["--seed", "abc"])).is_err());
        assert!(parse_cli_options(&args(&["--wat"])).is_err());
    }

    #[test]
    fn overrides_win_over_config() {
        let mut config = ShuffleConfig::default();
        let options = CliOptions {
            seed: Some(3),
            teams: Some(50),
            pool: Some(PathBuf::from("pool.json")),
            ..CliOptions::default()
        };
        apply_overrides(&mut config, &options);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.team_count, 20);
        assert_eq!(config.pool, Some(PathBuf::from("pool.json")));
    }

    #[test]
    fn copy_picks_requested_team() {
        let mut session = Session::new(Pool::default(), RngState::from_seed(1));
        assert!(find_assignment(&session, None).is_err());
        session.set_mode(Mode::Team);
        session.set_team_count(3);
        session.generate().expect("generate");
        assert_eq!(
            find_assignment(&session, Some(2)).expect("team").team_number,
            2
        );
        assert!(find_assignment(&session, Some(9)).is_err());
    }

    #[test]
    fn pool_edits_flow_into_generation() {
        let mut session = Session::new(Pool::default(), RngState::from_seed(1));
        let config = ShuffleConfig::default();
        for item in Pool::default().frontend.items {
            execute(
                &mut session,
                &config,
                Command::Remove {
                    role: Role::Frontend,
                    name: item.name,
                },
            );
        }
        execute(
            &mut session,
            &config,
            Command::Add {
                role: Role::Frontend,
                name: "Qwik".to_string(),
                icon: None,
            },
        );
        execute(&mut session, &config, Command::Generate);
        let Some(Outcome::Single { stack }) = session.outcome() else {
            panic!("expected a single stack");
        };
        assert_eq!(stack.frontend.name, "Qwik");
    }
}
