use stackshuffle_core::{Mode, Role};
use std::path::PathBuf;

pub const COMMANDS: &[&str] = &[
    "add", "copy", "export", "gen", "help", "mode", "pool", "quit", "remove", "reset", "seed",
    "show", "teams",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate,
    Mode(Mode),
    Teams(i64),
    Pool,
    Add {
        role: Role,
        name: String,
        icon: Option<String>,
    },
    Remove {
        role: Role,
        name: String,
    },
    Reset,
    Show,
    Copy(Option<u32>),
    Export(Option<PathBuf>),
    Seed,
    Help,
    Quit,
}

/// Parses one line of input. `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();
    let command = match head {
        "g" | "gen" | "generate" | "roll" => Command::Generate,
        "?" | "h" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        "rm" | "del" => parse_remove(&args)?,
        other => match resolve_prefix(other, COMMANDS)? {
            "add" => parse_add(&args)?,
            "copy" => Command::Copy(parse_optional_team(&args)?),
            "export" => Command::Export(args.first().map(|path| PathBuf::from(*path))),
            "gen" => Command::Generate,
            "help" => Command::Help,
            "mode" => {
                let value = args.first().ok_or("usage: mode single|team")?;
                Command::Mode(value.parse::<Mode>().map_err(|err| format!("{err}"))?)
            }
            "pool" => Command::Pool,
            "quit" => Command::Quit,
            "remove" => parse_remove(&args)?,
            "reset" => Command::Reset,
            "seed" => Command::Seed,
            "show" => Command::Show,
            "teams" => {
                let value = args.first().ok_or("usage: teams <count>")?;
                let count = value
                    .parse::<i64>()
                    .map_err(|_| format!("invalid team count '{value}'"))?;
                Command::Teams(count)
            }
            _ => return Err(format!("unknown command '{other}'")),
        },
    };
    Ok(Some(command))
}

/// Resolves an abbreviated command; the prefix must be unambiguous.
pub fn resolve_prefix<'a>(token: &str, table: &[&'a str]) -> Result<&'a str, String> {
    if let Some(exact) = table.iter().copied().find(|item| *item == token) {
        return Ok(exact);
    }
    let matches: Vec<&str> = table
        .iter()
        .copied()
        .filter(|item| item.starts_with(token))
        .collect();
    match matches.as_slice() {
        [] => Err(format!("unknown command '{token}'")),
        [single] => Ok(*single),
        many => Err(format!("ambiguous command '{token}': {}", many.join(", "))),
    }
}

fn parse_role(args: &[&str], usage: &str) -> Result<Role, String> {
    let value = args.first().ok_or_else(|| usage.to_string())?;
    value.parse::<Role>().map_err(|err| format!("{err}"))
}

/// `add <role> <name…> [icon=<glyph>]`
fn parse_add(args: &[&str]) -> Result<Command, String> {
    const USAGE: &str = "usage: add <role> <name…> [icon=<glyph>]";
    let role = parse_role(args, USAGE)?;
    let mut icon = None;
    let mut words = Vec::new();
    for arg in &args[1..] {
        match arg.strip_prefix("icon=") {
            Some(value) => icon = Some(value.to_string()),
            None => words.push(*arg),
        }
    }
    if words.is_empty() {
        return Err(USAGE.to_string());
    }
    Ok(Command::Add {
        role,
        name: words.join(" "),
        icon,
    })
}

fn parse_remove(args: &[&str]) -> Result<Command, String> {
    const USAGE: &str = "usage: remove <role> <name…>";
    let role = parse_role(args, USAGE)?;
    if args.len() < 2 {
        return Err(USAGE.to_string());
    }
    Ok(Command::Remove {
        role,
        name: args[1..].join(" "),
    })
}

fn parse_optional_team(args: &[&str]) -> Result<Option<u32>, String> {
    let Some(value) = args.first() else {
        return Ok(None);
    };
    value
        .parse::<u32>()
        .map(Some)
        .map_err(|_| format!("invalid team number '{value}'"))
}
