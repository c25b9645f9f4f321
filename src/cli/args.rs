//! CLI argument parsing

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub command: Command,
    pub config: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Session(SessionArgs),
    Sites,
    Check(CheckArgs),
    TestPrint,
    Doctor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionArgs {
    pub site: Option<String>,
    pub no_print: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckArgs {
    pub serial: String,
    pub mac: Option<String>,
}

/// Parse command line arguments
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    if args.len() < 2 {
        return Err("No command specified".to_string());
    }

    let (rest, config) = take_config(&args[2..])?;

    let command = match args[1].as_str() {
        "session" => Command::Session(parse_session_args(&rest)?),
        "sites" => {
            reject_extra(&rest)?;
            Command::Sites
        }
        "check" => Command::Check(parse_check_args(&rest)?),
        "test-print" => {
            reject_extra(&rest)?;
            Command::TestPrint
        }
        "doctor" => {
            reject_extra(&rest)?;
            Command::Doctor
        }
        _ => return Err(format!("Unknown command: {}", args[1])),
    };

    Ok(CliArgs { command, config })
}

/// Pull the global `--config <FILE>` option out of the argument list.
fn take_config(args: &[String]) -> Result<(Vec<String>, Option<String>), String> {
    let mut rest = Vec::with_capacity(args.len());
    let mut config = None;
    let mut i = 0;

    while i < args.len() {
        if args[i] == "--config" {
            i += 1;
            if i >= args.len() {
                return Err("--config requires a file path".to_string());
            }
            config = Some(args[i].clone());
        } else {
            rest.push(args[i].clone());
        }
        i += 1;
    }

    Ok((rest, config))
}

fn reject_extra(args: &[String]) -> Result<(), String> {
    match args.first() {
        Some(arg) if arg.starts_with("--") => Err(format!("Unknown option: {arg}")),
        Some(arg) => Err(format!("Unexpected argument: {arg}")),
        None => Ok(()),
    }
}

fn parse_session_args(args: &[String]) -> Result<SessionArgs, String> {
    let mut session_args = SessionArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--site" => {
                i += 1;
                if i >= args.len() {
                    return Err("--site requires a name or number".to_string());
                }
                session_args.site = Some(args[i].clone());
            }
            "--no-print" => {
                session_args.no_print = true;
            }
            arg if arg.starts_with("--") => return Err(format!("Unknown option: {arg}")),
            arg => return Err(format!("Unexpected argument: {arg}")),
        }
        i += 1;
    }

    Ok(session_args)
}

fn parse_check_args(args: &[String]) -> Result<CheckArgs, String> {
    let mut check_args = CheckArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--mac" => {
                i += 1;
                if i >= args.len() {
                    return Err("--mac requires a value".to_string());
                }
                check_args.mac = Some(args[i].clone());
            }
            arg if arg.starts_with("--") => return Err(format!("Unknown option: {arg}")),
            arg => {
                if check_args.serial.is_empty() {
                    check_args.serial = arg.to_string();
                } else {
                    return Err(format!("Unexpected argument: {arg}"));
                }
            }
        }
        i += 1;
    }

    if check_args.serial.is_empty() {
        return Err("Missing required argument: SERIAL".to_string());
    }

    Ok(check_args)
}
