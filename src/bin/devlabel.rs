//! Device label CLI (devlabel) - Main binary entry point

use devlabel::cli::args::{CheckArgs, Command, SessionArgs, parse_args};
use devlabel::cli::output::{format_batch, format_outcome, format_sites, session_help};
use devlabel::cli::session::{SessionCommand, is_yes, needs_mac_prompt, parse_line};
use devlabel::io::backup::FileBackup;
use devlabel::io::sites::{load_sites, resolve_site};
use devlabel::services::print::{LabelPrinter, NullPrinter, PtouchPrinter, test_print};
use devlabel::services::sink::DeviceLogSink;
use devlabel::services::sink::csv_file::CsvSink;
use devlabel::services::uniqueness::DeviceIndex;
use devlabel::{AppConfig, ScanInput, Session, Site};
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "--help" | "-h" => {
            print_help();
            return;
        }
        "--version" | "-v" => {
            print_version();
            return;
        }
        _ => {}
    }

    let cli_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    let config = match AppConfig::load(cli_args.config.as_deref().map(Path::new)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(4);
        }
    };

    init_logging(config.diagnostics_log.as_deref());

    let exit_code = match &cli_args.command {
        Command::Session(session_args) => handle_session(&config, session_args),
        Command::Sites => handle_sites(&config),
        Command::Check(check_args) => handle_check(&config, check_args),
        Command::TestPrint => handle_test_print(&config),
        Command::Doctor => handle_doctor(&config),
    };

    process::exit(exit_code);
}

/// Log to the diagnostics file when it can be opened, else stderr.
/// Controlled by RUST_LOG, default `info`.
fn init_logging(diagnostics_log: Option<&Path>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.args()
        )
    });

    if let Some(path) = diagnostics_log {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Warning: cannot open {}: {e}", path.display()),
        }
    }

    builder.init();
}

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

fn prompt(lines: &mut Lines<'_>, message: &str) -> Option<String> {
    print!("{message}");
    let _ = io::stdout().flush();
    match lines.next() {
        Some(Ok(line)) => Some(line),
        Some(Err(e)) => {
            eprintln!("Error reading input: {e}");
            None
        }
        None => None,
    }
}

fn confirm(lines: &mut Lines<'_>, question: &str) -> bool {
    prompt(lines, &format!("{question} [y/N] ")).is_some_and(|a| is_yes(&a))
}

fn select_site(sites: &[Site], requested: Option<&str>, lines: &mut Lines<'_>) -> Option<String> {
    if let Some(query) = requested {
        return match resolve_site(sites, query) {
            Some(site) => Some(site.name.clone()),
            None => {
                eprintln!("Unknown site: {query}");
                None
            }
        };
    }

    if let [only] = sites {
        return Some(only.name.clone());
    }

    println!("{}", format_sites(sites, None));
    loop {
        let answer = prompt(lines, "Select site: ")?;
        match resolve_site(sites, &answer) {
            Some(site) => return Some(site.name.clone()),
            None => println!("Please select a site"),
        }
    }
}

#[allow(clippy::too_many_lines)]
fn handle_session(config: &AppConfig, args: &SessionArgs) -> i32 {
    let sites = load_sites(&config.sites_path);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let Some(mut site) = select_site(&sites, args.site.as_deref(), &mut lines) else {
        return 2;
    };

    let sink = match CsvSink::open(&config.log_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: cannot open device log {}: {e}", config.log_path.display());
            return 4;
        }
    };
    let hook = FileBackup::new(config.log_path.clone(), config.backup_dir.clone());
    let printer: Box<dyn LabelPrinter> = if args.no_print {
        Box::new(NullPrinter)
    } else {
        Box::new(PtouchPrinter::from_config(&config.printer))
    };

    let mut session = match Session::open(sink, hook, printer) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: cannot read device log {}: {e}", config.log_path.display());
            return 4;
        }
    };

    println!("Site: {site}  (type :help for commands)");

    loop {
        let Some(line) = prompt(&mut lines, &format!("[{site}] serial> ")) else {
            break;
        };

        match parse_line(&line) {
            SessionCommand::Empty => {}
            SessionCommand::Scan { serial, mac } => {
                let mac = if needs_mac_prompt(&serial, mac.as_deref()) {
                    prompt(&mut lines, "MAC> ").unwrap_or_default()
                } else {
                    mac.unwrap_or_default()
                };
                let outcome = session.accept(&ScanInput::new(site.as_str(), serial, mac));
                println!("{}", format_outcome(&outcome));
            }
            SessionCommand::Site(query) => match resolve_site(&sites, &query) {
                Some(s) => {
                    site.clone_from(&s.name);
                    println!("Site: {site}");
                }
                None => println!("Unknown site: {query}"),
            },
            SessionCommand::Undo => match session.remove_last() {
                Some(entry) => println!("Last entry removed: {entry}"),
                None => println!("There are no entries to remove."),
            },
            SessionCommand::Clear => {
                if confirm(&mut lines, "Are you sure you want to clear all entries?") {
                    session.clear();
                    println!("All entries cleared");
                }
            }
            SessionCommand::Export => match session.export(&site, &config.export_dir) {
                Ok(path) => println!("Exported to {}", path.display()),
                Err(e) => println!("Failed to create CSV: {e}"),
            },
            SessionCommand::List => println!("{}", format_batch(session.ledger().entries())),
            SessionCommand::TestPrint => {
                if session.test_print() {
                    println!("Test print successful");
                } else {
                    println!("Test print failed. Check printer connection and logs");
                }
            }
            SessionCommand::Help => println!("{}", session_help()),
            SessionCommand::Quit => {
                if !session.has_unexported()
                    || confirm(
                        &mut lines,
                        "The batch has not been exported. Quit anyway?",
                    )
                {
                    break;
                }
            }
            SessionCommand::Unknown(cmd) => println!("Unknown command: {cmd} (type :help)"),
        }
    }

    if session.has_unexported() {
        eprintln!(
            "Warning: {} batch entries were not exported",
            session.ledger().len()
        );
    }

    0
}

fn handle_sites(config: &AppConfig) -> i32 {
    let sites = load_sites(&config.sites_path);
    println!("{}", format_sites(&sites, None));
    0
}

fn handle_check(config: &AppConfig, args: &CheckArgs) -> i32 {
    let mac = args.mac.as_deref().unwrap_or_default();

    let index = if config.log_path.exists() {
        let records = match CsvSink::open(&config.log_path).and_then(|sink| sink.records()) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error: cannot read device log {}: {e}", config.log_path.display());
                return 4;
            }
        };
        DeviceIndex::from_records(&records)
    } else {
        DeviceIndex::new()
    };

    if index.is_duplicate(&args.serial, mac) {
        println!("{}: already logged", args.serial);
        1
    } else {
        println!("{}: not logged", args.serial);
        0
    }
}

fn handle_test_print(config: &AppConfig) -> i32 {
    let mut printer = PtouchPrinter::from_config(&config.printer);
    if test_print(&mut printer) {
        println!("Test print successful");
        0
    } else {
        eprintln!("Test print failed. Check printer connection and logs");
        4
    }
}

fn handle_doctor(config: &AppConfig) -> i32 {
    let printer = PtouchPrinter::from_config(&config.printer);
    println!("{}", printer.diagnostics());
    println!("Device log: {}", display_path(&config.log_path));
    println!("Backups: {}", display_path(&config.backup_dir));
    println!("Sites file: {}", display_path(&config.sites_path));
    0
}

fn display_path(path: &Path) -> String {
    let exists = if path.exists() { "" } else { " (missing)" };
    format!("{}{exists}", path.display())
}

fn print_help() {
    println!("Device label CLI (devlabel) - Log provisioned devices and print their labels");
    println!();
    println!("USAGE:");
    println!("    devlabel session [--site <NAME|N>] [--no-print] [--config <FILE>]");
    println!("    devlabel sites [--config <FILE>]");
    println!("    devlabel check <SERIAL> [--mac <MAC>] [--config <FILE>]");
    println!("    devlabel test-print [--config <FILE>]");
    println!("    devlabel doctor [--config <FILE>]");
    println!();
    println!("COMMANDS:");
    println!("    session     Scan devices, log them and print labels");
    println!("    sites       List the configured sites");
    println!("    check       Report whether a device is already in the device log");
    println!("    test-print  Print a test access point label");
    println!("    doctor      Show printer and file locations");
    println!();
    println!("GLOBAL OPTIONS:");
    println!("    -h, --help                 Show this help message");
    println!("    -v, --version              Show version information");
    println!("    --config <FILE>            JSON config (default: $DEVLABEL_CONFIG or devlabel.json)");
    println!();
    println!("SESSION OPTIONS:");
    println!("    --site <NAME|N>            Site name or number from `devlabel sites`");
    println!("    --no-print                 Log devices without printing labels");
    println!();
    println!("EXIT CODES:");
    println!("    0  Success (check: device not logged)");
    println!("    1  check: device already logged");
    println!("    2  Invalid arguments or unknown site");
    println!("    4  Device log, config or printer failure");
    println!();
    println!("EXAMPLES:");
    println!("    devlabel session --site Lab1");
    println!("    devlabel check FP221E3X17001234 --mac 00:11:22:33:44:55");
    println!("    RUST_LOG=debug devlabel session --no-print");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    println!("devlabel {VERSION}");

    #[cfg(debug_assertions)]
    println!("Build: debug");
    #[cfg(not(debug_assertions))]
    println!("Build: release");
}
