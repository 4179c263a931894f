//! glome-runner: headless host for the Glome ledger.
//!
//! Usage:
//!   glome-runner --db ledger.db
//!   glome-runner --config glome.json --ipc-mode
//!
//! In IPC mode every stdin line is one JSON command and every stdout line is
//! its JSON reply. `{"cmd":"quit"}` or EOF ends the session.

use anyhow::Result;
use glome_core::{ErrorReply, Ledger, LedgerCommand, LedgerConfig};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let cli_db = arg_value(&args, "--db");
    let config_file = arg_value(&args, "--config");

    let config = LedgerConfig::from_sources(cli_db, config_file.map(Path::new))?;
    let ledger = Ledger::open(&config)?;

    if ipc_mode {
        let stdin = io::stdin();
        let stdout = io::stdout();
        run_ipc_loop(&ledger, stdin.lock(), stdout.lock())?;
    } else {
        print_summary(&ledger, &config)?;
    }

    ledger.close()?;
    Ok(())
}

fn run_ipc_loop(ledger: &Ledger, mut input: impl BufRead, mut output: impl Write) -> Result<()> {
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: serde_json::Value = match serde_json::from_str(&buffer) {
            Ok(v) => v,
            Err(e) => {
                write_reply(&mut output, &ErrorReply::new("BAD_REQUEST", e.to_string()))?;
                continue;
            }
        };
        if request["cmd"] == "quit" {
            break;
        }

        let command: LedgerCommand = match serde_json::from_value(request) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Unknown command: {e}");
                write_reply(&mut output, &ErrorReply::new("BAD_REQUEST", e.to_string()))?;
                continue;
            }
        };

        match ledger.dispatch(command) {
            Ok(reply) => write_reply(&mut output, &reply)?,
            Err(e) => write_reply(&mut output, &ErrorReply::from(&e))?,
        }
    }
    Ok(())
}

fn write_reply(output: &mut impl Write, reply: &impl serde::Serialize) -> Result<()> {
    writeln!(output, "{}", serde_json::to_string(reply)?)?;
    output.flush()?;
    Ok(())
}

fn print_summary(ledger: &Ledger, config: &LedgerConfig) -> Result<()> {
    let summary = ledger.summary()?;

    println!("Glome ledger");
    println!("  db:       {}", config.db_path.display());
    println!();
    println!("=== SUMMARY ===");
    println!(
        "  credits:  {:>6} records | total {:.2}",
        summary.credits.count, summary.credits.total
    );
    println!(
        "  debits:   {:>6} records | total {:.2}",
        summary.debits.count, summary.debits.total
    );
    println!("  balance:  {:.2}", summary.balance);
    Ok(())
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
