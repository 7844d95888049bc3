use std::io::Write;

use clap::{Parser, Subcommand};

use sugarcoins::{app, schema, AppState};

/// SugarCoins backend.
#[derive(Parser, Debug)]
#[command(name = "sugarcoins")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Provision the database, then serve HTTP (default)
    Serve,
    /// Provision the database, print table row counts, and exit
    Provision,
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "sugarcoins=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

fn write_row_counts(out: &mut impl Write, counts: &[(&str, i64)]) -> std::io::Result<()> {
    for (table, rows) in counts {
        writeln!(out, "{table:<20} {rows}")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let state = AppState::init().await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => app::serve(app::build_app(state)).await?,
        Command::Provision => {
            let counts = schema::row_counts(&state.db).await?;
            write_row_counts(&mut std::io::stdout().lock(), &counts)?;
            state.db.close().await;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_counts_print_one_line_per_table() {
        let mut out = Vec::new();
        write_row_counts(&mut out, &[("gender", 3), ("sugar_consumption", 20)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "gender               3\nsugar_consumption    20\n"
        );
        assert!(!text.contains("Connected to DB."));
    }
}
