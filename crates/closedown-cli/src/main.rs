use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use closedown_core::clipboard::copy_link;
use closedown_core::filter::{parse_early_close, parse_selection, parse_text_selection};
use closedown_core::{Action, Dataset, ViewState, export, render};
use tracing_subscriber::EnvFilter;

mod clipboard;
mod display;

/// Enterprise-agreement closedown register.
///
/// Filters, sorts and exports the register of Commonwealth enterprise
/// agreements and their Christmas shutdown and early-close provisions.
#[derive(Parser, Debug)]
#[command(name = "closedown", version, about)]
struct Cli {
    /// Register file: a JSON array or a `window.agreements = [...]` script.
    #[arg(
        long,
        global = true,
        env = "CLOSEDOWN_DATA",
        default_value = "data/agreements.json"
    )]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the filtered, sorted table.
    List {
        #[command(flatten)]
        view: ViewArgs,
        /// Expand every detail row.
        #[arg(long)]
        expand_all: bool,
        /// Navigation fragment to open, e.g. `#entry-treasury-royal-australian-mint`.
        #[arg(long)]
        fragment: Option<String>,
    },
    /// Open a deep link and print the entry it points to.
    Show {
        /// Navigation fragment or bare anchor.
        fragment: String,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Export the rows in view as CSV.
    Export {
        #[command(flatten)]
        view: ViewArgs,
        /// Output file, or a directory to receive `ea-closedown.csv`.
        #[arg(long, short, default_value = ".")]
        out: PathBuf,
    },
    /// Print the direct link to an entry.
    Link {
        /// Navigation fragment or bare anchor.
        fragment: String,
        /// Page URL the register is published at.
        #[arg(long, env = "CLOSEDOWN_BASE_URL", default_value = "")]
        base_url: String,
        /// Also copy the link to the clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// List the portfolio and "listed as" filter options.
    Options,
}

/// Search, filter and sort selections. `all` disables a filter.
#[derive(Args, Debug)]
struct ViewArgs {
    /// Search portfolio, agency, agreement name and "listed as".
    #[arg(long, short, default_value = "")]
    search: String,
    /// yes, no, unknown or all.
    #[arg(long, default_value = "all")]
    shutdown: String,
    /// ncce, cce, company or all.
    #[arg(long, default_value = "all")]
    entity: String,
    /// Exact portfolio name, or all.
    #[arg(long, default_value = "all")]
    portfolio: String,
    /// yes, no or all.
    #[arg(long, default_value = "all")]
    early_close: String,
    /// Exact "listed as" heading, or all.
    #[arg(long, default_value = "all")]
    listed_as: String,
    /// az (agency A–Z) or pgpa (portfolio and PGPA grouping).
    #[arg(long, default_value = "az")]
    sort: String,
}

impl ViewArgs {
    /// Replay the selections onto a fresh view, as a user would.
    fn state(&self, dataset: &Dataset) -> anyhow::Result<ViewState> {
        let actions = [
            Action::Search(self.search.clone()),
            Action::Shutdown(parse_selection(&self.shutdown)?),
            Action::Entity(parse_selection(&self.entity)?),
            Action::Portfolio(parse_text_selection(&self.portfolio)),
            Action::EarlyClose(parse_early_close(&self.early_close)?),
            Action::ListedAs(parse_text_selection(&self.listed_as)),
            Action::Sort(self.sort.parse()?),
        ];
        let mut state = ViewState::default();
        for action in actions {
            state.apply(dataset, action);
        }
        Ok(state)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("closedown v{}", env!("CARGO_PKG_VERSION"));

    let dataset = closedown_store::load_dataset(&cli.data)
        .with_context(|| format!("loading {}", cli.data.display()))?;

    match cli.command {
        Commands::List {
            view,
            expand_all,
            fragment,
        } => {
            let mut state = view.state(&dataset)?;
            if expand_all {
                state.apply(&dataset, Action::ToggleAll);
            }
            if let Some(fragment) = fragment {
                state.apply(&dataset, Action::Navigate(fragment));
            }
            display::print_table(&render(&dataset, &state));
        }
        Commands::Show { fragment, view } => {
            let mut state = view.state(&dataset)?;
            if let Some(scroll) = state.apply(&dataset, Action::Navigate(fragment)) {
                let table = render(&dataset, &state);
                if let Some(row) = table.rows.get(scroll.row) {
                    display::print_card(row);
                }
            }
        }
        Commands::Export { view, out } => {
            let state = view.state(&dataset)?;
            let csv = export::export_csv(&dataset, &state).context("building csv")?;
            let path = closedown_store::write_export(&out, &csv)
                .with_context(|| format!("writing {}", out.display()))?;
            eprintln!("  Wrote {}", path.display());
        }
        Commands::Link {
            fragment,
            base_url,
            copy,
        } => {
            let mut state = ViewState::default();
            let Some(scroll) = state.apply(&dataset, Action::Navigate(fragment)) else {
                return Ok(());
            };
            if copy {
                let copied = copy_link(
                    &mut clipboard::CommandClipboard::default(),
                    &mut clipboard::TerminalClipboard,
                    &base_url,
                    &scroll.anchor,
                );
                println!("{}", copied.url);
                eprintln!("  {}", copied.label_after(std::time::Duration::ZERO));
            } else {
                println!(
                    "{}",
                    closedown_core::anchor::direct_link(&base_url, &scroll.anchor)
                );
            }
        }
        Commands::Options => {
            println!("Portfolio");
            for p in dataset.portfolios() {
                println!("  {p}");
            }
            println!();
            println!("Listed as");
            for l in dataset.listed_as() {
                println!("  {l}");
            }
        }
    }

    Ok(())
}
