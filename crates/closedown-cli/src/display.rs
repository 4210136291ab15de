//! Terminal layout for the register table.
//!
//! Lays out a [`TableView`] as a compact table, with an indented detail card
//! under every expanded row.

use closedown_core::render::{DetailView, RowView, TableView};
use scraper::Html;

const PORTFOLIO_WIDTH: usize = 28;
const AGENCY_WIDTH: usize = 40;
const LISTED_AS_WIDTH: usize = 30;

// ── Public API ──

/// Print the headline counts, the table, and details for expanded rows.
pub fn print_table(view: &TableView<'_>) {
    print_counts(view);
    println!();

    println!(
        "{:<pw$}  {:<aw$}  {:<7}  {:<lw$}  {:<8}  Early close",
        "Portfolio",
        "Agency",
        "Entity",
        "Listed as",
        "Shutdown",
        pw = PORTFOLIO_WIDTH,
        aw = AGENCY_WIDTH,
        lw = LISTED_AS_WIDTH,
    );
    for row in &view.rows {
        print_row(row);
        if row.expanded {
            print_detail(&row.detail);
        }
    }

    if view.rows.is_empty() {
        println!("  (no agreements match)");
    }
    println!();
    println!("[{}]", view.toggle_all_label);
}

/// Print a single row as a vertical card, fully expanded.
pub fn print_card(row: &RowView<'_>) {
    println!("=== {} ===", row.agency);
    println!("{}", row.portfolio);
    println!();

    println!("Entity");
    println!("  {:<14} {}", "type", row.entity_short);
    if !row.entity_long.is_empty() {
        println!("  {:<14} {}", "", row.entity_long);
    }
    if !row.listed_as.is_empty() {
        println!("  {:<14} {}", "listed as", row.listed_as);
    }
    println!("  {:<14} {}", "website", row.website.href);
    println!();

    println!("Closedown");
    println!("  {:<14} {}", "shutdown", row.shutdown.label());
    println!("  {:<14} {}", "early close", row.early_close_text);
    println!();

    print_detail(&row.detail);
    println!("  {:<14} #{}", "anchor", row.anchor);
}

pub fn print_counts(view: &TableView<'_>) {
    let c = view.counts;
    println!(
        "{} of {} agreements have a shutdown; {} of {} allow an early close.",
        c.with_shutdown, c.total, c.with_early_close, c.total
    );
}

// ── Row rendering ──

fn print_row(row: &RowView<'_>) {
    let marker = if row.expanded { '▼' } else { '▶' };
    println!(
        "{marker} {:<pw$}  {:<aw$}  {:<7}  {:<lw$}  {:<8}  {}",
        truncate(row.portfolio, PORTFOLIO_WIDTH - 2),
        truncate(row.agency, AGENCY_WIDTH),
        row.entity_short,
        truncate(row.listed_as, LISTED_AS_WIDTH),
        row.shutdown.label(),
        row.early_close_text,
        pw = PORTFOLIO_WIDTH - 2,
        aw = AGENCY_WIDTH,
        lw = LISTED_AS_WIDTH,
    );
}

fn print_detail(detail: &DetailView<'_>) {
    println!("    {:<14} {}", "clause/s", detail.clauses);
    println!("    {:<14} {}", "PDF page", detail.page);
    if let Some(link) = &detail.agreement {
        println!("    {:<14} {} <{}>", "agreement", link.text, link.href);
    }
    let description = if detail.has_description {
        strip_tags(detail.description)
    } else {
        detail.description.to_string()
    };
    for (i, line) in wrap(&description, 72).iter().enumerate() {
        let label = if i == 0 { "description" } else { "" };
        println!("    {:<14} {}", label, line);
    }
    println!();
}

// ── Helpers ──

/// Shorten to `max` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Plain text of an HTML fragment, whitespace collapsed.
fn strip_tags(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}
