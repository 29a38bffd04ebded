use clap::{Arg, ArgAction, Command};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use link_cards::{log_card, parse_entries, setup_logging, CardService, LogConfig};
use std::error::Error;
use std::io::Read;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let matches = Command::new("Link Cards")
        .version("0.1")
        .about("Build link preview cards from pasted URLs and !title/!desc/!image directives")
        .arg(
            Arg::new("input")
                .help("File with one URL per line (reads stdin when omitted)")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print cards as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Also write logs to ./logs")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    setup_logging(LogConfig {
        log_level: "warn".into(),
        file_output: matches.get_flag("log-file"),
        ..Default::default()
    })?;

    let input = match matches.get_one::<String>("input") {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let service = CardService::new();

    if matches.get_flag("json") {
        let (_, cards) = service.render_cards(&input).await;
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    println!("{}", "Link Cards".bold().green());
    println!("{}", "==========".green());

    // Resolve entry by entry so the bar can advance between fetches.
    let entries = parse_entries(input.trim());
    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    let mut cards = Vec::with_capacity(entries.len());
    for entry in &entries {
        pb.set_message(entry.url.clone());
        cards.push(service.resolver().resolve(&entry.url, &entry.overrides).await);
        pb.inc(1);
    }
    pb.finish_and_clear();

    for card in &cards {
        log_card(card);

        println!("\n{}", card.title.bold().blue());
        println!("{}: {}", "URL".bold(), card.url);
        println!("{}: {}", "Site".bold(), card.site_name);
        if !card.description.is_empty() {
            println!("{}: {}", "Description".bold(), card.description);
        }
        if !card.image.is_empty() {
            println!("{}: {}", "Image".bold(), card.image);
        }
    }

    println!("\n{} {}", cards.len(), "card(s)".green());
    Ok(())
}
