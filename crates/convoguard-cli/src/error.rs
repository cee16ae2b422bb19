use colored::Colorize;

pub fn handle_error(err: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let msg = format!("{err:#}").to_lowercase();

    if msg.contains("invalid transcript") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Transcripts are JSON arrays of messages, for example:");
        eprintln!(
            "  {}",
            r#"[{"role": "user", "content": "hello"}]"#.dimmed()
        );
    }

    if msg.contains("invalid config") {
        eprintln!("\n{}", "Suggestion:".yellow().bold());
        eprintln!("  Check the [compaction], [fallback] and [failover] sections of your config.");
    }

    std::process::exit(1);
}
