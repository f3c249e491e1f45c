use scamdna_engine::*;
use std::env;
use std::io::Read;
use std::sync::Arc;

#[derive(Debug, Default)]
struct CliArgs {
    json_output: bool,
    rules_path: Option<String>,
    text: Option<String>,
}

fn parse_args(args: &[String]) -> std::result::Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => parsed.json_output = true,
            "--rules" => {
                i += 1;
                match args.get(i) {
                    Some(path) => parsed.rules_path = Some(path.clone()),
                    None => return Err("--rules requires a file path".to_string()),
                }
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown option '{flag}'"));
            }
            other => parsed.text = Some(other.to_string()),
        }
        i += 1;
    }
    Ok(parsed)
}

fn usage(program: &str) {
    eprintln!("Usage: {program} [--json] [--rules <file>] <message text | ->");
    eprintln!("\nExamples:");
    eprintln!("  {program} \"URGENT: your account will be suspended, reply with your PIN\"");
    eprintln!("  cat message.txt | {program} --json -");
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    // Parse arguments
    let args: Vec<String> = env::args().collect();
    let parsed = match parse_args(&args[1..]) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}\n");
            usage(&args[0]);
            std::process::exit(1);
        }
    };

    let Some(text_arg) = parsed.text else {
        usage(&args[0]);
        std::process::exit(1);
    };

    // "-" reads the message from stdin
    let text = if text_arg == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        text_arg
    };

    // Load the pattern store
    let store = match parsed.rules_path {
        Some(path) => Arc::new(PatternStore::from_path(path)?),
        None => PatternStore::builtin(),
    };

    let analyzer = ScamAnalyzer::new(store);
    let profile = analyzer.analyze(&text)?;

    if parsed.json_output {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("🧬 ScamDNA Guard");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        println!("{}", profile);
    }

    Ok(())
}
