use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs, thread};

use agentos::interview::TypingDelay;
use agentos::profiles::{Attachment, ProfileField};
use agentos::publish::PublishedCard;
use agentos::relay::{MessageSender, TelegramSender, UnconfiguredSender};
use agentos::CardWorkspace;
use anyhow::{anyhow, bail, Context, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let command = Command::parse(env::args().skip(1))?;
    let mut workspace = CardWorkspace::open()?;
    match command {
        Command::Interview => run_interview(&mut workspace),
        Command::Card { fields, photos } => run_card(&mut workspace, fields, photos),
        Command::Microsite {
            username,
            demo,
            out,
        } => run_microsite(&workspace, &username, demo, out),
        Command::Export {
            username,
            destination,
        } => {
            let descriptor = workspace.export_card(&username, destination)?;
            println!(
                "Card for {} saved to {} ({} bytes, sha256 {})",
                descriptor.username,
                descriptor.path.display(),
                descriptor.size_bytes,
                descriptor.checksum
            );
            Ok(())
        }
        Command::Relay => run_relay(&workspace),
        Command::Help => {
            print_usage();
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("AGENTOS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[derive(Debug, PartialEq)]
enum Command {
    Interview,
    Card {
        fields: Vec<(ProfileField, String)>,
        photos: Vec<PathBuf>,
    },
    Microsite {
        username: String,
        demo: bool,
        out: Option<PathBuf>,
    },
    Export {
        username: String,
        destination: Option<PathBuf>,
    },
    Relay,
    Help,
}

impl Command {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let Some(subcommand) = args.next() else {
            return Ok(Command::Help);
        };
        match subcommand.as_str() {
            "interview" => Ok(Command::Interview),
            "relay" => Ok(Command::Relay),
            "card" => {
                let mut fields = Vec::new();
                let mut photos = Vec::new();
                while let Some(arg) = args.next() {
                    let Some(flag) = arg.strip_prefix("--") else {
                        return Err(anyhow!("Unexpected argument '{arg}' for card"));
                    };
                    let value = args
                        .next()
                        .with_context(|| format!("Expected a value after --{flag}"))?;
                    if flag == "photo" {
                        photos.push(PathBuf::from(value));
                    } else {
                        fields.push((flag.parse::<ProfileField>()?, value));
                    }
                }
                Ok(Command::Card { fields, photos })
            }
            "microsite" => {
                let mut username = None;
                let mut demo = false;
                let mut out = None;
                while let Some(arg) = args.next() {
                    match arg.as_str() {
                        "--demo" => demo = true,
                        "--out" => {
                            let value = args.next().context("Expected a path after --out")?;
                            out = Some(PathBuf::from(value));
                        }
                        other if username.is_none() && !other.starts_with("--") => {
                            username = Some(other.to_string());
                        }
                        other => {
                            return Err(anyhow!("Unknown argument '{other}' for microsite"));
                        }
                    }
                }
                let username = username.context("microsite requires a <username>")?;
                Ok(Command::Microsite {
                    username,
                    demo,
                    out,
                })
            }
            "export" => {
                let username = args.next().context("export requires a <username>")?;
                let destination = args.next().map(PathBuf::from);
                if let Some(extra) = args.next() {
                    return Err(anyhow!("Unknown argument '{extra}' for export"));
                }
                Ok(Command::Export {
                    username,
                    destination,
                })
            }
            "--help" | "-h" | "help" => Ok(Command::Help),
            other => Err(anyhow!(
                "Unknown command '{other}'. Run with --help for usage instructions."
            )),
        }
    }
}

fn print_usage() {
    println!("AgentOS identity cards");
    println!("Usage: agentos <command> [options]");
    println!("Commands:");
    println!("  interview                         Build a card by chatting on stdin/stdout");
    println!("  card --name <v> --role <v> --city <v> --availability <v>");
    println!("       --whatsapp <v> --bio <v> --services <v> [--photo <path>]...");
    println!("                                    Build a card from the form fields");
    println!("  microsite <username> [--demo] [--out <path>]");
    println!("                                    Render the microsite page as HTML");
    println!("  export <username> [<destination.zip>]");
    println!("                                    Save the active card and photos as a zip");
    println!("  relay                             Echo a webhook payload read from stdin");
    println!("Environment:");
    println!("  AGENTOS_HOME   Workspace directory (defaults to the OS data directory)");
    println!("  AGENTOS_LOG    Log filter (default: info)");
}

/// Shows a typing indicator on stderr while pausing.
struct ConsoleTyping;

impl TypingDelay for ConsoleTyping {
    fn pause(&mut self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        eprint!("typing…\r");
        thread::sleep(duration);
        eprint!("       \r");
    }
}

fn run_interview(workspace: &mut CardWorkspace) -> Result<()> {
    let mut session = workspace.interview(ConsoleTyping);
    if let Some(greeting) = session.current_prompt() {
        println!("🤖 {greeting}");
    }
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !session.is_complete() {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            bail!("Interview ended before the card was finished");
        };
        let outcome = session.submit(&line?);
        for reply in outcome.replies {
            println!("🤖 {reply}");
        }
    }
    let session_id = session.id();
    let draft = session.into_draft();
    report_published(workspace.publish(&draft, Some(session_id)));
    Ok(())
}

fn run_card(
    workspace: &mut CardWorkspace,
    fields: Vec<(ProfileField, String)>,
    photos: Vec<PathBuf>,
) -> Result<()> {
    let mut form = workspace.form();
    for (field, value) in fields {
        form.set_field(field, value);
    }
    let mut attachments = Vec::with_capacity(photos.len());
    for path in &photos {
        attachments.push(Attachment::from_path(path)?);
    }
    let offered = attachments.len();
    let kept = form.add_photos(attachments);
    if kept < offered {
        warn!(offered, kept, "some photos were skipped");
    }

    let Some(artifacts) = form.generate().cloned() else {
        match form.validation() {
            Err(report) => bail!("Card not generated: {report}"),
            Ok(()) => bail!("Card not generated"),
        }
    };
    println!("{}", artifacts.card_text);
    println!("({} characters)", artifacts.card_chars());
    println!();
    println!("{}", artifacts.condensed_bio);
    println!("({} characters)", artifacts.condensed_bio_chars());
    println!();
    println!("Share: {}", artifacts.share_link());
    println!("Microsite: {}", form.microsite_path());

    report_published(workspace.publish(form.draft(), None));
    Ok(())
}

fn report_published(published: Option<PublishedCard>) {
    match published {
        Some(published) => {
            let verb = if published.updated_existing {
                "updated"
            } else {
                "published"
            };
            println!(
                "Profile {} {verb} with {} photo(s).",
                published.profile.username,
                published.photos.len()
            );
        }
        None => eprintln!("The card was generated but could not be saved."),
    }
}

fn run_microsite(
    workspace: &CardWorkspace,
    username: &str,
    demo: bool,
    out: Option<PathBuf>,
) -> Result<()> {
    let html = workspace.microsite_html(username, demo)?;
    match out {
        Some(path) => {
            fs::write(&path, html)
                .with_context(|| format!("Failed writing microsite to {}", path.display()))?;
            println!("Microsite written to {}", path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

fn run_relay(workspace: &CardWorkspace) -> Result<()> {
    let mut body = String::new();
    io::stdin()
        .read_to_string(&mut body)
        .context("Failed reading webhook payload from stdin")?;
    let sender: Box<dyn MessageSender> = match TelegramSender::from_settings(&workspace.config.relay)
    {
        Ok(sender) => Box::new(sender),
        Err(err) => {
            warn!(error = %err, "relay sender unavailable");
            Box::new(UnconfiguredSender)
        }
    };
    let outcome = workspace.relay(sender.as_ref(), &body);
    println!("{}", serde_json::to_string(&outcome.ack)?);
    Ok(())
}
