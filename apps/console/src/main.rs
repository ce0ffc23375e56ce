use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use roster::{FormMode, ListPhase, RosterController, RosterSnapshot};
use shared::domain::HeroId;
use store::MemoryStore;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
struct Args {
    /// Optional settings file with latencies and the seed roster.
    #[arg(long, default_value = "roster.toml")]
    config: String,
    /// Start with an empty roster instead of the seeded one.
    #[arg(long)]
    empty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();
    let settings = load_settings(&args.config);

    let seed = if args.empty {
        Vec::new()
    } else {
        settings.seed_records()
    };
    let store = Arc::new(MemoryStore::with_records(settings.latency(), seed));
    let controller = RosterController::new(store.clone());

    println!("Hero roster console. Type 'help' for commands.");
    let _ = controller.load().await;
    render(&controller.snapshot().await);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "help" => {
                print_help();
                continue;
            }
            "list" => {
                let _ = controller.load().await;
            }
            "name" => controller.set_name(rest).await,
            "power" => controller.set_power(rest).await,
            "edit" => match rest.parse::<i64>() {
                Ok(id) => controller.begin_edit(HeroId(id)).await,
                Err(_) => {
                    println!("usage: edit <id>");
                    continue;
                }
            },
            "cancel" => controller.cancel_edit().await,
            "save" => {
                let _ = controller.submit().await;
            }
            "delete" => match rest.parse::<i64>() {
                Ok(id) => controller.request_delete(HeroId(id)).await,
                Err(_) => {
                    println!("usage: delete <id>");
                    continue;
                }
            },
            "yes" => controller.confirm_delete().await,
            "no" => controller.cancel_delete().await,
            "unstable" => match rest {
                "on" => store.set_unstable(true),
                "off" => store.set_unstable(false),
                _ => {
                    println!("usage: unstable on|off");
                    continue;
                }
            },
            "dump" => {
                let snapshot = controller.snapshot().await;
                println!("{}", serde_json::to_string_pretty(&snapshot.records)?);
                continue;
            }
            "quit" | "exit" => break,
            _ => {
                println!("unknown command '{command}'; type 'help'");
                continue;
            }
        }

        render(&controller.snapshot().await);
    }

    Ok(())
}

fn render(snapshot: &RosterSnapshot) {
    match snapshot.phase {
        ListPhase::Loading => println!("(loading roster...)"),
        // The load error below stands in for the list.
        ListPhase::Error => {}
        ListPhase::Ready => {
            if snapshot.is_empty() {
                println!("No heroes registered yet.");
            } else {
                for record in &snapshot.records {
                    println!("  #{} {}: {}", record.id.0, record.name, record.power);
                }
            }
        }
    }

    if let Some(error) = snapshot.error {
        println!("! {error}");
    }

    if let FormMode::Editing(id) = snapshot.form_mode {
        println!(
            "editing #{}: name='{}' power='{}' ('save' or 'cancel')",
            id.0, snapshot.draft.name, snapshot.draft.power
        );
    } else if !snapshot.draft.name.is_empty() || !snapshot.draft.power.is_empty() {
        println!(
            "draft: name='{}' power='{}' ('save' to register)",
            snapshot.draft.name, snapshot.draft.power
        );
    }

    if let Some(pending) = &snapshot.pending_delete {
        println!("remove {}? ('yes' or 'no')", pending.name);
    }
}

fn print_help() {
    println!("  list              reload the roster");
    println!("  name <value>      set the draft name");
    println!("  power <value>     set the draft power");
    println!("  save              submit the draft (create, or update when editing)");
    println!("  edit <id>         start editing an existing hero");
    println!("  cancel            discard the edit in progress");
    println!("  delete <id>       ask to remove a hero (then 'yes' or 'no')");
    println!("  unstable on|off   toggle simulated network instability");
    println!("  dump              print the roster as JSON");
    println!("  quit              exit");
}
