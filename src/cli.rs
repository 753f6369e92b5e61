use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Text;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Settings;
use crate::runtime;
use crate::service::dictation::{Dictation, UnsupportedSpeech};
use crate::view::text;

#[derive(Parser)]
#[command(name = "weekPlanner", about = "Plan a week of events from plain text")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the calendar page and JSON API (default).
    Serve,
    /// Print the stored week.
    List,
    /// Print the free slots between 7:00 and 22:00.
    Slots,
    /// Turn a sentence into events, e.g. `add gym on Tuesday at 6pm`.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Ask for the text interactively.
    Prompt,
    /// Replace the week with a random worker profile.
    Generate,
}

pub async fn run(cli: Cli, settings: Settings) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => runtime::run_server(settings).await,
        Commands::List => {
            let planner = runtime::build_planner(&settings).await;
            print!("{}", text::render_agenda(&planner.events().await));
        }
        Commands::Slots => {
            let planner = runtime::build_planner(&settings).await;
            print!("{}", text::render_slots(&planner.free_slots().await));
        }
        Commands::Add { text: words } => {
            let planner = runtime::build_planner(&settings).await;
            add_and_report(&planner, &words.join(" ")).await?;
        }
        Commands::Prompt => {
            let request = specify_prompt()?;
            let planner = runtime::build_planner(&settings).await;
            add_and_report(&planner, &request).await?;
        }
        Commands::Generate => {
            let planner = runtime::build_planner(&settings).await;
            let mut rng = StdRng::from_os_rng();
            let snapshot = planner
                .generate_profile(&mut rng)
                .await
                .context("failed to generate a profile")?;
            if let Some(label) = &snapshot.profile {
                println!("{}", label);
            }
            print!("{}", text::render_agenda(&snapshot.events));
        }
    }
    Ok(())
}

async fn add_and_report(planner: &crate::service::planner::Planner, request: &str) -> anyhow::Result<()> {
    let added = planner
        .add_from_text(request)
        .await
        .context("failed to save events")?;
    if added.is_empty() {
        println!("No events were added.");
    } else {
        println!("Added {} event(s):", added.len());
        print!("{}", text::render_agenda(&added));
    }
    Ok(())
}

fn specify_prompt() -> anyhow::Result<String> {
    let mut dictation = Dictation::new(UnsupportedSpeech);
    if !dictation.is_supported() {
        println!("Voice input is not available here, type your request instead.");
    }
    let typed = Text::new("What would you like to schedule?")
        .with_help_message("e.g. gym on Tuesday at 6pm")
        .prompt()
        .context("no request supplied")?;
    dictation.set_text(typed);
    Ok(dictation.take_text())
}
