//! Kingdom Player - command-line composition root.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kingdom_domain::{
    ActionCommand, AllianceId, Interaction, NavigationTarget, RenderedAction, SlotBody,
};
use kingdom_player::application::CommandReport;
use kingdom_player::infrastructure::clock::SystemClock;
use kingdom_player::infrastructure::http_client::ApiAdapter;
use kingdom_player::{ActionsScreen, ClientConfig, ScreenModel};

const USAGE: &str = "Usage: kingdom-player <command>

Commands:
  status               Show the Actions screen
  run <action-key>     Run an action (confirmation implied)
  accept <alliance-id> Accept a pending alliance request
  decline <alliance-id> Decline a pending alliance request";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kingdom_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env();
    tracing::info!(api = %config.api_base_url, "Starting Kingdom Player");

    let raw_api = Arc::new(ApiAdapter::new(&config).context("creating API client")?);
    let screen = ActionsScreen::new(raw_api, Arc::new(SystemClock::new()), &config);

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("status") => status(&screen).await,
        Some("run") => {
            let key = args.next().context("missing action key")?;
            run_action(&screen, &key).await
        }
        Some(decision @ ("accept" | "decline")) => {
            let id: i64 = args
                .next()
                .context("missing alliance id")?
                .parse()
                .context("alliance id must be a number")?;
            let id = AllianceId::new(id);
            let command = if decision == "accept" {
                ActionCommand::AcceptAlliance(id)
            } else {
                ActionCommand::DeclineAlliance(id)
            };
            execute(&screen, &command).await
        }
        Some(cmd) => anyhow::bail!("Unknown command: {cmd}\n\n{USAGE}"),
        None => anyhow::bail!("{USAGE}"),
    }
}

async fn load(screen: &ActionsScreen) -> anyhow::Result<ScreenModel> {
    if let Err(e) = screen.refresh(true).await {
        anyhow::bail!("Could not load actions: {}", e.user_message());
    }
    screen.render().context("no action status available")
}

async fn status(screen: &ActionsScreen) -> anyhow::Result<()> {
    let model = load(screen).await?;

    if let Some(kingdom) = &model.kingdom {
        let name = kingdom.kingdom_name.as_deref().unwrap_or("Unknown kingdom");
        let home = if kingdom.is_home { " (home)" } else { "" };
        println!("{name}{home}");
    }
    if let Some(countdown) = &model.global_countdown {
        println!("Busy: {countdown}");
    }

    for slot in &model.slots {
        println!();
        println!("== {} ==", slot.display.name);
        match &slot.body {
            SlotBody::Actions(groups) => {
                for group in groups {
                    if let Some(category) = &group.category {
                        println!("  [{category}]");
                    }
                    for action in &group.actions {
                        println!("  {}", describe(action));
                    }
                }
            }
            SlotBody::Contracts { contracts, .. } => {
                for contract in contracts {
                    println!("  {} {}", contract.title, contract.progress_label);
                }
            }
        }
    }

    if !model.alliance_requests.is_empty() {
        println!();
        println!("== Alliance requests ==");
        for request in &model.alliance_requests {
            println!("  #{} from {}", request.id, request.proposer);
        }
    }
    Ok(())
}

fn describe(action: &RenderedAction) -> String {
    match action {
        RenderedAction::Locked(card) => {
            format!("{} - {}: {}", card.key, card.display.title, card.requirement)
        }
        RenderedAction::Available(card) => {
            let mut line = format!("{} - {}", card.key, card.display.title);
            if let Some(reason) = &card.disabled_reason {
                line.push_str(&format!(" ({reason})"));
            }
            if let Some(countdown) = &card.countdown {
                line.push_str(&format!(" [{countdown}]"));
            }
            line
        }
    }
}

async fn run_action(screen: &ActionsScreen, key: &str) -> anyhow::Result<()> {
    load(screen).await?;
    let interaction = match screen.render_action(key) {
        None => anyhow::bail!("No action named {key}"),
        Some(RenderedAction::Locked(card)) => anyhow::bail!("{}", card.requirement),
        Some(RenderedAction::Available(_)) => screen
            .interaction_for(key)
            .with_context(|| format!("{key} is not available right now"))?,
    };

    match interaction {
        Interaction::Confirm { prompt, command } => {
            println!("{}", prompt.message);
            execute(screen, &command).await
        }
        Interaction::Post(command) => execute(screen, &command).await,
        Interaction::Navigate(target) => {
            print_navigation(target);
            Ok(())
        }
    }
}

async fn execute(screen: &ActionsScreen, command: &ActionCommand) -> anyhow::Result<()> {
    let report = match screen.execute(command).await {
        Ok(report) => report,
        Err(e) => anyhow::bail!("{}", e.user_message()),
    };
    print_report(&report);
    Ok(())
}

fn print_report(report: &CommandReport) {
    if !report.outcome.message.is_empty() {
        println!("{}", report.outcome.message);
    }
    if let Some(rewards) = &report.outcome.rewards {
        println!(
            "Rewards: {} gold, {} reputation, {} experience",
            rewards.gold, rewards.reputation, rewards.experience
        );
    }
    if let Some(delta) = report.stat_delta.filter(|d| !d.is_zero()) {
        println!(
            "Gold {:+}, reputation {:+}, experience {:+}",
            delta.gold, delta.reputation, delta.experience
        );
    }
    if let Some(target) = report.navigate_to {
        print_navigation(target);
    }
}

fn print_navigation(target: NavigationTarget) {
    match target {
        NavigationTarget::BattleDetail(id) => println!("Battle #{id}"),
    }
}
