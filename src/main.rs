//! Postcraft CLI binary entry point.

use std::time::Duration;

use clap::Parser;
use postcraft::cli::{ChatArgs, Cli, Commands, WaitArgs};
use postcraft::client::{ApiClient, ChatRequest};
use postcraft::config::ClientConfig;
use postcraft::types::{StreamEvent, TaskStatus};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chat(args) => handle_chat(&cli.token, args).await,
        Commands::Wait(args) => handle_wait(&cli.token, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_chat(token: &str, args: ChatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::new(ClientConfig::load()?)?;

    let mut request = ChatRequest::new(args.message);
    request.conversation_id = args.conversation_id;
    request.platform = args.platform;

    let mut print_event = |event: StreamEvent| match event {
        StreamEvent::Progress { step, message } => eprintln!("… [{step}] {message}"),
        StreamEvent::FunctionCall {
            display_name,
            tool,
            current,
            total,
            ..
        } => {
            let name = if display_name.is_empty() { tool } else { display_name };
            eprintln!("⚡ {name} ({current}/{total})");
        }
        StreamEvent::FunctionResult {
            tool,
            success,
            message,
        } => {
            let mark = if success { "✅" } else { "❌" };
            eprintln!("  {mark} {tool}: {message}");
        }
        StreamEvent::Done {
            response,
            conversation_id,
            usage,
            ..
        } => {
            println!("{response}");
            eprintln!("\nconversation: {conversation_id}");
            if let Some(usage) = usage {
                eprintln!("tokens: {}", usage.total_tokens);
            }
        }
        StreamEvent::Error { message } => eprintln!("\n❌ {message}"),
    };

    let summary = client
        .stream_chat(token, &request, &mut print_event)
        .await?;

    if let Some(StreamEvent::Error { message }) = summary.terminal {
        return Err(message.into());
    }
    Ok(())
}

async fn handle_wait(token: &str, args: WaitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::new(ClientConfig::load()?)?;

    let mut options = client.poll_options();
    if let Some(ms) = args.interval_ms {
        options.interval = Duration::from_millis(ms);
    }
    options.max_wait = args.max_wait_secs.map(Duration::from_secs);

    let cancel = options.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let mut print_progress = |status: &TaskStatus| {
        eprintln!("{} {}: {}%", status.task_type, status.status, status.progress);
    };

    let status = client
        .wait_for_task(token, &args.task_id, &options, Some(&mut print_progress))
        .await?;

    match status.result {
        Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
        None => println!("{}", status.status),
    }
    Ok(())
}
