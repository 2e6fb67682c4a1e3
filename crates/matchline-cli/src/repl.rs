//! Interactive chat loop.

use std::io::Write;

use matchline_chat::{ChatClient, ChatTurnResponse, ClassifiedError, Creator, SessionMeta};
use matchline_common::{MatchlineError, SessionId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

const HELP: &str = "\
commands:
  /info                    show session details
  /refine <field> <value>  change one requirement (value may be JSON)
  /new                     drop this session and start another
  /quit                    leave
anything else is sent as a message";

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Empty,
    Say(String),
    Info,
    Refine {
        field: String,
        value: serde_json::Value,
    },
    New,
    Quit,
    Help,
    Usage(&'static str),
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Input::Say(line.to_string());
    };

    let (cmd, args) = match rest.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (rest, ""),
    };

    match cmd {
        "info" => Input::Info,
        "new" => Input::New,
        "quit" | "exit" => Input::Quit,
        "help" => Input::Help,
        "refine" => match args.split_once(char::is_whitespace) {
            Some((field, value)) if !value.trim().is_empty() => Input::Refine {
                field: field.to_string(),
                value: refine_value(value.trim()),
            },
            _ => Input::Usage("/refine <field> <value>"),
        },
        other => Input::Unknown(format!("/{other}")),
    }
}

/// JSON when it parses, plain string otherwise.
fn refine_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

pub async fn run(client: &ChatClient, delete_on_exit: bool) -> Result<(), MatchlineError> {
    let mut session = start_session(client)
        .await
        .map_err(|e| MatchlineError::Chat(e.to_string()))?;
    println!("{HELP}\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Empty => {}
            Input::Quit => break,
            Input::Help => println!("{HELP}"),
            Input::Usage(usage) => println!("usage: {usage}"),
            Input::Unknown(cmd) => println!("unknown command {cmd}, try /help"),
            Input::New => match renew_session(client, &session).await {
                Ok(fresh) => session = fresh,
                Err(err) => report(&err),
            },
            Input::Info => match client.get_session_info(session.as_str()).await {
                Ok(meta) => print_meta(&meta),
                Err(err) => report(&err),
            },
            Input::Say(text) => match client.send_message(session.as_str(), &text).await {
                Ok(turn) => print_turn(&turn),
                Err(err) => report(&err),
            },
            Input::Refine { field, value } => {
                match client.refine(session.as_str(), &field, value).await {
                    Ok(turn) => print_turn(&turn),
                    Err(err) => report(&err),
                }
            }
        }
        prompt()?;
    }

    if delete_on_exit {
        client.delete_session(session.as_str()).await;
    }
    info!(session_id = %session, "chat finished");
    Ok(())
}

async fn start_session(client: &ChatClient) -> Result<SessionId, ClassifiedError> {
    let session = client.create_session().await?;
    println!("session {}", session.id);
    if let Some(greeting) = &session.greeting {
        println!("\n{greeting}\n");
    }
    Ok(session.id)
}

/// Swap in a fresh session. The current one is deleted only after its
/// replacement exists.
async fn renew_session(
    client: &ChatClient,
    current: &SessionId,
) -> Result<SessionId, ClassifiedError> {
    let fresh = start_session(client).await?;
    client.delete_session(current.as_str()).await;
    Ok(fresh)
}

fn prompt() -> Result<(), MatchlineError> {
    let mut out = std::io::stdout();
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

fn report(err: &ClassifiedError) {
    println!("error: {err}");
    if err.requires_new_session() {
        println!("this session cannot continue; type /new to start another");
    }
}

fn print_turn(turn: &ChatTurnResponse) {
    println!("\n{}\n", turn.display_text().trim());
    for (i, creator) in turn.creators.iter().enumerate() {
        println!("{}", creator_line(i + 1, creator));
    }
    if turn.is_final() {
        println!("(the conversation is complete; /new starts another)");
    }
}

pub fn creator_line(rank: usize, creator: &Creator) -> String {
    let mut line = format!("{rank}. {}", creator.name);
    if let Some(kind) = &creator.kind {
        line.push_str(&format!(" [{kind}]"));
    }
    if let Some(location) = creator.location_label() {
        line.push_str(&format!(" - {location}"));
    }
    if let Some(budget) = creator.budget_label() {
        line.push_str(&format!(" - budget {budget}"));
    }
    if let Some(score) = creator.match_score {
        line.push_str(&format!(" - match {score:.0}%"));
    }
    line
}

fn print_meta(meta: &SessionMeta) {
    println!("session   {}", meta.session_id);
    println!("status    {}", meta.status);
    println!("messages  {}", meta.message_count);
    if let Some(created) = &meta.created_at {
        println!("created   {created}");
    }
    if let Some(last) = &meta.last_activity {
        println!("active    {last}");
    }
    if !meta.requirements.is_null() {
        println!(
            "requirements\n{}",
            serde_json::to_string_pretty(&meta.requirements).unwrap_or_default()
        );
    }
}
