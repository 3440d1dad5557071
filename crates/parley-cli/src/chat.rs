use anyhow::Result;
use cliclack::{input, spinner};
use console::style;
use std::fs;
use std::path::Path;

use parley::intake::{AttachmentSet, FileUpload};
use parley::registry::ServiceId;
use parley::session::{ChatSession, SendOutcome};

use crate::render;

/// One parsed input line. Anything that starts with a slash is a command;
/// unrecognized commands are surfaced as typos rather than sent as chat.
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Back,
    Clear,
    Help,
    Images,
    File(&'a str),
    Thread,
    Prompt(&'a str),
    Unknown(&'a str),
    Message,
}

fn parse_command(line: &str) -> Command<'_> {
    match line.split_whitespace().next().unwrap_or_default() {
        "/exit" | "/back" => Command::Back,
        "/clear" => Command::Clear,
        "/?" => Command::Help,
        "/images" => Command::Images,
        "/file" => Command::File(line.trim_start_matches("/file").trim()),
        "/thread" => Command::Thread,
        "/p" => Command::Prompt(line.trim_start_matches("/p").trim()),
        token if token.starts_with('/') => Command::Unknown(token),
        _ => Command::Message,
    }
}

/// Interactive loop for one selected service. Returns when the operator
/// goes back to the menu.
pub async fn run(session: &mut ChatSession, show_raw: bool) -> Result<()> {
    let service = session
        .service()
        .expect("chat loop requires a selected service");

    println!(
        "\n{}  {}  {}",
        style(service.name).bold(),
        style(service.description).dim(),
        style(service.endpoint).dim()
    );
    if service.id == ServiceId::ContextualAds {
        println!(
            "{}",
            style("Tip: /thread sends a named conversation for ad generation").dim()
        );
    }

    let mut attachments = AttachmentSet::new();

    loop {
        let line: String = input("You:")
            .placeholder("message, or /? for commands")
            .interact()?;
        let line = line.trim().to_string();

        match parse_command(&line) {
            Command::Back => break,
            Command::Clear => {
                session.clear();
                attachments.clear();
                continue;
            }
            Command::Help => {
                print_help();
                continue;
            }
            Command::Images => {
                let text: String = input("Image URLs (one per line):")
                    .placeholder("")
                    .multiline()
                    .interact()?;
                attachments.set_url_text(&text);
                println!("{} attachment(s) staged", attachments.len());
                continue;
            }
            Command::File(path) => {
                match read_upload(path) {
                    Ok(file) => {
                        attachments.set_files(&[file]);
                        println!("{} attachment(s) staged", attachments.len());
                    }
                    Err(e) => println!("{}", style(format!("could not read file: {e}")).red()),
                }
                continue;
            }
            Command::Thread => {
                let name: String = input("Thread name:").placeholder("").interact()?;
                let conversation: String = input("Conversation (User:/Assistant: lines):")
                    .placeholder("")
                    .multiline()
                    .interact()?;

                let spin = spinner();
                spin.start("awaiting reply");
                let outcome = session.send_thread(name.trim(), &conversation).await;
                spin.stop("");
                report(session, outcome, show_raw);
                continue;
            }
            Command::Prompt(index) => {
                let Some(prompt) = pick_suggested(session, index) else {
                    println!("no such suggested prompt");
                    continue;
                };
                println!("{} {}", style("resending:").dim(), prompt);
                let spin = spinner();
                spin.start("awaiting reply");
                let outcome = session.send(&prompt, &AttachmentSet::new()).await;
                spin.stop("");
                report(session, outcome, show_raw);
                continue;
            }
            Command::Unknown(token) => {
                println!("{}", style(format!("unknown command: {token}")).red());
                print_help();
                continue;
            }
            Command::Message => {}
        }

        let spin = spinner();
        spin.start("awaiting reply");
        let outcome = session.send(&line, &attachments).await;
        spin.stop("");

        if outcome == SendOutcome::Sent {
            // Attachments travel with exactly one turn.
            attachments.clear();
        }
        report(session, outcome, show_raw);
    }

    Ok(())
}

fn report(session: &ChatSession, outcome: SendOutcome, show_raw: bool) {
    match outcome {
        SendOutcome::Sent => {
            if let Some(reply) = session.history().last() {
                render::message(reply, show_raw);
            }
        }
        SendOutcome::Busy => println!("a request is already in flight"),
        SendOutcome::NothingToSend => println!("nothing to send"),
        SendOutcome::NoService => println!("no service selected"),
    }
}

/// Resolve "/p N" against the most recent reply's suggested prompts.
fn pick_suggested(session: &ChatSession, index: &str) -> Option<String> {
    let index: usize = index.parse().ok()?;
    let last_reply = session
        .history()
        .iter()
        .rev()
        .find(|message| !message.suggested_prompts.is_empty())?;
    last_reply.suggested_prompts.get(index - 1).cloned()
}

fn read_upload(path: &str) -> Result<FileUpload> {
    let bytes = fs::read(path)?;
    Ok(FileUpload {
        name: Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        content_type: guess_content_type(path).to_string(),
        bytes,
    })
}

fn guess_content_type(path: &str) -> &'static str {
    let lowered = path.to_lowercase();
    match () {
        _ if lowered.ends_with(".png") => "image/png",
        _ if lowered.ends_with(".gif") => "image/gif",
        _ if lowered.ends_with(".webp") => "image/webp",
        _ if lowered.ends_with(".jpg") || lowered.ends_with(".jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

fn print_help() {
    println!("Commands:");
    println!("/back or /exit - Return to the service menu");
    println!("/clear - Clear the conversation and staged attachments");
    println!("/images - Stage image URLs for the next message");
    println!("/file <path> - Stage a local image for the next message");
    println!("/thread - Send a named conversation (contextual ads)");
    println!("/p <n> - Resend suggested prompt n from the last reply");
    println!("/? - Display this help message");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_dispatch() {
        assert_eq!(parse_command("/back"), Command::Back);
        assert_eq!(parse_command("/p 2"), Command::Prompt("2"));
        assert_eq!(parse_command("/file a/b.png"), Command::File("a/b.png"));
        assert_eq!(parse_command("hello there"), Command::Message);
        assert_eq!(parse_command(""), Command::Message);
    }

    #[test]
    fn test_slash_typos_are_not_sent_as_chat() {
        assert_eq!(parse_command("/bakc"), Command::Unknown("/bakc"));
        assert_eq!(parse_command("/p2"), Command::Unknown("/p2"));
        assert_eq!(parse_command("/IMAGES"), Command::Unknown("/IMAGES"));
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("photo.JPG"), "image/jpeg");
        assert_eq!(guess_content_type("icon.png"), "image/png");
        assert_eq!(guess_content_type("notes.txt"), "application/octet-stream");
    }

    #[test]
    fn test_read_upload_from_disk() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("tiny.png");
        fs::write(&path, [0x89, 0x50])?;

        let upload = read_upload(path.to_str().unwrap())?;
        assert_eq!(upload.name, "tiny.png");
        assert_eq!(upload.content_type, "image/png");
        assert_eq!(upload.bytes.len(), 2);
        Ok(())
    }
}
