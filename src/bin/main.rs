use anyhow::Error;
use mergington::{
    endpoints::LoginError, ActivityBoard, MessageArea, SessionManager,
    Severity, TokenStore,
};
use reqwest::Client;
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};
use structopt::StructOpt;
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::from_args();

    log::debug!("Starting application with {:#?}", args);

    let client = Client::builder()
        .user_agent(mergington::DEFAULT_USER_AGENT)
        .build()?;

    let store = TokenStore::new(
        args.token_file
            .clone()
            .unwrap_or_else(TokenStore::default_path),
    );
    let mut session = SessionManager::new(store);
    let board = ActivityBoard::new(client.clone(), args.server.clone());
    let mut messages = MessageArea::new();

    // startup mirrors a page load: restore whatever session we had, then
    // draw the board no matter how that went
    session.restore(&client, &args.server).await;
    print_auth_line(&session);
    println!("{}", board.fetch_and_render(&session).await);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    // each command runs to completion, re-fetch included, before the next
    // prompt appears, so no two requests are ever in flight at once
    loop {
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.split_first() {
            None => continue,
            Some((&"quit", _)) | Some((&"exit", _)) => break,
            Some((&"help", _)) => print_help(),
            Some((&"list", _)) => {
                println!("{}", board.fetch_and_render(&session).await);
            },
            Some((&"login", rest)) => match rest {
                [username, password] => {
                    match session
                        .login(&client, &args.server, username, password)
                        .await
                    {
                        Ok(user) => {
                            log::info!("Session started for {}", user.username);
                            print_auth_line(&session);
                            println!(
                                "{}",
                                board.fetch_and_render(&session).await
                            );
                        },
                        Err(LoginError::RejectedByServer(rejection)) => {
                            messages.error(rejection.detail_or("Login failed"));
                        },
                        Err(_) => {
                            messages
                                .error("Network error. Please try again.");
                        },
                    }
                },
                _ => println!("usage: login USERNAME PASSWORD"),
            },
            Some((&"logout", _)) => {
                session.logout();
                print_auth_line(&session);
                println!("{}", board.fetch_and_render(&session).await);
            },
            Some((&"signup", rest)) => match activity_and_email(rest) {
                Some((activity, email)) => {
                    if let Some(rendered) = board
                        .signup(&session, &mut messages, &activity, email)
                        .await
                    {
                        println!("{}", rendered);
                    }
                },
                None => println!("usage: signup ACTIVITY EMAIL"),
            },
            Some((&"remove", rest)) => match activity_and_email(rest) {
                Some((activity, email)) => {
                    let confirm = |question: &str| {
                        print!("{} [y/N] ", question);
                        let _ = io::stdout().flush();
                        match lines.next() {
                            Some(Ok(answer)) => {
                                let answer =
                                    answer.trim().to_ascii_lowercase();
                                answer == "y" || answer == "yes"
                            },
                            _ => false,
                        }
                    };

                    if let Some(rendered) = board
                        .unregister(
                            &session,
                            &mut messages,
                            &activity,
                            email,
                            confirm,
                        )
                        .await
                    {
                        println!("{}", rendered);
                    }
                },
                None => println!("usage: remove ACTIVITY EMAIL"),
            },
            Some((other, _)) => {
                println!("Unknown command {:?}; try \"help\"", other);
            },
        }

        print_message(&messages);
    }

    Ok(())
}

/// Activity names contain spaces, so the last word is the email and
/// everything before it is the activity.
fn activity_and_email<'a>(words: &[&'a str]) -> Option<(String, &'a str)> {
    let (email, activity) = words.split_last()?;
    Some((activity.join(" "), *email))
}

fn print_auth_line(session: &SessionManager) {
    match session.current_user() {
        Some(user) => {
            println!("Logged in as {} ({})", user.username, user.role)
        },
        None => println!("Not logged in."),
    }
}

fn print_message(messages: &MessageArea) {
    if let Some(message) = messages.current() {
        match message.severity {
            Severity::Success => println!("{}", message.text),
            Severity::Error => println!("error: {}", message.text),
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  list                    refresh and show the activity board");
    println!("  login USERNAME PASSWORD start a teacher session");
    println!("  logout                  end the session");
    println!("  signup ACTIVITY EMAIL   enroll a student (teachers only)");
    println!("  remove ACTIVITY EMAIL   remove a student (teachers only)");
    println!("  quit                    leave");
}

#[derive(Debug, StructOpt)]
struct Args {
    #[structopt(
        long = "server",
        default_value = "http://localhost:8000/",
        help = "The activities server's base URL"
    )]
    server: Url,
    #[structopt(
        long = "token-file",
        parse(from_os_str),
        help = "Where the login token is stored between runs"
    )]
    token_file: Option<PathBuf>,
}
