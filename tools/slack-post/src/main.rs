//! Slack Post - Slack Message Poster
//!
//! Posts a message to a Slack channel, then posts each given reply as a
//! threaded follow-up under it. A thin layer over the Slack Web API: one
//! `chat.postMessage` call for the root message, one per reply carrying the
//! root's `ts` as `thread_ts`.
//!
//! # Usage
//!
//! ```bash
//! # Post a single message
//! slack-post post --channel C0123456789 --message "Build finished"
//!
//! # Post a message with threaded replies
//! slack-post post -c C0123456789 -m "Build finished" \
//!     -r "Step 1 ok" -r "Step 2 ok"
//!
//! # Read the message and a reply from files
//! slack-post post -c C0123456789 --message-file notes.txt \
//!     --reply-in-thread-message-file details.txt
//! ```
//!
//! The token comes from `--token` or the `SLACK_TOKEN` environment
//! variable. Structured JSON logs go to stderr and to a log file
//! (timestamped path under the temp dir unless `--log-file` is given).

mod content;
mod error;
mod logging;
mod slack;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::content::{reply_sources, resolve_root_message};
use crate::error::{Error, Result};
use crate::slack::SlackClient;

/// Posts messages to Slack channels.
#[derive(Parser, Debug)]
#[command(name = "slack-post")]
#[command(about = "Posts a message to a Slack channel with optional thread replies")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Post a message, then post each reply threaded under it.
    Post(PostArgs),
}

#[derive(clap::Args, Debug)]
struct PostArgs {
    /// Slack channel ID to post to.
    #[arg(short, long, required_unless_present = "user")]
    channel: Option<String>,

    /// Slack user ID to post to; --channel wins if both are given.
    #[arg(short, long)]
    user: Option<String>,

    /// Message to post; wins over --message-file if both are given.
    #[arg(short, long)]
    message: Option<String>,

    /// File containing the message to post.
    #[arg(long, visible_alias = "mf")]
    message_file: Option<PathBuf>,

    /// Message to post in the thread (repeatable).
    #[arg(short = 'r', long, visible_alias = "rm")]
    reply_in_thread_message: Vec<String>,

    /// File containing a message to post in the thread (repeatable).
    #[arg(long, visible_alias = "rmf")]
    reply_in_thread_message_file: Vec<PathBuf>,

    /// Slack bot token.
    #[arg(short, long, env = "SLACK_TOKEN")]
    token: String,

    /// Enable debug logging.
    #[arg(short, long)]
    debug: bool,

    /// Log file path.
    #[arg(short, long)]
    log_file: Option<PathBuf>,
}

impl PostArgs {
    /// Destination identifier; --channel wins when both are given.
    fn destination(&self) -> Result<&str> {
        self.channel
            .as_deref()
            .or(self.user.as_deref())
            .map(str::trim)
            .filter(|dest| !dest.is_empty())
            .ok_or_else(|| Error::Config("destination channel is empty".into()))
    }
}

/// Default log file path, derived from the invocation timestamp.
fn default_log_file() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    std::env::temp_dir().join(format!("slack_post_{stamp}.log"))
}

async fn run(args: &PostArgs) -> Result<()> {
    let channel = args.destination()?;
    if args.token.trim().is_empty() {
        return Err(Error::Config(
            "a token must be provided via --token or SLACK_TOKEN".into(),
        ));
    }

    let text = resolve_root_message(args.message.as_deref(), args.message_file.as_deref())?;
    let replies = reply_sources(
        &args.reply_in_thread_message,
        &args.reply_in_thread_message_file,
    );

    let client = SlackClient::new(&args.token)?;
    let posted = slack::post_with_replies(&client, channel, &text, &replies).await?;

    println!("Message posted successfully to channel {channel}");
    if posted > 0 {
        println!("Posted {posted} replies in thread");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Post(args) => {
            let log_file = args.log_file.clone().unwrap_or_else(default_log_file);
            let _guard = match logging::init(args.debug, &log_file) {
                Ok(guard) => guard,
                Err(e) => {
                    eprintln!("error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            tracing::debug!(
                debug = args.debug,
                log_file = %log_file.display(),
                "logging configured"
            );

            match run(&args).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    tracing::error!(error = %e, "failed to post message");
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> PostArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Post(args) => args,
        }
    }

    #[test]
    fn replies_keep_declared_order() {
        let args = parse(&[
            "slack-post", "post", "-c", "C1", "-m", "root", "-t", "tok", "-r", "first", "-r",
            "second",
        ]);
        assert_eq!(args.reply_in_thread_message, ["first", "second"]);
    }

    #[test]
    fn long_aliases_parse() {
        let args = parse(&[
            "slack-post",
            "post",
            "-c",
            "C1",
            "-t",
            "tok",
            "--mf",
            "notes.txt",
            "--rm",
            "reply",
            "--rmf",
            "details.txt",
        ]);
        assert_eq!(args.message_file, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.reply_in_thread_message, ["reply"]);
        assert_eq!(
            args.reply_in_thread_message_file,
            [PathBuf::from("details.txt")]
        );
    }

    #[test]
    fn channel_wins_over_user() {
        let args = parse(&[
            "slack-post", "post", "-c", "C1", "-u", "U1", "-m", "root", "-t", "tok",
        ]);
        assert_eq!(args.destination().unwrap(), "C1");
    }

    #[test]
    fn user_alone_is_a_valid_destination() {
        let args = parse(&["slack-post", "post", "-u", "U1", "-m", "root", "-t", "tok"]);
        assert_eq!(args.destination().unwrap(), "U1");
    }

    #[test]
    fn missing_destination_is_rejected_at_parse() {
        let result = Cli::try_parse_from(["slack-post", "post", "-m", "root", "-t", "tok"]);
        assert!(result.is_err());
    }

    fn bare_args() -> PostArgs {
        PostArgs {
            channel: Some("C1".into()),
            user: None,
            message: None,
            message_file: None,
            reply_in_thread_message: vec![],
            reply_in_thread_message_file: vec![],
            token: "tok".into(),
            debug: false,
            log_file: None,
        }
    }

    #[tokio::test]
    async fn missing_message_source_fails_before_any_call() {
        let err = run(&bare_args()).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn blank_token_is_rejected() {
        let mut args = bare_args();
        args.message = Some("root".into());
        args.token = "   ".into();

        let err = run(&args).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn default_log_file_is_timestamped() {
        let path = default_log_file();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("slack_post_"));
        assert!(name.ends_with(".log"));
    }
}
