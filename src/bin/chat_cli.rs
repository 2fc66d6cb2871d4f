//! chat-cli — 从命令行发起一次聊天补全请求
//!
//! Usage:
//!   chat-cli [OPTIONS] <prompt>...
//!
//! Ctrl-C cancels the in-flight request.

use anyhow::{bail, Context, Result};
use openai_chat::{
    CallContext, CancellationToken, ChatClient, ChatCompletionOptions, ChatMessage, Model,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

struct Args {
    model: String,
    system: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    timeout_secs: Option<u64>,
    prompt: String,
}

fn print_usage() {
    println!(
        r#"chat-cli — send one chat completion request

USAGE:
    chat-cli [OPTIONS] <prompt>...

OPTIONS:
    --model <id>            Model to use (default: gpt-3.5-turbo)
    --system <text>         System message prepended to the conversation
    --max-tokens <n>        Token limit for the completion
    --temperature <t>       Sampling temperature (0-2)
    --timeout <secs>        Give up after this many seconds
    -h, --help              Show this help message

ENVIRONMENT:
    OPENAI_API_KEY          Bearer token
    OPENAI_BASE_URL         API base URL (default: https://api.openai.com/v1)
    RUST_LOG                Log filter (e.g. openai_chat=debug)"#
    );
}

fn parse_args(raw: &[String]) -> Result<Option<Args>> {
    let mut args = Args {
        model: Model::GPT_3_5_TURBO.to_string(),
        system: None,
        max_tokens: None,
        temperature: None,
        timeout_secs: None,
        prompt: String::new(),
    };
    let mut words = Vec::new();

    let mut it = raw.iter();
    while let Some(arg) = it.next() {
        let mut value = |name: &str| {
            it.next()
                .cloned()
                .with_context(|| format!("{name} requires a value"))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--model" => args.model = value("--model")?,
            "--system" => args.system = Some(value("--system")?),
            "--max-tokens" => {
                args.max_tokens = Some(value("--max-tokens")?.parse::<u32>().context("--max-tokens")?)
            }
            "--temperature" => {
                args.temperature =
                    Some(value("--temperature")?.parse::<f32>().context("--temperature")?)
            }
            "--timeout" => {
                args.timeout_secs = Some(value("--timeout")?.parse::<u64>().context("--timeout")?)
            }
            other if other.starts_with("--") => bail!("unknown option: {other}"),
            other => words.push(other.to_string()),
        }
    }

    if words.is_empty() {
        bail!("missing prompt");
    }
    args.prompt = words.join(" ");
    Ok(Some(args))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    let client = ChatClient::builder().build()?;

    let mut messages = Vec::new();
    if let Some(system) = args.system {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(args.prompt));

    let mut opts = ChatCompletionOptions::new(Model::new(args.model), messages);
    opts.max_tokens = args.max_tokens;
    opts.temperature = args.temperature;

    let cancel = CancellationToken::new();
    let mut ctx = CallContext::background().with_cancel(cancel.clone());
    if let Some(secs) = args.timeout_secs {
        ctx = ctx.with_timeout(Duration::from_secs(secs));
    }

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let resp = client
        .chat_completion(&ctx, &opts)
        .await
        .context("chat completion failed")?;

    for choice in &resp.choices {
        if resp.choices.len() > 1 {
            println!("--- choice {} ---", choice.index);
        }
        println!("{}", choice.message.content);
    }
    eprintln!(
        "[{} tokens: {} prompt + {} completion]",
        resp.usage.total_tokens, resp.usage.prompt_tokens, resp.usage.completion_tokens
    );

    Ok(())
}
