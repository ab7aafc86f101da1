//! mediagen binary
//!
//! Subcommands mirror the two asset flows: `bgm` drives the external
//! browser agent, `voices` drives the synthesis API, `all` runs both.

mod jobs;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use mediagen_adapters::{ElevenLabsSynthesizer, ProcessAgent};
use mediagen_core::interactive::InteractiveAgentBackend;
use mediagen_core::synthesis::DirectSynthesisBackend;
use mediagen_core::{ArtifactResolver, AssetDirs, Orchestrator, ResultReporter};
use std::path::PathBuf;
use std::time::Duration;

fn common_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("asset-dir")
            .long("asset-dir")
            .default_value("assets")
            .value_parser(value_parser!(PathBuf))
            .help("Canonical asset output directory"),
    )
    .arg(
        Arg::new("downloads-dir")
            .long("downloads-dir")
            .value_parser(value_parser!(PathBuf))
            .help("Browser download folder to scan (defaults to the user Downloads directory)"),
    )
    .arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print the run summary as JSON"),
    )
}

fn agent_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("agent-cmd")
            .long("agent-cmd")
            .required(true)
            .help("External browser-agent command; the task text is fed to its stdin"),
    )
    .arg(
        Arg::new("agent-arg")
            .long("agent-arg")
            .action(ArgAction::Append)
            .help("Additional argument for the agent command (repeatable)"),
    )
    .arg(
        Arg::new("prompt")
            .long("prompt")
            .default_value(jobs::DEFAULT_BGM_PROMPT)
            .help("Generation prompt for the BGM track"),
    )
    .arg(
        Arg::new("agent-timeout-secs")
            .long("agent-timeout-secs")
            .value_parser(value_parser!(u64))
            .help("Bound the wait on the agent in seconds (unbounded when omitted)"),
    )
}

fn voice_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("voice-id")
            .long("voice-id")
            .default_value(jobs::DEFAULT_VOICE_ID)
            .help("Voice identifier for the synthesis service"),
    )
    .arg(
        Arg::new("model-id")
            .long("model-id")
            .default_value(jobs::DEFAULT_MODEL_ID)
            .help("Model identifier for the synthesis service"),
    )
    .arg(
        Arg::new("output-format")
            .long("output-format")
            .default_value(jobs::DEFAULT_OUTPUT_FORMAT)
            .help("Output encoding for synthesized audio"),
    )
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Command::new("mediagen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate game media assets via external generative services")
        .subcommand_required(true)
        .subcommand(agent_args(common_args(
            Command::new("bgm").about("Generate the background-music track via the browser agent"),
        )))
        .subcommand(voice_args(common_args(
            Command::new("voices").about("Generate the voice lines via the synthesis API"),
        )))
        .subcommand(voice_args(agent_args(common_args(
            Command::new("all").about("Generate every asset"),
        ))));

    let matches = cli.get_matches();
    let (name, args) = matches.subcommand().expect("subcommand required");

    match execute(name, args).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    }
}

fn default_downloads_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join("Downloads"))
}

fn asset_dirs(args: &ArgMatches) -> AssetDirs {
    let asset_dir = args
        .get_one::<PathBuf>("asset-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("assets"));
    let downloads_dir = args
        .get_one::<PathBuf>("downloads-dir")
        .cloned()
        .unwrap_or_else(default_downloads_dir);
    AssetDirs::new(asset_dir, downloads_dir)
}

fn interactive_backend(args: &ArgMatches) -> InteractiveAgentBackend<ProcessAgent> {
    let mut agent = ProcessAgent::new(args.get_one::<String>("agent-cmd").unwrap());
    if let Some(extra) = args.get_many::<String>("agent-arg") {
        for arg in extra {
            agent = agent.arg(arg);
        }
    }

    let mut backend =
        InteractiveAgentBackend::new(agent).with_completion_phrase("BGM generation completed");
    if let Some(secs) = args.get_one::<u64>("agent-timeout-secs") {
        backend = backend.with_timeout(Duration::from_secs(*secs));
    }
    backend
}

async fn execute(name: &str, args: &ArgMatches) -> anyhow::Result<i32> {
    let dirs = asset_dirs(args);
    tracing::info!(
        asset_dir = %dirs.asset_dir.display(),
        downloads_dir = %dirs.downloads_dir.display(),
        "configuration loaded"
    );

    let resolver = ArtifactResolver::new(dirs.downloads_dir.clone());
    let mut orchestrator = Orchestrator::new(dirs.asset_dir.clone(), resolver);
    let mut job_list = Vec::new();

    if matches!(name, "bgm" | "all") {
        orchestrator = orchestrator.with_backend(Box::new(interactive_backend(args)));
        job_list.push(jobs::bgm_job(
            &dirs,
            args.get_one::<String>("prompt").unwrap(),
        ));
    }

    if matches!(name, "voices" | "all") {
        let synthesizer = ElevenLabsSynthesizer::from_env();
        orchestrator = orchestrator.with_backend(Box::new(DirectSynthesisBackend::new(synthesizer)));
        job_list.extend(jobs::voice_jobs(
            &dirs,
            args.get_one::<String>("voice-id").unwrap(),
            args.get_one::<String>("model-id").unwrap(),
            args.get_one::<String>("output-format").unwrap(),
        ));
    }

    let outcomes = orchestrator
        .execute_all(&job_list)
        .await
        .context("generation run aborted")?;
    let summary = ResultReporter::summarize(&outcomes);

    if args.get_flag("json") {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("serializing summary")?
        );
    } else {
        ResultReporter::emit(&outcomes, &summary);
    }

    Ok(if summary.all_succeeded() { 0 } else { 1 })
}
