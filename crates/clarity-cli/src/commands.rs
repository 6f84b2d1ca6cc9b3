use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use clarity_cli::logging::redact_value;
use clarity_cli::plan::{load_plan, parse_op};
use clarity_cli::settings::Settings;
use clarity_insight::ChatCompletionsClient;
use clarity_service::{AskRequest, CleanRequest, PreviewRequest};

use crate::cli::{AskArgs, CleanArgs, HistoryArgs, ProfileArgs, UploadArgs};
use crate::summary::{
    print_ask, print_clean, print_files, print_history, print_profile, print_upload,
};

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("serialize response")?);
    Ok(())
}

pub fn run_upload(settings: &Settings, args: &UploadArgs) -> Result<()> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => args
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .map(ToString::to_string)
            .with_context(|| format!("no file name in {}", args.path.display()))?,
    };
    let bytes = std::fs::read(&args.path)
        .with_context(|| format!("read {}", args.path.display()))?;

    let store = settings.dataset_store();
    let response = clarity_service::upload(&store, &name, &bytes).context("upload dataset")?;
    print_upload(&response);
    Ok(())
}

pub fn run_files(settings: &Settings) -> Result<()> {
    let response = clarity_service::list_files(&settings.dataset_store()).context("list datasets")?;
    print_files(&response);
    Ok(())
}

pub fn run_profile(settings: &Settings, args: &ProfileArgs) -> Result<()> {
    let request = PreviewRequest {
        filename: args.name.clone(),
    };
    let response = clarity_service::preview_cleaning(
        &settings.dataset_store(),
        &request,
        settings.display.sample_rows,
    )
    .with_context(|| format!("profile {}", args.name))?;

    if args.json {
        return print_json(&response);
    }
    print_profile(&response);
    Ok(())
}

pub fn run_clean(settings: &Settings, args: &CleanArgs) -> Result<()> {
    let span = info_span!("clean_command", dataset = %args.name);
    let _guard = span.enter();

    let mut operations = match &args.plan {
        Some(path) => load_plan(path)?,
        None => Vec::new(),
    };
    for spec in &args.ops {
        operations.push(parse_op(spec)?);
    }
    if operations.is_empty() {
        anyhow::bail!("no operations given; use --op or --plan");
    }
    info!(operations = operations.len(), "Cleaning plan ready");

    let request = CleanRequest {
        filename: args.name.clone(),
        operations,
    };
    let response = clarity_service::clean(
        &settings.dataset_store(),
        &request,
        settings.display.sample_rows,
    )
    .with_context(|| format!("clean {}", args.name))?;

    if args.json {
        return print_json(&response);
    }
    print_clean(&response);
    Ok(())
}

pub fn run_ask(settings: &Settings, args: &AskArgs) -> Result<()> {
    let span = info_span!("ask_command", dataset = %args.name);
    let _guard = span.enter();
    debug!(question = %redact_value(&args.question), "Asking");

    let client = ChatCompletionsClient::from_env(&settings.llm).context("create model client")?;
    let request = AskRequest {
        filename: args.name.clone(),
        question: args.question.clone(),
    };
    let response = clarity_service::ask(
        &settings.dataset_store(),
        &settings.history_store(),
        &client,
        &request,
        &settings.llm,
    )
    .with_context(|| format!("ask about {}", args.name))?;

    if args.json {
        return print_json(&response);
    }
    print_ask(&response);
    Ok(())
}

pub fn run_history(settings: &Settings, args: &HistoryArgs) -> Result<()> {
    let response = clarity_service::history(&settings.history_store(), &args.name)
        .with_context(|| format!("history for {}", args.name))?;
    print_history(&response);
    Ok(())
}

pub fn run_config(settings: &Settings) -> Result<()> {
    print!("{}", settings.to_toml().context("render settings")?);
    Ok(())
}
