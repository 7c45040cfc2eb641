//! Contract and resume analysis commands

use anyhow::{Context, Result};
use aqeed_core::dto::analysis::{QuestionRequest, ScoreContractsRequest, WorkspaceRequest};
use clap::Args;

use super::{SubmitArgs, client_and_poller, finish_submission};
use crate::config::Config;

#[derive(Args)]
pub struct AskArgs {
    /// Question to ask
    query: String,

    /// Workspace holding the documents
    #[arg(short, long)]
    workspace: String,

    /// Answer length: short, medium or long
    #[arg(long, default_value = "medium")]
    size: String,

    /// Answer form: sentence or bullets
    #[arg(long = "type", default_value = "sentence")]
    response_type: String,

    /// Search the web instead of the workspace
    #[arg(long)]
    web: bool,

    /// Restrict web search to this site
    #[arg(long)]
    url: Option<String>,

    /// Skip the ChatGPT comparison answer
    #[arg(long)]
    no_compare: bool,

    /// Do not share workspace data with ChatGPT
    #[arg(long)]
    private: bool,

    #[command(flatten)]
    submit: SubmitArgs,
}

#[derive(Args)]
pub struct ScoreArgs {
    /// Scoring criterion
    criterion: String,

    /// Workspace holding the contracts
    #[arg(short, long)]
    workspace: String,

    /// Highest possible score
    #[arg(long, default_value_t = 10)]
    max_score: u32,

    /// Skip the ChatGPT comparison scores
    #[arg(long)]
    no_compare: bool,

    #[command(flatten)]
    submit: SubmitArgs,
}

#[derive(Args)]
pub struct WorkspaceArgs {
    /// Workspace to analyse
    #[arg(short, long)]
    workspace: String,

    #[command(flatten)]
    submit: SubmitArgs,
}

pub async fn ask(args: AskArgs, config: &Config) -> Result<()> {
    let (client, poller) = client_and_poller(config);

    let mut req = QuestionRequest::new(args.workspace, args.query);
    req.response_size = args.size;
    req.response_type = args.response_type;
    req.use_web = args.web || args.url.is_some();
    req.specific_url = args.url.unwrap_or_default();
    req.compare_chatgpt = !args.no_compare;
    req.share_data_with_chatgpt = !args.private;

    let submitted = client
        .ask_question(req, args.submit.mode())
        .await
        .context("Failed to submit question")?;

    finish_submission(&poller, submitted, config).await
}

pub async fn score(args: ScoreArgs, config: &Config) -> Result<()> {
    let (client, poller) = client_and_poller(config);

    let mut req = ScoreContractsRequest::new(args.workspace, args.criterion, args.max_score);
    req.compare_chatgpt = !args.no_compare;

    let submitted = client
        .score_contracts(req, args.submit.mode())
        .await
        .context("Failed to submit contract scoring")?;

    finish_submission(&poller, submitted, config).await
}

pub async fn audit(args: WorkspaceArgs, config: &Config) -> Result<()> {
    let (client, poller) = client_and_poller(config);

    let submitted = client
        .audit_contracts(WorkspaceRequest::new(args.workspace), args.submit.mode())
        .await
        .context("Failed to submit audit")?;

    finish_submission(&poller, submitted, config).await
}

pub async fn legal(args: WorkspaceArgs, config: &Config) -> Result<()> {
    let (client, poller) = client_and_poller(config);

    let submitted = client
        .legal_analysis(WorkspaceRequest::new(args.workspace), args.submit.mode())
        .await
        .context("Failed to submit legal analysis")?;

    finish_submission(&poller, submitted, config).await
}

pub async fn score_resumes(args: WorkspaceArgs, config: &Config) -> Result<()> {
    let (client, poller) = client_and_poller(config);

    let submitted = client
        .score_resumes(&args.workspace, args.submit.mode())
        .await
        .context("Failed to submit resume scoring")?;

    finish_submission(&poller, submitted, config).await
}
