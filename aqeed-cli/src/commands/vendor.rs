//! Vendor research commands

use anyhow::{Context, Result};
use aqeed_core::dto::vendor::{
    VendorComparisonRequest, VendorRecommendationRequest, VendorRef, VendorResearchRequest,
    VendorSources,
};
use clap::{Args, Subcommand};

use super::{SubmitArgs, client_and_poller, finish_submission};
use crate::config::Config;

/// Extra sources consulted during vendor research
#[derive(Args, Debug, Clone, Copy)]
pub struct SourceArgs {
    /// Include Reddit discussions
    #[arg(long)]
    reddit: bool,

    /// Include LinkedIn company data
    #[arg(long)]
    linkedin: bool,

    /// Include Google reviews
    #[arg(long)]
    google_reviews: bool,
}

impl From<SourceArgs> for VendorSources {
    fn from(args: SourceArgs) -> Self {
        Self {
            enable_reddit_analysis: args.reddit,
            enable_linkedin_analysis: args.linkedin,
            enable_google_reviews: args.google_reviews,
        }
    }
}

/// Vendor subcommands
#[derive(Subcommand)]
pub enum VendorCommands {
    /// Recommend vendors for a project
    Recommend {
        /// Project requirements
        requirements: String,

        #[arg(short, long)]
        workspace: String,

        #[arg(long, default_value = "general")]
        industry: String,

        #[arg(long, default_value = "any")]
        location: String,

        /// Number of vendors to recommend
        #[arg(long, default_value_t = 5)]
        count: u32,

        /// What to weigh most when ranking vendors
        #[arg(
            long,
            default_value = "balanced",
            value_parser = ["balanced", "cost_effective", "technical_competence"]
        )]
        preference: String,

        /// Kind of vendor to look for
        #[arg(
            long,
            default_value = "auto",
            value_parser = ["auto", "service_providers", "technology_vendors", "equipment_suppliers"]
        )]
        vendor_type: String,

        #[command(flatten)]
        sources: SourceArgs,

        #[command(flatten)]
        submit: SubmitArgs,
    },
    /// Research a single vendor
    Research {
        /// Vendor name
        name: String,

        #[arg(short, long)]
        workspace: String,

        #[arg(long, default_value = "")]
        location: String,

        #[command(flatten)]
        sources: SourceArgs,

        #[command(flatten)]
        submit: SubmitArgs,
    },
    /// Compare vendors, each given as NAME@LOCATION
    Compare {
        #[arg(required = true, num_args = 2..)]
        vendors: Vec<String>,

        #[arg(short, long)]
        workspace: String,

        #[command(flatten)]
        submit: SubmitArgs,
    },
}

/// Handle vendor commands
pub async fn handle_vendor_command(command: VendorCommands, config: &Config) -> Result<()> {
    let (client, poller) = client_and_poller(config);

    let submitted = match command {
        VendorCommands::Recommend {
            requirements,
            workspace,
            industry,
            location,
            count,
            preference,
            vendor_type,
            sources,
            submit,
        } => {
            let mut req = VendorRecommendationRequest::new(workspace, requirements);
            req.industry = industry;
            req.location_preference = location;
            req.vendor_count = count;
            req.preference = preference;
            req.vendor_type = vendor_type;
            req.sources = sources.into();

            client
                .vendor_recommendations(req, submit.mode())
                .await
                .context("Failed to submit vendor recommendations")?
        }
        VendorCommands::Research {
            name,
            workspace,
            location,
            sources,
            submit,
        } => {
            let req = VendorResearchRequest {
                vendor_name: name,
                location,
                workspace_name: workspace,
                sources: sources.into(),
            };

            client
                .vendor_research(req, submit.mode())
                .await
                .context("Failed to submit vendor research")?
        }
        VendorCommands::Compare {
            vendors,
            workspace,
            submit,
        } => {
            let req = VendorComparisonRequest {
                vendors: vendors.iter().map(|v| VendorRef::parse(v)).collect(),
                workspace_name: workspace,
            };

            client
                .vendor_comparison(req, submit.mode())
                .await
                .context("Failed to submit vendor comparison")?
        }
    };

    finish_submission(&poller, submitted, config).await
}
