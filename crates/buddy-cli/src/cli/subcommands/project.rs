use clap::{Args, Subcommand};

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Show the current user's project.
    Show,
    /// Update tracker settings. Omitted tokens are left unchanged.
    Update(ProjectUpdateArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ProjectUpdateArgs {
    #[arg(long)]
    pub test_it_project_id: Option<String>,
    #[arg(long)]
    pub jira_project_id: Option<String>,
    #[arg(long)]
    pub context: Option<String>,
    #[arg(long)]
    pub test_it_token: Option<String>,
    #[arg(long)]
    pub jira_token: Option<String>,
}
