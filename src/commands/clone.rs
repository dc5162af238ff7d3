use std::env;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::CloneArgs;
use crate::config::{Profile, ProfileSet, Service, profile};
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::git::{self, CommandRunner, Invocation, SwitchOutcome, parse_remote};
use crate::routing::BlockTemplate;

#[derive(Debug, Clone, Serialize)]
pub struct ClonePlan {
    pub url: String,
    pub target_dir: PathBuf,
    pub alias: Option<String>,
    #[serde(skip)]
    pub profile: Option<Profile>,
}

#[derive(Debug, Serialize)]
struct CloneResult {
    #[serde(flatten)]
    plan: ClonePlan,
    switched: Option<SwitchOutcome>,
    switch_warning: Option<String>,
}

pub fn run(ctx: &AppContext, args: CloneArgs) -> AppResult<()> {
    let plan = plan(&ctx.store.accounts, &ctx.service(), &args.url, args.dir)?;
    match plan.alias.as_deref() {
        Some(alias) => eprintln!("Using SSH configuration for account '{alias}'"),
        None => eprintln!("No matching account found, using original URL"),
    }

    let cwd = env::current_dir()?;
    let (switched, switch_warning) = execute(&ctx.runner, &plan, &cwd)?;

    let mut lines = vec![format!("cloned {} into {}", plan.url, plan.target_dir.display())];
    if let Some(outcome) = switched.as_ref() {
        lines.push(format!(
            "configured {} ({}, {})",
            outcome.alias, outcome.name, outcome.email
        ));
    }
    ctx.output.emit(
        &lines,
        &CloneResult {
            plan,
            switched,
            switch_warning,
        },
    )
}

/// Decides which URL to clone and which profile, if any, owns it.
pub fn plan(
    profiles: &ProfileSet,
    service: &Service,
    raw_url: &str,
    dir: Option<PathBuf>,
) -> AppResult<ClonePlan> {
    let remote = parse_remote(raw_url, &service.hostname)?;
    let target_dir = dir.unwrap_or_else(|| PathBuf::from(&remote.repo));

    let Some((alias, profile)) = profile::find_by_username(profiles, &remote.owner) else {
        return Ok(ClonePlan {
            url: raw_url.trim().to_string(),
            target_dir,
            alias: None,
            profile: None,
        });
    };

    if !Path::new(&profile.key_reference).is_file() {
        return Err(AppError::Config(format!(
            "ssh key not found for account '{alias}' at {}",
            profile.key_reference
        )));
    }

    let template = BlockTemplate::new(service);
    Ok(ClonePlan {
        url: remote.routed_url(&template.host_alias(&profile.username)),
        target_dir,
        alias: Some(alias.clone()),
        profile: Some(profile.clone()),
    })
}

/// Runs the clone, then applies the owning profile inside the new checkout.
///
/// A failed clone is an error. A failed profile switch afterwards is returned
/// as a warning since the clone itself already succeeded.
pub fn execute(
    runner: &dyn CommandRunner,
    plan: &ClonePlan,
    cwd: &Path,
) -> AppResult<(Option<SwitchOutcome>, Option<String>)> {
    let target = plan.target_dir.display().to_string();
    let invocation = Invocation::new("git", ["clone", plan.url.as_str(), target.as_str()])
        .in_dir(cwd)
        .interactive();

    let output = runner.run(&invocation)?;
    if !output.success {
        if let Some(profile) = plan.profile.as_ref() {
            for line in troubleshooting(&plan.url, profile) {
                eprintln!("{line}");
            }
        }
        return Err(AppError::Git(format!("failed to clone {}", plan.url)));
    }

    let (Some(alias), Some(profile)) = (plan.alias.as_deref(), plan.profile.as_ref()) else {
        return Ok((None, None));
    };

    match git::apply_profile(runner, &cwd.join(&plan.target_dir), alias, profile) {
        Ok(outcome) => Ok((Some(outcome), None)),
        Err(err) => {
            tracing::warn!(%alias, error = %err, "failed to configure cloned repository");
            Ok((None, Some(err.to_string())))
        }
    }
}

fn troubleshooting(url: &str, profile: &Profile) -> Vec<String> {
    let host = url
        .strip_prefix("git@")
        .and_then(|rest| rest.split_once(':'))
        .map(|(host, _)| host)
        .unwrap_or_default();

    vec![
        String::new(),
        "If you're seeing SSH key errors, try:".to_string(),
        "1. Start ssh-agent:".to_string(),
        "   eval \"$(ssh-agent -s)\"".to_string(),
        "2. Add your SSH key:".to_string(),
        format!("   ssh-add {}", profile.key_reference),
        String::new(),
        "Or verify your SSH configuration:".to_string(),
        "1. Test SSH connection:".to_string(),
        format!("   ssh -T git@{host}"),
        "2. Check if the key exists:".to_string(),
        format!("   ls -l {}", profile.key_reference),
    ]
}
