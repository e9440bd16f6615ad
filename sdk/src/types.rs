//! Serde-friendly views of on-chain state
//!
//! On-chain accounts use Borsh; dashboards and CLI tooling want JSON.
//! These views flatten pubkeys to base58 strings and versions to
//! dotted triples so `serde_json::to_string` output is directly usable.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use module_registry::{Config, Fork, Metrics, Module, Repo, Role, SemanticVersion};

/// Render a version as a dotted triple, e.g. "1.4.2"
pub fn format_version(version: &SemanticVersion) -> String {
    format!("{}.{}.{}", version.major, version.minor, version.patch)
}

/// Parse a dotted triple into a version
pub fn parse_version(input: &str) -> Result<SemanticVersion> {
    let parts: Vec<&str> = input.split('.').collect();
    if parts.len() != 3 {
        bail!("expected MAJOR.MINOR.PATCH, got {input:?}");
    }
    let parse = |part: &str| -> Result<u16> {
        part.parse()
            .map_err(|_| anyhow::anyhow!("invalid version component {part:?} in {input:?}"))
    };
    Ok(SemanticVersion::new(
        parse(parts[0])?,
        parse(parts[1])?,
        parse(parts[2])?,
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigView {
    pub admin: String,
    pub fee_bps: u16,
    pub max_modules_per_repo: u32,
    pub schema_version: u8,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&Config> for ConfigView {
    fn from(config: &Config) -> Self {
        Self {
            admin: config.admin.to_string(),
            fee_bps: config.fee_bps,
            max_modules_per_repo: config.max_modules_per_repo,
            schema_version: config.schema_version,
            is_active: config.is_active,
            created_at: config.created_at,
            updated_at: config.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsView {
    pub total_repos: u64,
    pub total_modules: u64,
    pub total_forks: u64,
    pub total_observations: u64,
    pub total_lines_of_code: u64,
    pub total_files_processed: u64,
    pub updated_at: i64,
}

impl From<&Metrics> for MetricsView {
    fn from(metrics: &Metrics) -> Self {
        Self {
            total_repos: metrics.total_repos,
            total_modules: metrics.total_modules,
            total_forks: metrics.total_forks,
            total_observations: metrics.total_observations,
            total_lines_of_code: metrics.total_lines_of_code,
            total_files_processed: metrics.total_files_processed,
            updated_at: metrics.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoView {
    pub repo_key: String,
    pub authority: String,
    pub name: String,
    pub url: String,
    pub tags: String,
    pub is_active: bool,
    pub allow_observation: bool,
    pub total_observations: u64,
    pub total_lines_of_code: u64,
    pub total_files_processed: u64,
    pub total_modules: u32,
    pub last_observed_at: i64,
}

impl From<&Repo> for RepoView {
    fn from(repo: &Repo) -> Self {
        Self {
            repo_key: repo.repo_key.to_string(),
            authority: repo.authority.to_string(),
            name: repo.name.clone(),
            url: repo.url.clone(),
            tags: repo.tags.clone(),
            is_active: repo.is_active,
            allow_observation: repo.allow_observation,
            total_observations: repo.total_observations,
            total_lines_of_code: repo.total_lines_of_code,
            total_files_processed: repo.total_files_processed,
            total_modules: repo.total_modules,
            last_observed_at: repo.last_observed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleView {
    pub module_key: String,
    pub repo_key: String,
    pub authority: String,
    pub name: String,
    pub metadata_uri: String,
    pub category: String,
    pub tags: String,
    pub is_active: bool,
    pub version: String,
    pub primary_repo_key: String,
}

impl From<&Module> for ModuleView {
    fn from(module: &Module) -> Self {
        Self {
            module_key: module.module_key.to_string(),
            repo_key: module.repo_key.to_string(),
            authority: module.authority.to_string(),
            name: module.name.clone(),
            metadata_uri: module.metadata_uri.clone(),
            category: module.category.clone(),
            tags: module.tags.clone(),
            is_active: module.is_active,
            version: format_version(&module.version),
            primary_repo_key: module.primary_repo_key.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForkView {
    pub fork_key: String,
    pub parent_key: String,
    pub owner: String,
    pub label: String,
    pub is_root: bool,
    pub is_active: bool,
    pub depth: u16,
}

impl From<&Fork> for ForkView {
    fn from(fork: &Fork) -> Self {
        Self {
            fork_key: fork.fork_key.to_string(),
            parent_key: fork.parent_key.to_string(),
            owner: fork.owner.to_string(),
            label: fork.label.clone(),
            is_root: fork.is_root,
            is_active: fork.is_active,
            depth: fork.depth,
        }
    }
}

/// Stable string form of a role for JSON output
pub fn role_name(role: &Role) -> &'static str {
    match role {
        Role::Admin => "admin",
        Role::Operator => "operator",
        Role::User => "user",
    }
}
