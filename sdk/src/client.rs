//! RPC client interface for the module registry program
//!
//! All reads go through `get_account_data` plus Anchor's
//! `AccountDeserialize`, so the discriminator is checked on every fetch
//! and a wrong-typed account surfaces as an error instead of garbage.

use anchor_lang::AccountDeserialize;
use anyhow::{anyhow, bail, Context, Result};
use solana_client::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;

use module_registry::{
    AuthorityRecord, Config, Fork, GlobalMetadata, Lifecycle, Metrics, Module, ModuleRepoLink,
    ModuleVersion, RegistrySeeds, Repo, SemanticVersion,
};

/// Main client for interacting with a module registry deployment
pub struct RegistryClient {
    rpc: RpcClient,
    program_id: Pubkey,
}

impl RegistryClient {
    pub fn new(rpc_url: &str) -> Self {
        Self::with_program_id(rpc_url, module_registry::PROGRAM_ID)
    }

    /// Point the client at a non-default deployment of the program
    pub fn with_program_id(rpc_url: &str, program_id: Pubkey) -> Self {
        Self {
            rpc: RpcClient::new(rpc_url),
            program_id,
        }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    fn fetch<T: AccountDeserialize>(&self, address: &Pubkey, kind: &str) -> Result<T> {
        let data = self
            .rpc
            .get_account_data(address)
            .with_context(|| format!("failed to fetch {kind} account {address}"))?;
        T::try_deserialize(&mut data.as_slice())
            .map_err(|err| anyhow!("failed to deserialize {kind} account {address}: {err}"))
    }

    // --- Singletons ---

    pub fn fetch_config(&self) -> Result<Config> {
        let (address, _) = RegistrySeeds::config(&self.program_id);
        self.fetch(&address, "config")
    }

    pub fn fetch_metrics(&self) -> Result<Metrics> {
        let (address, _) = RegistrySeeds::metrics(&self.program_id);
        self.fetch(&address, "metrics")
    }

    pub fn fetch_lifecycle(&self) -> Result<Lifecycle> {
        let (address, _) = RegistrySeeds::lifecycle(&self.program_id);
        self.fetch(&address, "lifecycle")
    }

    pub fn fetch_global_metadata(&self) -> Result<GlobalMetadata> {
        let (address, _) = RegistrySeeds::global_metadata(&self.program_id);
        self.fetch(&address, "global metadata")
    }

    // --- Keyed records ---

    pub fn fetch_repo(&self, repo_key: &Pubkey) -> Result<Repo> {
        let (address, _) = RegistrySeeds::repo(repo_key, &self.program_id);
        self.fetch(&address, "repo")
    }

    pub fn fetch_module(&self, module_key: &Pubkey) -> Result<Module> {
        let (address, _) = RegistrySeeds::module(module_key, &self.program_id);
        self.fetch(&address, "module")
    }

    pub fn fetch_module_version(
        &self,
        module_key: &Pubkey,
        version: &SemanticVersion,
    ) -> Result<ModuleVersion> {
        let (address, _) = RegistrySeeds::module_version(module_key, version, &self.program_id);
        self.fetch(&address, "module version")
    }

    pub fn fetch_fork(&self, fork_key: &Pubkey) -> Result<Fork> {
        let (address, _) = RegistrySeeds::fork(fork_key, &self.program_id);
        self.fetch(&address, "fork")
    }

    pub fn fetch_link(&self, module_key: &Pubkey, repo_key: &Pubkey) -> Result<ModuleRepoLink> {
        let (address, _) =
            RegistrySeeds::module_repo_link(module_key, repo_key, &self.program_id);
        self.fetch(&address, "module-repo link")
    }

    pub fn fetch_authority_record(&self, authority: &Pubkey) -> Result<AuthorityRecord> {
        let (address, _) = RegistrySeeds::authority_record(authority, &self.program_id);
        self.fetch(&address, "authority record")
    }

    /// Walk a fork's parent chain back to its root, returning the lineage
    /// in child-to-root order. Depth is bounded on-chain, so a healthy
    /// chain resolves within `fork.depth + 1` fetches; a chain longer than
    /// that is corrupt and reported as an error rather than walked forever.
    pub fn fetch_fork_lineage(&self, fork_key: &Pubkey) -> Result<Vec<Fork>> {
        let first = self.fetch_fork(fork_key)?;
        walk_lineage(first, |parent_key| self.fetch_fork(parent_key))
    }
}

fn walk_lineage(
    first: Fork,
    mut fetch_parent: impl FnMut(&Pubkey) -> Result<Fork>,
) -> Result<Vec<Fork>> {
    let budget = usize::from(first.depth) + 1;
    let mut lineage = Vec::with_capacity(budget);
    let mut current = first;
    loop {
        let is_root = current.is_root;
        let parent_key = current.parent_key;
        lineage.push(current);
        if is_root {
            return Ok(lineage);
        }
        if lineage.len() >= budget {
            bail!(
                "fork parent chain exceeds recorded depth {}; lineage is corrupt",
                budget - 1
            );
        }
        current = fetch_parent(&parent_key)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fork(fork_key: Pubkey, parent_key: Pubkey, is_root: bool, depth: u16) -> Fork {
        Fork {
            fork_key,
            parent_key,
            owner: Pubkey::new_unique(),
            label: "branch".into(),
            metadata_uri: "ipfs://bafy/fork.json".into(),
            tags: String::new(),
            is_root,
            is_active: true,
            depth,
            created_at: 100,
            updated_at: 100,
            bump: 250,
            reserved: [0u8; 64],
        }
    }

    #[test]
    fn lineage_walk_resolves_to_root() {
        let root_key = Pubkey::new_unique();
        let child_key = Pubkey::new_unique();
        let root = fork(root_key, Pubkey::default(), true, 0);
        let child = fork(child_key, root_key, false, 1);

        let lineage = walk_lineage(child, |key| {
            assert_eq!(*key, root_key);
            Ok(root.clone())
        })
        .unwrap();

        assert_eq!(lineage.len(), 2);
        assert_eq!(lineage[0].fork_key, child_key);
        assert!(lineage[1].is_root);
    }

    #[test]
    fn lineage_walk_rejects_chains_longer_than_recorded_depth() {
        // Two non-root forks pointing at each other: no root is ever
        // reached, so the walk must stop at the depth budget
        let a_key = Pubkey::new_unique();
        let b_key = Pubkey::new_unique();
        let a = fork(a_key, b_key, false, 1);
        let b = fork(b_key, a_key, false, 1);

        let mut fetches = 0usize;
        let result = walk_lineage(a, |key| {
            fetches += 1;
            Ok(if *key == b_key { b.clone() } else { fork(a_key, b_key, false, 1) })
        });

        assert!(result.is_err());
        assert_eq!(fetches, 1);
    }
}
