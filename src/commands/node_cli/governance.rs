// src/commands/node_cli/governance.rs

use std::path::{Path, PathBuf};

use crate::commands::params::{exactly_one_of, non_blank, Flags};
use crate::commands::CommandBuilder;
use crate::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vote {
    Yes,
    No,
    #[default]
    Abstain,
}

impl Vote {
    fn flag(self) -> &'static str {
        match self {
            Vote::Yes => "--yes",
            Vote::No => "--no",
            Vote::Abstain => "--abstain",
        }
    }
}

/// Parameters for `governance vote create`.
///
/// The voter is exactly one of a DRep key, a committee hot key or a stake
/// pool cold key.
#[derive(Debug, Clone, Default)]
pub struct VoteCreate {
    pub vote: Vote,
    pub action_tx_id: String,
    pub action_index: u32,
    pub drep_verification_key_file: Option<PathBuf>,
    pub cc_hot_verification_key_file: Option<PathBuf>,
    pub cold_verification_key_file: Option<PathBuf>,
    pub anchor_url: Option<String>,
    pub anchor_data_hash: Option<String>,
    pub out_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct GovernanceCommands {
    cmd: CommandBuilder,
}

impl GovernanceCommands {
    pub(crate) fn new(cmd: CommandBuilder) -> Self {
        Self { cmd }
    }

    pub async fn vote_create(&self, params: &VoteCreate) -> Result<()> {
        exactly_one_of(&[
            (
                "--drep-verification-key-file",
                params.drep_verification_key_file.is_some(),
            ),
            (
                "--cc-hot-verification-key-file",
                params.cc_hot_verification_key_file.is_some(),
            ),
            (
                "--cold-verification-key-file",
                params.cold_verification_key_file.is_some(),
            ),
        ])?;
        non_blank("--governance-action-tx-id", &params.action_tx_id)?;

        let flags = Flags::new()
            .switch(params.vote.flag())
            .value("--governance-action-tx-id", &params.action_tx_id)
            .value("--governance-action-index", params.action_index)
            .opt_path(
                "--drep-verification-key-file",
                params.drep_verification_key_file.as_deref(),
            )
            .opt_path(
                "--cc-hot-verification-key-file",
                params.cc_hot_verification_key_file.as_deref(),
            )
            .opt_path(
                "--cold-verification-key-file",
                params.cold_verification_key_file.as_deref(),
            )
            .opt_value("--anchor-url", params.anchor_url.as_deref())
            .opt_value("--anchor-data-hash", params.anchor_data_hash.as_deref())
            .path("--out-file", &params.out_file);
        self.cmd.run(&["vote", "create"], flags).await?;
        Ok(())
    }

    pub async fn drep_key_gen(&self, vkey_out: &Path, skey_out: &Path) -> Result<()> {
        let flags = Flags::new()
            .path("--verification-key-file", vkey_out)
            .path("--signing-key-file", skey_out);
        self.cmd.run(&["drep", "key-gen"], flags).await?;
        Ok(())
    }
}
