// tests/command_builders.rs

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cardano_runner::commands::decode::parse_trailing_number;
use cardano_runner::commands::hw_cli::AddressShow;
use cardano_runner::commands::node_cli::{
    StakeAddressBuild, TransactionBuildRaw, Vote, VoteCreate,
};
use cardano_runner::commands::{exactly_one_of, HwCli, MithrilClient, NodeCli};
use cardano_runner::config::BinarySettings;
use cardano_runner::errors::CardanoError;
use cardano_runner::exec::{CommandRunner, Executable, ExecutableLocator};
use cardano_runner::fs::mock::MockFileSystem;
use cardano_runner::types::{BinaryKind, Era, NetworkSelector};
use cardano_runner_test_utils::builders::ConfigFileBuilder;
use cardano_runner_test_utils::init_tracing;
use cardano_runner_test_utils::spy_runner::SpyRunner;

type TestResult = Result<(), Box<dyn Error>>;

const TIP_JSON: &str = r#"{
    "block": 2765432,
    "epoch": 180,
    "era": "Conway",
    "hash": "a1b2c3",
    "slot": 71234567,
    "slotInEpoch": 12345,
    "slotsToEpochEnd": 74455,
    "syncProgress": "99.98"
}"#;

fn settings(kind: BinaryKind, network: NetworkSelector) -> BinarySettings {
    BinarySettings {
        kind,
        path: None,
        min_version: kind.default_min_version().to_string(),
        working_dir: PathBuf::from("/srv/cardano"),
        show_output: false,
        network,
        era: Era::Conway,
    }
}

fn node_cli(spy: &Arc<SpyRunner>, network: NetworkSelector) -> NodeCli {
    let runner: Arc<dyn CommandRunner> = spy.clone();
    NodeCli::new(
        Executable::unchecked("cardano-cli", "/usr/local/bin/cardano-cli", "8.1.0"),
        runner,
        &settings(BinaryKind::NodeCli, network),
    )
    .with_socket_path(Path::new("/srv/cardano/db/node.socket"))
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn assert_invalid(err: CardanoError, needle: &str) {
    match err {
        CardanoError::InvalidParameters(msg) => {
            assert!(msg.contains(needle), "message {msg:?} should mention {needle:?}")
        }
        other => panic!("expected InvalidParameters, got {other:?}"),
    }
}

#[tokio::test]
async fn query_tip_composes_era_network_and_socket() -> TestResult {
    init_tracing();
    let spy = Arc::new(SpyRunner::new().reply(TIP_JSON));
    let cli = node_cli(&spy, NetworkSelector::Testnet(1));

    let tip = cli.query().tip().await?;

    assert_eq!(tip.slot, 71234567);
    assert_eq!(tip.epoch, 180);
    assert_eq!(tip.slot_in_epoch, Some(12345));
    assert_eq!(tip.sync_percent(), Some(99.98));

    let call = &spy.calls()[0];
    assert_eq!(call.program, PathBuf::from("/usr/local/bin/cardano-cli"));
    assert_eq!(call.working_dir, PathBuf::from("/srv/cardano"));
    assert_eq!(
        call.args,
        strings(&["conway", "query", "tip", "--testnet-magic", "1"])
    );
    assert!(call.env.contains(&(
        "CARDANO_NODE_SOCKET_PATH".to_string(),
        "/srv/cardano/db/node.socket".to_string()
    )));
    Ok(())
}

#[tokio::test]
async fn mainnet_selector_appends_mainnet_flag() -> TestResult {
    let spy = Arc::new(SpyRunner::new().reply("pool1abc\n\npool1def\n"));
    let cli = node_cli(&spy, NetworkSelector::Mainnet);

    let pools = cli.query().stake_pools().await?;

    assert_eq!(pools, strings(&["pool1abc", "pool1def"]));
    assert_eq!(
        spy.last_args(),
        Some(strings(&["conway", "query", "stake-pools", "--mainnet"]))
    );
    Ok(())
}

#[tokio::test]
async fn stake_address_info_accepts_both_field_spellings() -> TestResult {
    let reply = r#"[
        {"address": "stake_test1uq", "stakeDelegation": "pool1xyz", "rewardAccountBalance": 1500000},
        {"address": "stake_test1ur", "delegation": null, "rewardAccountBalance": 0}
    ]"#;
    let spy = Arc::new(SpyRunner::new().reply(reply));
    let cli = node_cli(&spy, NetworkSelector::Testnet(2));

    let info = cli.query().stake_address_info("stake_test1uq").await?;

    assert_eq!(info.len(), 2);
    assert_eq!(info[0].delegation.as_deref(), Some("pool1xyz"));
    assert_eq!(info[0].reward_account_balance, 1_500_000);
    assert_eq!(info[1].delegation, None);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() -> TestResult {
    let spy = Arc::new(SpyRunner::new().reply("Network.Socket.connect: does not exist"));
    let cli = node_cli(&spy, NetworkSelector::Testnet(1));

    match cli.query().tip().await {
        Err(CardanoError::Decode { context, .. }) => assert!(context.contains("query tip")),
        other => panic!("expected Decode, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn runner_failures_propagate_unchanged() -> TestResult {
    let spy = Arc::new(SpyRunner::new().fail("HandshakeError: version mismatch"));
    let cli = node_cli(&spy, NetworkSelector::Testnet(1));

    match cli.transaction().submit(Path::new("tx.signed")).await {
        Err(CardanoError::CommandFailed { args, message, .. }) => {
            assert_eq!(
                args,
                strings(&[
                    "conway",
                    "transaction",
                    "submit",
                    "--tx-file",
                    "tx.signed",
                    "--testnet-magic",
                    "1"
                ])
            );
            assert_eq!(message, "HandshakeError: version mismatch");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn stake_address_build_with_both_credentials_launches_nothing() -> TestResult {
    let spy = Arc::new(SpyRunner::new());
    let cli = node_cli(&spy, NetworkSelector::Testnet(1));

    let both = StakeAddressBuild {
        stake_verification_key_file: Some("stake.vkey".into()),
        stake_script_file: Some("stake.script".into()),
        out_file: None,
    };
    assert_invalid(
        cli.stake_address().build(&both).await.unwrap_err(),
        "--stake-script-file",
    );

    let neither = StakeAddressBuild::default();
    assert_invalid(
        cli.stake_address().build(&neither).await.unwrap_err(),
        "none was given",
    );

    assert_eq!(spy.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn stake_address_build_with_one_credential() -> TestResult {
    let spy = Arc::new(SpyRunner::new().reply("stake_test1uzx"));
    let cli = node_cli(&spy, NetworkSelector::Testnet(1));

    let params = StakeAddressBuild {
        stake_verification_key_file: Some("stake.vkey".into()),
        ..Default::default()
    };
    let address = cli.stake_address().build(&params).await?;

    assert_eq!(address, "stake_test1uzx");
    assert_eq!(
        spy.last_args(),
        Some(strings(&[
            "conway",
            "stake-address",
            "build",
            "--stake-verification-key-file",
            "stake.vkey",
            "--testnet-magic",
            "1"
        ]))
    );
    Ok(())
}

#[tokio::test]
async fn vote_create_requires_exactly_one_voter() -> TestResult {
    let spy = Arc::new(SpyRunner::new());
    let cli = node_cli(&spy, NetworkSelector::Testnet(4));

    let two_voters = VoteCreate {
        vote: Vote::Yes,
        action_tx_id: "b1c2".to_string(),
        action_index: 0,
        drep_verification_key_file: Some("drep.vkey".into()),
        cold_verification_key_file: Some("cold.vkey".into()),
        out_file: "vote.json".into(),
        ..Default::default()
    };
    assert_invalid(
        cli.governance().vote_create(&two_voters).await.unwrap_err(),
        "--drep-verification-key-file",
    );
    assert_eq!(spy.call_count(), 0);

    let drep_vote = VoteCreate {
        cold_verification_key_file: None,
        ..two_voters
    };
    cli.governance().vote_create(&drep_vote).await?;
    assert_eq!(
        spy.last_args(),
        Some(strings(&[
            "conway",
            "governance",
            "vote",
            "create",
            "--yes",
            "--governance-action-tx-id",
            "b1c2",
            "--governance-action-index",
            "0",
            "--drep-verification-key-file",
            "drep.vkey",
            "--out-file",
            "vote.json"
        ]))
    );
    Ok(())
}

#[tokio::test]
async fn build_raw_keeps_repeated_flags_in_order() -> TestResult {
    let spy = Arc::new(SpyRunner::new());
    let cli = node_cli(&spy, NetworkSelector::Testnet(1));

    let params = TransactionBuildRaw {
        tx_ins: strings(&["aa#0", "bb#1"]),
        tx_outs: strings(&["addr_test1q+1000000"]),
        fee: 0,
        invalid_hereafter: Some(900),
        certificate_files: Vec::new(),
        out_file: "tx.draft".into(),
    };
    cli.transaction().build_raw(&params).await?;

    assert_eq!(
        spy.last_args(),
        Some(strings(&[
            "conway",
            "transaction",
            "build-raw",
            "--tx-in",
            "aa#0",
            "--tx-in",
            "bb#1",
            "--tx-out",
            "addr_test1q+1000000",
            "--invalid-hereafter",
            "900",
            "--fee",
            "0",
            "--out-file",
            "tx.draft"
        ]))
    );

    let empty = TransactionBuildRaw::default();
    assert_invalid(cli.transaction().build_raw(&empty).await.unwrap_err(), "--tx-in");
    assert_eq!(spy.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn calculate_min_fee_reads_trailing_number() -> TestResult {
    let spy = Arc::new(SpyRunner::new().reply("171353 Lovelace"));
    let cli = node_cli(&spy, NetworkSelector::Testnet(1));

    let fee = cli
        .transaction()
        .calculate_min_fee(Path::new("tx.draft"), 2, Path::new("protocol.json"))
        .await?;

    assert_eq!(fee, 171353);
    assert_eq!(
        spy.last_args(),
        Some(strings(&[
            "conway",
            "transaction",
            "calculate-min-fee",
            "--tx-body-file",
            "tx.draft",
            "--witness-count",
            "2",
            "--protocol-params-file",
            "protocol.json"
        ]))
    );
    Ok(())
}

#[test]
fn trailing_number_parsing() {
    assert_eq!(parse_trailing_number("fee", "171353 Lovelace").ok(), Some(171353));
    assert_eq!(
        parse_trailing_number("fee", "Estimated transaction fee: Coin 180109").ok(),
        Some(180109)
    );
    assert!(matches!(
        parse_trailing_number("fee", "no number"),
        Err(CardanoError::UnexpectedOutput { .. })
    ));
}

#[test]
fn exactly_one_of_reports_all_names() {
    assert!(exactly_one_of(&[("--a", true), ("--b", false)]).is_ok());

    match exactly_one_of(&[("--a", true), ("--b", true), ("--c", false)]) {
        Err(CardanoError::InvalidParameters(msg)) => {
            assert!(msg.contains("--a, --b, --c"));
            assert!(msg.contains("got --a, --b"));
        }
        other => panic!("expected InvalidParameters, got {other:?}"),
    }
}

#[tokio::test]
async fn hw_cli_address_show_validates_stake_part() -> TestResult {
    let spy = Arc::new(SpyRunner::new().reply("addr_test1qp..."));
    let runner: Arc<dyn CommandRunner> = spy.clone();
    let hw = HwCli::new(
        Executable::unchecked("cardano-hw-cli", "/usr/bin/cardano-hw-cli", "1.13.0"),
        runner,
        &settings(BinaryKind::HwCli, NetworkSelector::Testnet(1)),
    );

    let both = AddressShow {
        payment_path: "1852H/1815H/0H/0/0".to_string(),
        staking_path: Some("1852H/1815H/0H/2/0".to_string()),
        staking_script_hash: Some("abcd".to_string()),
    };
    assert_invalid(hw.address_show(&both).await.unwrap_err(), "--staking-path");
    assert_eq!(spy.call_count(), 0);

    let by_path = AddressShow {
        staking_script_hash: None,
        ..both
    };
    let address = hw.address_show(&by_path).await?;
    assert_eq!(address, "addr_test1qp...");
    assert_eq!(
        spy.last_args(),
        Some(strings(&[
            "address",
            "show",
            "--payment-path",
            "1852H/1815H/0H/0/0",
            "--staking-path",
            "1852H/1815H/0H/2/0",
            "--testnet-magic",
            "1"
        ]))
    );
    Ok(())
}

#[tokio::test]
async fn hw_cli_witness_pairs_signing_and_out_files() -> TestResult {
    let spy = Arc::new(SpyRunner::new());
    let runner: Arc<dyn CommandRunner> = spy.clone();
    let hw = HwCli::new(
        Executable::unchecked("cardano-hw-cli", "/usr/bin/cardano-hw-cli", "1.13.0"),
        runner,
        &settings(BinaryKind::HwCli, NetworkSelector::Mainnet),
    );

    assert_invalid(
        hw.transaction_witness(Path::new("tx.raw"), &[]).await.unwrap_err(),
        "--hw-signing-file",
    );

    let witnesses = vec![
        (PathBuf::from("payment.hwsfile"), PathBuf::from("payment.witness")),
        (PathBuf::from("stake.hwsfile"), PathBuf::from("stake.witness")),
    ];
    hw.transaction_witness(Path::new("tx.raw"), &witnesses).await?;

    assert_eq!(
        spy.last_args(),
        Some(strings(&[
            "transaction",
            "witness",
            "--tx-file",
            "tx.raw",
            "--hw-signing-file",
            "payment.hwsfile",
            "--hw-signing-file",
            "stake.hwsfile",
            "--out-file",
            "payment.witness",
            "--out-file",
            "stake.witness",
            "--mainnet"
        ]))
    );
    Ok(())
}

#[tokio::test]
async fn mithril_snapshot_list_decodes_and_passes_env() -> TestResult {
    let reply = r#"[{
        "digest": "d1g3st",
        "network": "preprod",
        "beacon": {"network": "preprod", "epoch": 142, "immutable_file_number": 2764},
        "certificate_hash": "c3rt",
        "size": 2108521,
        "created_at": "2024-03-01T10:00:00Z",
        "compression_algorithm": "zstd",
        "cardano_node_version": "8.7.3"
    }]"#;
    let spy = Arc::new(SpyRunner::new().reply(reply));
    let runner: Arc<dyn CommandRunner> = spy.clone();
    let mithril = MithrilClient::new(
        Executable::unchecked("mithril-client", "/usr/bin/mithril-client", "0.5.0"),
        runner,
        &settings(BinaryKind::MithrilClient, NetworkSelector::Testnet(1)),
    )
    .with_aggregator_endpoint("https://aggregator.example/aggregator")
    .with_genesis_verification_key("5b3132");

    let snapshots = mithril.snapshot_list().await?;

    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].digest, "d1g3st");
    assert_eq!(snapshots[0].beacon.immutable_file_number, 2764);

    let call = &spy.calls()[0];
    assert_eq!(call.args, strings(&["cardano-db", "snapshot", "list", "--json"]));
    assert!(call.env.contains(&(
        "AGGREGATOR_ENDPOINT".to_string(),
        "https://aggregator.example/aggregator".to_string()
    )));
    assert!(call.env.contains(&(
        "GENESIS_VERIFICATION_KEY".to_string(),
        "5b3132".to_string()
    )));
    Ok(())
}

#[tokio::test]
async fn mithril_download_places_digest_before_flags() -> TestResult {
    let spy = Arc::new(SpyRunner::new());
    let runner: Arc<dyn CommandRunner> = spy.clone();
    let mithril = MithrilClient::new(
        Executable::unchecked("mithril-client", "/usr/bin/mithril-client", "0.5.0"),
        runner,
        &settings(BinaryKind::MithrilClient, NetworkSelector::Testnet(1)),
    );

    assert_invalid(
        mithril.download("  ", Path::new("db")).await.unwrap_err(),
        "digest",
    );
    mithril.download("latest", Path::new("db")).await?;

    assert_eq!(
        spy.last_args(),
        Some(strings(&["cardano-db", "download", "latest", "--download-dir", "db"]))
    );
    Ok(())
}

#[tokio::test]
async fn facade_from_config_resolves_configured_binary() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_executable("/opt/cardano/bin/cardano-cli", "");
    let locator = ExecutableLocator::with_fs(Arc::new(fs));

    let cfg = ConfigFileBuilder::new()
        .era(Era::Babbage)
        .testnet_magic(42)
        .binary_path(BinaryKind::NodeCli, "/opt/cardano/bin/cardano-cli")
        .socket_path("/tmp/node.socket")
        .build();

    let spy = Arc::new(SpyRunner::new().reply(TIP_JSON));
    let runner: Arc<dyn CommandRunner> = spy.clone();
    let cli = NodeCli::from_config(&cfg, &locator, runner)?;
    cli.query().tip().await?;

    let call = &spy.calls()[0];
    assert_eq!(call.program, PathBuf::from("/opt/cardano/bin/cardano-cli"));
    assert_eq!(
        call.args,
        strings(&["babbage", "query", "tip", "--testnet-magic", "42"])
    );
    assert!(call.env.contains(&(
        "CARDANO_NODE_SOCKET_PATH".to_string(),
        "/tmp/node.socket".to_string()
    )));
    Ok(())
}
