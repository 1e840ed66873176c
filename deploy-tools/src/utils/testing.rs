// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! A scripted JSON-RPC node for deployment tests.

use alloy::primitives::{b256, Address, TxHash, U256};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, method},
    Mock, MockServer, Request, Respond, ResponseTemplate,
};

use crate::core::{
    artifact::CompiledArtifact,
    config::{AccountSecret, NetworkConfig},
};

/// First well-known development account.
pub const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const DEV_ADDRESS: Address = alloy::primitives::address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
/// Address of the first contract created by [`DEV_ADDRESS`].
pub const FIRST_CONTRACT: Address =
    alloy::primitives::address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const TX_HASH: TxHash =
    b256!("0x9d8c5b2c1a2f6f7e8d9c0b1a2f3e4d5c6b7a8f9e0d1c2b3a4f5e6d7c8b9a0f1e");
pub const CHAIN_ID: u64 = 31337;
pub const MINED_IN: u64 = 7;

/// Init code that deploys a runtime returning 42.
pub const INIT_CODE: &str = "0x69602a60005260206000f3600052600a6016f3";

pub fn artifact_json(name: &str) -> String {
    format!(r#"{{"contractName": "{name}", "abi": [], "bytecode": "{INIT_CODE}"}}"#)
}

pub fn artifact(name: &str) -> CompiledArtifact {
    CompiledArtifact::from_json(name, artifact_json(name).as_bytes()).unwrap()
}

pub fn network(url: impl Into<String>) -> NetworkConfig {
    NetworkConfig::new("local", url, vec![AccountSecret::new(DEV_KEY)])
}

fn quantity(value: U256) -> Value {
    json!(format!("{value:#x}"))
}

/// Replies to one JSON-RPC method, echoing the request id.
struct Reply(Result<Value, Value>);

impl Respond for Reply {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let id = serde_json::from_slice::<Value>(&request.body)
            .ok()
            .and_then(|body| body.get("id").cloned())
            .unwrap_or(Value::Null);
        let body = match &self.0 {
            Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
            Err(error) => json!({"jsonrpc": "2.0", "id": id, "error": error}),
        };
        ResponseTemplate::new(200).set_body_json(body)
    }
}

pub struct RpcStub {
    server: MockServer,
}

impl RpcStub {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.uri()
    }

    fn mock(rpc_method: &str, reply: Reply) -> Mock {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": rpc_method })))
            .respond_with(reply)
    }

    pub async fn result(&self, rpc_method: &str, result: Value) {
        Self::mock(rpc_method, Reply(Ok(result)))
            .mount(&self.server)
            .await;
    }

    /// Answers `rpc_method` with `result` only for its next `times` calls, ahead of any other
    /// mounted answer.
    pub async fn result_times(&self, rpc_method: &str, result: Value, times: u64) {
        Self::mock(rpc_method, Reply(Ok(result)))
            .up_to_n_times(times)
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Fails every call to `rpc_method`, ahead of any other mounted answer.
    pub async fn error(&self, rpc_method: &str, message: &str) {
        let error = json!({"code": -32000, "message": message});
        Self::mock(rpc_method, Reply(Err(error)))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Number of calls received for `rpc_method`.
    pub async fn calls(&self, rpc_method: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice::<Value>(&request.body).ok())
            .filter(|body| body["method"] == rpc_method)
            .count()
    }

    /// A healthy chain on which [`DEV_ADDRESS`] holds `balance` wei and has sent nothing yet.
    pub async fn chain(&self, balance: U256) {
        self.result("eth_chainId", quantity(U256::from(CHAIN_ID))).await;
        self.result("eth_getTransactionCount", quantity(U256::ZERO)).await;
        self.result("eth_estimateGas", quantity(U256::from(100_000u64))).await;
        self.result("eth_feeHistory", fee_history()).await;
        self.result("eth_getBalance", quantity(balance)).await;
        self.result("eth_sendRawTransaction", json!(TX_HASH)).await;
    }

    /// [`RpcStub::chain`] with a funded deployer whose transaction is mined successfully.
    pub async fn funded_chain(&self) {
        self.chain(U256::from(10u64).pow(U256::from(18u64))).await;
        self.result("eth_getTransactionReceipt", receipt(true)).await;
    }
}

/// Recent blocks at a base fee of 1 gwei, tipped 1 gwei.
pub fn fee_history() -> Value {
    json!({
        "oldestBlock": "0x1",
        "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00", "0x3b9aca00"],
        "gasUsedRatio": [0.5, 0.5],
        "reward": [["0x3b9aca00"], ["0x3b9aca00"]],
    })
}

/// Receipt of the deployment transaction, mined in block [`MINED_IN`].
pub fn receipt(success: bool) -> Value {
    json!({
        "type": "0x2",
        "status": if success { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0xea60",
        "logs": [],
        "logsBloom": format!("0x{}", "00".repeat(256)),
        "transactionHash": TX_HASH,
        "transactionIndex": "0x0",
        "blockHash": b256!("0x1111111111111111111111111111111111111111111111111111111111111111"),
        "blockNumber": quantity(U256::from(MINED_IN)),
        "gasUsed": "0xea60",
        "effectiveGasPrice": "0x3b9aca00",
        "from": DEV_ADDRESS,
        "to": null,
        "contractAddress": if success { json!(FIRST_CONTRACT) } else { Value::Null },
    })
}
