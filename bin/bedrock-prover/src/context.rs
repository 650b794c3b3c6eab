use bedrock_config::ProverConfig;
use bedrock_prover::{OutputResolver, WithdrawalProver};
use bedrock_rpc_client::{L1ContractsClient, L2RpcClient};

use crate::errors::{DisplayableError, DisplayedError};

pub(crate) type Resolver = OutputResolver<L1ContractsClient, L1ContractsClient, L1ContractsClient>;

pub(crate) type Prover =
    WithdrawalProver<L1ContractsClient, L1ContractsClient, L1ContractsClient, L2RpcClient>;

pub(crate) async fn connect_resolver(config: &ProverConfig) -> Result<Resolver, DisplayedError> {
    let l1 = L1ContractsClient::connect(
        &config.l1.rpc_url,
        config.l1.portal_address,
        config.l1.l2_output_oracle_address,
    )
    .await
    .user_error(format!("failed to connect to L1 node at {}", config.l1.rpc_url))?;
    Ok(OutputResolver::new(l1.clone(), l1.clone(), l1))
}

pub(crate) async fn connect_prover(config: &ProverConfig) -> Result<Prover, DisplayedError> {
    let resolver = connect_resolver(config).await?;
    let l2 = L2RpcClient::connect(&config.l2.rpc_url)
        .await
        .user_error(format!("failed to connect to L2 node at {}", config.l2.rpc_url))?;
    Ok(WithdrawalProver::new(resolver, l2).with_message_passer(config.l2.message_passer_address))
}
