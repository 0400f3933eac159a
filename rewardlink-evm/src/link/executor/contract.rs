//! Solidity interface definitions for on-chain interactions.
//!
//! - [`IRewardLinkExecutor`]: verifies a signed `PaymentLink` and performs the batch transfer
//! - [`IERC20`]: balance and allowance reads for the approving wallet

use alloy_sol_types::sol;

sol! {
    /// Batch-transfer executor for signed payment links.
    ///
    /// `executeLink` rebuilds the `PaymentLink` struct from its arguments,
    /// checks the EIP-712 signature against `sender`, consumes `nonce` and
    /// transfers `amounts[i]` of `token` to `recipients[i]`.
    #[allow(missing_docs)]
    #[allow(clippy::too_many_arguments)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IRewardLinkExecutor {
        function executeLink(
            address token,
            address sender,
            address[] recipients,
            uint256[] amounts,
            uint256 nonce,
            uint256 expiry,
            bytes signature
        ) external;
        function getNonce(address sender) external view returns (uint256);
    }
}

sol! {
    /// Minimal ERC-20 interface for allowance and balance checks.
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
    }
}
