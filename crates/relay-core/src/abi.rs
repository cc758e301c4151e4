//! Solidity interface of the relay contracts.
//!
//! Both variants share the same `sendDataToTarget` signature and the same
//! `DataSentToTarget` event; only the admin variant exposes `getAdmin`.
//! These definitions drive calldata encoding, log encoding on the dev chain,
//! and typed log decoding.

use alloy_sol_types::sol;

sol! {
    /// Emitted once per successful `sendDataToTarget` call.
    ///
    /// `from` is the actual transaction sender, never a claimed identity.
    #[derive(Debug, PartialEq, Eq)]
    event DataSentToTarget(
        address indexed from,
        address indexed to,
        bytes32 ownerParam,
        bytes32 actref,
        string topic
    );

    /// The single write operation of both relay variants.
    #[derive(Debug, PartialEq, Eq)]
    function sendDataToTarget(
        address target,
        bytes32 ownerParam,
        bytes32 actref,
        string topic
    ) external;

    /// Read-only owner accessor (admin variant only).
    #[derive(Debug, PartialEq, Eq)]
    function getAdmin() external view returns (address);
}
