//! Authorization state machine of a deployed relay instance.

use alloy_primitives::{Address, B256};

use crate::{error::RelayError, event::DataSent, variant::Variant};

/// Per-instance relay state.
///
/// Constructed exactly once (the chain's constructor transaction); the owner
/// of the admin variant is fixed at construction and there is no
/// transfer-of-ownership operation. The only state transition is
/// construction itself; an instance never leaves the active state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayContract {
    variant: Variant,
    owner: Option<Address>,
}

impl RelayContract {
    /// Create the contract state as the constructor would, with `deployer`
    /// becoming the owner of an admin-variant instance.
    pub fn new(variant: Variant, deployer: Address) -> Self {
        let owner = match variant {
            Variant::Admin => Some(deployer),
            Variant::Public => None,
        };
        Self { variant, owner }
    }

    /// The authorization variant of this instance.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The fixed owner, `Some` only for the admin variant.
    pub fn owner(&self) -> Option<Address> {
        self.owner
    }

    /// The single write operation.
    ///
    /// Validates the target and (for the admin variant) the caller, then
    /// produces the event to append to the log. Nothing else is mutated:
    /// failure leaves no trace, success leaves only the event.
    pub fn send_data(
        &self,
        caller: Address,
        target: Address,
        owner_param: B256,
        action_ref: B256,
        topic: &str,
    ) -> Result<DataSent, RelayError> {
        if target == Address::ZERO {
            return Err(RelayError::InvalidTarget);
        }
        if let Some(owner) = self.owner
            && caller != owner
        {
            return Err(RelayError::Unauthorized);
        }
        Ok(DataSent {
            from: caller,
            to: target,
            owner_param,
            action_ref,
            topic: topic.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Address = Address::repeat_byte(0xAA);
    const OTHER: Address = Address::repeat_byte(0xBB);
    const TARGET: Address = Address::repeat_byte(0xCC);

    fn admin() -> RelayContract {
        RelayContract::new(Variant::Admin, OWNER)
    }

    fn public() -> RelayContract {
        RelayContract::new(Variant::Public, OWNER)
    }

    #[test]
    fn admin_owner_is_fixed_at_construction() {
        assert_eq!(admin().owner(), Some(OWNER));
        assert_eq!(public().owner(), None);
    }

    #[test]
    fn zero_target_fails_regardless_of_caller_and_variant() {
        for relay in [admin(), public()] {
            for caller in [OWNER, OTHER] {
                let err = relay
                    .send_data(caller, Address::ZERO, B256::ZERO, B256::ZERO, "x")
                    .unwrap_err();
                assert_eq!(err, RelayError::InvalidTarget);
            }
        }
    }

    #[test]
    fn admin_rejects_non_owner() {
        let err = admin()
            .send_data(OTHER, TARGET, B256::ZERO, B256::ZERO, "x")
            .unwrap_err();
        assert_eq!(err, RelayError::Unauthorized);
    }

    #[test]
    fn admin_accepts_owner() {
        let event = admin()
            .send_data(OWNER, TARGET, B256::repeat_byte(1), B256::repeat_byte(2), "x")
            .unwrap();
        assert_eq!(event.from, OWNER);
        assert_eq!(event.to, TARGET);
        assert_eq!(event.owner_param, B256::repeat_byte(1));
        assert_eq!(event.action_ref, B256::repeat_byte(2));
        assert_eq!(event.topic, "x");
    }

    #[test]
    fn public_accepts_any_caller() {
        for caller in [OWNER, OTHER] {
            let event = public()
                .send_data(caller, TARGET, B256::ZERO, B256::ZERO, "open")
                .unwrap();
            // Provenance: `from` is always the actual caller.
            assert_eq!(event.from, caller);
        }
    }

    #[test]
    fn sequential_calls_produce_independent_events() {
        let relay = public();
        let first = relay
            .send_data(OWNER, TARGET, B256::repeat_byte(1), B256::repeat_byte(2), "first")
            .unwrap();
        let second = relay
            .send_data(OTHER, OTHER, B256::repeat_byte(3), B256::repeat_byte(4), "second")
            .unwrap();
        assert_ne!(first, second);
        assert_eq!(first.topic, "first");
        assert_eq!(second.topic, "second");
    }
}
