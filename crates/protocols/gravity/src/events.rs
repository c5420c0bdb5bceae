//! Notifications emitted by pool state transitions

use bridge_core::OptionalEthAddress;
use serde::{Deserialize, Serialize};

/// Pool notification for indexers and relayers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PoolEvent {
    WithdrawalReceived {
        /// Bridge contract on the remote chain, if deployed
        contract: OptionalEthAddress,
        bridge_chain_id: u64,
        outgoing_tx_id: u64,
        nonce: u64,
    },
    WithdrawalCancelled {
        contract: OptionalEthAddress,
        bridge_chain_id: u64,
        outgoing_tx_id: u64,
    },
}

/// Receiver of pool notifications
pub trait EventSink {
    fn emit(&mut self, event: PoolEvent);
}

impl EventSink for Vec<PoolEvent> {
    fn emit(&mut self, event: PoolEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event = PoolEvent::WithdrawalCancelled {
            contract: None,
            bridge_chain_id: 1,
            outgoing_tx_id: 4,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "withdrawal_cancelled");
        assert!(json["contract"].is_null());
        assert_eq!(json["outgoing_tx_id"], 4);
    }
}
