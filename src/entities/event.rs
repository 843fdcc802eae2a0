use serde::{Deserialize, Serialize};

use crate::entities::Provider;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    User,
    Programmatic,
    Launch,
}

/// Lifecycle notifications delivered to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum Event {
    NavigationLaunched { app: Provider },
    NavigationClosed { reason: CloseReason },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NavigationLaunched { .. } => "navigationLaunched",
            Self::NavigationClosed { .. } => "navigationClosed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_serialize_with_bridge_names() {
        let launched = Event::NavigationLaunched {
            app: Provider::ThirdParty,
        };
        assert_eq!(
            serde_json::to_value(launched).unwrap(),
            json!({"event": "navigationLaunched", "data": {"app": "thirdParty"}})
        );

        let closed = Event::NavigationClosed {
            reason: CloseReason::Programmatic,
        };
        assert_eq!(
            serde_json::to_value(closed).unwrap(),
            json!({"event": "navigationClosed", "data": {"reason": "programmatic"}})
        );
    }
}
