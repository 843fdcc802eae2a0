use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Provider {
    Embedded,
    System,
    ThirdParty,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Embedded => "embedded",
            Self::System => "system",
            Self::ThirdParty => "thirdParty",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAvailability {
    pub provider: Provider,
    pub available: bool,
}

impl ProviderAvailability {
    pub fn new(provider: Provider, available: bool) -> Self {
        Self {
            provider,
            available,
        }
    }
}

/// A launch button as offered to the user. Disabled controls stay rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchControl {
    pub provider: Provider,
    pub enabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub primary: LaunchControl,
    pub secondary: LaunchControl,
}

impl Selection {
    pub fn control(&self, provider: Provider) -> Option<LaunchControl> {
        [self.primary, self.secondary]
            .into_iter()
            .find(|c| c.provider == provider)
    }
}
