use crate::entities::{LaunchControl, Provider, ProviderAvailability, Selection};

fn is_available(availability: &[ProviderAvailability], provider: Provider) -> bool {
    availability
        .iter()
        .any(|a| a.provider == provider && a.available)
}

/// Decides which launch control is emphasized.
///
/// The system map is always offered. The third-party control is always
/// rendered so the layout stays put, but is only enabled when the app is
/// installed.
pub fn select(availability: &[ProviderAvailability], prefer_native: bool) -> Selection {
    let system = LaunchControl {
        provider: Provider::System,
        enabled: true,
    };
    let third_party = LaunchControl {
        provider: Provider::ThirdParty,
        enabled: is_available(availability, Provider::ThirdParty),
    };

    if !prefer_native && third_party.enabled {
        Selection {
            primary: third_party,
            secondary: system,
        }
    } else {
        Selection {
            primary: system,
            secondary: third_party,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn third_party(available: bool) -> Vec<ProviderAvailability> {
        vec![
            ProviderAvailability::new(Provider::Embedded, true),
            ProviderAvailability::new(Provider::System, true),
            ProviderAvailability::new(Provider::ThirdParty, available),
        ]
    }

    #[test]
    fn installed_third_party_is_primary_unless_native_preferred() {
        let selection = select(&third_party(true), false);
        assert_eq!(selection.primary.provider, Provider::ThirdParty);
        assert_eq!(selection.secondary.provider, Provider::System);

        let selection = select(&third_party(true), true);
        assert_eq!(selection.primary.provider, Provider::System);
        assert!(selection.secondary.enabled);
    }

    #[test]
    fn missing_third_party_stays_rendered_but_disabled() {
        let selection = select(&third_party(false), false);
        assert_eq!(selection.primary.provider, Provider::System);
        assert_eq!(
            selection.control(Provider::ThirdParty),
            Some(LaunchControl {
                provider: Provider::ThirdParty,
                enabled: false,
            })
        );
    }

    #[test]
    fn unknown_availability_counts_as_missing() {
        let selection = select(&[], false);
        assert_eq!(selection.primary.provider, Provider::System);
        assert!(!selection.secondary.enabled);
    }
}
