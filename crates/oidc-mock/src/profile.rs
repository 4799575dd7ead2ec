//! Synthetic identity claims keyed by authentication-context value.

use crate::responses::UserInfoClaims;
use crate::store::generate_subject;

/// acr value for the mobile-ID authentication flow.
pub const ACR_MOBILE_ID: &str = "urn:eparaksts:authentication:flow:mobileid";

/// acr value for the smart-card plugin authentication flow.
pub const ACR_SMART_CARD: &str = "urn:eparaksts:authentication:flow:sc_plugin";

const AMR_MOBILE_ID: &str =
    "urn:eparaksts:tws:policies:authentication:adaptive:methods:mobileid";
const AMR_SMART_CARD: &str =
    "urn:eparaksts:tws:policies:authentication:adaptive:methods:sc_plugin";
const AMR_DEFAULT: &str = "urn:authentication:adaptive:methods:plugin";

/// Domain claim asserted for every subject.
const SUBJECT_DOMAIN: &str = "citizen";

/// Fixed authentication-context class asserted in every claims payload.
const ACR_CLAIM: &str = "urn:safelayer:tws:policies:authentication:level:high";

/// Static identity-profile fields loaded from configuration.
///
/// Maps a token's acr value to the method reference and person names asserted
/// in the userinfo claims. Unrecognized acr values fall back to the default
/// entry (plugin method with the smart-card names).
#[derive(Debug, Clone)]
pub struct IdentityProfiles {
    pub serial_number: String,
    pub mobile_given_name: String,
    pub mobile_family_name: String,
    pub sc_given_name: String,
    pub sc_family_name: String,
}

struct ResolvedProfile<'a> {
    amr: &'static str,
    given_name: &'a str,
    family_name: &'a str,
}

impl IdentityProfiles {
    fn resolve(&self, acr_value: &str) -> ResolvedProfile<'_> {
        match acr_value {
            ACR_MOBILE_ID => ResolvedProfile {
                amr: AMR_MOBILE_ID,
                given_name: &self.mobile_given_name,
                family_name: &self.mobile_family_name,
            },
            ACR_SMART_CARD => ResolvedProfile {
                amr: AMR_SMART_CARD,
                given_name: &self.sc_given_name,
                family_name: &self.sc_family_name,
            },
            _ => ResolvedProfile {
                amr: AMR_DEFAULT,
                given_name: &self.sc_given_name,
                family_name: &self.sc_family_name,
            },
        }
    }

    /// Builds the userinfo claims payload for a token's acr value.
    ///
    /// The subject identifier is freshly generated on every call; it is not
    /// stable across repeated calls with the same token.
    pub fn claims_for(&self, acr_value: &str) -> UserInfoClaims {
        let profile = self.resolve(acr_value);

        UserInfoClaims {
            sub: generate_subject(),
            domain: SUBJECT_DOMAIN.to_string(),
            acr: ACR_CLAIM.to_string(),
            amr: vec![profile.amr.to_string()],
            given_name: profile.given_name.to_string(),
            family_name: profile.family_name.to_string(),
            name: format!("{} {}", profile.given_name, profile.family_name),
            serial_number: self.serial_number.clone(),
            eips: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profiles() -> IdentityProfiles {
        IdentityProfiles {
            serial_number: "PNOLV-010180-10006".to_string(),
            mobile_given_name: "Andris".to_string(),
            mobile_family_name: "Paraudziņš".to_string(),
            sc_given_name: "Anna".to_string(),
            sc_family_name: "Liepa".to_string(),
        }
    }

    #[test]
    fn mobile_id_acr_maps_to_mobile_profile() {
        let claims = test_profiles().claims_for(ACR_MOBILE_ID);

        assert_eq!(
            claims.amr,
            vec!["urn:eparaksts:tws:policies:authentication:adaptive:methods:mobileid"]
        );
        assert_eq!(claims.given_name, "Andris");
        assert_eq!(claims.family_name, "Paraudziņš");
        assert_eq!(claims.name, "Andris Paraudziņš");
    }

    #[test]
    fn smart_card_acr_maps_to_smart_card_profile() {
        let claims = test_profiles().claims_for(ACR_SMART_CARD);

        assert_eq!(
            claims.amr,
            vec!["urn:eparaksts:tws:policies:authentication:adaptive:methods:sc_plugin"]
        );
        assert_eq!(claims.given_name, "Anna");
        assert_eq!(claims.family_name, "Liepa");
    }

    #[test]
    fn unknown_acr_falls_back_to_default_entry() {
        let claims = test_profiles().claims_for("urn:something:else");

        assert_eq!(claims.amr, vec!["urn:authentication:adaptive:methods:plugin"]);
        assert_eq!(claims.given_name, "Anna");
        assert_eq!(claims.family_name, "Liepa");
    }

    #[test]
    fn fixed_claims_are_constant() {
        let claims = test_profiles().claims_for(ACR_MOBILE_ID);

        assert_eq!(claims.domain, "citizen");
        assert_eq!(
            claims.acr,
            "urn:safelayer:tws:policies:authentication:level:high"
        );
        assert_eq!(claims.serial_number, "PNOLV-010180-10006");
        assert_eq!(claims.eips, "");
    }

    #[test]
    fn subject_is_fresh_on_every_call() {
        let profiles = test_profiles();
        let first = profiles.claims_for(ACR_MOBILE_ID);
        let second = profiles.claims_for(ACR_MOBILE_ID);
        assert_ne!(first.sub, second.sub);
    }
}
