use crate::claims::ClaimSet;
use log::debug;
use std::collections::HashSet;

/// Claim carrying group/role URNs on EGI Check-in and other eduGAIN providers
pub const DEFAULT_ENTITLEMENT_CLAIM: &str = "eduperson_entitlement";

/// Decides whether a caller holds administrator rights
pub trait EntitlementEvaluator: Send + Sync {
    fn is_admin(&self, claims: &ClaimSet) -> bool;
}

/// Grants administrator rights when the caller's entitlements intersect a
/// static allow-list. Matching is exact string equality.
#[derive(Debug, Clone)]
pub struct AllowListEvaluator {
    claim: String,
    allow_list: HashSet<String>,
}

impl AllowListEvaluator {
    pub fn new<I, S>(claim: impl Into<String>, allow_list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            claim: claim.into(),
            allow_list: allow_list.into_iter().map(Into::into).collect(),
        }
    }

    pub fn claim(&self) -> &str {
        &self.claim
    }

    pub fn allow_list(&self) -> &HashSet<String> {
        &self.allow_list
    }
}

impl EntitlementEvaluator for AllowListEvaluator {
    fn is_admin(&self, claims: &ClaimSet) -> bool {
        let Some(entitlements) = claims.string_set(&self.claim) else {
            debug!("Claim '{}' is absent, caller is not an admin", self.claim);
            return false;
        };
        entitlements
            .iter()
            .any(|entitlement| self.allow_list.contains(*entitlement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn claims(value: Value) -> ClaimSet {
        serde_json::from_value(value).unwrap()
    }

    fn evaluator(allow_list: &[&str]) -> AllowListEvaluator {
        AllowListEvaluator::new(DEFAULT_ENTITLEMENT_CLAIM, allow_list.iter().copied())
    }

    #[test]
    fn test_intersection_grants_admin() {
        let evaluator = evaluator(&["admins"]);
        assert!(evaluator.is_admin(&claims(json!({
            "eduperson_entitlement": ["admins", "users"]
        }))));
        assert!(!evaluator.is_admin(&claims(json!({
            "eduperson_entitlement": ["users"]
        }))));
    }

    #[test]
    fn test_result_is_order_independent() {
        let evaluator = evaluator(&["urn:geant:egi.eu:group:perf:role=admin", "admins"]);
        let forward = claims(json!({"eduperson_entitlement": ["a", "b", "admins"]}));
        let backward = claims(json!({"eduperson_entitlement": ["admins", "b", "a"]}));
        assert_eq!(evaluator.is_admin(&forward), evaluator.is_admin(&backward));
        assert!(evaluator.is_admin(&forward));
    }

    #[test]
    fn test_no_prefix_or_partial_matching() {
        let evaluator = evaluator(&["urn:geant:egi.eu:group:perf"]);
        let claims = claims(json!({
            "eduperson_entitlement": [
                "urn:geant:egi.eu:group:perf:role=member",
                "urn:geant:egi.eu:group",
                "URN:GEANT:EGI.EU:GROUP:PERF"
            ]
        }));
        assert!(!evaluator.is_admin(&claims));
    }

    #[test]
    fn test_missing_claim_or_empty_allow_list() {
        assert!(!evaluator(&["admins"]).is_admin(&claims(json!({"sub": "alice"}))));
        assert!(!evaluator(&[]).is_admin(&claims(json!({
            "eduperson_entitlement": ["admins"]
        }))));
        assert!(!evaluator(&["admins"]).is_admin(&claims(json!({
            "eduperson_entitlement": []
        }))));
    }

    #[test]
    fn test_single_string_claim() {
        assert!(evaluator(&["admins"]).is_admin(&claims(json!({
            "eduperson_entitlement": "admins"
        }))));
    }

    #[test]
    fn test_custom_claim_name() {
        let evaluator = AllowListEvaluator::new("groups", ["admins"]);
        assert_eq!(evaluator.claim(), "groups");
        assert!(evaluator.is_admin(&claims(json!({"groups": ["admins"]}))));
        assert!(!evaluator.is_admin(&claims(json!({
            "eduperson_entitlement": ["admins"]
        }))));
    }
}
