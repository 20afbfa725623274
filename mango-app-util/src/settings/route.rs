use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::compose::RouteSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
pub enum DomainStrategy {
    AsIs,
    #[serde(rename = "IPIfNonMatch")]
    #[strum(serialize = "IPIfNonMatch")]
    IpIfNonMatch,
    #[serde(rename = "IPOnDemand")]
    #[strum(serialize = "IPOnDemand")]
    IpOnDemand,
}

impl Default for DomainStrategy {
    fn default() -> Self {
        DomainStrategy::AsIs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DomainMatcher {
    Hybrid,
    Linear,
}

impl Default for DomainMatcher {
    fn default() -> Self {
        DomainMatcher::Hybrid
    }
}

/// Tag of one of the composed outbounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString, IntoStaticStr, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutboundTag {
    Proxy,
    Direct,
    Block,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct RouteRule {
    #[serde(rename(serialize = "__name__"))]
    pub name: String,
    #[serde(rename(serialize = "__enabled__"), default = "default_enabled")]
    pub enabled: bool,
    pub outbound_tag: OutboundTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_tag: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all(serialize = "camelCase"))]
pub struct RouteSettings {
    pub domain_strategy: DomainStrategy,
    pub domain_matcher: DomainMatcher,
    pub rules: Vec<RouteRule>,
}

impl RouteSource for RouteSettings {
    fn build_rules(&self) -> Value {
        let rules: Vec<_> = self
            .rules
            .iter()
            .filter(|r| r.enabled)
            .map(|r| {
                let mut rule = json!(r);
                rule["type"] = "field".into();
                rule
            })
            .collect();
        log::debug!(
            "{} of {} routing rules enabled",
            rules.len(),
            self.rules.len()
        );
        json!({
            "domainStrategy": self.domain_strategy,
            "domainMatcher": self.domain_matcher,
            "rules": rules,
        })
    }
}
