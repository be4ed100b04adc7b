//! GeoIP data structures.
//!
//! `GeoIpInfo` is the reported payload; the `Rdap*` structs mirror the parts
//! of an RDAP "ip network" object (RFC 9083) that the lookup reads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GeoIP lookup result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoIpInfo {
    /// Country code registered for the network
    pub country: Option<String>,
    /// Network name, or the registrant's name when the network has none
    pub organization: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RdapNetwork {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) country: Option<String>,
    #[serde(default)]
    pub(crate) entities: Vec<RdapEntity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RdapEntity {
    /// jCard: `["vcard", [[name, params, type, value], ...]]`
    #[serde(rename = "vcardArray", default)]
    pub(crate) vcard_array: Option<Value>,
}

impl RdapEntity {
    /// The vCard formatted name (`fn` property), if any.
    pub(crate) fn formatted_name(&self) -> Option<String> {
        self.vcard_array
            .as_ref()?
            .get(1)?
            .as_array()?
            .iter()
            .find_map(|property| {
                let property = property.as_array()?;
                if property.first()?.as_str()? != "fn" {
                    return None;
                }
                property
                    .get(3)?
                    .as_str()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(ToString::to_string)
            })
    }
}

impl From<RdapNetwork> for GeoIpInfo {
    fn from(network: RdapNetwork) -> Self {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let organization = non_empty(network.name)
            .or_else(|| network.entities.first().and_then(RdapEntity::formatted_name));

        GeoIpInfo {
            country: non_empty(network.country),
            organization,
        }
    }
}
