//! Persisted network settings.
//!
//! Carried as data only; nothing in this crate connects anywhere.

use heapless::String;
use serde::{Deserialize, Serialize};

/// Capacity of each text field of the network record, in bytes.
///
/// Matches the 24-byte NUL-terminated fields of existing firmware records.
pub const WEB_FIELD_LEN: usize = 23;

/// Network and broker settings stored next to the blind calibration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "camelCase")]
pub struct WebConfig {
    /// Wi-Fi network name.
    #[serde(default)]
    pub ssid: String<WEB_FIELD_LEN>,
    /// Wi-Fi passphrase.
    #[serde(default)]
    pub password: String<WEB_FIELD_LEN>,
    /// MQTT user.
    #[serde(default)]
    pub mqtt_username: String<WEB_FIELD_LEN>,
    /// MQTT password.
    #[serde(default)]
    pub mqtt_password: String<WEB_FIELD_LEN>,
    /// MQTT broker host.
    #[serde(default)]
    pub mqtt_server: String<WEB_FIELD_LEN>,
    /// MQTT broker port.
    #[serde(default)]
    pub mqtt_port: u16,
    /// Over-the-air update password.
    #[serde(default)]
    pub ota_password: String<WEB_FIELD_LEN>,
}
