use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Number of records requested per page
pub const PAGE_SIZE: usize = 10;

/// One launch as returned by the launches endpoint.
///
/// Every field tolerates being absent, `null` or of the wrong type; a
/// malformed record is kept and rendered with defaults rather than failing
/// the whole page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchRecord {
    #[serde(deserialize_with = "lenient_flight_number")]
    pub flight_number: u64,
    #[serde(deserialize_with = "lenient_text")]
    pub mission_name: String,
    /// `None` when the API sends `null`; shown relative to the Unix epoch
    #[serde(deserialize_with = "lenient")]
    pub launch_date_utc: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub launch_success: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub upcoming: bool,
    #[serde(deserialize_with = "lenient")]
    pub links: LaunchLinks,
    #[serde(deserialize_with = "lenient")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchLinks {
    #[serde(deserialize_with = "lenient")]
    pub article_link: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub video_link: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub mission_patch_small: Option<String>,
}

/// Any value that does not fit `T` becomes `T::default()`.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Accepts integral floats and numeric strings as well as integers.
fn lenient_flight_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(number.unwrap_or_default())
}

/// Scalars are shown as they would print; anything else is empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Launch outcome as shown on the card badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaunchStatus {
    Success,
    Upcoming,
    Failed,
}

impl LaunchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchStatus::Success => "Success",
            LaunchStatus::Upcoming => "Upcoming",
            LaunchStatus::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for LaunchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl LaunchRecord {
    /// Decode one element of a page. Non-object elements become an empty record.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Success wins over upcoming; anything else counts as a failure.
    pub fn status(&self) -> LaunchStatus {
        if self.launch_success == Some(true) {
            LaunchStatus::Success
        } else if self.upcoming {
            LaunchStatus::Upcoming
        } else {
            LaunchStatus::Failed
        }
    }

    /// Non-empty detail text, if any
    pub fn details_text(&self) -> Option<&str> {
        self.details.as_deref().filter(|d| !d.is_empty())
    }
}

impl LaunchLinks {
    pub fn article(&self) -> Option<&str> {
        non_empty(&self.article_link)
    }

    pub fn video(&self) -> Option<&str> {
        non_empty(&self.video_link)
    }

    pub fn patch(&self) -> Option<&str> {
        non_empty(&self.mission_patch_small)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
