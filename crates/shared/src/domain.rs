use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReleaseYear {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ReleaseYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Fields decode leniently: a malformed entry gets blank fields instead of
/// failing the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Film {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub release_year: Option<ReleaseYear>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub director: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub box_office: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_rank")]
    pub rank: Option<f64>,
}

impl Film {
    pub fn title_text(&self) -> &str {
        display_field(self.title.as_deref())
    }

    pub fn director_text(&self) -> &str {
        display_field(self.director.as_deref())
    }

    pub fn box_office_text(&self) -> &str {
        display_field(self.box_office.as_deref())
    }

    pub fn country_text(&self) -> &str {
        display_field(self.country.as_deref())
    }

    pub fn release_year_text(&self) -> String {
        self.release_year
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Unranked records order below every ranked one.
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        match (self.rank, other.rank) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

pub fn display_field(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<ReleaseYear>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(ReleaseYear::Number(n)),
        Value::String(s) => Some(ReleaseYear::Text(s)),
        _ => None,
    })
}

fn lenient_rank<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
        _ => None,
    })
}
