use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::ApiConfig;
use crate::models::Surah;
use crate::utils::hijri::{hijri_month_name, HijriInfo};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("remote lookups are disabled")]
    Disabled,
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API reported code {code}: {message}")]
    Unexpected { code: i64, message: String },
    #[error("API returned an invalid value: {0}")]
    Invalid(String),
}

/// Plain GET returning the response body.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String, ApiError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ramadan-companion/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, ApiError> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().map_err(|e| ApiError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(|e| ApiError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

// ─── Response shapes ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    status: serde_json::Value,
    data: serde_json::Value,
}

/// Both services wrap payloads as `{ code, status, data }`; anything but
/// code 200 is an error whose message sits in `data` or `status`.
fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.code != 200 {
        let message = match (&envelope.data, &envelope.status) {
            (serde_json::Value::String(s), _) | (_, serde_json::Value::String(s)) => s.clone(),
            _ => "unknown error".to_string(),
        };
        return Err(ApiError::Unexpected {
            code: envelope.code,
            message,
        });
    }
    Ok(serde_json::from_value(envelope.data)?)
}

#[derive(Debug, Deserialize)]
struct GToHData {
    hijri: RemoteHijri,
}

#[derive(Debug, Deserialize)]
struct RemoteHijri {
    day: String,
    year: String,
    month: RemoteMonth,
}

#[derive(Debug, Deserialize)]
struct RemoteMonth {
    number: usize,
}

pub fn parse_gtoh(body: &str) -> Result<HijriInfo, ApiError> {
    let data: GToHData = unwrap_envelope(body)?;
    let hijri = data.hijri;
    let day: usize = hijri
        .day
        .trim()
        .parse()
        .map_err(|_| ApiError::Invalid(format!("day '{}'", hijri.day)))?;
    let year: usize = hijri
        .year
        .trim()
        .parse()
        .map_err(|_| ApiError::Invalid(format!("year '{}'", hijri.year)))?;
    let month = hijri.month.number;
    if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
        return Err(ApiError::Invalid(format!("{}-{}-{}", day, month, year)));
    }
    Ok(HijriInfo {
        day,
        month,
        year,
        month_name: hijri_month_name(month).to_string(),
    })
}

pub fn parse_surahs(body: &str) -> Result<Vec<Surah>, ApiError> {
    unwrap_envelope(body)
}

// ─── Remote services ─────────────────────────────────────────────────────────

pub struct Remote {
    transport: Box<dyn Transport>,
    enabled: bool,
    aladhan_base: String,
    quran_base: String,
}

impl Remote {
    pub fn new(transport: Box<dyn Transport>, config: &ApiConfig) -> Self {
        Self {
            transport,
            enabled: config.enabled,
            aladhan_base: config.aladhan_base.trim_end_matches('/').to_string(),
            quran_base: config.quran_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(Box::new(transport), config))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn gtoh_url(&self, date: NaiveDate) -> String {
        format!("{}/gToH?date={}", self.aladhan_base, date.format("%d-%m-%Y"))
    }

    pub fn surah_url(&self) -> String {
        format!("{}/surah", self.quran_base)
    }

    pub fn fetch_body(&self, url: &str) -> Result<String, ApiError> {
        if !self.enabled {
            return Err(ApiError::Disabled);
        }
        self.transport.get(url)
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Canned responses keyed by URL; anything else fails like a dropped
    /// connection. Records every requested URL.
    #[derive(Default, Clone)]
    pub struct FakeTransport {
        pub responses: HashMap<String, String>,
        pub calls: Rc<RefCell<Vec<String>>>,
    }

    impl FakeTransport {
        pub fn with(mut self, url: &str, body: &str) -> Self {
            self.responses.insert(url.to_string(), body.to_string());
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, url: &str) -> Result<String, ApiError> {
            self.calls.borrow_mut().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or_else(|| ApiError::Transport {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                })
        }
    }

    pub fn gtoh_body(day: &str, month: usize, year: &str) -> String {
        format!(
            r#"{{"code":200,"status":"OK","data":{{"hijri":{{"date":"x","day":"{}","weekday":{{"en":"Al Sabt","ar":"x"}},"month":{{"number":{},"en":"Ramaḍān","ar":"x"}},"year":"{}"}},"gregorian":{{}}}}}}"#,
            day, month, year
        )
    }

    pub const SURAHS_BODY: &str = r#"{"code":200,"status":"OK","data":[
        {"number":1,"name":"سُورَةُ ٱلْفَاتِحَةِ","englishName":"Al-Faatiha","englishNameTranslation":"The Opening","numberOfAyahs":7,"revelationType":"Meccan"},
        {"number":2,"name":"سُورَةُ البَقَرَةِ","englishName":"Al-Baqara","englishNameTranslation":"The Cow","numberOfAyahs":286,"revelationType":"Medinan"}
    ]}"#;
}
