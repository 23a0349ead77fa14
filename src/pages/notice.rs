use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// Transient message shown at the top of the next rendered page.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: Level,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: Level::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: Level::Error,
        }
    }

    /// Read back from the `notice`/`level` query parameters.
    pub fn from_query(notice: Option<&str>, level: Option<&str>) -> Option<Self> {
        let message = notice.map(str::trim).filter(|m| !m.is_empty())?;
        Some(match level {
            Some("success") => Self::success(message),
            _ => Self::error(message),
        })
    }

    /// `location` with this notice appended to its query string.
    pub fn attach(&self, location: &str) -> String {
        let separator = if location.contains('?') { '&' } else { '?' };
        let level = match self.level {
            Level::Success => "success",
            Level::Error => "error",
        };
        format!(
            "{location}{separator}notice={}&level={level}",
            urlencoding::encode(&self.message)
        )
    }
}
