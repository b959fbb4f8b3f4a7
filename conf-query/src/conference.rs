//! Conference records and the rules applied when they are created.

use crate::filter::Field;
use chrono::{Datelike, NaiveDate};
use miniserde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// City stored when the form leaves it empty.
pub const DEFAULT_CITY: &str = "Default City";

/// Topics stored when the form leaves them empty.
pub const DEFAULT_TOPICS: [&str; 2] = ["Default", "Topic"];

/// Conferences with at most this many seats left are announced as nearly sold out.
pub const NEARLY_SOLD_OUT_SEATS: i64 = 5;

/// Conference as exchanged with clients (JSON, camelCase keys).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConferenceForm {
    /// Conference name, required.
    pub name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Organizer's user id; ignored on creation.
    #[serde(rename = "organizerUserId")]
    pub organizer_user_id: Option<String>,
    /// Topics, defaulted when empty.
    pub topics: Option<Vec<String>>,
    /// City, defaulted when missing.
    pub city: Option<String>,
    /// `YYYY-MM-DD`, optionally followed by a time.
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`, optionally followed by a time.
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    /// Capacity.
    #[serde(rename = "maxAttendees")]
    pub max_attendees: Option<i64>,
    /// Seats left.
    #[serde(rename = "seatsAvailable")]
    pub seats_available: Option<i64>,
}

/// A stored conference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conference {
    /// Conference name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// User id of the organizer.
    pub organizer_user_id: String,
    /// Topics; a repeated property.
    pub topics: Vec<String>,
    /// Host city.
    pub city: String,
    /// First day.
    pub start_date: Option<NaiveDate>,
    /// Last day.
    pub end_date: Option<NaiveDate>,
    /// Month of `start_date`, 0 when there is no start date.
    pub month: i64,
    /// Capacity, 0 when unset.
    pub max_attendees: i64,
    /// Seats left.
    pub seats_available: i64,
}

/// Borrowed view of one queryable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyValue<'a> {
    /// Integer property.
    Int(i64),
    /// String property.
    Str(&'a str),
    /// Repeated string property.
    List(&'a [String]),
}

/// Errors raised while building conferences from client input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConferenceError {
    /// The `name` field is missing or empty.
    MissingName,
    /// A date is not `YYYY-MM-DD`.
    InvalidDate {
        /// Form key holding the date.
        field: &'static str,
        /// The value as supplied.
        value: String,
    },
    /// Conference data is not valid JSON for the expected shape.
    InvalidJson,
    /// The attendee already holds a seat.
    AlreadyRegistered,
    /// Every seat is taken.
    NoSeatsAvailable,
}

impl fmt::Display for ConferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Conference 'name' field required"),
            Self::InvalidDate { field, value } => {
                write!(f, "'{field}' must be a YYYY-MM-DD date, got '{value}'")
            },
            Self::InvalidJson => write!(f, "Invalid conference JSON"),
            Self::AlreadyRegistered => {
                write!(f, "You have already registered for this conference")
            },
            Self::NoSeatsAvailable => write!(f, "There are no seats available."),
        }
    }
}

impl std::error::Error for ConferenceError {}

impl Conference {
    /// Create a new conference from a client form.
    ///
    /// Empty fields get their defaults, `month` is derived from the start
    /// date, and a positive `maxAttendees` opens that many seats.
    ///
    /// ```
    /// use conf_query::{Conference, ConferenceForm};
    ///
    /// let form = ConferenceForm {
    ///     name: Some("RustConf".into()),
    ///     start_date: Some("2024-09-10T00:00:00".into()),
    ///     max_attendees: Some(300),
    ///     ..ConferenceForm::default()
    /// };
    /// let conf = Conference::from_form(form, "organizer-1").unwrap();
    /// assert_eq!(conf.month, 9);
    /// assert_eq!(conf.seats_available, 300);
    /// assert_eq!(conf.city, "Default City");
    /// ```
    pub fn from_form(
        form: ConferenceForm,
        organizer_user_id: impl Into<String>,
    ) -> Result<Self, ConferenceError> {
        let mut conf = Self::build(form, organizer_user_id.into())?;
        if conf.max_attendees > 0 {
            conf.seats_available = conf.max_attendees;
        }
        log::debug!("created conference `{}` in month {}", conf.name, conf.month);
        Ok(conf)
    }

    /// Load a previously stored conference, keeping its seat count.
    pub fn from_stored(form: ConferenceForm) -> Result<Self, ConferenceError> {
        let organizer = form.organizer_user_id.clone().unwrap_or_default();
        Self::build(form, organizer)
    }

    fn build(form: ConferenceForm, organizer_user_id: String) -> Result<Self, ConferenceError> {
        let name = match form.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ConferenceError::MissingName),
        };

        let start_date = parse_date("startDate", form.start_date.as_deref())?;
        let end_date = parse_date("endDate", form.end_date.as_deref())?;

        let topics = match form.topics {
            Some(topics) if !topics.is_empty() => topics,
            _ => DEFAULT_TOPICS.iter().map(|t| (*t).to_string()).collect(),
        };

        Ok(Self {
            name,
            description: form.description,
            organizer_user_id,
            topics,
            city: form.city.unwrap_or_else(|| DEFAULT_CITY.to_string()),
            month: start_date.map_or(0, |d| i64::from(d.month())),
            start_date,
            end_date,
            max_attendees: form.max_attendees.unwrap_or(0),
            seats_available: form.seats_available.unwrap_or(0),
        })
    }

    /// Render back into the client form.
    pub fn to_form(&self) -> ConferenceForm {
        ConferenceForm {
            name: Some(self.name.clone()),
            description: self.description.clone(),
            organizer_user_id: Some(self.organizer_user_id.clone()),
            topics: Some(self.topics.clone()),
            city: Some(self.city.clone()),
            start_date: self.start_date.map(|d| d.to_string()),
            end_date: self.end_date.map(|d| d.to_string()),
            max_attendees: Some(self.max_attendees),
            seats_available: Some(self.seats_available),
        }
    }

    /// The stored value behind a filter field.
    pub fn property(&self, field: Field) -> PropertyValue<'_> {
        match field {
            Field::City => PropertyValue::Str(&self.city),
            Field::Topic => PropertyValue::List(&self.topics),
            Field::Month => PropertyValue::Int(self.month),
            Field::MaxAttendees => PropertyValue::Int(self.max_attendees),
        }
    }

    /// Take a seat for an attendee.
    ///
    /// `attending` holds the keys of the conferences the attendee is
    /// registered for; `key` identifies this conference within it.
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use conf_query::{Conference, ConferenceError, ConferenceForm};
    ///
    /// let form = ConferenceForm {
    ///     name: Some("RustConf".into()),
    ///     max_attendees: Some(1),
    ///     ..ConferenceForm::default()
    /// };
    /// let mut conf = Conference::from_form(form, "organizer-1").unwrap();
    /// let mut attending = BTreeSet::new();
    ///
    /// conf.register(&mut attending, "rustconf").unwrap();
    /// assert_eq!(conf.seats_available, 0);
    /// assert_eq!(
    ///     conf.register(&mut BTreeSet::new(), "rustconf"),
    ///     Err(ConferenceError::NoSeatsAvailable)
    /// );
    /// ```
    pub fn register(
        &mut self,
        attending: &mut BTreeSet<String>,
        key: &str,
    ) -> Result<(), ConferenceError> {
        if attending.contains(key) {
            return Err(ConferenceError::AlreadyRegistered);
        }
        if self.seats_available <= 0 {
            return Err(ConferenceError::NoSeatsAvailable);
        }
        attending.insert(key.to_string());
        self.seats_available -= 1;
        log::debug!("registered for `{}`, {} seats left", self.name, self.seats_available);
        Ok(())
    }

    /// Give back an attendee's seat. Returns `false` if they held none.
    pub fn unregister(&mut self, attending: &mut BTreeSet<String>, key: &str) -> bool {
        if !attending.remove(key) {
            return false;
        }
        self.seats_available += 1;
        true
    }

    /// Whether a few seats, but not zero, are left.
    pub const fn is_nearly_sold_out(&self) -> bool {
        self.seats_available > 0 && self.seats_available <= NEARLY_SOLD_OUT_SEATS
    }
}

/// Parse stored conferences from a JSON array of forms.
pub fn parse_conferences(json_str: &str) -> Result<Vec<Conference>, ConferenceError> {
    let forms: Vec<ConferenceForm> =
        miniserde::json::from_str(json_str).map_err(|_| ConferenceError::InvalidJson)?;
    forms.into_iter().map(Conference::from_stored).collect()
}

/// Dates are read from their first ten characters, so timestamps are accepted.
fn parse_date(field: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>, ConferenceError> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ConferenceError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}

/// Announcement listing conferences that are nearly sold out.
///
/// Returns `None` when no conference qualifies.
pub fn nearly_sold_out_announcement(conferences: &[Conference]) -> Option<String> {
    let names: Vec<&str> = conferences
        .iter()
        .filter(|c| c.is_nearly_sold_out())
        .map(|c| c.name.as_str())
        .collect();

    if names.is_empty() {
        return None;
    }

    Some(format!(
        "Last chance to attend! The following conferences are nearly sold out: {}",
        names.join(", ")
    ))
}

/// Announcement naming the featured speaker.
pub fn featured_speaker_announcement(speaker: Option<&str>) -> String {
    match speaker {
        Some(speaker) if !speaker.is_empty() => format!("The featured speaker is {speaker}"),
        _ => "Nothing now.".to_string(),
    }
}
