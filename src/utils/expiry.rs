//! Medication expiry classification.
//!
//! Days remaining is the ceiling of the time left divided by one day, so an
//! item expiring 29.5 days from now has 30 days remaining. Anything strictly
//! past its expiry instant is expired, whatever the rounding says.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::models::medication::{Medication, MedicationExpiryView};

const MS_PER_DAY: i64 = 86_400_000;

/// Items expiring within this many days are flagged.
pub const WARNING_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryStatus {
    NoDate,
    Expired,
    Warning,
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryInfo {
    pub status: ExpiryStatus,
    pub days_remaining: Option<i64>,
}

/// Parses a stored expiry date. Date-only values are midnight UTC.
/// Accepts `YYYY-MM-DD`, RFC 3339, and the `MM-DD-YYYY` display format
/// that edit forms send back.
pub fn parse_expiry_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d", "%m-%d-%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn ceil_days(ms: i64) -> i64 {
    let whole = ms.div_euclid(MS_PER_DAY);
    if ms.rem_euclid(MS_PER_DAY) == 0 {
        whole
    } else {
        whole + 1
    }
}

pub fn classify(expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> ExpiryInfo {
    let Some(expiry) = expiry else {
        return ExpiryInfo {
            status: ExpiryStatus::NoDate,
            days_remaining: None,
        };
    };

    let days_remaining = ceil_days((expiry - now).num_milliseconds());
    let status = if expiry < now {
        ExpiryStatus::Expired
    } else if days_remaining <= WARNING_WINDOW_DAYS {
        ExpiryStatus::Warning
    } else {
        ExpiryStatus::Ok
    };

    ExpiryInfo {
        status,
        days_remaining: Some(days_remaining),
    }
}

/// Classifies a stored date string; blank or unreadable dates count as absent.
pub fn classify_str(raw: Option<&str>, now: DateTime<Utc>) -> ExpiryInfo {
    classify(raw.and_then(parse_expiry_date), now)
}

/// Sorts ascending by expiry date. Undated and unreadable entries go last,
/// keeping their relative order.
pub fn sort_by_expiry(meds: &mut [Medication]) {
    meds.sort_by_cached_key(|med| match med.expiry_date.as_deref().and_then(parse_expiry_date) {
        Some(date) => (false, Some(date)),
        None => (true, None),
    });
}

pub fn expiry_view(mut meds: Vec<Medication>, now: DateTime<Utc>) -> Vec<MedicationExpiryView> {
    sort_by_expiry(&mut meds);
    meds.into_iter()
        .map(|medication| {
            let expiry = classify_str(medication.expiry_date.as_deref(), now);
            MedicationExpiryView { medication, expiry }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn med(id: &str, expiry: Option<&str>) -> Medication {
        Medication {
            id: id.to_string(),
            med_name: Some(id.to_string()),
            expiry_date: expiry.map(String::from),
            dosage: None,
            lot_number: None,
            med_tags: vec![],
            rep_info: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_parse_formats() {
        let midnight = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(parse_expiry_date("2025-01-15"), Some(midnight));
        assert_eq!(parse_expiry_date("01-15-2025"), Some(midnight));
        assert_eq!(parse_expiry_date("2025-01-15T00:00:00.000Z"), Some(midnight));
        assert_eq!(parse_expiry_date(""), None);
        assert_eq!(parse_expiry_date("next tuesday"), None);
    }

    #[test]
    fn test_no_date() {
        let info = classify_str(None, now());
        assert_eq!(info.status, ExpiryStatus::NoDate);
        assert_eq!(info.days_remaining, None);

        assert_eq!(classify_str(Some("  "), now()).status, ExpiryStatus::NoDate);
        assert_eq!(classify_str(Some("soon"), now()).status, ExpiryStatus::NoDate);
    }

    #[test]
    fn test_expired_when_strictly_past() {
        // twelve hours ago rounds up to zero days but is still expired
        let info = classify_str(Some("2025-06-01"), now());
        assert_eq!(info.status, ExpiryStatus::Expired);
        assert_eq!(info.days_remaining, Some(0));

        let info = classify_str(Some("2025-05-30"), now());
        assert_eq!(info.status, ExpiryStatus::Expired);
        assert_eq!(info.days_remaining, Some(-2));
    }

    #[test]
    fn test_warning_window() {
        let info = classify(Some(now()), now());
        assert_eq!(info.status, ExpiryStatus::Warning);
        assert_eq!(info.days_remaining, Some(0));

        let info = classify_str(Some("2025-06-02"), now());
        assert_eq!(info.status, ExpiryStatus::Warning);
        assert_eq!(info.days_remaining, Some(1));

        let info = classify_str(Some("2025-07-01"), now());
        assert_eq!(info.status, ExpiryStatus::Warning);
        assert_eq!(info.days_remaining, Some(30));
    }

    #[test]
    fn test_ok_beyond_window() {
        let info = classify_str(Some("2025-07-02"), now());
        assert_eq!(info.status, ExpiryStatus::Ok);
        assert_eq!(info.days_remaining, Some(31));
    }

    #[test]
    fn test_exact_day_boundary() {
        let expiry = now() + chrono::Duration::days(30);
        assert_eq!(classify(Some(expiry), now()).days_remaining, Some(30));
        assert_eq!(classify(Some(expiry), now()).status, ExpiryStatus::Warning);

        let expiry = expiry + chrono::Duration::milliseconds(1);
        assert_eq!(classify(Some(expiry), now()).status, ExpiryStatus::Ok);
    }

    #[test]
    fn test_sort_and_classify_view() {
        let meds = vec![
            med("later", Some("2025-01-01")),
            med("undated", None),
            med("earlier", Some("2024-01-01")),
            med("garbled", Some("n/a")),
        ];
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let view = expiry_view(meds, now);
        let order: Vec<&str> = view.iter().map(|v| v.medication.id.as_str()).collect();
        assert_eq!(order, vec!["earlier", "later", "undated", "garbled"]);

        assert_eq!(view[0].expiry.status, ExpiryStatus::Expired);
        assert_eq!(view[1].expiry.status, ExpiryStatus::Ok);
        assert_eq!(view[1].expiry.days_remaining, Some(214));
        assert_eq!(view[2].expiry.status, ExpiryStatus::NoDate);
        assert_eq!(view[3].expiry.status, ExpiryStatus::NoDate);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(classify(None, now())).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "no-date", "daysRemaining": null }));

        let json = serde_json::to_value(classify_str(Some("2025-06-11"), now())).unwrap();
        assert_eq!(json["status"], "warning");
        assert_eq!(json["daysRemaining"], 10);
    }
}
