use crate::models::representative::Representative;

/// Case-insensitive substring match over name, facility/drug, location,
/// phone, and tags. Fax numbers are not searched.
pub fn matches_query(rep: &Representative, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    [
        rep.rep_name.as_deref(),
        rep.facility_and_drug.as_deref(),
        rep.location.as_deref(),
        rep.phone_number.as_deref(),
    ]
    .into_iter()
    .flatten()
    .chain(rep.tags.iter().map(String::as_str))
    .any(|field| field.to_lowercase().contains(&query))
}

pub fn filter_representatives(reps: Vec<Representative>, query: &str) -> Vec<Representative> {
    reps.into_iter()
        .filter(|rep| matches_query(rep, query))
        .collect()
}
