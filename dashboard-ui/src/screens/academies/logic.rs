//! Academy screen pure logic — no RSX, no signals

use shared_types::{empty_to_none, Academy};

use crate::api::academies::{CreateAcademyRequest, UpdateAcademyRequest};

use super::types::{AcademyForm, ArchiveFilter};

/// Local validation. A form that fails here never reaches the network.
pub fn validate_form(form: &AcademyForm) -> Result<(), String> {
    if form.name.trim().is_empty() || form.name_ar.trim().is_empty() {
        return Err("Name and Arabic name are required".to_string());
    }
    if let Some(email) = empty_to_none(&form.contact_email) {
        if !email.contains('@') {
            return Err("Contact email must be a valid address".to_string());
        }
    }
    Ok(())
}

/// Trimmed names; optional fields become absent when blank so the server
/// derives its own defaults (the slug in particular).
pub fn build_create_request(form: &AcademyForm) -> CreateAcademyRequest {
    CreateAcademyRequest {
        name: form.name.trim().to_string(),
        name_ar: form.name_ar.trim().to_string(),
        slug: empty_to_none(&form.slug),
        city: empty_to_none(&form.city),
        contact_email: empty_to_none(&form.contact_email),
    }
}

pub fn build_update_request(form: &AcademyForm) -> UpdateAcademyRequest {
    UpdateAcademyRequest {
        name: form.name.trim().to_string(),
        name_ar: form.name_ar.trim().to_string(),
        slug: empty_to_none(&form.slug),
        city: empty_to_none(&form.city),
        contact_email: empty_to_none(&form.contact_email),
    }
}

pub fn filter_academies(list: &[Academy], filter: ArchiveFilter, query: &str) -> Vec<Academy> {
    let needle = query.trim().to_lowercase();
    list.iter()
        .filter(|a| matches!(filter, ArchiveFilter::All) || !a.archived)
        .filter(|a| {
            needle.is_empty()
                || a.name.to_lowercase().contains(&needle)
                || a.name_ar.contains(query.trim())
                || a.slug.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Flip the archived flag in place. Returns the prior row so a failed
/// call can roll the flip back.
pub fn apply_archived(list: &mut [Academy], id: &str, archived: bool) -> Option<Academy> {
    let row = list.iter_mut().find(|a| a.id == id)?;
    let snapshot = row.clone();
    row.archived = archived;
    Some(snapshot)
}

/// Put a snapshot back after a failed optimistic flip.
pub fn restore_row(list: &mut [Academy], snapshot: Academy) {
    if let Some(row) = list.iter_mut().find(|a| a.id == snapshot.id) {
        *row = snapshot;
    }
}

/// Replace a row with the version the server returned.
pub fn replace_row(list: &mut [Academy], updated: Academy) {
    if let Some(row) = list.iter_mut().find(|a| a.id == updated.id) {
        *row = updated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn academy(id: &str, name: &str, archived: bool) -> Academy {
        Academy {
            id: id.to_string(),
            name: name.to_string(),
            name_ar: format!("{name} ar"),
            slug: name.to_lowercase().replace(' ', "-"),
            city: None,
            contact_email: None,
            archived,
            created_at: Utc::now(),
        }
    }

    fn valid_form() -> AcademyForm {
        AcademyForm {
            name: "Jeddah United".to_string(),
            name_ar: "نادي جدة".to_string(),
            slug: String::new(),
            city: String::new(),
            contact_email: String::new(),
        }
    }

    #[test]
    fn validation_requires_both_names() {
        let mut form = valid_form();
        assert!(validate_form(&form).is_ok());

        form.name = "   ".to_string();
        assert_eq!(
            validate_form(&form),
            Err("Name and Arabic name are required".to_string())
        );

        form = valid_form();
        form.name_ar = String::new();
        assert_eq!(
            validate_form(&form),
            Err("Name and Arabic name are required".to_string())
        );
    }

    #[test]
    fn validation_checks_email_only_when_present() {
        let mut form = valid_form();
        form.contact_email = "not-an-email".to_string();
        assert!(validate_form(&form).is_err());

        form.contact_email = "office@jeddah.example".to_string();
        assert!(validate_form(&form).is_ok());

        form.contact_email = "   ".to_string();
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn create_request_drops_blank_optionals() {
        let mut form = valid_form();
        form.name = "  Jeddah United  ".to_string();
        form.slug = "".to_string();
        form.city = "  ".to_string();

        let request = build_create_request(&form);
        assert_eq!(request.name, "Jeddah United");
        assert_eq!(request.name_ar, "نادي جدة");
        assert_eq!(request.slug, None);
        assert_eq!(request.city, None);
        assert_eq!(request.contact_email, None);
    }

    #[test]
    fn create_request_keeps_provided_slug() {
        let mut form = valid_form();
        form.slug = " jeddah-u ".to_string();
        let request = build_create_request(&form);
        assert_eq!(request.slug, Some("jeddah-u".to_string()));
    }

    #[test]
    fn filter_hides_archived_by_default() {
        let list = vec![
            academy("a1", "Jeddah United", false),
            academy("a2", "Old Club", true),
        ];

        let active = filter_academies(&list, ArchiveFilter::Active, "");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "a1");

        let all = filter_academies(&list, ArchiveFilter::All, "");
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn filter_matches_name_and_slug() {
        let list = vec![
            academy("a1", "Jeddah United", false),
            academy("a2", "Riyadh Stars", false),
        ];

        assert_eq!(filter_academies(&list, ArchiveFilter::All, "jeddah").len(), 1);
        assert_eq!(
            filter_academies(&list, ArchiveFilter::All, "riyadh-stars").len(),
            1
        );
        assert_eq!(filter_academies(&list, ArchiveFilter::All, "dammam").len(), 0);
    }

    #[test]
    fn archive_flip_returns_snapshot_and_rolls_back() {
        let mut list = vec![academy("a1", "Jeddah United", false)];

        let snapshot = apply_archived(&mut list, "a1", true).expect("row exists");
        assert!(list[0].archived);
        assert!(!snapshot.archived);

        restore_row(&mut list, snapshot);
        assert!(!list[0].archived);
    }

    #[test]
    fn archive_flip_on_unknown_row_is_none() {
        let mut list = vec![academy("a1", "Jeddah United", false)];
        assert!(apply_archived(&mut list, "missing", true).is_none());
        assert!(!list[0].archived);
    }

    #[test]
    fn replace_row_swaps_in_server_version() {
        let mut list = vec![academy("a1", "Jeddah United", false)];
        let mut updated = academy("a1", "Jeddah United FC", false);
        updated.slug = "jeddah-united-fc".to_string();

        replace_row(&mut list, updated.clone());
        assert_eq!(list[0].name, "Jeddah United FC");
        assert_eq!(list[0].slug, "jeddah-united-fc");

        // Unknown ids leave the list untouched
        replace_row(&mut list, academy("ghost", "Ghost", false));
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "a1");
    }
}
