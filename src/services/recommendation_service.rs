// ==================== PEOPLE RECOMMENDATIONS ====================
// For a requesting profile, scores every other profile by great-circle
// distance and by shared school/employer.

use serde::Serialize;

use crate::{
    database::ProfileStore,
    models::{Profile, ProfileRecord},
    utils::AppError,
};

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Affinity between two profiles; lower means more related
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    SameSchool,
    SameCompany,
    Unrelated,
}

impl Priority {
    pub fn score(self) -> u32 {
        match self {
            Priority::SameSchool => 1,
            Priority::SameCompany => 2,
            Priority::Unrelated => 5,
        }
    }
}

/// Parallel lists: entry `i` of both refers to the same candidate
#[derive(Debug, Clone, Default, Serialize, utoipa::ToSchema)]
pub struct Recommendations {
    pub distances: Vec<f64>,
    pub priorities: Vec<u32>,
}

impl Recommendations {
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Haversine distance in km between two points given in decimal degrees
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Compares only the first (most recently added) education and company entries.
/// Education takes precedence over company.
pub fn calculate_priority<A, B>(a: &A, b: &B) -> Priority
where
    A: Profile + ?Sized,
    B: Profile + ?Sized,
{
    if let (Some(ea), Some(eb)) = (a.education().first(), b.education().first()) {
        if ea.institution == eb.institution {
            return Priority::SameSchool;
        }
    }

    if let (Some(ca), Some(cb)) = (a.companies().first(), b.companies().first()) {
        if ca.name == cb.name {
            return Priority::SameCompany;
        }
    }

    Priority::Unrelated
}

/// Distance between two profiles. A missing or non-numeric location on either side is an error.
pub fn profile_distance<A, B>(a: &A, b: &B) -> Result<f64, AppError>
where
    A: Profile + ?Sized,
    B: Profile + ?Sized,
{
    let (lat1, lon1) = a
        .location()
        .ok_or_else(|| AppError::MissingLocation(a.email().to_string()))?
        .degrees()?;
    let (lat2, lon2) = b
        .location()
        .ok_or_else(|| AppError::MissingLocation(b.email().to_string()))?
        .degrees()?;

    Ok(haversine_distance(lat1, lon1, lat2, lon2))
}

/// Scores every candidate except `main` itself (matched by record id, not email).
/// Any failing pair aborts the whole computation.
pub fn score_candidates<'a, I>(main: &ProfileRecord, candidates: I) -> Result<Recommendations, AppError>
where
    I: IntoIterator<Item = &'a dyn Profile>,
{
    let main_id = main.id();
    let mut recommendations = Recommendations::default();

    for candidate in candidates {
        if candidate.id() == main_id {
            continue;
        }
        recommendations.distances.push(profile_distance(main, candidate)?);
        recommendations.priorities.push(calculate_priority(main, candidate).score());
    }

    Ok(recommendations)
}

/// Loads every profile (people first, then recruiters) and scores them against `email`
pub async fn recommend(store: &dyn ProfileStore, email: &str) -> Result<Recommendations, AppError> {
    let people = store.find_all_people().await?;
    let recruiters = store.find_all_recruiters().await?;

    let main = store
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User or recruiter not found: {}", email)))?;

    let candidates = people
        .iter()
        .map(|p| p as &dyn Profile)
        .chain(recruiters.iter().map(|r| r as &dyn Profile));

    let recommendations = score_candidates(&main, candidates)?;

    log::debug!(
        "🧭 Scored {} candidates for {} ({} people, {} recruiters)",
        recommendations.len(),
        email,
        people.len(),
        recruiters.len()
    );

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStore;
    use crate::models::{Company, Education, Location, Person, ProfileCore, Recruiter, Role};

    fn profile(email: &str, lat: f64, lon: f64) -> ProfileCore {
        let mut core = ProfileCore::new(None, None, email, "pw", Role::User);
        core.location = Some(Location::new(lat, lon));
        core
    }

    fn person(core: ProfileCore) -> ProfileRecord {
        ProfileRecord::Person(Person { id: None, core })
    }

    fn school(name: &str) -> Education {
        Education { institution: name.into(), graduatedyear: "2020".into() }
    }

    fn company(name: &str) -> Company {
        Company { name: name.into() }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(haversine_distance(51.5074, -0.1278, 51.5074, -0.1278), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let ab = haversine_distance(40.7128, -74.0060, 34.0522, -118.2437);
        let ba = haversine_distance(34.0522, -118.2437, 40.7128, -74.0060);
        assert!((ab - ba).abs() < 1e-9);
        assert!((ab - 3936.0).abs() < 5.0);
    }

    #[test]
    fn test_quarter_meridian_fixture() {
        let d = haversine_distance(0.0, 0.0, 0.0, 90.0);
        assert!((d - 10007.5).abs() < 0.1, "got {}", d);
    }

    #[test]
    fn test_education_wins_over_company() {
        let mut a = profile("a@x.com", 0.0, 0.0);
        a.education = vec![school("MIT")];
        a.companies = vec![company("Acme")];
        let mut b = profile("b@x.com", 0.0, 0.0);
        b.education = vec![school("MIT")];
        b.companies = vec![company("Globex")];

        assert_eq!(calculate_priority(&person(a), &person(b)), Priority::SameSchool);
    }

    #[test]
    fn test_company_match_when_schools_differ() {
        let mut a = profile("a@x.com", 0.0, 0.0);
        a.education = vec![school("MIT")];
        a.companies = vec![company("Acme")];
        let mut b = profile("b@x.com", 0.0, 0.0);
        b.education = vec![school("CMU")];
        b.companies = vec![company("Acme")];

        assert_eq!(calculate_priority(&person(a), &person(b)).score(), 2);
    }

    #[test]
    fn test_only_first_entries_are_compared() {
        let mut a = profile("a@x.com", 0.0, 0.0);
        a.education = vec![school("MIT"), school("Stanford")];
        let mut b = profile("b@x.com", 0.0, 0.0);
        b.education = vec![school("Stanford")];

        assert_eq!(calculate_priority(&person(a), &person(b)), Priority::Unrelated);
    }

    #[test]
    fn test_nothing_shared_scores_five() {
        let a = person(profile("a@x.com", 0.0, 0.0));
        let b = person(profile("b@x.com", 1.0, 1.0));
        assert_eq!(calculate_priority(&a, &b).score(), 5);
    }

    #[tokio::test]
    async fn test_recommend_excludes_requester_and_keeps_store_order() {
        let store = InMemoryStore::new();

        let mut me = profile("me@x.com", 0.0, 0.0);
        me.education = vec![school("MIT")];
        store.insert(person(me)).await.unwrap();

        let mut classmate = profile("classmate@x.com", 0.0, 90.0);
        classmate.education = vec![school("MIT")];
        store.insert(person(classmate)).await.unwrap();

        let mut hr = profile("hr@x.com", 0.0, 0.0);
        hr.role = Role::Recruiter;
        store
            .insert(ProfileRecord::Recruiter(Recruiter {
                id: None,
                core: hr,
                company_name: "Acme".into(),
                recruiter_id: "1".into(),
            }))
            .await
            .unwrap();

        let recs = recommend(&store, "me@x.com").await.unwrap();

        assert_eq!(recs.distances.len(), 2);
        assert_eq!(recs.priorities.len(), 2);
        assert!((recs.distances[0] - 10007.5).abs() < 0.1);
        assert_eq!(recs.priorities, vec![1, 5]);
        assert_eq!(recs.distances[1], 0.0);
    }

    #[tokio::test]
    async fn test_recommend_excludes_by_id_not_email() {
        let store = InMemoryStore::new();
        store.insert(person(profile("twin@x.com", 10.0, 10.0))).await.unwrap();
        store.insert(person(profile("twin@x.com", 10.0, 10.0))).await.unwrap();

        let recs = recommend(&store, "twin@x.com").await.unwrap();

        // The duplicate email is a different record and stays in the output
        assert_eq!(recs.len(), 1);
        assert_eq!(recs.distances[0], 0.0);
    }

    #[tokio::test]
    async fn test_recommend_unknown_email_is_not_found() {
        let store = InMemoryStore::new();
        store.insert(person(profile("a@x.com", 0.0, 0.0))).await.unwrap();

        let err = recommend(&store, "ghost@x.com").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_location_fails_the_whole_request() {
        let store = InMemoryStore::new();
        store.insert(person(profile("me@x.com", 0.0, 0.0))).await.unwrap();
        store.insert(person(profile("ok@x.com", 1.0, 1.0))).await.unwrap();
        store
            .insert(person(ProfileCore::new(None, None, "nowhere@x.com", "pw", Role::User)))
            .await
            .unwrap();

        let err = recommend(&store, "me@x.com").await.unwrap_err();
        match err {
            AppError::MissingLocation(email) => assert_eq!(email, "nowhere@x.com"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_lone_profile_gets_empty_lists() {
        let store = InMemoryStore::new();
        store.insert(person(ProfileCore::new(None, None, "solo@x.com", "pw", Role::User))).await.unwrap();

        let recs = recommend(&store, "solo@x.com").await.unwrap();
        assert!(recs.is_empty());
        assert!(recs.priorities.is_empty());
    }
}
