use serde::Deserialize;

use super::profile::{
    deserialize_optional_text, Company, Education, Location, Profile, ProfileRecord,
};

/// `skills` may arrive as a list or as a bare string (an empty string means "no change")
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum SkillsPatch {
    List(Vec<String>),
    Text(String),
}

impl SkillsPatch {
    fn into_vec(self) -> Vec<String> {
        match self {
            SkillsPatch::List(skills) => skills,
            SkillsPatch::Text(text) if text.trim().is_empty() => Vec::new(),
            SkillsPatch::Text(text) => vec![text],
        }
    }
}

/// Partial update accepted by `/editprofile`.
///
/// Scalars overwrite, `photo` overwrites, list fields append with dedup.
/// Absent, null or empty values leave the stored field untouched.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct ProfilePatch {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub education: Option<Vec<Education>>,
    #[serde(default)]
    pub companies: Option<Vec<Company>>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub skills: Option<SkillsPatch>,
    /// Recruiters only
    #[serde(default)]
    pub company_name: Option<String>,
    /// Recruiters only
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub recruiter_id: Option<String>,
}

impl ProfilePatch {
    /// Merges the patch into `record` and returns the names of the fields that changed
    pub fn apply(self, record: &mut ProfileRecord) -> Vec<&'static str> {
        let mut changed = Vec::new();

        if let ProfileRecord::Recruiter(recruiter) = record {
            if overwrite_text(&mut recruiter.company_name, self.company_name) {
                changed.push("company_name");
            }
            if overwrite_text(&mut recruiter.recruiter_id, self.recruiter_id) {
                changed.push("recruiter_id");
            }
        } else if self.company_name.is_some() || self.recruiter_id.is_some() {
            log::debug!("Ignoring recruiter fields on a non-recruiter profile");
        }

        let core = record.core_mut();

        if overwrite_optional_text(&mut core.firstname, self.firstname) {
            changed.push("firstname");
        }
        if overwrite_optional_text(&mut core.lastname, self.lastname) {
            changed.push("lastname");
        }
        match self.location {
            Some(location) if location.is_blank() => {
                log::debug!("Ignoring location with a blank coordinate");
            }
            Some(location) if core.location.as_ref() != Some(&location) => {
                core.location = Some(location);
                changed.push("location");
            }
            _ => {}
        }
        if overwrite_optional_text(&mut core.photo, self.photo) {
            changed.push("photo");
        }
        if let Some(education) = self.education {
            if append_unique(&mut core.education, education, |e| !e.graduatedyear.is_empty()) {
                changed.push("education");
            }
        }
        if let Some(companies) = self.companies {
            if append_unique(&mut core.companies, companies, |c| !c.name.is_empty()) {
                changed.push("companies");
            }
        }
        if let Some(skills) = self.skills {
            if append_skills(&mut core.skills, skills.into_vec()) {
                changed.push("skills");
            }
        }

        changed
    }
}

fn overwrite_text(slot: &mut String, incoming: Option<String>) -> bool {
    match incoming {
        Some(value) if !value.trim().is_empty() && *slot != value => {
            *slot = value;
            true
        }
        _ => false,
    }
}

fn overwrite_optional_text(slot: &mut Option<String>, incoming: Option<String>) -> bool {
    match incoming {
        Some(value) if !value.trim().is_empty() && slot.as_deref() != Some(value.as_str()) => {
            *slot = Some(value);
            true
        }
        _ => false,
    }
}

/// Appends entries accepted by `keep` that are not already present (full-value equality)
fn append_unique<T: PartialEq>(list: &mut Vec<T>, incoming: Vec<T>, keep: impl Fn(&T) -> bool) -> bool {
    let before = list.len();
    for entry in incoming {
        if keep(&entry) && !list.contains(&entry) {
            list.push(entry);
        }
    }
    list.len() != before
}

/// Case-insensitive dedup against existing and already-appended skills
fn append_skills(list: &mut Vec<String>, incoming: Vec<String>) -> bool {
    let before = list.len();
    for skill in incoming {
        if skill.trim().is_empty() {
            continue;
        }
        let lowered = skill.to_lowercase();
        if !list.iter().any(|existing| existing.to_lowercase() == lowered) {
            list.push(skill);
        }
    }
    list.len() != before
}
