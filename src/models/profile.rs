use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// Role carried by every stored profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Recruiter,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Recruiter => "recruiter",
            Role::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Role::User),
            "recruiter" => Some(Role::Recruiter),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latitude or longitude as the front-end sends it: a number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    /// Finite decimal degrees; `NaN` and infinities are rejected like any other garbage
    pub fn to_degrees(&self) -> Result<f64, AppError> {
        let value = match self {
            Coordinate::Number(value) => *value,
            Coordinate::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| AppError::InvalidCoordinate(format!("'{}' is not a number", text)))?,
        };

        if !value.is_finite() {
            return Err(AppError::InvalidCoordinate(format!("{} is not a finite number", value)));
        }
        Ok(value)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Coordinate::Text(text) if text.trim().is_empty())
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Coordinate::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Location {
    pub lat: Coordinate,
    pub lon: Coordinate,
}

impl Location {
    #[cfg(test)]
    pub fn new(lat: impl Into<Coordinate>, lon: impl Into<Coordinate>) -> Self {
        Self { lat: lat.into(), lon: lon.into() }
    }

    /// True when either coordinate is an empty string, as cleared form inputs send it
    pub fn is_blank(&self) -> bool {
        self.lat.is_blank() || self.lon.is_blank()
    }

    /// (latitude, longitude) in decimal degrees
    pub fn degrees(&self) -> Result<(f64, f64), AppError> {
        Ok((self.lat.to_degrees()?, self.lon.to_degrees()?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Education {
    #[serde(default)]
    pub institution: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub graduatedyear: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Company {
    #[serde(default)]
    pub name: String,
}

/// Fields shared by people and recruiters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCore {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<Education>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub companies: Vec<Company>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl ProfileCore {
    pub fn new(
        firstname: Option<String>,
        lastname: Option<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            firstname,
            lastname,
            email: email.into(),
            password: password.into(),
            role,
            location: None,
            education: Vec::new(),
            companies: Vec::new(),
            skills: Vec::new(),
            photo: None,
        }
    }
}

/// Document in the people collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(flatten)]
    pub core: ProfileCore,
}

/// Document in the recruiters collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recruiter {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(flatten)]
    pub core: ProfileCore,
    pub company_name: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub recruiter_id: String,
}

/// Shared read/write access to the fields every profile has
pub trait Profile {
    fn id(&self) -> Option<ObjectId>;
    fn core(&self) -> &ProfileCore;
    fn core_mut(&mut self) -> &mut ProfileCore;

    fn email(&self) -> &str {
        &self.core().email
    }

    fn location(&self) -> Option<&Location> {
        self.core().location.as_ref()
    }

    fn education(&self) -> &[Education] {
        &self.core().education
    }

    fn companies(&self) -> &[Company] {
        &self.core().companies
    }
}

impl Profile for Person {
    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn core(&self) -> &ProfileCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProfileCore {
        &mut self.core
    }
}

impl Profile for Recruiter {
    fn id(&self) -> Option<ObjectId> {
        self.id
    }

    fn core(&self) -> &ProfileCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProfileCore {
        &mut self.core
    }
}

/// Which collection a record lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Person,
    Recruiter,
}

/// A stored profile of either kind
#[derive(Debug, Clone)]
pub enum ProfileRecord {
    Person(Person),
    Recruiter(Recruiter),
}

impl ProfileRecord {
    pub fn kind(&self) -> ProfileKind {
        match self {
            ProfileRecord::Person(_) => ProfileKind::Person,
            ProfileRecord::Recruiter(_) => ProfileKind::Recruiter,
        }
    }

    pub fn set_id(&mut self, id: ObjectId) {
        match self {
            ProfileRecord::Person(p) => p.id = Some(id),
            ProfileRecord::Recruiter(r) => r.id = Some(id),
        }
    }

    /// JSON view returned by `/profile`: `_id` as a hex string, password stripped
    pub fn to_public_json(&self) -> Result<serde_json::Value, AppError> {
        let mut value = match self {
            ProfileRecord::Person(p) => serde_json::to_value(p),
            ProfileRecord::Recruiter(r) => serde_json::to_value(r),
        }
        .map_err(|e| AppError::DatabaseError(format!("Failed to serialize profile: {}", e)))?;

        if let Some(map) = value.as_object_mut() {
            map.remove("password");
            match self.id() {
                Some(id) => {
                    map.insert("_id".to_string(), serde_json::Value::String(id.to_hex()));
                }
                None => {
                    map.remove("_id");
                }
            }
        }

        Ok(value)
    }
}

impl Profile for ProfileRecord {
    fn id(&self) -> Option<ObjectId> {
        match self {
            ProfileRecord::Person(p) => p.id(),
            ProfileRecord::Recruiter(r) => r.id(),
        }
    }

    fn core(&self) -> &ProfileCore {
        match self {
            ProfileRecord::Person(p) => p.core(),
            ProfileRecord::Recruiter(r) => r.core(),
        }
    }

    fn core_mut(&mut self) -> &mut ProfileCore {
        match self {
            ProfileRecord::Person(p) => p.core_mut(),
            ProfileRecord::Recruiter(r) => r.core_mut(),
        }
    }
}

impl From<Person> for ProfileRecord {
    fn from(person: Person) -> Self {
        ProfileRecord::Person(person)
    }
}

impl From<Recruiter> for ProfileRecord {
    fn from(recruiter: Recruiter) -> Self {
        ProfileRecord::Recruiter(recruiter)
    }
}

/// Accepts a string or a number and keeps it as text
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Bson::deserialize(deserializer)? {
        Bson::String(s) => Ok(s),
        Bson::Int32(n) => Ok(n.to_string()),
        Bson::Int64(n) => Ok(n.to_string()),
        Bson::Double(n) => Ok(n.to_string()),
        Bson::Null => Ok(String::new()),
        _ => Err(serde::de::Error::custom("Expected string or number")),
    }
}

pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Bson::deserialize(deserializer)? {
        Bson::Null => Ok(None),
        Bson::String(s) => Ok(Some(s)),
        Bson::Int32(n) => Ok(Some(n.to_string())),
        Bson::Int64(n) => Ok(Some(n.to_string())),
        Bson::Double(n) => Ok(Some(n.to_string())),
        _ => Err(serde::de::Error::custom("Expected string or number")),
    }
}
