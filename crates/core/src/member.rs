//! Member model - a registered loyalty customer.

use std::borrow::Cow;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::id::MemberId;
use crate::Time;

/// Country prefix every stored phone number starts with.
pub const PHONE_PREFIX: &str = "+62";

/// A registered member as stored in the `Members` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Document id
    pub id: MemberId,

    /// Full name, half of the login key
    pub full_name: String,

    /// Gender
    pub gender: Gender,

    /// Birth date, the other half of the login key
    pub date_of_birth: BirthDate,

    /// Contact email
    pub email: String,

    /// Category together with its category-specific attributes
    #[serde(flatten)]
    pub profile: Profile,

    /// Accrued loyalty points, written only by the point-of-sale integration
    #[serde(default, alias = "accruedPoints")]
    pub points: u64,

    /// When the member registered
    pub created_at: Time,
}

impl Member {
    /// Membership category.
    pub fn category(&self) -> Category {
        self.profile.category()
    }

    /// Phone number, for categories that record one.
    pub fn phone_number(&self) -> Option<&str> {
        match &self.profile {
            Profile::Santri { .. } => None,
            Profile::Mahasiswa { phone_number, .. } | Profile::GuruDosen { phone_number, .. } => {
                Some(phone_number)
            }
        }
    }

    /// Uppercased first letter of the name, shown as the avatar.
    pub fn initial(&self) -> char {
        self.full_name
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }

    /// Whether this member is identified by the given login key.
    pub fn matches_identity(&self, full_name: &str, date_of_birth: &BirthDate) -> bool {
        self.full_name == full_name && &self.date_of_birth == date_of_birth
    }
}

/// Membership category. Leaderboards are scoped per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Boarding-school students
    Santri,
    /// University students
    Mahasiswa,
    /// Teachers, lecturers and staff
    #[serde(rename = "Guru/Dosen")]
    GuruDosen,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [Category::Santri, Category::Mahasiswa, Category::GuruDosen];

    /// Display label, identical to the stored value.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Santri => "Santri",
            Category::Mahasiswa => "Mahasiswa",
            Category::GuruDosen => "Guru/Dosen",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "santri" => Ok(Category::Santri),
            "mahasiswa" => Ok(Category::Mahasiswa),
            "guru/dosen" | "guru" | "dosen" | "gurudosen" => Ok(Category::GuruDosen),
            _ => Err(CoreError::InvalidOption {
                field: "category",
                value: s.to_string(),
            }),
        }
    }
}

/// Gender options offered at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Male
    #[serde(rename = "Laki-Laki")]
    LakiLaki,
    /// Female
    Perempuan,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::LakiLaki => f.write_str("Laki-Laki"),
            Gender::Perempuan => f.write_str("Perempuan"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "laki-laki" | "laki" | "l" => Ok(Gender::LakiLaki),
            "perempuan" | "p" => Ok(Gender::Perempuan),
            _ => Err(CoreError::InvalidOption {
                field: "gender",
                value: s.to_string(),
            }),
        }
    }
}

/// Category-specific attributes, tagged by `category` in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all_fields = "camelCase")]
pub enum Profile {
    /// Santri attributes
    Santri {
        /// Formal school
        unit_education: String,
        /// Dormitory
        asrama: String,
    },
    /// Mahasiswa attributes
    Mahasiswa {
        /// Phone number, `+62` followed by digits
        phone_number: String,
        /// Faculty
        faculty: String,
        /// Study program within the faculty
        major: String,
        /// Where the student lives
        residence: String,
    },
    /// Guru/Dosen attributes
    #[serde(rename = "Guru/Dosen")]
    GuruDosen {
        /// Phone number, `+62` followed by digits
        phone_number: String,
        /// Employing institution
        institution: String,
        /// Work location within the institution
        work_location: String,
    },
}

impl Profile {
    /// The category this profile belongs to.
    pub fn category(&self) -> Category {
        match self {
            Profile::Santri { .. } => Category::Santri,
            Profile::Mahasiswa { .. } => Category::Mahasiswa,
            Profile::GuruDosen { .. } => Category::GuruDosen,
        }
    }
}

/// A birth date in its stored `dd-mm-yyyy` form.
///
/// Login compares the stored string for equality, so the canonical string
/// is kept rather than a parsed date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BirthDate(String);

impl BirthDate {
    /// Parse free-form input. Digits are extracted and formatted as
    /// `dd-mm-yyyy`, then checked to be a real calendar date.
    pub fn parse(input: &str) -> Result<Self> {
        let formatted = format_birth_date(input);
        if formatted.len() != 10 {
            return Err(CoreError::InvalidBirthDate(input.to_string()));
        }
        NaiveDate::parse_from_str(&formatted, "%d-%m-%Y")
            .map_err(|_| CoreError::InvalidBirthDate(input.to_string()))?;
        Ok(Self(formatted))
    }

    /// The canonical `dd-mm-yyyy` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BirthDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Progressive `dd-mm-yyyy` formatting of whatever digits the input holds.
///
/// Partial input stays partial: `"0102"` becomes `"01-02"`. At most eight
/// digits are used.
pub fn format_birth_date(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(8).collect();
    match digits.len() {
        0..=2 => digits,
        3..=4 => format!("{}-{}", &digits[..2], &digits[2..]),
        _ => format!("{}-{}-{}", &digits[..2], &digits[2..4], &digits[4..]),
    }
}

/// Canonical form of a full name: trimmed, inner whitespace runs
/// collapsed to one space. Registration stores it and login queries it.
pub fn normalize_name(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a phone number to `+62` followed by digits only.
///
/// A missing prefix is added, a stray `62` country code is folded into it,
/// and one national trunk `0` is dropped.
pub fn normalize_phone(input: &str) -> String {
    let trimmed = input.trim();
    let rest: Cow<'_, str> = match trimmed.strip_prefix(PHONE_PREFIX) {
        Some(rest) => Cow::Borrowed(rest),
        None => partial_prefix().replace(trimmed, ""),
    };
    let digits: String = rest.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.strip_prefix('0').unwrap_or(&digits);
    format!("{PHONE_PREFIX}{digits}")
}

fn partial_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?6?2?").expect("static regex"))
}

/// Check the rough shape of an email address.
pub fn validate_email(email: &str) -> Result<()> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));
    if re.is_match(email) {
        Ok(())
    } else {
        Err(CoreError::InvalidEmail(email.to_string()))
    }
}
