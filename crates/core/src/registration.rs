//! Registration form - raw input turned into a validated Member.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    majors_of, work_locations_of, ASRAMA_LIST, FORMAL_SCHOOLS, INSTITUTIONS, RESIDENCES,
};
use crate::error::{CoreError, Result};
use crate::id::MemberId;
use crate::member::{
    normalize_name, normalize_phone, validate_email, BirthDate, Category, Gender, Member, Profile,
    PHONE_PREFIX,
};
use crate::Time;

/// What a prospective member submits.
///
/// Every field is kept as entered; only the ones relevant to `category`
/// are read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    /// Full name
    pub full_name: String,
    /// `Laki-Laki` or `Perempuan`
    pub gender: String,
    /// Birth date, any separator
    pub date_of_birth: String,
    /// Email
    pub email: String,
    /// `Santri`, `Mahasiswa` or `Guru/Dosen`
    pub category: String,
    /// Santri: formal school
    pub unit_education: String,
    /// Santri: dormitory
    pub asrama: String,
    /// Mahasiswa, Guru/Dosen: phone number
    pub phone_number: String,
    /// Mahasiswa: faculty
    pub faculty: String,
    /// Mahasiswa: major
    pub major: String,
    /// Mahasiswa: residence
    pub residence: String,
    /// Guru/Dosen: institution
    pub institution: String,
    /// Guru/Dosen: work location
    pub work_location: String,
}

/// Identity part of a validated form, used for duplicate checks before the
/// member is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    /// Trimmed full name
    pub full_name: String,
    /// Gender
    pub gender: Gender,
    /// Canonical birth date
    pub date_of_birth: BirthDate,
    /// Trimmed email
    pub email: String,
    /// Category profile
    pub profile: Profile,
}

impl ValidRegistration {
    /// Category chosen in the form.
    pub fn category(&self) -> Category {
        self.profile.category()
    }

    /// Materialize the member with zero points.
    pub fn into_member(self, id: MemberId, created_at: Time) -> Member {
        Member {
            id,
            full_name: self.full_name,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            email: self.email,
            profile: self.profile,
            points: 0,
            created_at,
        }
    }
}

impl RegistrationForm {
    /// Normalize and validate the form.
    pub fn validate(&self) -> Result<ValidRegistration> {
        let full_name = normalize_name(&self.full_name);
        if full_name.is_empty() {
            return Err(CoreError::MissingField("fullName"));
        }
        let gender: Gender = required("gender", &self.gender)?.parse()?;
        let date_of_birth = BirthDate::parse(required("dateOfBirth", &self.date_of_birth)?)?;
        let email = required("email", &self.email)?.to_string();
        validate_email(&email)?;
        let category: Category = required("category", &self.category)?.parse()?;

        let profile = match category {
            Category::Santri => Profile::Santri {
                unit_education: one_of("unitEducation", &self.unit_education, FORMAL_SCHOOLS)?,
                asrama: one_of("asrama", &self.asrama, ASRAMA_LIST)?,
            },
            Category::Mahasiswa => {
                let faculty = required("faculty", &self.faculty)?;
                let majors = majors_of(faculty).ok_or_else(|| CoreError::InvalidOption {
                    field: "faculty",
                    value: faculty.to_string(),
                })?;
                Profile::Mahasiswa {
                    phone_number: phone(&self.phone_number)?,
                    faculty: faculty.to_string(),
                    major: one_of("major", &self.major, majors)?,
                    residence: one_of("residence", &self.residence, RESIDENCES)?,
                }
            }
            Category::GuruDosen => {
                let institution = one_of("institution", &self.institution, INSTITUTIONS)?;
                let work_location = one_of(
                    "workLocation",
                    &self.work_location,
                    work_locations_of(&institution),
                )?;
                Profile::GuruDosen {
                    phone_number: phone(&self.phone_number)?,
                    institution,
                    work_location,
                }
            }
        };

        Ok(ValidRegistration {
            full_name,
            gender,
            date_of_birth,
            email,
            profile,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(CoreError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn one_of(field: &'static str, value: &str, options: &[&str]) -> Result<String> {
    let value = required(field, value)?;
    if options.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(CoreError::InvalidOption {
            field,
            value: value.to_string(),
        })
    }
}

fn phone(raw: &str) -> Result<String> {
    let normalized = normalize_phone(raw);
    if normalized.len() == PHONE_PREFIX.len() {
        return Err(CoreError::InvalidPhone(raw.to_string()));
    }
    Ok(normalized)
}
