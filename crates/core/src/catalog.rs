//! Fixed option lists offered by the registration form.

/// Formal schools a Santri can attend (also work locations for
/// `Unit Sekolah Formal` staff).
pub const FORMAL_SCHOOLS: &[&str] = &[
    "SMA DU 1 Unggulan BPPT",
    "SMA DU 2 Unggulan BPPT-CIS",
    "SMA DU 3",
    "SMK DU 1",
    "SMK Telekomunikasi DU",
    "MAN 2 Jombang",
    "MA Unggulan Darul Ulum",
    "SMP DU 1 Unggulan",
    "SMP DU 2",
    "SMPN 3 Peterongan (SMP DU 3)",
    "MTsN 2 Jombang",
    "MTs Plus Darul Ulum",
    "MIN Darul Ulum",
    "SD Plus Darul Ulum",
];

/// Dormitories.
pub const ASRAMA_LIST: &[&str] = &[
    "Asrama Induk Al Ghozali",
    "Asrama Induk Raden Rachmat",
    "Asrama Induk Raden Fatah",
    "Asrama Induk Ibnu Sina",
    "Asrama Induk Falastine",
    "Asrama I Al Masyhari",
    "Asrama II Al Khodijah",
    "Asrama III Nusantara",
    "Asrama IV-H Al Insyiroh",
    "Asrama IV-M Ainul Yaqin",
    "Asrama V Haflatul Mubarok",
    "Asrama VI Asyafi'iyah",
    "Asrama VII Al Husna",
    "Asrama VIII Robiatul Adawiyah",
    "Asrama IX Al Kautsar",
    "Asrama X Hurun Iin",
    "Asrama XI Muzamzamah",
    "Asrama XII Bani Umar",
    "Asrama XIII Sulaiman-Bilqis",
    "Asrama XIV Hidayatul Qur'An",
    "Asrama XV Al Falah",
    "Asrama XVI Safarulma",
    "Asrama XVII Arromel",
    "Asrama XVIII Al Hunnain",
    "Asrama XIX Wisma Ka'Bah",
    "Asrama XX Alhambra",
    "Asrama XX1 Ardales",
    "Asrama XXII Pondok Tinggi (Ponti)",
    "Asrama XXIII Baitul Maqdis",
    "Asrama XXIV Al Madinah",
    "Asrama XXV Al As'Adiyah",
    "Asrama XXVI Al Hasyimi",
    "Asrama XXVII Al Furqon",
    "Asrama XXVIII Ar Rifa'I",
];

/// Faculties and the majors each one offers.
pub const FACULTY_MAJORS: &[(&str, &[&str])] = &[
    (
        "Agama Islam",
        &["S1 Pend. Agama Islam", "S1 Hukum Keluarga", "S1 PGMI"],
    ),
    (
        "Ilmu Kesehatan",
        &[
            "S1 Ilmu Keperawatan",
            "D3 Keperawatan",
            "D3 Kebidanan",
            "Profesi Ners",
        ],
    ),
    (
        "Bisnis/Bahasa/Pendidikan",
        &[
            "S1 Administrasi Bisnis",
            "S1 Sastra Inggris",
            "D3 Bahasa Jepang",
            "S1 Pendidikan Matematika",
            "S1 Pendidikan B. Inggris",
        ],
    ),
    ("Sains & Teknologi", &["S1 Sistem Informasi", "S1 Matematika"]),
    (
        "Pascasarjana",
        &["S2 Manajemen Pend. Islam", "S2 Kesehatan Masyarakat"],
    ),
];

/// Where a Mahasiswa lives.
pub const RESIDENCES: &[&str] = &[
    "Apartemen Mahasiswa",
    "Asrama Pondok Pesantren",
    "Rumah/Kos",
];

/// Employing institutions for Guru/Dosen.
pub const INSTITUTIONS: &[&str] = &[
    "Unipdu",
    "Kantor Pusat",
    "Unit Kesehatan Pondok (UKP)",
    "Unit Sekolah Formal",
];

/// The institution whose staff pick a formal school as work location.
pub const FORMAL_SCHOOL_INSTITUTION: &str = "Unit Sekolah Formal";

/// Work locations for every institution except `Unit Sekolah Formal`.
pub const WORK_LOCATIONS: &[&str] = &[
    "Gedung Rektorat",
    "Gedung Kampus",
    "Laboratorium",
    "Islamic Center",
    "Rumah Sakit Unipdu Medika",
    "Kantor Unit",
    "Gedung Keterampilan",
];

/// Majors offered by a faculty, or `None` for an unknown faculty.
pub fn majors_of(faculty: &str) -> Option<&'static [&'static str]> {
    FACULTY_MAJORS
        .iter()
        .find(|(f, _)| *f == faculty)
        .map(|(_, majors)| *majors)
}

/// Work locations valid for an institution.
pub fn work_locations_of(institution: &str) -> &'static [&'static str] {
    if institution == FORMAL_SCHOOL_INSTITUTION {
        FORMAL_SCHOOLS
    } else {
        WORK_LOCATIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majors_of_known_faculty() {
        let majors = majors_of("Sains & Teknologi").unwrap();
        assert!(majors.contains(&"S1 Sistem Informasi"));
        assert!(majors_of("Teknik Sipil").is_none());
    }

    #[test]
    fn test_formal_school_staff_pick_schools() {
        assert!(work_locations_of("Unit Sekolah Formal").contains(&"SMA DU 3"));
        assert!(!work_locations_of("Unipdu").contains(&"SMA DU 3"));
        assert!(work_locations_of("Unipdu").contains(&"Laboratorium"));
    }
}
