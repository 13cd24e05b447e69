//! Plain-text rendering of members, progress and rankings.

use canteen_core::catalog::{
    ASRAMA_LIST, FACULTY_MAJORS, FORMAL_SCHOOLS, INSTITUTIONS, RESIDENCES, WORK_LOCATIONS,
};
use canteen_core::{Category, Member, MilestoneLadder, Period, Profile};
use canteen_progress::{milestone_states, MemberProgress, Ranking};

const BAR_WIDTH: usize = 20;

/// A fixed-width progress bar followed by the rounded percentage.
pub fn progress_bar(percent: f32) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * BAR_WIDTH as f32).round() as usize;
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percent
    )
}

/// `Rp 1.250.000` style amount.
pub fn rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("Rp {grouped}")
}

/// Profile card for a member.
pub fn profile(member: &Member) -> String {
    let mut lines = vec![
        format!("{} {}", member.initial(), member.full_name),
        format!("  ID:            {}", member.id),
        format!("  Kategori:      {}", member.category()),
        format!("  Jenis kelamin: {}", member.gender),
        format!("  Tanggal lahir: {}", member.date_of_birth),
        format!("  Email:         {}", member.email),
    ];

    match &member.profile {
        Profile::Santri { unit_education, asrama } => {
            lines.push(format!("  Unit:          {unit_education}"));
            lines.push(format!("  Asrama:        {asrama}"));
        }
        Profile::Mahasiswa { phone_number, faculty, major, residence } => {
            lines.push(format!("  Telepon:       {phone_number}"));
            lines.push(format!("  Fakultas:      {faculty}"));
            lines.push(format!("  Prodi:         {major}"));
            lines.push(format!("  Domisili:      {residence}"));
        }
        Profile::GuruDosen { phone_number, institution, work_location } => {
            lines.push(format!("  Telepon:       {phone_number}"));
            lines.push(format!("  Lembaga:       {institution}"));
            lines.push(format!("  Lokasi kerja:  {work_location}"));
        }
    }
    lines.push(format!("  Member sejak:  {}", member.created_at.format("%d-%m-%Y")));
    lines.join("\n")
}

/// Point balance, progress towards the next milestone, and the ladder.
pub fn dashboard(current: &MemberProgress, ladder: &MilestoneLadder) -> String {
    let MemberProgress { member, progress } = current;

    let mut lines = vec![
        format!("Halo, {} ({})", member.full_name, member.category()),
        format!("Points: {}", progress.points),
    ];
    if let Some(tier) = &progress.current_tier {
        lines.push(format!("Tier:   {} {}", tier.icon, tier.label));
    }
    lines.push(progress_bar(progress.progress_percent));
    lines.push(progress.headline());
    lines.push(String::new());
    lines.push("Milestones".to_string());

    for state in milestone_states(progress.points, ladder) {
        let mark = if state.achieved { "✅" } else { "🔒" };
        lines.push(format!(
            "  {mark} {:>4} {} {}",
            state.milestone.points, state.milestone.icon, state.milestone.label
        ));
    }
    lines.join("\n")
}

/// A category leaderboard for one period.
pub fn leaderboard(ranking: &Ranking, period: Period) -> String {
    let mut lines = vec![format!("Leaderboard {} - {}", ranking.category, period.label())];

    if ranking.ranked.is_empty() {
        lines.push("  Belum ada data untuk periode ini.".to_string());
    }
    for entry in &ranking.ranked {
        let marker = if entry.rank == ranking.viewer_rank { "▶" } else { " " };
        lines.push(format!(
            "{marker} {:>4} {:<28} {:>6} pts  {:>14}  {:>3} trx",
            entry.badge(),
            entry.display_name,
            entry.points,
            rupiah(entry.amount_spent),
            entry.transaction_count
        ));
    }

    lines.push(String::new());
    lines.push(match ranking.viewer_entry() {
        Some(entry) => format!("Peringkat kamu: {} dengan {} points", entry.rank, entry.points),
        None => "Kamu belum masuk peringkat bulan ini.".to_string(),
    });

    if !ranking.unresolved.is_empty() {
        lines.push(format!("Tidak dikenal ({}):", ranking.unresolved.len()));
        for entry in &ranking.unresolved {
            lines.push(format!("  {} ({}) {} pts", entry.label, entry.member_id, entry.points));
        }
    }
    lines.join("\n")
}

/// Registration choices, for one category or all of them.
pub fn options(category: Option<Category>) -> String {
    let wanted = |c: Category| category.map_or(true, |only| only == c);
    let mut lines = Vec::new();

    if wanted(Category::Santri) {
        lines.push("Santri".to_string());
        push_list(&mut lines, "--unit-education", FORMAL_SCHOOLS);
        push_list(&mut lines, "--asrama", ASRAMA_LIST);
    }
    if wanted(Category::Mahasiswa) {
        lines.push("Mahasiswa".to_string());
        lines.push("  --faculty / --major".to_string());
        for (faculty, majors) in FACULTY_MAJORS {
            lines.push(format!("    {faculty}"));
            lines.extend(majors.iter().map(|major| format!("      {major}")));
        }
        push_list(&mut lines, "--residence", RESIDENCES);
    }
    if wanted(Category::GuruDosen) {
        lines.push("Guru/Dosen".to_string());
        push_list(&mut lines, "--institution", INSTITUTIONS);
        push_list(&mut lines, "--work-location", WORK_LOCATIONS);
        lines.push("    (Unit Sekolah Formal: salah satu unit --unit-education Santri)".to_string());
    }
    lines.join("\n")
}

fn push_list(lines: &mut Vec<String>, flag: &str, values: &[&str]) {
    lines.push(format!("  {flag}"));
    lines.extend(values.iter().map(|value| format!("    {value}")));
}
