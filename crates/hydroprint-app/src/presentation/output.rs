//! Plain-text renderings of the application DTOs. `--json` bypasses these
//! and prints the DTO itself.

use std::fmt::Write;

use crate::application::dtos::{
    DailySubmissionDto, DashboardDto, FootprintDto, LeaderboardEntryDto, StreakStatsDto,
    UsageTrendDto, UserDto, WeeklySubmissionDto, WindowStatusDto,
};
use crate::application::services::AppConfig;
use hydroprint_domain::footprint::{CategoryKind, InputField};

pub fn footprint(dto: &FootprintDto) -> String {
    let mut out = String::new();
    for (kind, heading) in [
        (CategoryKind::Direct, "Direct use"),
        (CategoryKind::Virtual, "Virtual water"),
    ] {
        let _ = writeln!(out, "{}", heading);
        for row in dto.breakdown.iter().filter(|r| r.kind == kind) {
            let _ = writeln!(out, "  {:<22} {:>9.1} gal/week", row.category, row.gallons_per_week);
        }
    }
    let _ = writeln!(out, "Direct total:     {:>9.1} gal/week", dto.direct_total);
    let _ = writeln!(out, "Virtual total:    {:>9.1} gal/week", dto.virtual_total);
    let _ = writeln!(out, "Grand total:      {:>9.1} gal/week", dto.grand_total);
    let _ = writeln!(out, "Monthly estimate: {:>9} gal", dto.monthly_estimate);
    let _ = writeln!(out, "Impact score:     {:>9}/100", dto.score);
    let _ = write!(out, "Vs. US average:   {:>+9.1}%", dto.trend_percent);
    out
}

pub fn user(dto: &UserDto) -> String {
    let household = dto
        .household_size
        .map_or_else(|| "not set".to_string(), |n| n.to_string());
    format!(
        "{} ({})\nHousehold size: {}\nCreated: {}",
        dto.display_name, dto.user_id, household, dto.created_at
    )
}

fn window(label: &str, dto: &WindowStatusDto) -> String {
    let state = match (dto.is_submitted, dto.is_new_period) {
        (true, _) => "submitted",
        (false, true) => "open (new period)",
        (false, false) => "open",
    };
    let updated = dto.last_updated.as_deref().unwrap_or("never");
    format!("{:<7} {} (last update: {})", label, state, updated)
}

pub fn dashboard(dto: &DashboardDto) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (household of {})",
        dto.display_name, dto.household_size
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Inputs");
    for field in InputField::ALL {
        let _ = writeln!(
            out,
            "  {:<18} {:>6}  [{}]",
            field.key(),
            dto.inputs.get(field),
            field.period()
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", footprint(&dto.footprint));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", window("Daily", &dto.daily));
    let _ = writeln!(out, "{}", window("Weekly", &dto.weekly));
    let _ = write!(
        out,
        "Streak: {} day(s), best {}, {} point(s)",
        dto.streak.current_streak, dto.streak.longest_streak, dto.streak.total_points
    );
    out
}

pub fn daily_receipt(dto: &DailySubmissionDto) -> String {
    let mut out = format!(
        "Logged {} ({:.1} gal/week)\nStreak: {} day(s), best {}, {} point(s)",
        dto.log_date, dto.grand_total, dto.current_streak, dto.longest_streak, dto.total_points
    );
    if let Some(previous) = dto.streak_reset_from {
        let _ = write!(out, "\nPrevious streak of {} day(s) was broken", previous);
    }
    if dto.already_logged {
        out.push_str("\nAlready logged today: log updated, streak unchanged");
    }
    out
}

pub fn weekly_receipt(dto: &WeeklySubmissionDto) -> String {
    format!(
        "Weekly log saved for {}\nGrand total: {:.1} gal/week\nPublished monthly usage: {} gal",
        dto.log_date, dto.footprint.grand_total, dto.monthly_usage
    )
}

pub fn streak(dto: &StreakStatsDto) -> String {
    let last = dto.last_log_date.as_deref().unwrap_or("never");
    let status = if dto.logged_today {
        "logged today"
    } else if dto.is_alive {
        "log today to keep it"
    } else {
        "inactive"
    };
    format!(
        "{}: {} day(s), best {}, {} point(s)\nLast log: {} ({})",
        dto.display_name, dto.current_streak, dto.longest_streak, dto.total_points, last, status
    )
}

pub fn leaderboard(entries: &[LeaderboardEntryDto]) -> String {
    if entries.is_empty() {
        return "No weekly logs published yet".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{:>4}. {:<24} {:>8} gal/month",
            entry.rank, entry.display_name, entry.monthly_usage
        );
    }
    out.trim_end().to_string()
}

pub fn trend(dto: &UsageTrendDto) -> String {
    let mut out = String::new();
    for point in &dto.data_points {
        match (point.grand_total, point.score) {
            (Some(total), Some(score)) => {
                let _ = writeln!(out, "{}  {:>9.1} gal/week  score {}", point.date, total, score);
            }
            _ => {
                let _ = writeln!(out, "{}  -", point.date);
            }
        }
    }
    let average = dto
        .average_grand_total
        .map_or_else(|| "n/a".to_string(), |avg| format!("{:.1} gal/week", avg));
    let _ = write!(
        out,
        "{} of {} day(s) logged, average {}",
        dto.logged_days,
        dto.data_points.len(),
        average
    );
    out
}

pub fn config(config: &AppConfig, config_path: &str, database_path: &str) -> String {
    format!(
        "Config file: {}\nDatabase: {}\nLog level: {}",
        config_path,
        database_path,
        config.log_level.as_str()
    )
}
