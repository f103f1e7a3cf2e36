/// Display classes for status badges. The console maps these to colors; a
/// web front-end would map them to CSS classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Pending,
    Active,
    Success,
    Danger,
    Muted,
    Voicemail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub style: BadgeStyle,
}

/// Derives a badge from the raw wire status. Labels replace underscores
/// with spaces; statuses outside the known set fall back to the pending
/// style so a new backend value never breaks rendering.
pub fn badge_for_status(raw: &str) -> Badge {
    let style = match raw {
        "pending" => BadgeStyle::Pending,
        "initiated" | "in_progress" => BadgeStyle::Active,
        "completed" => BadgeStyle::Success,
        "failed" => BadgeStyle::Danger,
        "cancelled" => BadgeStyle::Muted,
        "voicemail" => BadgeStyle::Voicemail,
        _ => BadgeStyle::Pending,
    };
    Badge {
        label: raw.replace('_', " "),
        style,
    }
}
