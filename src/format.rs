//! Human-friendly number formatting for terminal output.

const SUFFIXES: [&str; 5] = ["", "k", "m", "b", "t"];

/// Abbreviate a count: `1234 -> "1.2k"`, `25_123_456 -> "25m"`.
///
/// Values under 10 of a unit keep one decimal; anything larger is rounded to
/// a whole number. A value that rounds up to 1000 of a unit moves to the next.
pub fn abbreviate_number(value: u64) -> String {
    if value < 1000 {
        return value.to_string();
    }

    let mut unit = 0;
    let mut scaled = value as f64;
    while scaled >= 1000.0 && unit < SUFFIXES.len() - 1 {
        scaled /= 1000.0;
        unit += 1;
    }

    let mut rounded = round_for_display(scaled);
    if rounded >= 1000.0 && unit < SUFFIXES.len() - 1 {
        rounded = round_for_display(rounded / 1000.0);
        unit += 1;
    }

    if rounded.fract() == 0.0 {
        format!("{}{}", rounded as u64, SUFFIXES[unit])
    } else {
        format!("{:.1}{}", rounded, SUFFIXES[unit])
    }
}

fn round_for_display(value: f64) -> f64 {
    if value < 10.0 {
        (value * 10.0).round() / 10.0
    } else {
        value.round()
    }
}
