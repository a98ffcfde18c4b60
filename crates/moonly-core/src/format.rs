//! Human-readable file sizes for media library listings.

const UNITS: [(&str, u64); 5] = [
    ("TB", 1024 * 1024 * 1024 * 1024),
    ("GB", 1024 * 1024 * 1024),
    ("MB", 1024 * 1024),
    ("KB", 1024),
    ("B", 1),
];

/// Format a byte count with 1024-based units and no decimals, e.g. `10 MB`.
///
/// Values are rounded half away from zero and grouped with `,` separators,
/// so `1023` renders as `1,023 B` and `1536` as `2 KB`.
pub fn size_format(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    for (unit, magnitude) in UNITS {
        if bytes >= magnitude {
            let value = (bytes as f64 / magnitude as f64).round() as u64;
            return format!("{} {}", group_thousands(value), unit);
        }
    }

    format!("{} B", bytes)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
