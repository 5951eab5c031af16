use unicode_width::UnicodeWidthStr;

/// Format a duration in seconds to "Xh Ym" or "Ym" string
pub fn format_duration_secs(secs: i64) -> String {
    if secs <= 0 {
        return "now".to_string();
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Format pages as a decimal string, trimming trailing zeros
pub fn format_pages(pages: f64) -> String {
    if pages == pages.floor() {
        format!("{}", pages as i64)
    } else {
        format!("{:.1}", pages)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Pad `s` with spaces to `width` terminal columns, cutting it with an
/// ellipsis when it is wider.
pub fn pad_display(s: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(s);
    if current <= width {
        return format!("{}{}", s, " ".repeat(width - current));
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// "1 day" / "3 days"
pub fn plural(n: u32, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 0, 4), "░░░░");
        assert_eq!(progress_bar(1, 2, 4), "██░░");
        assert_eq!(progress_bar(9, 2, 4), "████");
    }

    #[test]
    fn test_format_pages() {
        assert_eq!(format_pages(20.0), "20");
        assert_eq!(format_pages(20.0 / 3.0), "6.7");
    }

    #[test]
    fn test_pad_display() {
        assert_eq!(pad_display("abc", 5), "abc  ");
        assert_eq!(pad_display("abcdef", 4), "abc…");
        assert_eq!(UnicodeWidthStr::width(pad_display("سُبْحَانَ اللَّهِ", 30).as_str()), 30);
        assert_eq!(pad_display("abc", 0), "");
        assert_eq!(pad_display("abc", 1), "…");
    }

    #[test]
    fn test_duration_and_plural() {
        assert_eq!(format_duration_secs(0), "now");
        assert_eq!(format_duration_secs(3_900), "1h 5m");
        assert_eq!(format_duration_secs(600), "10m");
        assert_eq!(plural(1, "day"), "1 day");
        assert_eq!(plural(2, "day"), "2 days");
    }
}
