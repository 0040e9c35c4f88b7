//! Prompt construction and tip extraction for free-text health advice

/// Upper bound on tips returned to the caller
pub const MAX_TIPS: usize = 5;

/// Returned whenever the advice provider cannot be used
pub const FALLBACK_TIPS: [&str; 3] = [
    "Stay hydrated by drinking water regularly",
    "Avoid prolonged exposure to direct sunlight",
    "Wear light, breathable clothing",
];

const BULLETS: [char; 3] = ['•', '-', '*'];

/// Characters stripped from the front of a kept line
const MARKER_CHARS: &str = "123456789.•-* ";

#[must_use]
pub fn fallback_tips() -> Vec<String> {
    FALLBACK_TIPS.iter().map(|tip| (*tip).to_string()).collect()
}

#[must_use]
pub fn build_prompt(city: &str, temperature: f64, humidity: f64) -> String {
    format!(
        "The current weather in {city} is {temperature}°C with {humidity}% humidity.\n\
         Give 3 short practical health and hydration tips suitable for this condition.\n\
         Respond in numbered points."
    )
}

/// `1.` through `5.`, or a bullet marker
fn is_tip_line(line: &str) -> bool {
    let mut chars = line.chars();
    match chars.next() {
        Some('1'..='5') => chars.next() == Some('.'),
        Some(c) => BULLETS.contains(&c),
        None => false,
    }
}

/// Pull numbered or bulleted lines out of a free-text reply.
///
/// Keeps at most [`MAX_TIPS`] in reply order. Lines that are empty once their
/// marker is stripped are dropped.
#[must_use]
pub fn extract_tips(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| is_tip_line(line))
        .map(|line| line.trim_start_matches(|c| MARKER_CHARS.contains(c)).trim())
        .filter(|tip| !tip.is_empty())
        .take(MAX_TIPS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_extracts_numbered_and_bulleted_lines() {
        let text = "1. Drink water\n2. Rest\nNotes: ignore this\n- Stay cool";
        assert_eq!(extract_tips(text), vec!["Drink water", "Rest", "Stay cool"]);
    }

    #[test]
    fn test_caps_at_five() {
        let text = (1..=5)
            .map(|i| format!("{i}. Tip {i}"))
            .chain(["- Sixth".to_string(), "* Seventh".to_string()])
            .collect::<Vec<_>>()
            .join("\n");
        let tips = extract_tips(&text);
        assert_eq!(tips.len(), MAX_TIPS);
        assert_eq!(tips[0], "Tip 1");
        assert_eq!(tips[4], "Tip 5");
    }

    #[rstest]
    #[case("   3. Wear a hat  ", vec!["Wear a hat"])]
    #[case("• Use sunscreen", vec!["Use sunscreen"])]
    #[case("* **Hydrate** often", vec!["Hydrate** often"])]
    #[case("6. Out of range", vec![])]
    #[case("10. Two digits", vec![])]
    #[case("1) Wrong punctuation", vec![])]
    #[case("-", vec![])]
    #[case("Here are some tips:", vec![])]
    #[case("", vec![])]
    fn test_line_rules(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(extract_tips(text), expected);
    }

    #[test]
    fn test_handles_crlf_replies() {
        let text = "1. Drink water\r\n2. Rest\r\n";
        assert_eq!(extract_tips(text), vec!["Drink water", "Rest"]);
    }

    #[test]
    fn test_fallback_tips() {
        let tips = fallback_tips();
        assert_eq!(tips.len(), 3);
        assert_eq!(tips[0], "Stay hydrated by drinking water regularly");
    }

    #[test]
    fn test_build_prompt() {
        let prompt = build_prompt("Chennai", 35.2, 68.0);
        assert!(prompt.starts_with("The current weather in Chennai is 35.2°C with 68% humidity."));
        assert!(prompt.ends_with("Respond in numbered points."));
    }
}
